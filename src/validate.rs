//! Per-field validation rules for the payment form.
//!
//! Each validator takes the raw field value and returns `Ok(())` when the
//! field is acceptable, or the first [`FieldError`] its rules hit. Rules are
//! checked in a fixed order and the first failure wins.
//!
//! Validators are total: any string, including empty, overlong or
//! non-ASCII input, produces a result and never panics.
//!
//! # Example
//!
//! ```
//! use card_form::validate::{validate_card_number, validate_cvv, message_for};
//! use card_form::FieldError;
//!
//! assert!(validate_card_number("4111 1111 1111 1111").is_ok());
//! assert_eq!(validate_card_number("1234"), Err(FieldError::InvalidCardNumber));
//!
//! assert_eq!(message_for(validate_cvv("12")), "Security code must be 3 or 4 digits.");
//! assert_eq!(message_for(validate_cvv("123")), "");
//! ```

use chrono::Datelike;

use crate::detect::classify;
use crate::error::FieldError;
use crate::format::strip_spaces;
use crate::{CardForm, Field};

/// Result of validating one field.
pub type FieldResult = Result<(), FieldError>;

/// Turns a validation result into the message string the form renders.
///
/// Valid fields map to `""`.
pub fn message_for(result: FieldResult) -> &'static str {
    match result {
        Ok(()) => "",
        Err(e) => e.message(),
    }
}

/// Validates the card number.
///
/// Spaces are removed first; the remaining string must classify as a known
/// network. No checksum is computed.
pub fn validate_card_number(card_number: &str) -> FieldResult {
    let digits = strip_spaces(card_number);

    if digits.is_empty() {
        return Err(FieldError::CardNumberRequired);
    }

    if !classify(&digits).is_known() {
        return Err(FieldError::InvalidCardNumber);
    }

    Ok(())
}

/// Validates the card holder name.
///
/// Accepts ASCII letters, the Nordic letters `å ä ö Å Ä Ö`, and spaces.
pub fn validate_card_holder(card_holder: &str) -> FieldResult {
    if card_holder.is_empty() {
        return Err(FieldError::CardHolderRequired);
    }

    if !card_holder.chars().all(is_name_char) {
        return Err(FieldError::CardHolderNotAlphabetic);
    }

    Ok(())
}

#[inline]
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ' ' | 'å' | 'ä' | 'ö' | 'Å' | 'Ä' | 'Ö')
}

/// Validates the two-digit expiry month.
///
/// Anything that does not parse as an integer counts as out of range.
pub fn validate_expiry_month(expiry_month: &str) -> FieldResult {
    if expiry_month.is_empty() {
        return Err(FieldError::ExpiryMonthRequired);
    }

    if expiry_month.chars().count() < 2 {
        return Err(FieldError::ExpiryMonthFormat);
    }

    match expiry_month.trim().parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(()),
        _ => Err(FieldError::ExpiryMonthOutOfRange),
    }
}

/// Validates the two-digit expiry year against the local clock.
pub fn validate_expiry_year(expiry_year: &str) -> FieldResult {
    validate_expiry_year_at(expiry_year, &current_two_digit_year())
}

/// Validates the two-digit expiry year against a given current year.
///
/// `current_year` is the zero-padded two-digit year, e.g. `"26"`. The
/// comparison is a plain string comparison, so it is only meaningful for two
/// digit inputs: `"9"` would sort after `"10"`, but one-digit years are
/// already rejected by the length rule.
///
/// # Example
///
/// ```
/// use card_form::validate::validate_expiry_year_at;
/// use card_form::FieldError;
///
/// assert!(validate_expiry_year_at("26", "26").is_ok());
/// assert_eq!(validate_expiry_year_at("25", "26"), Err(FieldError::ExpiryYearInPast));
/// ```
pub fn validate_expiry_year_at(expiry_year: &str, current_year: &str) -> FieldResult {
    if expiry_year.is_empty() {
        return Err(FieldError::ExpiryYearRequired);
    }

    if expiry_year.chars().count() < 2 {
        return Err(FieldError::ExpiryYearFormat);
    }

    if expiry_year < current_year {
        return Err(FieldError::ExpiryYearInPast);
    }

    Ok(())
}

/// Validates the security code.
///
/// Only presence and a minimum length of three are checked; the form input
/// limits the maximum length by network.
pub fn validate_cvv(cvv: &str) -> FieldResult {
    if cvv.is_empty() {
        return Err(FieldError::CvvRequired);
    }

    if cvv.chars().count() < 3 {
        return Err(FieldError::CvvLength);
    }

    Ok(())
}

/// Runs the validator for `field` on its value in `form`.
pub fn validate_field(field: Field, form: &CardForm) -> FieldResult {
    validate_field_at(field, form, &current_two_digit_year())
}

/// Like [`validate_field`], with the current two-digit year supplied.
pub fn validate_field_at(field: Field, form: &CardForm, current_year: &str) -> FieldResult {
    let value = form.get(field);
    match field {
        Field::CardNumber => validate_card_number(value),
        Field::CardHolder => validate_card_holder(value),
        Field::ExpiryMonth => validate_expiry_month(value),
        Field::ExpiryYear => validate_expiry_year_at(value, current_year),
        Field::Cvv => validate_cvv(value),
    }
}

/// Returns the current local year as a zero-padded two-digit string.
pub fn current_two_digit_year() -> String {
    format!("{:02}", chrono::Local::now().year().rem_euclid(100))
}
