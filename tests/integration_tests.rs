//! Integration tests for card_form.
//!
//! These tests drive the public API the way a form UI would: field edits,
//! blurs and submit attempts against a session.

use card_form::mask::{self, CardPreview};
use card_form::validate::{self, message_for};
use card_form::{
    classify, format, validate_form, CardForm, Field, FieldError, FieldState, FormErrors,
    FormSession, Network,
};

const YEAR: &str = "26";

// =============================================================================
// TEST CARD NUMBERS
// =============================================================================
// Public test numbers from payment processors. No Luhn check is applied here,
// so only prefix and length matter.

mod test_cards {
    pub const VISA_1: &str = "4242424242424242";
    pub const VISA_2: &str = "4111111111111111";
    pub const VISA_13: &str = "4222222222222";

    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    pub const MC_2SERIES_1: &str = "2223000048400011";
    pub const MC_2SERIES_2: &str = "2720990000000000";

    pub const AMEX_1: &str = "376680816376961";
    pub const AMEX_2: &str = "378282246310005";
    pub const AMEX_3: &str = "340000000000009";

    pub const MAESTRO_1: &str = "6304000000000000";
    pub const MAESTRO_2: &str = "6759649826438453";
    pub const MAESTRO_12: &str = "501800000009";
    pub const MAESTRO_19: &str = "5600000000000000003";
}

fn valid_form() -> CardForm {
    CardForm::new()
        .with(Field::CardNumber, test_cards::MC_1)
        .with(Field::CardHolder, "John Doe")
        .with(Field::ExpiryMonth, "12")
        .with(Field::ExpiryYear, "99")
        .with(Field::Cvv, "123")
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

#[test]
fn test_classify_reference_vectors() {
    assert_eq!(classify("4242424242424242"), Network::Visa);
    assert_eq!(classify("5555555555554444"), Network::Mastercard);
    assert_eq!(classify("376680816376961"), Network::Amex);
    assert_eq!(classify("6304000000000000"), Network::Maestro);
    assert_eq!(classify("1234567890123456"), Network::Unknown);
    assert_eq!(classify("123"), Network::Unknown);
}

#[test]
fn test_classify_all_test_cards() {
    use test_cards::*;

    for card in [VISA_1, VISA_2, VISA_13] {
        assert_eq!(classify(card), Network::Visa, "{}", card);
    }
    for card in [MC_1, MC_2, MC_2SERIES_1, MC_2SERIES_2] {
        assert_eq!(classify(card), Network::Mastercard, "{}", card);
    }
    for card in [AMEX_1, AMEX_2, AMEX_3] {
        assert_eq!(classify(card), Network::Amex, "{}", card);
    }
    for card in [MAESTRO_1, MAESTRO_2, MAESTRO_12, MAESTRO_19] {
        assert_eq!(classify(card), Network::Maestro, "{}", card);
    }
}

#[test]
fn test_classify_wrong_length() {
    // Right prefix, wrong length
    assert_eq!(classify("424242424242424"), Network::Unknown);
    assert_eq!(classify("55555555555544"), Network::Unknown);
    assert_eq!(classify("3766808163769610"), Network::Unknown);
    assert_eq!(classify("63040000000"), Network::Unknown);
    assert_eq!(classify("63040000000000000000"), Network::Unknown);
}

#[test]
fn test_classify_mastercard_2_series_bounds() {
    assert_eq!(classify("2220990000000000"), Network::Unknown);
    assert_eq!(classify("2221000000000000"), Network::Mastercard);
    assert_eq!(classify("2720990000000000"), Network::Mastercard);
    assert_eq!(classify("2721000000000000"), Network::Unknown);
}

#[test]
fn test_classify_rejects_formatted_input() {
    // Callers pass digits only; embedded spaces do not match any pattern.
    assert_eq!(classify("4242 4242 4242 4242"), Network::Unknown);
    assert_eq!(classify(""), Network::Unknown);
}

// =============================================================================
// DISPLAY
// =============================================================================

#[test]
fn test_format_examples() {
    assert_eq!(format::format_card_number(""), "");
    assert_eq!(
        format::format_card_number("1234123412341234"),
        "1234 1234 1234 1234"
    );
    assert_eq!(format::format_card_number("12341234123"), "1234 1234 123");
    assert_eq!(format::format_card_number("1234"), "1234");
}

#[test]
fn test_format_is_idempotent_on_formatted_input() {
    let once = format::format_card_number("376680816376961");
    assert_eq!(once, "3766 8081 6376 961");
    assert_eq!(format::format_card_number(&once), once);
}

#[test]
fn test_mask_examples() {
    assert_eq!(mask::mask_value("", 3, "*"), "***");
    assert_eq!(mask::mask_value("1", 2, "MM"), "1M");
    assert_eq!(mask::mask_value("12345", 3, "*"), "123");
    assert_eq!(mask::mask_value("12", 2, "MM"), "12");
}

#[test]
fn test_mask_lengths_follow_network() {
    assert_eq!(mask::masked_cvv("1", test_cards::AMEX_1), "1***");
    assert_eq!(mask::masked_cvv("1", test_cards::VISA_1), "1**");
    assert_eq!(
        mask::masked_card_number("3766"),
        "3766 **** **** ****"
    );
    assert_eq!(
        mask::masked_card_number(test_cards::AMEX_1),
        "3766 8081 6376 961"
    );
}

#[test]
fn test_preview_of_empty_form() {
    let preview = CardPreview::of(&CardForm::new());
    assert_eq!(preview.network, Network::Unknown);
    assert_eq!(preview.number, "**** **** **** ****");
    assert_eq!(preview.expiry, "MM/YY");
    assert_eq!(preview.cvv, "***");
    assert_eq!(preview.cvv_max_length, 3);
}

#[test]
fn test_display_does_not_touch_input() {
    let form = valid_form();
    let before = form.clone();
    let _ = CardPreview::of(&form);
    let _ = validate_form(&form, &FormErrors::new(), None, true);
    assert_eq!(form, before);
}

// =============================================================================
// FIELD VALIDATORS
// =============================================================================

#[test]
fn test_card_number_scenarios() {
    assert_eq!(
        message_for(validate::validate_card_number("1234")),
        "Invalid card number."
    );
    assert_eq!(
        message_for(validate::validate_card_number("4111111111111111")),
        ""
    );
    assert_eq!(
        message_for(validate::validate_card_number("4111 1111 1111 1111")),
        ""
    );
    assert_eq!(
        message_for(validate::validate_card_number("")),
        "A card number is required."
    );
}

#[test]
fn test_expiry_month_boundaries() {
    assert_eq!(
        validate::validate_expiry_month("00"),
        Err(FieldError::ExpiryMonthOutOfRange)
    );
    assert_eq!(
        validate::validate_expiry_month("13"),
        Err(FieldError::ExpiryMonthOutOfRange)
    );
    assert_eq!(validate::validate_expiry_month("12"), Ok(()));
    assert_eq!(validate::validate_expiry_month("01"), Ok(()));
    assert_eq!(
        validate::validate_expiry_month("1"),
        Err(FieldError::ExpiryMonthFormat)
    );
}

#[test]
fn test_expiry_year_string_comparison() {
    assert_eq!(validate::validate_expiry_year_at("26", YEAR), Ok(()));
    assert_eq!(validate::validate_expiry_year_at("99", YEAR), Ok(()));
    assert_eq!(
        validate::validate_expiry_year_at("25", YEAR),
        Err(FieldError::ExpiryYearInPast)
    );
    // Lexicographic: "100" sorts before "26"
    assert_eq!(
        validate::validate_expiry_year_at("100", YEAR),
        Err(FieldError::ExpiryYearInPast)
    );
}

#[test]
fn test_card_holder_names() {
    assert_eq!(validate::validate_card_holder("John Doe"), Ok(()));
    assert_eq!(validate::validate_card_holder("Åsa Öberg"), Ok(()));
    assert_eq!(
        validate::validate_card_holder("R2 D2"),
        Err(FieldError::CardHolderNotAlphabetic)
    );
    assert_eq!(
        validate::validate_card_holder("O'Brien"),
        Err(FieldError::CardHolderNotAlphabetic)
    );
}

#[test]
fn test_cvv_lengths() {
    assert_eq!(validate::validate_cvv("123"), Ok(()));
    assert_eq!(validate::validate_cvv("1234"), Ok(()));
    assert_eq!(validate::validate_cvv("12"), Err(FieldError::CvvLength));
    assert_eq!(validate::validate_cvv(""), Err(FieldError::CvvRequired));
}

// =============================================================================
// ORCHESTRATION
// =============================================================================

#[test]
fn test_clean_fields_report_nothing() {
    let outcome = validate_form(&CardForm::new(), &FormErrors::new(), None, false);
    for (_, state) in outcome.errors.iter() {
        assert_eq!(state, FieldState::Clean);
        assert!(!state.has_error());
    }
}

#[test]
fn test_forced_pass_on_empty_form() {
    let mut session = FormSession::with_current_year(YEAR);
    let outcome = session.submit(&CardForm::new());

    assert!(!outcome.is_valid);
    assert!(outcome.errors.all_dirty());
    for (field, state) in outcome.errors.iter() {
        let error = state.error().expect("every empty field is required");
        assert!(error.is_required(), "{} should be required", field);
    }
    assert_eq!(
        outcome.errors.get(Field::Cvv).message(),
        "Security code is required."
    );
    assert!(!session.can_submit());
}

#[test]
fn test_full_valid_submission() {
    let mut session = FormSession::with_current_year(YEAR);
    let outcome = session.submit(&valid_form());

    assert!(outcome.is_valid);
    for (_, state) in outcome.errors.iter() {
        assert!(state.is_dirty());
        assert!(!state.has_error());
    }
    assert!(session.can_submit());
}

#[test]
fn test_blur_twice_is_stable() {
    let mut session = FormSession::with_current_year(YEAR);
    let form = CardForm::new().with(Field::CardNumber, "1234");

    session.on_blur(Field::CardNumber, &form);
    let first = session.errors().get(Field::CardNumber);
    session.on_blur(Field::CardNumber, &form);
    let second = session.errors().get(Field::CardNumber);

    assert_eq!(first, second);
    assert_eq!(first.message(), "Invalid card number.");
}

#[test]
fn test_edit_before_blur_stays_silent() {
    let mut session = FormSession::with_current_year(YEAR);
    let mut form = CardForm::new();

    form.set(Field::ExpiryMonth, "1");
    session.on_change(Field::ExpiryMonth, &form);
    assert_eq!(session.errors().get(Field::ExpiryMonth), FieldState::Clean);
    assert_eq!(session.errors().visible_message(Field::ExpiryMonth), None);

    session.on_blur(Field::ExpiryMonth, &form);
    assert_eq!(
        session.errors().visible_message(Field::ExpiryMonth),
        Some("Expiry month must be in the form of MM.")
    );

    form.set(Field::ExpiryMonth, "11");
    session.on_change(Field::ExpiryMonth, &form);
    assert_eq!(
        session.errors().get(Field::ExpiryMonth),
        FieldState::Checked(None)
    );
}

#[test]
fn test_validity_folds_over_unchecked_fields() {
    let mut session = FormSession::with_current_year(YEAR);
    let mut form = CardForm::new();

    // Card holder goes bad and stays bad.
    form.set(Field::CardHolder, "R2D2");
    session.on_blur(Field::CardHolder, &form);

    // A good edit elsewhere does not hide it.
    form.set(Field::Cvv, "123");
    session.on_blur(Field::Cvv, &form);
    assert!(!session.is_valid());
    assert!(session.errors().get(Field::CardHolder).has_error());
}

#[test]
fn test_fix_after_failed_submit() {
    let mut session = FormSession::with_current_year(YEAR);
    let mut form = valid_form();
    form.set(Field::Cvv, "1");

    let outcome = session.submit(&form);
    assert!(!outcome.is_valid);
    assert!(!session.can_submit());

    form.set(Field::Cvv, "123");
    let outcome = session.on_change(Field::Cvv, &form);
    assert!(outcome.is_valid);
    assert!(session.can_submit());
    assert_eq!(session.last_edited(), Some(Field::Cvv));
}

#[test]
fn test_dirty_never_reverts() {
    let mut session = FormSession::with_current_year(YEAR);
    let mut form = valid_form();
    session.submit(&form);

    for field in Field::ALL {
        form.set(field, "");
        session.on_change(field, &form);
        session.on_blur(field, &form);
        assert!(session.errors().get(field).is_dirty());
    }
    assert!(session.errors().all_dirty());
    assert!(!session.can_submit());
}

#[test]
fn test_session_network_follows_form() {
    let session = FormSession::new();
    let form = CardForm::new().with(Field::CardNumber, test_cards::AMEX_1);
    assert_eq!(session.network(&form), Network::Amex);
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[cfg(feature = "serde")]
#[test]
fn test_outcome_json_shape() {
    let outcome = validate_form(&CardForm::new(), &FormErrors::new(), Some(Field::Cvv), true);
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["isValid"], false);
    for name in ["cardNumber", "cardHolder", "expiryMonth", "expiryYear", "cvv"] {
        assert_eq!(json["errors"][name]["dirty"], true, "{}", name);
        assert_eq!(json["errors"][name]["error"], true, "{}", name);
    }
    assert_eq!(
        json["errors"]["cardHolder"]["message"],
        "A card holder name is required."
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_form_json_roundtrip() {
    let form = valid_form();
    let json = serde_json::to_string(&form).unwrap();
    assert!(json.contains("\"cardNumber\""));
    let back: CardForm = serde_json::from_str(&json).unwrap();
    assert_eq!(back, form);
}
