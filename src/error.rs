//! Error types for payment form validation.
//!
//! A field validation failure is the only failure the engine produces. Each
//! variant of [`FieldError`] carries exactly one user-facing message, which is
//! what the form renders under the field.

use crate::Field;
use std::fmt;

/// Why a single form field failed validation.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// The card number is empty once spaces are removed.
    CardNumberRequired,

    /// The card number does not belong to a supported network.
    InvalidCardNumber,

    /// The card holder name is empty.
    CardHolderRequired,

    /// The card holder name contains something other than letters and spaces.
    CardHolderNotAlphabetic,

    /// The expiry month is empty.
    ExpiryMonthRequired,

    /// The expiry month is shorter than two characters.
    ExpiryMonthFormat,

    /// The expiry month is not a number between 1 and 12.
    ExpiryMonthOutOfRange,

    /// The expiry year is empty.
    ExpiryYearRequired,

    /// The expiry year is shorter than two characters.
    ExpiryYearFormat,

    /// The expiry year sorts before the current two-digit year.
    ExpiryYearInPast,

    /// The security code is empty.
    CvvRequired,

    /// The security code is shorter than three characters.
    CvvLength,
}

impl FieldError {
    /// Every error, grouped by field in form order.
    pub const ALL: [FieldError; 12] = [
        Self::CardNumberRequired,
        Self::InvalidCardNumber,
        Self::CardHolderRequired,
        Self::CardHolderNotAlphabetic,
        Self::ExpiryMonthRequired,
        Self::ExpiryMonthFormat,
        Self::ExpiryMonthOutOfRange,
        Self::ExpiryYearRequired,
        Self::ExpiryYearFormat,
        Self::ExpiryYearInPast,
        Self::CvvRequired,
        Self::CvvLength,
    ];

    /// Looks an error up by its exact user-facing message.
    ///
    /// # Example
    ///
    /// ```
    /// use card_form::FieldError;
    ///
    /// assert_eq!(
    ///     FieldError::from_message("Invalid card number."),
    ///     Some(FieldError::InvalidCardNumber)
    /// );
    /// assert_eq!(FieldError::from_message("Something went wrong."), None);
    /// ```
    pub fn from_message(message: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.message() == message)
    }

    /// Returns the user-facing message for this error.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::CardNumberRequired => "A card number is required.",
            Self::InvalidCardNumber => "Invalid card number.",
            Self::CardHolderRequired => "A card holder name is required.",
            Self::CardHolderNotAlphabetic => {
                "A card holder name must contain only alphabetic characters."
            }
            Self::ExpiryMonthRequired => "Expiry month is required.",
            Self::ExpiryMonthFormat => "Expiry month must be in the form of MM.",
            Self::ExpiryMonthOutOfRange => "Expiry month must be between 01-12.",
            Self::ExpiryYearRequired => "Expiry year is required.",
            Self::ExpiryYearFormat => "Expiry year must be in the form of YY.",
            Self::ExpiryYearInPast => "Expiry year cannot be in the past.",
            Self::CvvRequired => "Security code is required.",
            Self::CvvLength => "Security code must be 3 or 4 digits.",
        }
    }

    /// Returns the field this error belongs to.
    pub const fn field(&self) -> Field {
        match self {
            Self::CardNumberRequired | Self::InvalidCardNumber => Field::CardNumber,
            Self::CardHolderRequired | Self::CardHolderNotAlphabetic => Field::CardHolder,
            Self::ExpiryMonthRequired | Self::ExpiryMonthFormat | Self::ExpiryMonthOutOfRange => {
                Field::ExpiryMonth
            }
            Self::ExpiryYearRequired | Self::ExpiryYearFormat | Self::ExpiryYearInPast => {
                Field::ExpiryYear
            }
            Self::CvvRequired | Self::CvvLength => Field::Cvv,
        }
    }

    /// Returns true for the "field is required" variants.
    pub const fn is_required(&self) -> bool {
        matches!(
            self,
            Self::CardNumberRequired
                | Self::CardHolderRequired
                | Self::ExpiryMonthRequired
                | Self::ExpiryYearRequired
                | Self::CvvRequired
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FieldError {}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// A field name that does not match any form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    /// The name that was given.
    pub name: String,
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown field '{}' (expected one of cardNumber, cardHolder, expiryMonth, expiryYear, cvv)",
            self.name.escape_default()
        )
    }
}

impl std::error::Error for ParseFieldError {}
