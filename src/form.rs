//! Form data model: field names, field values and per-field error state.
//!
//! The form always has exactly five fields. Both the values ([`CardForm`])
//! and the error state ([`FormErrors`]) are fixed-shape structs with one slot
//! per field, so a partial error map cannot be constructed.

use std::fmt;
use std::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{FieldError, ParseFieldError};

/// One of the five payment form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Field {
    /// The card number.
    CardNumber,
    /// The name printed on the card.
    CardHolder,
    /// Two-digit expiry month.
    ExpiryMonth,
    /// Two-digit expiry year.
    ExpiryYear,
    /// Security code (CVV/CVC/CID).
    Cvv,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 5] = [
        Field::CardNumber,
        Field::CardHolder,
        Field::ExpiryMonth,
        Field::ExpiryYear,
        Field::Cvv,
    ];

    /// The name the UI uses for this field (`cardNumber`, `cvv`, ...).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::CardHolder => "cardHolder",
            Self::ExpiryMonth => "expiryMonth",
            Self::ExpiryYear => "expiryYear",
            Self::Cvv => "cvv",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CardNumber => "Card number",
            Self::CardHolder => "Name on card",
            Self::ExpiryMonth => "Expiry month",
            Self::ExpiryYear => "Expiry year",
            Self::Cvv => "Security code",
        }
    }

    /// Position in [`Field::ALL`].
    const fn index(&self) -> usize {
        match self {
            Self::CardNumber => 0,
            Self::CardHolder => 1,
            Self::ExpiryMonth => 2,
            Self::ExpiryYear => 3,
            Self::Cvv => 4,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = ParseFieldError;

    /// Accepts the UI name (`cardNumber`) as well as `card_number` / `card-number`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "cardnumber" => Ok(Self::CardNumber),
            "cardholder" => Ok(Self::CardHolder),
            "expirymonth" => Ok(Self::ExpiryMonth),
            "expiryyear" => Ok(Self::ExpiryYear),
            "cvv" => Ok(Self::Cvv),
            _ => Err(ParseFieldError {
                name: s.to_string(),
            }),
        }
    }
}

/// The raw values of the five form fields.
///
/// An absent value is the empty string. Values are zeroed when the form is
/// dropped and `Debug` never prints the card number or security code.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CardForm {
    /// The card number, digits only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_number: String,
    /// The card holder name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_holder: String,
    /// Two-digit expiry month.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expiry_month: String,
    /// Two-digit expiry year.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expiry_year: String,
    /// Security code.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cvv: String,
}

impl CardForm {
    /// Creates a form with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::CardNumber => &self.card_number,
            Field::CardHolder => &self.card_holder,
            Field::ExpiryMonth => &self.expiry_month,
            Field::ExpiryYear => &self.expiry_year,
            Field::Cvv => &self.cvv,
        }
    }

    /// Replaces the value of a field, zeroing the old one.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::CardNumber => &mut self.card_number,
            Field::CardHolder => &mut self.card_holder,
            Field::ExpiryMonth => &mut self.expiry_month,
            Field::ExpiryYear => &mut self.expiry_year,
            Field::Cvv => &mut self.cvv,
        };
        slot.zeroize();
        *slot = value.into();
    }

    /// Builder-style [`set`](Self::set).
    ///
    /// # Example
    ///
    /// ```
    /// use card_form::{CardForm, Field};
    ///
    /// let form = CardForm::new()
    ///     .with(Field::CardNumber, "4111111111111111")
    ///     .with(Field::Cvv, "123");
    /// assert_eq!(form.get(Field::Cvv), "123");
    /// ```
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

impl fmt::Debug for CardForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardForm")
            .field("card_number", &"*".repeat(self.card_number.chars().count()))
            .field("card_holder", &self.card_holder)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"*".repeat(self.cvv.chars().count()))
            .finish()
    }
}

/// Validation state of one field.
///
/// A field starts `Clean` and becomes `Checked` the first time it is
/// validated (on blur or on a forced pass). It never goes back to `Clean`;
/// only the error inside `Checked` changes as the user edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Not validated yet; no error is shown.
    #[default]
    Clean,
    /// Validated at least once, with the latest result.
    Checked(Option<FieldError>),
}

impl FieldState {
    /// Returns true once the field has been validated.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        matches!(self, Self::Checked(_))
    }

    /// Returns the current error, if any.
    #[inline]
    pub const fn error(&self) -> Option<FieldError> {
        match self {
            Self::Checked(error) => *error,
            Self::Clean => None,
        }
    }

    /// Returns true if the field currently has an error.
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.error().is_some()
    }

    /// The message to render, `""` when there is none.
    pub const fn message(&self) -> &'static str {
        match self.error() {
            Some(e) => e.message(),
            None => "",
        }
    }

    /// The `{message, error, dirty}` view of this state.
    pub const fn record(&self) -> FieldRecord {
        FieldRecord {
            message: self.message(),
            error: self.has_error(),
            dirty: self.is_dirty(),
        }
    }
}

/// Flat view of a field's error state, as the UI consumes it.
///
/// `error` is always `!message.is_empty()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldRecord {
    /// The error message, empty when valid.
    pub message: &'static str,
    /// Whether the field currently has an error.
    pub error: bool,
    /// Whether the field has been validated and its error may be shown.
    pub dirty: bool,
}

/// Error state for the whole form, one slot per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormErrors {
    states: [FieldState; 5],
}

impl FormErrors {
    /// All fields `Clean`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of a field.
    #[inline]
    pub fn get(&self, field: Field) -> FieldState {
        self.states[field.index()]
    }

    /// Replaces the state of a field.
    #[inline]
    pub fn set(&mut self, field: Field, state: FieldState) {
        self.states[field.index()] = state;
    }

    /// Iterates over `(field, state)` in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldState)> + '_ {
        Field::ALL.iter().map(move |&field| (field, self.get(field)))
    }

    /// Returns true if any field currently has an error.
    pub fn has_errors(&self) -> bool {
        self.states.iter().any(FieldState::has_error)
    }

    /// Returns true if every field has been validated.
    pub fn all_dirty(&self) -> bool {
        self.states.iter().all(FieldState::is_dirty)
    }

    /// The message to show for a field: its error message once it is dirty.
    pub fn visible_message(&self, field: Field) -> Option<&'static str> {
        self.get(field).error().map(|e| e.message())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FormErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for (field, state) in self.iter() {
            map.serialize_entry(field.name(), &state.record())?;
        }
        map.end()
    }
}

/// Result of a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationOutcome {
    /// Error state of every field after the pass.
    pub errors: FormErrors,
    /// True when no field holds an error after the pass.
    pub is_valid: bool,
}
