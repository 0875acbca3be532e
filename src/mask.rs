//! Display masking for the card preview.
//!
//! Masking here is a "reveal as typed" overlay: the characters the user has
//! entered are shown as-is and a placeholder fills the rest of the field, so
//! the preview always has the final width. It is not a redaction mechanism;
//! use the `Debug` impl of [`CardForm`](crate::CardForm) when a value must
//! not leak into logs.
//!
//! # Example
//!
//! ```
//! use card_form::mask::{mask_value, masked_card_number, masked_cvv, masked_expiry};
//!
//! assert_eq!(mask_value("12", 5, "*"), "12***");
//! assert_eq!(masked_card_number("4111"), "4111 **** **** ****");
//! assert_eq!(masked_cvv("1", "378282246310005"), "1***");
//! assert_eq!(masked_expiry("1", ""), "1M/YY");
//! ```

use crate::detect::classify;
use crate::format::format_card_number;
use crate::{CardForm, Network};

/// Placeholder used for card number and security code.
pub const MASK_CHAR: &str = "*";

/// Placeholder used for the expiry month.
pub const MONTH_PLACEHOLDER: &str = "MM";

/// Placeholder used for the expiry year.
pub const YEAR_PLACEHOLDER: &str = "YY";

/// Overlays `placeholder` onto `value` up to `target_len` characters.
///
/// The value's characters come first, then the placeholder repeated as often
/// as needed, and the whole is cut to `target_len`. If the value is already
/// `target_len` characters or longer, the result is its first `target_len`
/// characters. An empty placeholder leaves short values unpadded.
///
/// Lengths are counted in `char`s.
///
/// # Example
///
/// ```
/// use card_form::mask::mask_value;
///
/// assert_eq!(mask_value("", 3, "*"), "***");
/// assert_eq!(mask_value("1", 2, "MM"), "1M");
/// assert_eq!(mask_value("12345", 3, "*"), "123");
/// ```
pub fn mask_value(value: &str, target_len: usize, placeholder: &str) -> String {
    let mut result = String::with_capacity(value.len().min(target_len));
    let mut written = 0;

    for c in value.chars().take(target_len) {
        result.push(c);
        written += 1;
    }

    for c in placeholder.chars().cycle().take(target_len - written) {
        result.push(c);
    }

    result
}

/// Masked card number for the card preview, grouped in blocks of four.
///
/// The number is padded with `*` to 15 characters for American Express and
/// 16 for every other network (including unknown).
///
/// # Example
///
/// ```
/// use card_form::mask::masked_card_number;
///
/// assert_eq!(masked_card_number(""), "**** **** **** ****");
/// assert_eq!(masked_card_number("378282246310005"), "3782 8224 6310 005");
/// ```
pub fn masked_card_number(card_number: &str) -> String {
    mask_card_number(card_number, classify(card_number))
}

fn mask_card_number(card_number: &str, network: Network) -> String {
    format_card_number(&mask_value(card_number, network.display_length(), MASK_CHAR))
}

/// Masked security code, sized by the network of `card_number`.
///
/// # Example
///
/// ```
/// use card_form::mask::masked_cvv;
///
/// assert_eq!(masked_cvv("", "4242424242424242"), "***");
/// assert_eq!(masked_cvv("", "378282246310005"), "****");
/// ```
pub fn masked_cvv(cvv: &str, card_number: &str) -> String {
    mask_cvv(cvv, classify(card_number))
}

fn mask_cvv(cvv: &str, network: Network) -> String {
    mask_value(cvv, network.cvv_length(), MASK_CHAR)
}

/// Masked expiry date in the form `MM/YY`.
///
/// # Example
///
/// ```
/// use card_form::mask::masked_expiry;
///
/// assert_eq!(masked_expiry("", ""), "MM/YY");
/// assert_eq!(masked_expiry("09", "2"), "09/2Y");
/// ```
pub fn masked_expiry(month: &str, year: &str) -> String {
    format!(
        "{}/{}",
        mask_value(month, 2, MONTH_PLACEHOLDER),
        mask_value(year, 2, YEAR_PLACEHOLDER)
    )
}

/// Everything the card preview and inputs need to render one form state.
///
/// Built from the current values on every render; holds no reference to the
/// form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CardPreview {
    /// Classified network, for the logo.
    pub network: Network,
    /// Card number as shown in the input, in blocks of four.
    pub number_input: String,
    /// Masked card number for the preview.
    pub number: String,
    /// Card holder name as typed.
    pub holder: String,
    /// Masked `MM/YY` expiry.
    pub expiry: String,
    /// Masked security code.
    pub cvv: String,
    /// Maximum length of the security-code input.
    pub cvv_max_length: usize,
}

impl CardPreview {
    /// Builds the preview for the current form values.
    ///
    /// # Example
    ///
    /// ```
    /// use card_form::mask::CardPreview;
    /// use card_form::{CardForm, Field, Network};
    ///
    /// let form = CardForm::new().with(Field::CardNumber, "378282246310005");
    /// let preview = CardPreview::of(&form);
    /// assert_eq!(preview.network, Network::Amex);
    /// assert_eq!(preview.cvv, "****");
    /// assert_eq!(preview.cvv_max_length, 4);
    /// ```
    pub fn of(form: &CardForm) -> Self {
        let network = classify(&form.card_number);
        Self {
            network,
            number_input: format_card_number(&form.card_number),
            number: mask_card_number(&form.card_number, network),
            holder: form.card_holder.clone(),
            expiry: masked_expiry(&form.expiry_month, &form.expiry_year),
            cvv: mask_cvv(&form.cvv, network),
            cvv_max_length: network.cvv_length(),
        }
    }
}
