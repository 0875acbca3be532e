//! Card number formatting utilities.
//!
//! The form always displays the card number in blocks of four, whatever the
//! network: `XXXX XXXX XXXX XXXX`, with a short final block when the length
//! is not a multiple of four.
//!
//! # Example
//!
//! ```
//! use card_form::format::{format_card_number, strip_spaces};
//!
//! assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
//! assert_eq!(format_card_number("12341234123"), "1234 1234 123");
//!
//! // Formatting is idempotent
//! let once = format_card_number("4111111111111111");
//! assert_eq!(format_card_number(&once), once);
//!
//! assert_eq!(strip_spaces("4111 1111 1111 1111"), "4111111111111111");
//! ```

/// Number of characters per display block.
pub const GROUP_SIZE: usize = 4;

/// Formats a card number in blocks of four separated by single spaces.
///
/// Existing whitespace is removed first, so already formatted input comes
/// back unchanged. No trailing space is ever produced. Works on any string;
/// non-digit characters are grouped like digits.
///
/// # Example
///
/// ```
/// use card_form::format::format_card_number;
///
/// assert_eq!(format_card_number(""), "");
/// assert_eq!(format_card_number("1234"), "1234");
/// assert_eq!(format_card_number("1234 1234 1234 1234"), "1234 1234 1234 1234");
/// ```
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats a card number in blocks of four with a custom separator.
///
/// # Example
///
/// ```
/// use card_form::format::format_with_separator;
///
/// assert_eq!(format_with_separator("4111111111111111", "-"), "4111-1111-1111-1111");
/// ```
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let mut result = String::with_capacity(input.len() + input.len() / GROUP_SIZE * separator.len());

    for (i, c) in input.chars().filter(|c| !c.is_whitespace()).enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }

    result
}

/// Removes every `' '` from the input.
///
/// This is the normalisation the card-number validator applies; other
/// whitespace is left in place and will fail classification.
///
/// # Example
///
/// ```
/// use card_form::format::strip_spaces;
///
/// assert_eq!(strip_spaces("4111 1111 1111 1111"), "4111111111111111");
/// assert_eq!(strip_spaces("4111\t1111"), "4111\t1111");
/// ```
pub fn strip_spaces(input: &str) -> String {
    input.chars().filter(|&c| c != ' ').collect()
}

/// Splits a card number into its display blocks.
///
/// # Example
///
/// ```
/// use card_form::format::split_into_groups;
///
/// assert_eq!(split_into_groups("411111111"), vec!["4111", "1111", "1"]);
/// ```
pub fn split_into_groups(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    chars
        .chunks(GROUP_SIZE)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
