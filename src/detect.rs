//! Card network detection using prefix and length matching.
//!
//! The Issuer Identification Number (IIN) at the start of a card number
//! identifies the network. Unlike a full brand lookup, a number only
//! classifies once it also has a length the network issues, so partial input
//! stays `Unknown` until the user has typed the whole number.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! | Network | Prefix | Length |
//! |---------|--------|--------|
//! | Visa | 4 | 13, 16 |
//! | Mastercard | 51-55, 2221-2720 | 16 |
//! | American Express | 34, 37 | 15 |
//! | Maestro | 50, 56-58, 6304, 6390, 67 | 12-19 |

use crate::Network;

/// Classifies a card number string.
///
/// The input must be digits only; any other character (including formatting
/// spaces) yields `Network::Unknown`. Never panics.
///
/// # Example
///
/// ```
/// use card_form::{classify, Network};
///
/// assert_eq!(classify("4242424242424242"), Network::Visa);
/// assert_eq!(classify("376680816376961"), Network::Amex);
/// assert_eq!(classify("4242 4242 4242 4242"), Network::Unknown);
/// assert_eq!(classify(""), Network::Unknown);
/// ```
pub fn classify(card_number: &str) -> Network {
    if card_number.is_empty() || card_number.len() > 19 {
        return Network::Unknown;
    }

    let mut digits = [0u8; 19];
    for (i, b) in card_number.bytes().enumerate() {
        if !b.is_ascii_digit() {
            return Network::Unknown;
        }
        digits[i] = b - b'0';
    }

    detect_network(&digits[..card_number.len()])
}

/// Detects the network from a sequence of digits (each 0-9).
///
/// # Example
///
/// ```
/// use card_form::detect::detect_network;
/// use card_form::Network;
///
/// let visa = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];
/// assert_eq!(detect_network(&visa), Network::Visa);
///
/// // Right prefix, wrong length
/// assert_eq!(detect_network(&visa[..15]), Network::Unknown);
/// ```
#[inline]
pub fn detect_network(digits: &[u8]) -> Network {
    let network = match prefix_network(digits) {
        Some(network) => network,
        None => return Network::Unknown,
    };

    if network.is_valid_length(digits.len()) {
        network
    } else {
        Network::Unknown
    }
}

/// Matches only the prefix; length is checked by the caller.
fn prefix_network(digits: &[u8]) -> Option<Network> {
    // Prefix ranges are disjoint, so arm order only matters for readability
    match digits {
        // Visa: starts with 4
        [4, ..] => Some(Network::Visa),

        // Mastercard: 51-55 or 2221-2720
        [5, 1..=5, ..] => Some(Network::Mastercard),
        [2, 2, 2, 1..=9, ..] => Some(Network::Mastercard), // 2221-2229
        [2, 2, 3..=9, _, ..] => Some(Network::Mastercard), // 2230-2299
        [2, 3..=6, _, _, ..] => Some(Network::Mastercard), // 2300-2699
        [2, 7, 0..=1, _, ..] => Some(Network::Mastercard), // 2700-2719
        [2, 7, 2, 0, ..] => Some(Network::Mastercard),     // 2720

        // American Express: 34 or 37
        [3, 4, ..] | [3, 7, ..] => Some(Network::Amex),

        // Maestro: 50, 56-58, 6304, 6390, 67xx
        [5, 0, ..] | [5, 6..=8, ..] => Some(Network::Maestro),
        [6, 3, 0, 4, ..] | [6, 3, 9, 0, ..] => Some(Network::Maestro),
        [6, 7, ..] => Some(Network::Maestro),

        _ => None,
    }
}
