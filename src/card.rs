//! Core card types for the payment form.
//!
//! This module provides the `Network` enum identifying the card scheme a
//! number belongs to, together with the display sizes that depend on it.

use std::fmt;

/// Card networks recognised by the form.
///
/// Each variant represents a payment scheme with its own prefix ranges and
/// accepted lengths. Anything else classifies as [`Network::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Network {
    /// Visa - Prefix 4, lengths 13, 16
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Maestro - Prefix 50, 56-58, 6304, 6390, 67, length 12-19
    Maestro,
    /// No known network matched.
    #[default]
    Unknown,
}

impl Network {
    /// All known networks, in classification order.
    pub const KNOWN: [Network; 4] = [
        Network::Visa,
        Network::Mastercard,
        Network::Amex,
        Network::Maestro,
    ];

    /// Returns the valid lengths for this network.
    #[inline]
    pub const fn valid_lengths(&self) -> &'static [u8] {
        match self {
            Self::Visa => &[13, 16],
            Self::Mastercard => &[16],
            Self::Amex => &[15],
            Self::Maestro => &[12, 13, 14, 15, 16, 17, 18, 19],
            Self::Unknown => &[],
        }
    }

    /// Returns true if the given length is valid for this network.
    #[inline]
    pub const fn is_valid_length(&self, length: usize) -> bool {
        let valid = self.valid_lengths();
        let mut i = 0;
        while i < valid.len() {
            if valid[i] as usize == length {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Returns a human-readable name for the network.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Maestro => "Maestro",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the lowercase identifier used by the UI to pick a logo.
    ///
    /// `Unknown` maps to the empty string, meaning "show no logo".
    #[inline]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Maestro => "maestro",
            Self::Unknown => "",
        }
    }

    /// Returns true for every variant except `Unknown`.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Number of characters shown in the security-code display.
    ///
    /// - American Express: 4
    /// - All other networks: 3
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }

    /// Number of digits shown in the masked card-number display.
    ///
    /// - American Express: 15
    /// - All other networks: 16
    #[inline]
    pub const fn display_length(&self) -> usize {
        match self {
            Self::Amex => 15,
            _ => 16,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
