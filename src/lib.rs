//! # card_form
//!
//! Payment card form engine for Rust. Work in progress.
//!
//! ## Features
//!
//! - Card network detection (Visa, Mastercard, American Express, Maestro)
//! - Card number grouping and "reveal as typed" display masking
//! - Per-field validation with user-facing messages
//! - Dirty tracking: errors show up only after a field was left or on submit
//! - Multiple interfaces: library, CLI, REST API, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use card_form::{classify, CardForm, Field, FormSession, Network};
//!
//! assert_eq!(classify("4242424242424242"), Network::Visa);
//!
//! let mut session = FormSession::new();
//! let form = CardForm::new()
//!     .with(Field::CardNumber, "5555555555554444")
//!     .with(Field::CardHolder, "John Doe")
//!     .with(Field::ExpiryMonth, "12")
//!     .with(Field::ExpiryYear, "99")
//!     .with(Field::Cvv, "123");
//!
//! let outcome = session.submit(&form);
//! assert!(outcome.is_valid);
//! assert!(session.can_submit());
//! ```
//!
//! ## Field Validation
//!
//! ```rust
//! use card_form::validate::{validate_expiry_month, message_for};
//! use card_form::FieldError;
//!
//! assert_eq!(validate_expiry_month("13"), Err(FieldError::ExpiryMonthOutOfRange));
//! assert_eq!(message_for(validate_expiry_month("1")), "Expiry month must be in the form of MM.");
//! assert_eq!(message_for(validate_expiry_month("12")), "");
//! ```
//!
//! ## Display
//!
//! ```rust
//! use card_form::{format, mask};
//!
//! assert_eq!(format::format_card_number("1234123412341234"), "1234 1234 1234 1234");
//! assert_eq!(mask::masked_card_number("4242"), "4242 **** **** ****");
//! assert_eq!(mask::masked_expiry("0", ""), "0M/YY");
//! ```
//!
//! ## Supported Networks
//!
//! | Network | Prefix | Length | Security code |
//! |---------|--------|--------|---------------|
//! | Visa | 4 | 13, 16 | 3 |
//! | Mastercard | 51-55, 2221-2720 | 16 | 3 |
//! | American Express | 34, 37 | 15 | 4 |
//! | Maestro | 50, 56-58, 6304, 6390, 67 | 12-19 | 3 |
//!
//! No Luhn checksum is computed; a number is accepted when its prefix and
//! length match a network.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | JSON (de)serialization of forms and outcomes |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Threading
//!
//! Everything here is synchronous and runs to completion. [`FormSession`]
//! takes `&mut self` for every event, so one session must not be driven from
//! several threads without a lock around it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod detect;
pub mod error;
pub mod form;
pub mod format;
pub mod mask;
pub mod session;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::Network;
pub use detect::classify;
pub use error::{FieldError, ParseFieldError};
pub use form::{CardForm, Field, FieldRecord, FieldState, FormErrors, ValidationOutcome};
pub use mask::CardPreview;
pub use session::{validate_form, FormSession};
