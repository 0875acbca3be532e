//! Fuzz target for field validation.
//!
//! Tests that validators never panic and that every error carries a message.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_form::validate;

fuzz_target!(|data: &str| {
    let results = [
        validate::validate_card_number(data),
        validate::validate_card_holder(data),
        validate::validate_expiry_month(data),
        validate::validate_expiry_year_at(data, "26"),
        validate::validate_cvv(data),
    ];

    for result in results {
        if let Err(e) = result {
            assert!(!e.message().is_empty());
            assert_eq!(validate::message_for(result), e.message());
        }
    }
});
