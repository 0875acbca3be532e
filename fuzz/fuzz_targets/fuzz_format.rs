//! Fuzz target for formatting and masking.
//!
//! Tests that display helpers never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_form::{format, mask};

fuzz_target!(|data: &str| {
    // These should never panic
    let _ = format::format_with_separator(data, "-");
    let _ = format::format_with_separator(data, "");
    let _ = format::split_into_groups(data);
    let _ = mask::masked_card_number(data);
    let _ = mask::masked_cvv(data, data);
    let _ = mask::masked_expiry(data, data);

    // Formatting is idempotent
    let formatted = format::format_card_number(data);
    assert_eq!(format::format_card_number(&formatted), formatted);

    // Masks are exactly the requested length
    for len in [0, 2, 3, 4, 15, 16] {
        assert_eq!(mask::mask_value(data, len, "*").chars().count(), len);
    }
});
