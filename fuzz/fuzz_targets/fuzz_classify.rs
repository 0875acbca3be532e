//! Fuzz target for network detection.
//!
//! Tests that classify() never panics and only reports a network for a
//! digit string of an accepted length.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_form::{classify, detect};

fuzz_target!(|data: &str| {
    let network = classify(data);
    if network.is_known() {
        assert!(data.bytes().all(|b| b.is_ascii_digit()));
        assert!(network.is_valid_length(data.len()));
    }

    // Also test with raw bytes interpreted as digits
    let digits: Vec<u8> = data.bytes().map(|b| b % 10).collect();
    let _ = detect::detect_network(&digits);
});
