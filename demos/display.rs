//! Card preview example: what the card graphic shows while typing.
//!
//! Run with: `cargo run --example display`

use card_form::mask::{mask_value, CardPreview, MONTH_PLACEHOLDER};
use card_form::{format, CardForm, Field};

fn main() {
    println!("=== Card Display ===\n");

    // Example 1: Grouping
    println!("Grouping:");
    for input in ["", "1234", "12341234123", "1234 1234 1234 1234"] {
        println!("  {:?} -> {:?}", input, format::format_card_number(input));
    }
    println!();

    // Example 2: Reveal as typed
    println!("Masking:");
    for typed in ["", "0", "09", "091"] {
        println!("  {:?} -> {}", typed, mask_value(typed, 2, MONTH_PLACEHOLDER));
    }
    println!();

    // Example 3: Preview while an Amex number is typed
    println!("Preview:");
    let number = "376680816376961";
    let mut form = CardForm::new()
        .with(Field::CardHolder, "Åsa Öberg")
        .with(Field::ExpiryMonth, "0");

    for end in [0, 2, 6, 10, 15] {
        form.set(Field::CardNumber, &number[..end]);
        let preview = CardPreview::of(&form);
        println!(
            "  [{:<8}] {:<19}  {}  {}  cvv {}",
            preview.network.name(),
            preview.number,
            preview.holder,
            preview.expiry,
            preview.cvv
        );
    }
}
