//! Basic payment form validation example.
//!
//! Run with: `cargo run --example basic`

use card_form::validate::{self, message_for};
use card_form::{classify, CardForm, Field, FormSession};

fn main() {
    println!("=== Basic Card Form Validation ===\n");

    // Example 1: Detect the network of a number
    let test_cards = [
        ("4242424242424242", "Visa"),
        ("5555555555554444", "Mastercard"),
        ("2223000048400011", "Mastercard (2-series)"),
        ("376680816376961", "American Express"),
        ("6304000000000000", "Maestro"),
        ("1234567890123456", "Unknown prefix"),
        ("424242424242424", "Visa prefix, wrong length"),
    ];

    println!("Network detection:");
    for (number, description) in test_cards {
        println!("  {} - {}: {}", number, description, classify(number).name());
    }
    println!();

    // Example 2: Validate single fields
    println!("Field validation:");
    let cases = [
        (Field::CardNumber, "1234"),
        (Field::CardNumber, "4111 1111 1111 1111"),
        (Field::CardHolder, "John Doe"),
        (Field::CardHolder, "R2-D2"),
        (Field::ExpiryMonth, "00"),
        (Field::ExpiryMonth, "1"),
        (Field::ExpiryMonth, "12"),
        (Field::ExpiryYear, "9"),
        (Field::Cvv, "12"),
    ];

    for (field, value) in cases {
        let form = CardForm::new().with(field, value);
        let message = message_for(validate::validate_field(field, &form));
        if message.is_empty() {
            println!("  {} {:?}: ok", field.label(), value);
        } else {
            println!("  {} {:?}: {}", field.label(), value, message);
        }
    }
    println!();

    // Example 3: Submit a whole form
    println!("Submitting forms:");

    let good = CardForm::new()
        .with(Field::CardNumber, "5555555555554444")
        .with(Field::CardHolder, "John Doe")
        .with(Field::ExpiryMonth, "12")
        .with(Field::ExpiryYear, "99")
        .with(Field::Cvv, "123");

    let mut session = FormSession::new();
    let outcome = session.submit(&good);
    println!("  Complete form valid: {}", outcome.is_valid);

    let mut session = FormSession::new();
    let outcome = session.submit(&CardForm::new());
    println!("  Empty form valid: {}", outcome.is_valid);
    for (field, state) in outcome.errors.iter() {
        if let Some(error) = state.error() {
            let kind = if error.is_required() {
                "Required"
            } else {
                "Invalid"
            };
            println!("    {}: {} - {}", field.label(), kind, error);
        }
    }
}
