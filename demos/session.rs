//! Form session example: replays the events a UI would send.
//!
//! Run with: `cargo run --example session`

use card_form::{CardForm, Field, FormSession};

enum Event {
    Type(Field, &'static str),
    Blur(Field),
    Submit,
}

fn main() {
    println!("=== Form Session ===\n");

    let events = [
        Event::Type(Field::CardNumber, "4242"),
        Event::Type(Field::CardNumber, "42424242"),
        Event::Blur(Field::CardNumber),
        Event::Type(Field::CardNumber, "4242424242424242"),
        Event::Type(Field::CardHolder, "Jane 0"),
        Event::Blur(Field::CardHolder),
        Event::Type(Field::CardHolder, "Jane Roe"),
        Event::Submit,
        Event::Type(Field::ExpiryMonth, "11"),
        Event::Type(Field::ExpiryYear, "99"),
        Event::Type(Field::Cvv, "321"),
    ];

    let mut session = FormSession::new();
    let mut form = CardForm::new();

    for event in events {
        match event {
            Event::Type(field, value) => {
                form.set(field, value);
                session.on_change(field, &form);
                println!("type  {:<14} {:?}", field.label(), value);
            }
            Event::Blur(field) => {
                session.on_blur(field, &form);
                println!("blur  {}", field.label());
            }
            Event::Submit => {
                let outcome = session.submit(&form);
                println!("submit -> valid: {}", outcome.is_valid);
            }
        }

        for (field, _) in session.errors().iter() {
            if let Some(message) = session.errors().visible_message(field) {
                println!("      ! {}: {}", field.label(), message);
            }
        }
        println!("      can submit: {}", session.can_submit());
    }
}
