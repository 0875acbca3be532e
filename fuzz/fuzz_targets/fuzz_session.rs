//! Fuzz target for the form session.
//!
//! Replays arbitrary event sequences and checks the dirty and validity
//! rules after each one.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use card_form::{CardForm, Field, FormSession};

#[derive(Debug, Arbitrary)]
enum Event {
    Edit(u8, String),
    Blur(u8),
    Submit,
}

fn field(index: u8) -> Field {
    Field::ALL[index as usize % Field::ALL.len()]
}

fuzz_target!(|events: Vec<Event>| {
    let mut session = FormSession::with_current_year("26");
    let mut form = CardForm::new();

    for event in events {
        let before = *session.errors();
        match event {
            Event::Edit(index, value) => {
                let field = field(index);
                form.set(field, value);
                session.on_change(field, &form);
            }
            Event::Blur(index) => {
                let field = field(index);
                let was_dirty = before.get(field).is_dirty();
                session.on_blur(field, &form);
                if was_dirty {
                    assert_eq!(*session.errors(), before);
                }
            }
            Event::Submit => {
                let outcome = session.submit(&form);
                assert!(outcome.errors.all_dirty());
            }
        }

        // Dirty never reverts
        for (field, state) in before.iter() {
            if state.is_dirty() {
                assert!(session.errors().get(field).is_dirty());
            }
        }
        assert_eq!(session.is_valid(), !session.errors().has_errors());
    }
});
