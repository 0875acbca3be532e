//! WebAssembly bindings for the payment form engine.
//!
//! This module provides JavaScript-friendly bindings for the card_form library.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { classify, format_card, FormSession } from 'card_form';
//!
//! await init();
//!
//! classify("4242424242424242");   // "visa"
//! format_card("4242424242424242"); // "4242 4242 4242 4242"
//!
//! const session = new FormSession();
//! session.set("cardNumber", "1234");
//! session.blur("cardNumber");
//! session.message("cardNumber");   // "Invalid card number."
//!
//! const outcome = JSON.parse(session.submit());
//! if (outcome.isValid) {
//!     // send the form
//! }
//! ```

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{CardForm, CardPreview, Field};

fn parse_field(name: &str) -> Result<Field, JsValue> {
    name.parse::<Field>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Classifies a card number.
///
/// Returns `"visa"`, `"mastercard"`, `"amex"`, `"maestro"` or `""`.
///
/// # Example
/// ```javascript
/// classify("376680816376961")  // "amex"
/// ```
#[wasm_bindgen]
pub fn classify(card_number: &str) -> String {
    crate::classify(card_number).id().to_string()
}

/// Formats a card number in blocks of four.
///
/// # Example
/// ```javascript
/// format_card("12341234123")  // "1234 1234 123"
/// ```
#[wasm_bindgen]
pub fn format_card(card_number: &str) -> String {
    crate::format::format_card_number(card_number)
}

/// Overlays a placeholder onto a value up to `length` characters.
///
/// # Example
/// ```javascript
/// mask_value("1", 2, "MM")  // "1M"
/// ```
#[wasm_bindgen]
pub fn mask_value(value: &str, length: usize, placeholder: &str) -> String {
    crate::mask::mask_value(value, length, placeholder)
}

/// Returns the validation message for a single field value, `""` if valid.
///
/// # Example
/// ```javascript
/// validate_field("cvv", "12")  // "Security code must be 3 or 4 digits."
/// ```
#[wasm_bindgen]
pub fn validate_field(field: &str, value: &str) -> Result<String, JsValue> {
    let field = parse_field(field)?;
    let form = CardForm::new().with(field, value);
    Ok(crate::validate::message_for(crate::validate::validate_field(field, &form)).to_string())
}

/// A form session held on the Rust side.
///
/// Field values live in the session so the UI only forwards events.
#[wasm_bindgen(js_name = FormSession)]
pub struct WasmFormSession {
    form: CardForm,
    session: crate::FormSession,
}

#[wasm_bindgen(js_class = FormSession)]
impl WasmFormSession {
    /// Starts an empty session.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmFormSession {
        WasmFormSession {
            form: CardForm::new(),
            session: crate::FormSession::new(),
        }
    }

    /// Stores a new value for a field and re-validates it if it is dirty.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), JsValue> {
        let field = parse_field(field)?;
        self.form.set(field, value);
        self.session.on_change(field, &self.form);
        Ok(())
    }

    /// Handles focus leaving a field.
    pub fn blur(&mut self, field: &str) -> Result<(), JsValue> {
        let field = parse_field(field)?;
        self.session.on_blur(field, &self.form);
        Ok(())
    }

    /// Forces validation of every field; returns the outcome as JSON.
    pub fn submit(&mut self) -> Result<String, JsValue> {
        let outcome = self.session.submit(&self.form);
        to_json(&outcome)
    }

    /// Message to show under a field, `""` when none.
    pub fn message(&self, field: &str) -> Result<String, JsValue> {
        let field = parse_field(field)?;
        Ok(self.session.errors().get(field).message().to_string())
    }

    /// Whether the submit button should be enabled.
    #[wasm_bindgen(getter)]
    pub fn can_submit(&self) -> bool {
        self.session.can_submit()
    }

    /// Current error state of every field as JSON.
    pub fn errors(&self) -> Result<String, JsValue> {
        to_json(self.session.errors())
    }

    /// Display strings for the card preview as JSON.
    pub fn preview(&self) -> Result<String, JsValue> {
        to_json(&CardPreview::of(&self.form))
    }

    /// Field names in form order.
    pub fn fields() -> js_sys::Array {
        Field::ALL
            .iter()
            .map(|f| JsValue::from_str(f.name()))
            .collect()
    }
}

impl Default for WasmFormSession {
    fn default() -> Self {
        Self::new()
    }
}
