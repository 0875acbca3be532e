//! Dirty-tracking orchestration of form validation.
//!
//! Errors are only surfaced for fields the user has finished with. A field
//! becomes dirty the first time it loses focus, or for every field at once
//! when the user tries to submit. After that, each edit re-validates the
//! edited field so its message tracks the input.
//!
//! A validation pass has two steps:
//!
//! 1. re-run the validators of the selected fields and store their results,
//! 2. fold over all five stored states to compute the aggregate verdict.
//!
//! Fields that were not selected keep their previous state and still count
//! towards the verdict.
//!
//! # Example
//!
//! ```
//! use card_form::{CardForm, Field, FormSession};
//!
//! let mut session = FormSession::new();
//! let mut form = CardForm::new().with(Field::CardNumber, "1234");
//!
//! // Nothing is reported until the field has been left once
//! assert!(!session.errors().get(Field::CardNumber).has_error());
//!
//! session.on_blur(Field::CardNumber, &form);
//! assert_eq!(
//!     session.errors().get(Field::CardNumber).message(),
//!     "Invalid card number."
//! );
//!
//! // Edits to a dirty field are validated immediately
//! form.set(Field::CardNumber, "4111111111111111");
//! session.on_change(Field::CardNumber, &form);
//! assert!(!session.errors().get(Field::CardNumber).has_error());
//! ```

use tracing::{debug, trace};

use crate::detect::classify;
use crate::form::{CardForm, Field, FieldState, FormErrors, ValidationOutcome};
use crate::validate::{current_two_digit_year, validate_field_at};
use crate::Network;

/// Runs one validation pass over a copy of `errors`.
///
/// A field's validator runs when `force` is set, or when the field is already
/// dirty and `field` is either `None` or names that field. With `force`, every
/// field ends up dirty. `errors` itself is left untouched; the updated state
/// is returned in the outcome.
///
/// # Example
///
/// ```
/// use card_form::{validate_form, CardForm, FormErrors};
///
/// let outcome = validate_form(&CardForm::new(), &FormErrors::new(), None, true);
/// assert!(!outcome.is_valid);
/// assert!(outcome.errors.all_dirty());
/// ```
pub fn validate_form(
    form: &CardForm,
    errors: &FormErrors,
    field: Option<Field>,
    force: bool,
) -> ValidationOutcome {
    validate_form_at(form, errors, field, force, &current_two_digit_year())
}

/// Like [`validate_form`], with the current two-digit year supplied.
pub fn validate_form_at(
    form: &CardForm,
    errors: &FormErrors,
    field: Option<Field>,
    force: bool,
    current_year: &str,
) -> ValidationOutcome {
    let mut next = *errors;
    let mut checked = 0usize;

    for candidate in Field::ALL {
        if !is_selected(next.get(candidate), candidate, field, force) {
            continue;
        }
        let result = validate_field_at(candidate, form, current_year);
        next.set(candidate, FieldState::Checked(result.err()));
        checked += 1;
    }

    let is_valid = !next.has_errors();

    debug!(
        field = ?field,
        force,
        checked,
        is_valid,
        "validation pass"
    );

    ValidationOutcome {
        errors: next,
        is_valid,
    }
}

#[inline]
fn is_selected(state: FieldState, candidate: Field, target: Option<Field>, force: bool) -> bool {
    if force {
        return true;
    }
    state.is_dirty() && target.map_or(true, |t| t == candidate)
}

/// Validation state of one form session.
///
/// Owns the [`FormErrors`] for the lifetime of the form and decides which
/// fields to validate on each UI event. The form values stay with the caller
/// and are only borrowed per call.
///
/// Events must be applied one at a time. The session takes `&mut self` for
/// every event; sharing it across threads needs external serialization such
/// as a `Mutex`.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    errors: FormErrors,
    is_valid: bool,
    forced: bool,
    last_edited: Option<Field>,
    current_year: Option<String>,
}

impl FormSession {
    /// Starts a session with every field clean.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session that compares expiry years against `current_year`
    /// (two digits) instead of the local clock.
    pub fn with_current_year(current_year: impl Into<String>) -> Self {
        Self {
            current_year: Some(current_year.into()),
            ..Self::default()
        }
    }

    /// Runs a validation pass and stores its result.
    ///
    /// See [`validate_form`] for which fields are re-validated.
    pub fn validate(
        &mut self,
        form: &CardForm,
        field: Option<Field>,
        force: bool,
    ) -> ValidationOutcome {
        let outcome = match &self.current_year {
            Some(year) => validate_form_at(form, &self.errors, field, force, year),
            None => validate_form(form, &self.errors, field, force),
        };

        self.errors = outcome.errors;
        self.is_valid = outcome.is_valid;
        if force {
            self.forced = true;
        }

        outcome
    }

    /// Handles focus leaving `field`.
    ///
    /// The first blur marks the field dirty and validates it. Later blurs of
    /// the same field do nothing; edits keep a dirty field up to date.
    pub fn on_blur(&mut self, field: Field, form: &CardForm) {
        if self.errors.get(field).is_dirty() {
            trace!(field = %field, "blur on dirty field ignored");
            return;
        }

        self.errors.set(field, FieldState::Checked(None));
        self.validate(form, Some(field), false);
    }

    /// Handles an edit of `field`.
    ///
    /// `form` must already hold the new value. The field is re-validated only
    /// if it is dirty; a clean field stays silent until it is blurred.
    pub fn on_change(&mut self, field: Field, form: &CardForm) -> ValidationOutcome {
        self.last_edited = Some(field);
        self.validate(form, Some(field), false)
    }

    /// Handles a submit attempt: marks every field dirty and validates all.
    ///
    /// Returns the outcome; the caller submits only if `is_valid` is true.
    pub fn submit(&mut self, form: &CardForm) -> ValidationOutcome {
        self.validate(form, None, true)
    }

    /// Whether the submit action should be enabled.
    ///
    /// True only after a forced pass (see
    /// [`has_forced_pass`](Self::has_forced_pass)), when the last pass was
    /// valid and no field currently holds an error.
    pub fn can_submit(&self) -> bool {
        self.has_forced_pass() && self.is_valid && !self.errors.has_errors()
    }

    /// Current error state of every field.
    #[inline]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Aggregate verdict of the last validation pass.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Whether a forced (submit) pass has happened in this session.
    #[inline]
    pub fn has_forced_pass(&self) -> bool {
        self.forced
    }

    /// The field most recently passed to [`on_change`](Self::on_change).
    #[inline]
    pub fn last_edited(&self) -> Option<Field> {
        self.last_edited
    }

    /// Network of the card number currently in `form`.
    #[inline]
    pub fn network(&self, form: &CardForm) -> Network {
        classify(&form.card_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldError;

    const YEAR: &str = "26";

    fn valid_form() -> CardForm {
        CardForm::new()
            .with(Field::CardNumber, "5555555555554444")
            .with(Field::CardHolder, "John Doe")
            .with(Field::ExpiryMonth, "12")
            .with(Field::ExpiryYear, "99")
            .with(Field::Cvv, "123")
    }

    #[test]
    fn test_no_dirty_fields_no_errors() {
        let outcome = validate_form_at(&CardForm::new(), &FormErrors::new(), None, false, YEAR);
        for (_, state) in outcome.errors.iter() {
            assert_eq!(state, FieldState::Clean);
        }
        assert!(outcome.is_valid);
    }

    #[test]
    fn test_forced_pass_on_empty_form() {
        let outcome = validate_form_at(&CardForm::new(), &FormErrors::new(), None, true, YEAR);
        assert!(!outcome.is_valid);
        for (_, state) in outcome.errors.iter() {
            assert!(state.is_dirty());
            assert!(state.error().map_or(false, |e| e.is_required()));
        }
        assert_eq!(
            outcome.errors.get(Field::CardHolder).message(),
            "A card holder name is required."
        );
    }

    #[test]
    fn test_forced_pass_on_valid_form() {
        let outcome = validate_form_at(&valid_form(), &FormErrors::new(), None, true, YEAR);
        assert!(outcome.is_valid);
        for (_, state) in outcome.errors.iter() {
            assert_eq!(state, FieldState::Checked(None));
        }
    }

    #[test]
    fn test_scoped_pass_only_touches_target() {
        let mut errors = FormErrors::new();
        errors.set(Field::CardNumber, FieldState::Checked(None));
        errors.set(Field::Cvv, FieldState::Checked(None));

        let form = CardForm::new().with(Field::CardNumber, "1234");
        let outcome = validate_form_at(&form, &errors, Some(Field::CardNumber), false, YEAR);

        assert_eq!(
            outcome.errors.get(Field::CardNumber),
            FieldState::Checked(Some(FieldError::InvalidCardNumber))
        );
        // Cvv is dirty and empty, but was not targeted
        assert_eq!(outcome.errors.get(Field::Cvv), FieldState::Checked(None));
        assert!(!outcome.is_valid);
    }

    #[test]
    fn test_scoped_pass_skips_clean_target() {
        let form = CardForm::new().with(Field::CardNumber, "1234");
        let outcome =
            validate_form_at(&form, &FormErrors::new(), Some(Field::CardNumber), false, YEAR);
        assert_eq!(outcome.errors.get(Field::CardNumber), FieldState::Clean);
    }

    #[test]
    fn test_untargeted_pass_checks_all_dirty_fields() {
        let mut errors = FormErrors::new();
        errors.set(Field::ExpiryMonth, FieldState::Checked(None));
        errors.set(Field::Cvv, FieldState::Checked(None));

        let outcome = validate_form_at(&CardForm::new(), &errors, None, false, YEAR);
        assert!(outcome.errors.get(Field::ExpiryMonth).has_error());
        assert!(outcome.errors.get(Field::Cvv).has_error());
        assert_eq!(outcome.errors.get(Field::CardNumber), FieldState::Clean);
    }

    #[test]
    fn test_stale_error_keeps_form_invalid() {
        let mut errors = FormErrors::new();
        errors.set(Field::Cvv, FieldState::Checked(Some(FieldError::CvvLength)));
        errors.set(Field::CardNumber, FieldState::Checked(None));

        let form = valid_form();
        let outcome = validate_form_at(&form, &errors, Some(Field::CardNumber), false, YEAR);
        assert_eq!(outcome.errors.get(Field::CardNumber), FieldState::Checked(None));
        assert!(!outcome.is_valid);
    }

    #[test]
    fn test_validate_form_does_not_mutate_input() {
        let errors = FormErrors::new();
        let _ = validate_form_at(&CardForm::new(), &errors, None, true, YEAR);
        assert_eq!(errors, FormErrors::new());
    }

    #[test]
    fn test_blur_marks_dirty_and_validates() {
        let mut session = FormSession::with_current_year(YEAR);
        let form = CardForm::new().with(Field::ExpiryMonth, "13");

        session.on_blur(Field::ExpiryMonth, &form);

        let state = session.errors().get(Field::ExpiryMonth);
        assert!(state.is_dirty());
        assert_eq!(state.error(), Some(FieldError::ExpiryMonthOutOfRange));
        assert!(!session.errors().get(Field::Cvv).is_dirty());
        assert!(!session.is_valid());
    }

    #[test]
    fn test_second_blur_is_noop() {
        let mut session = FormSession::with_current_year(YEAR);
        let mut form = CardForm::new().with(Field::CardNumber, "1234");

        session.on_blur(Field::CardNumber, &form);
        let first = *session.errors();

        session.on_blur(Field::CardNumber, &form);
        assert_eq!(*session.errors(), first);

        // Blur alone does not pick up a new value once dirty
        form.set(Field::CardNumber, "4111111111111111");
        session.on_blur(Field::CardNumber, &form);
        assert_eq!(*session.errors(), first);
    }

    #[test]
    fn test_change_on_clean_field_is_silent() {
        let mut session = FormSession::with_current_year(YEAR);
        let form = CardForm::new().with(Field::Cvv, "1");

        let outcome = session.on_change(Field::Cvv, &form);
        assert_eq!(outcome.errors.get(Field::Cvv), FieldState::Clean);
        assert_eq!(session.last_edited(), Some(Field::Cvv));
    }

    #[test]
    fn test_change_on_dirty_field_revalidates() {
        let mut session = FormSession::with_current_year(YEAR);
        let mut form = CardForm::new().with(Field::Cvv, "1");

        session.on_blur(Field::Cvv, &form);
        assert!(session.errors().get(Field::Cvv).has_error());

        form.set(Field::Cvv, "123");
        session.on_change(Field::Cvv, &form);
        assert_eq!(session.errors().get(Field::Cvv), FieldState::Checked(None));

        form.set(Field::Cvv, "");
        session.on_change(Field::Cvv, &form);
        assert_eq!(
            session.errors().get(Field::Cvv).error(),
            Some(FieldError::CvvRequired)
        );
    }

    #[test]
    fn test_dirty_never_reverts() {
        let mut session = FormSession::with_current_year(YEAR);
        let mut form = valid_form();
        session.submit(&form);
        assert!(session.errors().all_dirty());

        form.set(Field::CardHolder, "");
        session.on_change(Field::CardHolder, &form);
        session.validate(&form, None, false);
        assert!(session.errors().all_dirty());
    }

    #[test]
    fn test_can_submit_requires_forced_pass() {
        let mut session = FormSession::with_current_year(YEAR);
        let form = valid_form();

        for field in Field::ALL {
            session.on_blur(field, &form);
        }
        assert!(session.is_valid());
        assert!(!session.has_forced_pass());
        assert!(!session.can_submit());

        let outcome = session.submit(&form);
        assert!(outcome.is_valid);
        assert!(session.has_forced_pass());
        assert!(session.can_submit());
    }

    #[test]
    fn test_can_submit_drops_after_bad_edit() {
        let mut session = FormSession::with_current_year(YEAR);
        let mut form = valid_form();
        session.submit(&form);
        assert!(session.can_submit());

        form.set(Field::ExpiryMonth, "00");
        session.on_change(Field::ExpiryMonth, &form);
        assert!(!session.can_submit());

        form.set(Field::ExpiryMonth, "01");
        session.on_change(Field::ExpiryMonth, &form);
        assert!(session.can_submit());
    }

    #[test]
    fn test_session_network() {
        let session = FormSession::new();
        assert_eq!(session.network(&valid_form()), Network::Mastercard);
        assert_eq!(session.network(&CardForm::new()), Network::Unknown);
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FormSession>();
    }
}
