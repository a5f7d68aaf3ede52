//! Booking form lifecycle: field focus, lazy validation and the submission
//! state machine
//!
//! ```text
//! Idle ──submit──▶ Validating ──any invalid──▶ Idle (focus first invalid)
//!                       │
//!                   all valid
//!                       ▼
//!                  Submitting ──ok──▶ Success ──next attempt──▶ Idle
//!                       │
//!                      err
//!                       ▼
//!                     Error ──next attempt──▶ Idle
//! ```
//!
//! Submitting is split in two halves ([`FormController::begin_submit`] and
//! [`FormController::finish_submit`]) so the event loop keeps running while a
//! transport call is outstanding. A submit attempt while one is outstanding
//! is ignored.

use super::field::FieldState;
use super::presenter::FormPresenter;
use super::rules::FieldRule;
use crate::transport::{BookingRequest, CollectedField, Receipt, SubmissionError, Transport};

/// Notice shown when a transport reports failure
pub const FAILURE_NOTICE: &str =
    "There was an error submitting your request. Please try again or contact us directly.";

const SUCCESS_ANNOUNCEMENT: &str = "Thank you! Your booking request has been sent.";

/// Lifecycle phase of the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    /// Transient while a submit attempt checks every field
    Validating,
    Submitting,
    Success,
    Error,
}

impl FormPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// A submission is already in flight
    Ignored,
    /// Validation failed; focus moved to this field index
    Invalid { first_invalid: usize },
    /// All fields valid; hand this request to the transport
    Started(BookingRequest),
}

/// A single edit applied to the focused field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Newline,
    NextOption,
    PrevOption,
}

/// Owns the booking form's fields and submission state machine
#[derive(Debug, Clone)]
pub struct FormController {
    fields: Vec<FieldState>,
    phase: FormPhase,
    /// The in-flight session's collected data, present only while submitting
    session: Option<BookingRequest>,
    /// Focused row; `fields.len()` is the submit button
    active_index: usize,
}

impl FormController {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self {
            fields: rules.into_iter().map(FieldState::new).collect(),
            phase: FormPhase::Idle,
            session: None,
            active_index: 0,
        }
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Collected data of the in-flight session
    pub fn session(&self) -> Option<&BookingRequest> {
        self.session.as_ref()
    }

    // --- focus -----------------------------------------------------------

    /// Number of focusable rows (fields plus the submit button)
    pub fn row_count(&self) -> usize {
        self.fields.len() + 1
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_field(&self) -> Option<&FieldState> {
        self.fields.get(self.active_index)
    }

    pub fn is_submit_row_active(&self) -> bool {
        self.active_index == self.fields.len()
    }

    /// Move focus to a row, validating the field that loses focus
    pub fn focus(&mut self, index: usize, presenter: &mut dyn FormPresenter) {
        let index = index.min(self.fields.len());
        if index == self.active_index {
            return;
        }
        let previous = self.active_index;
        self.active_index = index;
        self.blur(previous, presenter);
    }

    pub fn focus_next(&mut self, presenter: &mut dyn FormPresenter) {
        let next = (self.active_index + 1) % self.row_count();
        self.focus(next, presenter);
    }

    pub fn focus_prev(&mut self, presenter: &mut dyn FormPresenter) {
        let prev = if self.active_index == 0 {
            self.row_count() - 1
        } else {
            self.active_index - 1
        };
        self.focus(prev, presenter);
    }

    // --- per-field validation --------------------------------------------

    /// The field at `index` lost focus: always re-validate it
    pub fn blur(&mut self, index: usize, presenter: &mut dyn FormPresenter) {
        if let Some(field) = self.fields.get_mut(index) {
            field.revalidate();
            present_outcome(field, presenter);
        }
    }

    /// Apply an edit to the focused field
    ///
    /// A field already marked invalid is re-validated on every change so the
    /// error clears as soon as the input is fixed; a valid field waits for
    /// blur.
    pub fn edit(&mut self, edit: FieldEdit, presenter: &mut dyn FormPresenter) -> bool {
        let Some(field) = self.fields.get_mut(self.active_index) else {
            return false;
        };

        let changed = match edit {
            FieldEdit::Insert(c) => field.push_char(c),
            FieldEdit::Backspace => field.pop_char(),
            FieldEdit::Newline if field.is_multiline() => field.push_char('\n'),
            FieldEdit::Newline => false,
            FieldEdit::NextOption => field.cycle_option(true),
            FieldEdit::PrevOption => field.cycle_option(false),
        };

        if changed && field.is_invalid() {
            field.revalidate();
            present_outcome(field, presenter);
        }
        changed
    }

    // --- submission ------------------------------------------------------

    /// Start a submit attempt
    pub fn begin_submit(&mut self, presenter: &mut dyn FormPresenter) -> SubmitAttempt {
        if self.is_submitting() {
            tracing::debug!("Submit attempt ignored: a submission is already in flight");
            return SubmitAttempt::Ignored;
        }

        // A new session starts from Idle, whatever the previous one ended in
        if self.phase != FormPhase::Idle {
            presenter.show_success(false);
        }
        self.phase = FormPhase::Validating;

        let mut first_invalid = None;
        for (index, field) in self.fields.iter_mut().enumerate() {
            if !field.revalidate().is_valid() && first_invalid.is_none() {
                first_invalid = Some(index);
            }
            present_outcome(field, presenter);
        }

        if let Some(index) = first_invalid {
            self.phase = FormPhase::Idle;
            self.active_index = index;
            presenter.focus_field(self.fields[index].name());
            presenter.announce("Please correct the highlighted fields.");
            tracing::debug!(field = self.fields[index].name(), "Booking form has invalid fields");
            return SubmitAttempt::Invalid {
                first_invalid: index,
            };
        }

        let request = BookingRequest::new(
            self.fields
                .iter()
                .map(|f| CollectedField {
                    name: f.name(),
                    label: f.label(),
                    value: f.trimmed(),
                })
                .collect(),
        );

        self.phase = FormPhase::Submitting;
        self.session = Some(request.clone());
        presenter.set_submit_enabled(false);
        presenter.set_loading(true);
        presenter.announce("Sending your booking request...");
        tracing::info!(session = %request.id, "Booking submission started");

        SubmitAttempt::Started(request)
    }

    /// Report the transport outcome of the in-flight session
    ///
    /// Returns false (and changes nothing) when no submission is in flight.
    pub fn finish_submit(
        &mut self,
        result: Result<Receipt, SubmissionError>,
        presenter: &mut dyn FormPresenter,
    ) -> bool {
        if !self.is_submitting() {
            tracing::warn!(phase = self.phase.label(), "Ignoring submission result with no submission in flight");
            return false;
        }
        let session = self.session.take();
        let session_id = session.as_ref().map(|s| s.id.to_string()).unwrap_or_default();

        presenter.set_loading(false);
        presenter.set_submit_enabled(true);

        match result {
            Ok(receipt) => {
                self.phase = FormPhase::Success;
                for field in &mut self.fields {
                    field.clear();
                    present_outcome(field, presenter);
                }
                self.active_index = 0;
                presenter.show_success(true);
                presenter.scroll_to_success();
                presenter.announce(receipt.message.as_deref().unwrap_or(SUCCESS_ANNOUNCEMENT));
                tracing::info!(session = %session_id, "Booking submission succeeded");
            }
            Err(err) => {
                self.phase = FormPhase::Error;
                tracing::error!(session = %session_id, error = %err, "Form submission error");
                presenter.notify_failure(FAILURE_NOTICE);
                presenter.announce("Your booking request could not be sent.");
            }
        }
        true
    }

    /// Run a whole submit attempt against a transport
    ///
    /// Returns `None` when the attempt never reached the transport.
    pub async fn submit(
        &mut self,
        transport: &dyn Transport,
        presenter: &mut dyn FormPresenter,
    ) -> Option<Result<Receipt, SubmissionError>> {
        let SubmitAttempt::Started(request) = self.begin_submit(presenter) else {
            return None;
        };
        let result = transport.submit(&request).await;
        self.finish_submit(result.clone(), presenter);
        Some(result)
    }
}

/// Mirror a field's last outcome onto its error text and invalid marker
fn present_outcome(field: &FieldState, presenter: &mut dyn FormPresenter) {
    let message = field.error_message().map(str::to_string);
    let invalid = message.is_some();
    presenter.set_field_error(field.name(), message);
    presenter.set_field_invalid(field.name(), invalid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::presenter::MockFormPresenter;
    use crate::state::forms::rules::{booking_rules, ValidationOutcome, REQUIRED_MESSAGE};
    use crate::transport::MockTransport;
    use std::collections::HashMap;

    /// Presenter that records what the controller asked for
    #[derive(Debug, Default)]
    struct Recorder {
        loading: bool,
        submit_enabled: bool,
        success_visible: bool,
        errors: HashMap<String, String>,
        invalid: HashMap<String, bool>,
        focused: Vec<String>,
        scrolled_to_success: usize,
        failures: Vec<String>,
        announcements: Vec<String>,
    }

    impl FormPresenter for Recorder {
        fn set_loading(&mut self, loading: bool) {
            self.loading = loading;
        }
        fn set_submit_enabled(&mut self, enabled: bool) {
            self.submit_enabled = enabled;
        }
        fn show_success(&mut self, visible: bool) {
            self.success_visible = visible;
        }
        fn set_field_error(&mut self, field: &str, message: Option<String>) {
            match message {
                Some(m) => self.errors.insert(field.to_string(), m),
                None => self.errors.remove(field),
            };
        }
        fn set_field_invalid(&mut self, field: &str, invalid: bool) {
            self.invalid.insert(field.to_string(), invalid);
        }
        fn focus_field(&mut self, field: &str) {
            self.focused.push(field.to_string());
        }
        fn scroll_to_success(&mut self) {
            self.scrolled_to_success += 1;
        }
        fn notify_failure(&mut self, message: &str) {
            self.failures.push(message.to_string());
        }
        fn announce(&mut self, message: &str) {
            self.announcements.push(message.to_string());
        }
    }

    fn controller() -> FormController {
        FormController::new(booking_rules())
    }

    fn type_into(form: &mut FormController, name: &str, text: &str, p: &mut Recorder) {
        let index = form.fields().iter().position(|f| f.name() == name).unwrap();
        form.focus(index, p);
        for c in text.chars() {
            form.edit(FieldEdit::Insert(c), p);
        }
    }

    fn fill_valid(form: &mut FormController, p: &mut Recorder) {
        type_into(form, "fullName", "  Jo Smith ", p);
        type_into(form, "email", "jo@example.com", p);
        type_into(form, "age", "34", p);
        let index = form
            .fields()
            .iter()
            .position(|f| f.name() == "sessionType")
            .unwrap();
        form.focus(index, p);
        form.edit(FieldEdit::NextOption, p);
        type_into(form, "availability", "Weekday mornings", p);
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_blur_validates_field() {
            let mut form = controller();
            let mut p = Recorder::default();
            type_into(&mut form, "fullName", "J", &mut p);
            assert!(form.field("fullName").unwrap().last_outcome.is_none());

            form.focus_next(&mut p);
            assert!(form.field("fullName").unwrap().is_invalid());
            assert_eq!(p.invalid.get("fullName"), Some(&true));
            assert!(p.errors["fullName"].starts_with("Please enter a valid name"));
        }

        #[test]
        fn test_valid_field_is_not_revalidated_on_input() {
            let mut form = controller();
            let mut p = Recorder::default();
            type_into(&mut form, "email", "jo@example.com", &mut p);
            form.focus_next(&mut p);
            assert!(form.field("email").unwrap().last_outcome.as_ref().unwrap().is_valid());

            // Break the value without leaving the field: still marked valid
            form.focus_prev(&mut p);
            for _ in 0..4 {
                form.edit(FieldEdit::Backspace, &mut p);
            }
            assert_eq!(
                form.field("email").unwrap().last_outcome,
                Some(ValidationOutcome::Valid)
            );

            // Leaving the field catches it
            form.focus_next(&mut p);
            assert!(form.field("email").unwrap().is_invalid());
        }

        #[test]
        fn test_invalid_field_is_revalidated_on_input() {
            let mut form = controller();
            let mut p = Recorder::default();
            type_into(&mut form, "age", "1", &mut p);
            form.focus_next(&mut p);
            assert!(form.field("age").unwrap().is_invalid());

            form.focus_prev(&mut p);
            form.edit(FieldEdit::Insert('8'), &mut p);
            assert!(!form.field("age").unwrap().is_invalid());
            assert_eq!(p.invalid.get("age"), Some(&false));
            assert!(!p.errors.contains_key("age"));
        }

        #[test]
        fn test_newline_only_in_multiline_fields() {
            let mut form = controller();
            let mut p = Recorder::default();
            assert!(!form.edit(FieldEdit::Newline, &mut p));
            let availability = form
                .fields()
                .iter()
                .position(|f| f.name() == "availability")
                .unwrap();
            form.focus(availability, &mut p);
            assert!(form.edit(FieldEdit::Newline, &mut p));
        }

        #[test]
        fn test_focus_wraps_through_submit_row() {
            let mut form = controller();
            let mut p = Recorder::default();
            form.focus_prev(&mut p);
            assert!(form.is_submit_row_active());
            assert!(form.active_field().is_none());
            form.focus_next(&mut p);
            assert_eq!(form.active_index(), 0);
        }

        #[test]
        fn test_edit_on_submit_row_is_noop() {
            let mut form = controller();
            let mut p = Recorder::default();
            let submit_row = form.row_count() - 1;
            form.focus(submit_row, &mut p);
            assert!(!form.edit(FieldEdit::Insert('x'), &mut p));
        }
    }

    mod submit_attempt {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_form_stays_idle_and_focuses_first_field() {
            let mut form = controller();
            let mut p = Recorder::default();
            let attempt = form.begin_submit(&mut p);

            assert_eq!(attempt, SubmitAttempt::Invalid { first_invalid: 0 });
            assert_eq!(form.phase(), FormPhase::Idle);
            assert_eq!(p.focused, vec!["fullName".to_string()]);
            assert_eq!(p.errors["fullName"], REQUIRED_MESSAGE);
            assert!(form.session().is_none());
            assert!(!p.loading);
        }

        #[test]
        fn test_focus_goes_to_first_invalid_in_document_order() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);
            // Appending to the valid age makes it "340"
            type_into(&mut form, "age", "0", &mut p);
            let attempt = form.begin_submit(&mut p);

            assert_eq!(attempt, SubmitAttempt::Invalid { first_invalid: 2 });
            assert_eq!(form.active_index(), 2);
            assert_eq!(p.focused.last().map(String::as_str), Some("age"));
        }

        #[test]
        fn test_optional_field_does_not_block_submit() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);
            assert!(matches!(form.begin_submit(&mut p), SubmitAttempt::Started(_)));
        }

        #[test]
        fn test_valid_form_collects_trimmed_values_of_every_field() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);

            let SubmitAttempt::Started(request) = form.begin_submit(&mut p) else {
                panic!("expected submission to start");
            };

            assert_eq!(form.phase(), FormPhase::Submitting);
            assert!(p.loading);
            assert!(!p.submit_enabled);
            assert_eq!(request.fields.len(), form.fields().len());
            assert_eq!(request.get("fullName"), Some("Jo Smith"));
            assert_eq!(request.get("email"), Some("jo@example.com"));
            assert_eq!(request.get("age"), Some("34"));
            assert_eq!(request.get("sessionType"), Some("initial-consultation"));
            assert_eq!(request.get("availability"), Some("Weekday mornings"));
            assert_eq!(request.get("message"), Some(""));
            assert_eq!(form.session(), Some(&request));
        }

        #[test]
        fn test_attempt_while_submitting_is_ignored() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);
            let first = form.begin_submit(&mut p);
            assert!(matches!(first, SubmitAttempt::Started(_)));
            let announcements = p.announcements.len();

            assert_eq!(form.begin_submit(&mut p), SubmitAttempt::Ignored);
            assert_eq!(form.phase(), FormPhase::Submitting);
            assert_eq!(p.announcements.len(), announcements);
        }
    }

    mod completion {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_clears_fields_and_shows_indicator() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);
            form.begin_submit(&mut p);

            assert!(form.finish_submit(Ok(Receipt::default()), &mut p));
            assert_eq!(form.phase(), FormPhase::Success);
            assert!(!p.loading);
            assert!(p.submit_enabled);
            assert!(p.success_visible);
            assert_eq!(p.scrolled_to_success, 1);
            assert!(form
                .fields()
                .iter()
                .all(|f| f.value.is_empty() && f.last_outcome.is_none()));
            assert!(form.session().is_none());
        }

        #[test]
        fn test_receipt_message_is_announced() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);
            form.begin_submit(&mut p);
            form.finish_submit(Ok(Receipt::with_message("Link copied")), &mut p);
            assert_eq!(p.announcements.last().map(String::as_str), Some("Link copied"));
        }

        #[test]
        fn test_failure_keeps_values_and_notifies_once() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);
            form.begin_submit(&mut p);

            form.finish_submit(Err(SubmissionError::Timeout), &mut p);
            assert_eq!(form.phase(), FormPhase::Error);
            assert_eq!(p.failures, vec![FAILURE_NOTICE.to_string()]);
            assert!(!p.loading);
            assert!(p.submit_enabled);
            assert!(!p.success_visible);
            assert_eq!(form.field("fullName").unwrap().value, "  Jo Smith ");
        }

        #[test]
        fn test_result_without_submission_is_ignored() {
            let mut form = controller();
            let mut p = Recorder::default();
            assert!(!form.finish_submit(Ok(Receipt::default()), &mut p));
            assert_eq!(form.phase(), FormPhase::Idle);
            assert!(!p.success_visible);
        }

        #[test]
        fn test_next_attempt_after_success_starts_fresh() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);
            form.begin_submit(&mut p);
            form.finish_submit(Ok(Receipt::default()), &mut p);

            let attempt = form.begin_submit(&mut p);
            assert_eq!(attempt, SubmitAttempt::Invalid { first_invalid: 0 });
            assert_eq!(form.phase(), FormPhase::Idle);
            assert!(!p.success_visible);
            assert_eq!(p.errors["fullName"], REQUIRED_MESSAGE);
        }
    }

    mod with_transport {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_submit_calls_transport_once() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);

            let mut transport = MockTransport::new();
            transport
                .expect_submit()
                .withf(|req| req.get("fullName") == Some("Jo Smith"))
                .times(1)
                .returning(|_| Ok(Receipt::default()));

            let result = form.submit(&transport, &mut p).await;
            assert_eq!(result, Some(Ok(Receipt::default())));
            assert_eq!(form.phase(), FormPhase::Success);
        }

        #[tokio::test]
        async fn test_invalid_form_never_reaches_transport() {
            let mut form = controller();
            let mut p = Recorder::default();
            let mut transport = MockTransport::new();
            transport.expect_submit().never();

            assert_eq!(form.submit(&transport, &mut p).await, None);
        }

        #[tokio::test]
        async fn test_retry_after_failure_succeeds_with_same_data() {
            let mut form = controller();
            let mut p = Recorder::default();
            fill_valid(&mut form, &mut p);

            let mut transport = MockTransport::new();
            let mut seq = mockall::Sequence::new();
            transport
                .expect_submit()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Err(SubmissionError::Network("connection reset".to_string())));
            transport
                .expect_submit()
                .withf(|req| req.get("email") == Some("jo@example.com"))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(Receipt::default()));

            let first = form.submit(&transport, &mut p).await;
            assert!(matches!(first, Some(Err(_))));
            assert_eq!(form.phase(), FormPhase::Error);

            let second = form.submit(&transport, &mut p).await;
            assert_eq!(second, Some(Ok(Receipt::default())));
            assert_eq!(form.phase(), FormPhase::Success);
            assert_eq!(p.failures.len(), 1);
        }

        #[test]
        fn test_presenter_hooks_in_order_with_mock() {
            let mut form = controller();
            let mut recorder = Recorder::default();
            fill_valid(&mut form, &mut recorder);

            let mut p = MockFormPresenter::new();
            let mut seq = mockall::Sequence::new();
            p.expect_set_field_error().returning(|_, _| ());
            p.expect_set_field_invalid()
                .withf(|_, invalid| !invalid)
                .returning(|_, _| ());
            p.expect_set_submit_enabled()
                .with(mockall::predicate::eq(false))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| ());
            p.expect_set_loading()
                .with(mockall::predicate::eq(true))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| ());
            p.expect_announce().returning(|_| ());
            p.expect_focus_field().never();

            assert!(matches!(form.begin_submit(&mut p), SubmitAttempt::Started(_)));
        }
    }
}
