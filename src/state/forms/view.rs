//! Terminal presentation state of the booking form

use super::presenter::FormPresenter;
use std::collections::HashMap;

/// What the booking form currently looks like on screen
///
/// Filled in by the form controller through [`FormPresenter`]; read by the
/// renderer. One-shot requests (focus, scroll, failure notices) are queued
/// until the app drains them.
#[derive(Debug, Clone)]
pub struct BookingFormView {
    pub loading: bool,
    pub submit_enabled: bool,
    pub success_visible: bool,
    pub announcement: Option<String>,
    errors: HashMap<String, String>,
    invalid: HashMap<String, bool>,
    focus_request: Option<String>,
    scroll_to_success: bool,
    failures: Vec<String>,
}

impl Default for BookingFormView {
    fn default() -> Self {
        Self {
            loading: false,
            submit_enabled: true,
            success_visible: false,
            announcement: None,
            errors: HashMap::new(),
            invalid: HashMap::new(),
            focus_request: None,
            scroll_to_success: false,
            failures: Vec::new(),
        }
    }
}

impl BookingFormView {
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        self.invalid.get(field).copied().unwrap_or(false)
    }

    pub fn take_focus_request(&mut self) -> Option<String> {
        self.focus_request.take()
    }

    pub fn take_scroll_to_success(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_success)
    }

    pub fn take_failures(&mut self) -> Vec<String> {
        std::mem::take(&mut self.failures)
    }
}

impl FormPresenter for BookingFormView {
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
            Some(message) => {
                self.errors.insert(field.to_string(), message);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }

    fn set_field_invalid(&mut self, field: &str, invalid: bool) {
        if invalid {
            self.invalid.insert(field.to_string(), true);
        } else {
            self.invalid.remove(field);
        }
    }

    fn focus_field(&mut self, field: &str) {
        self.focus_request = Some(field.to_string());
    }

    fn scroll_to_success(&mut self) {
        self.scroll_to_success = true;
    }

    fn notify_failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }

    fn announce(&mut self, message: &str) {
        self.announcement = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_ready_to_submit() {
        let view = BookingFormView::default();
        assert!(view.submit_enabled);
        assert!(!view.loading);
        assert!(!view.success_visible);
    }

    #[test]
    fn test_error_text_and_marker_are_independent() {
        let mut view = BookingFormView::default();
        view.set_field_error("email", Some("bad".to_string()));
        assert_eq!(view.error_for("email"), Some("bad"));
        assert!(!view.is_invalid("email"));

        view.set_field_invalid("email", true);
        assert!(view.is_invalid("email"));

        view.set_field_error("email", None);
        view.set_field_invalid("email", false);
        assert!(view.error_for("email").is_none());
        assert!(!view.is_invalid("email"));
    }

    #[test]
    fn test_one_shot_requests_drain() {
        let mut view = BookingFormView::default();
        view.focus_field("age");
        view.scroll_to_success();
        view.notify_failure("boom");

        assert_eq!(view.take_focus_request().as_deref(), Some("age"));
        assert!(view.take_focus_request().is_none());
        assert!(view.take_scroll_to_success());
        assert!(!view.take_scroll_to_success());
        assert_eq!(view.take_failures(), vec!["boom".to_string()]);
        assert!(view.take_failures().is_empty());
    }
}
