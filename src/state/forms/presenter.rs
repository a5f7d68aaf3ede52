//! Presentation boundary for the booking form
//!
//! The form controller never draws anything itself. Every visible effect of
//! validation and submission goes through these hooks, so the controller can
//! be driven in tests with a mock and in the terminal with
//! [`BookingFormView`](crate::state::BookingFormView).

/// Hooks the form controller toggles to reflect its state
#[cfg_attr(test, mockall::automock)]
pub trait FormPresenter {
    /// Show or hide the loading indicator on the submit control
    fn set_loading(&mut self, loading: bool);

    /// Enable or disable the submit control
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Show or hide the success indicator
    fn show_success(&mut self, visible: bool);

    /// Set (`Some`) or clear (`None`) the inline error text of a field
    fn set_field_error(&mut self, field: &str, message: Option<String>);

    /// Set or clear the invalid marker of a field
    fn set_field_invalid(&mut self, field: &str, invalid: bool);

    /// Move input focus to a field
    fn focus_field(&mut self, field: &str);

    /// Scroll the success indicator into view
    fn scroll_to_success(&mut self);

    /// Surface a blocking failure notice
    fn notify_failure(&mut self, message: &str);

    /// Announce a state change to the status line
    fn announce(&mut self, message: &str);
}
