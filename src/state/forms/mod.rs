//! Form domain layer
//!
//! This module provides the booking form: fixed field rules, a pure
//! validator, the submission state machine and its presentation boundary.

mod field;
mod form_state;
mod presenter;
mod rules;
mod view;

pub use field::FieldState;
pub use form_state::{FieldEdit, FormController, SubmitAttempt};
#[cfg(test)]
pub use form_state::{FormPhase, FAILURE_NOTICE};
pub use rules::{booking_rules, FieldKind};
pub use view::BookingFormView;
