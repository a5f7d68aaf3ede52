//! Form rendering module
//!
//! - `field_renderer`: single field with its inline error
//! - `booking_form`: the booking form, success panel and submit button

mod booking_form;
mod field_renderer;

pub use booking_form::draw_booking_form;
