//! Trait abstraction for booking transports to enable mocking in tests

use super::request::{BookingRequest, Receipt, SubmissionError};
use async_trait::async_trait;

/// Turns a validated booking request into a booking
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Submit the request; called at most once per form session
    async fn submit(&self, request: &BookingRequest) -> Result<Receipt, SubmissionError>;
}
