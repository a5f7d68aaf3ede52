//! Simulated transport: waits, then reports success

use super::request::{BookingRequest, Receipt, SubmissionError};
use super::traits::Transport;
use async_trait::async_trait;
use std::time::Duration;

/// Default simulated round-trip
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

/// Stand-in for a real booking endpoint, useful for demos and local runs
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn submit(&self, request: &BookingRequest) -> Result<Receipt, SubmissionError> {
        tracing::debug!(session = %request.id, delay_ms = self.delay.as_millis() as u64, "Simulating booking submission");
        tokio::time::sleep(self.delay).await;
        Ok(Receipt::default())
    }
}
