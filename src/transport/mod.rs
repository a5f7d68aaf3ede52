//! Booking transports
//!
//! One transport is wired per deployment, chosen by [`TransportConfig`].

pub mod http;
pub mod mailto;
mod request;
pub mod simulated;
mod traits;

use crate::config::TransportConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

pub use http::HttpTransport;
pub use mailto::MailtoTransport;
pub use request::{BookingRequest, CollectedField, Receipt, SubmissionError};
pub use simulated::SimulatedTransport;
pub use traits::Transport;

#[cfg(test)]
pub use traits::MockTransport;

/// Build the transport selected by configuration
pub fn build_transport(config: &TransportConfig) -> Result<Arc<dyn Transport>> {
    let transport: Arc<dyn Transport> = match config {
        TransportConfig::Simulated { delay_ms } => {
            Arc::new(SimulatedTransport::new(Duration::from_millis(*delay_ms)))
        }
        TransportConfig::Mailto { recipient, subject } => {
            Arc::new(MailtoTransport::new(recipient.clone(), subject.clone()))
        }
        TransportConfig::Http {
            endpoint,
            timeout_secs,
        } => {
            let http = HttpTransport::new(endpoint.clone(), Duration::from_secs(*timeout_secs))
                .context("Failed to build HTTP client for booking endpoint")?;
            tracing::debug!(endpoint = http.endpoint(), "Bookings will be posted over HTTP");
            Arc::new(http)
        }
    };
    tracing::info!(transport = transport.name(), "Booking transport ready");
    Ok(transport)
}
