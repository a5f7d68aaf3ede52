//! Backend transport: posts the booking as JSON

use super::request::{BookingRequest, Receipt, SubmissionError};
use super::traits::Transport;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/api/booking";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Optional body of a successful backend reply
#[derive(Debug, Deserialize)]
struct BookingReply {
    message: Option<String>,
}

pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("booking-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn submit(&self, request: &BookingRequest) -> Result<Receipt, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request.payload())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(session = %request.id, %status, "Booking service rejected request");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        // A reply body is optional; anything unparseable still counts as success
        let message = response
            .json::<BookingReply>()
            .await
            .ok()
            .and_then(|reply| reply.message);

        Ok(Receipt { message })
    }
}
