//! Booking request, receipt and submission error types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// One collected field value, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Validated, trimmed form data handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    /// Session identifier, also used as an idempotency key by the backend
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub fields: Vec<CollectedField>,
}

impl BookingRequest {
    pub fn new(fields: Vec<CollectedField>) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            fields,
        }
    }

    /// Look up a collected value by field name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Field name to value mapping
    pub fn data(&self) -> BTreeMap<&'static str, &str> {
        self.fields
            .iter()
            .map(|f| (f.name, f.value.as_str()))
            .collect()
    }

    /// JSON body sent to the booking backend
    pub fn payload(&self) -> BookingPayload<'_> {
        BookingPayload {
            id: self.id,
            submitted_at: self.submitted_at,
            fields: self.data(),
        }
    }
}

/// Wire shape of a booking request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload<'a> {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: BTreeMap<&'static str, &'a str>,
}

/// Successful transport outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    /// Optional detail to show alongside the success indicator
    pub message: Option<String>,
}

impl Receipt {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Failure reported by a transport
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("network error: {0}")]
    Network(String),
    #[error("booking service rejected the request with status {status}")]
    Rejected { status: u16 },
    #[error("could not hand off to a mail client: {0}")]
    Handoff(String),
    #[error("booking request timed out")]
    Timeout,
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Rejected {
                status: status.as_u16(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> BookingRequest {
        BookingRequest::new(vec![
            CollectedField {
                name: "fullName",
                label: "Full Name",
                value: "Jo Smith".to_string(),
            },
            CollectedField {
                name: "message",
                label: "Message",
                value: String::new(),
            },
        ])
    }

    #[test]
    fn test_get_finds_value_by_name() {
        let req = request();
        assert_eq!(req.get("fullName"), Some("Jo Smith"));
        assert_eq!(req.get("message"), Some(""));
        assert_eq!(req.get("missing"), None);
    }

    #[test]
    fn test_payload_flattens_fields() {
        let req = request();
        let json = serde_json::to_value(req.payload()).unwrap();
        assert_eq!(json["fullName"], "Jo Smith");
        assert_eq!(json["message"], "");
        assert_eq!(json["id"], req.id.to_string());
        assert!(json.get("submittedAt").is_some());
    }

    #[test]
    fn test_each_request_gets_its_own_id() {
        assert_ne!(request().id, request().id);
    }

    #[test]
    fn test_error_display() {
        let err = SubmissionError::Rejected { status: 503 };
        assert_eq!(
            err.to_string(),
            "booking service rejected the request with status 503"
        );
    }
}
