//! Mail-client handoff transport
//!
//! Builds a `mailto:` link carrying the booking details and hands it to the
//! desktop's mail client. When no opener is available the link is copied to
//! the clipboard instead so the visitor can paste it into a browser.

use super::request::{BookingRequest, Receipt, SubmissionError};
use super::traits::Transport;
use async_trait::async_trait;
use std::sync::Arc;

pub const DEFAULT_RECIPIENT: &str = "hello@jttraumatherapy.com";
pub const DEFAULT_SUBJECT: &str = "Booking Request";

/// Hands a finished link to the outside world
pub type Handoff = Arc<dyn Fn(&str) -> Result<Receipt, SubmissionError> + Send + Sync>;

pub struct MailtoTransport {
    recipient: String,
    subject: String,
    handoff: Handoff,
}

impl MailtoTransport {
    pub fn new(recipient: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::with_handoff(recipient, subject, Arc::new(system_handoff))
    }

    pub fn with_handoff(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        handoff: Handoff,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            handoff,
        }
    }

    /// Build the `mailto:` link for a request
    pub fn link(&self, request: &BookingRequest) -> String {
        mailto_link(&self.recipient, &self.subject, request)
    }
}

#[async_trait]
impl Transport for MailtoTransport {
    fn name(&self) -> &'static str {
        "mailto"
    }

    async fn submit(&self, request: &BookingRequest) -> Result<Receipt, SubmissionError> {
        let link = self.link(request);
        tracing::debug!(session = %request.id, len = link.len(), "Handing booking off to mail client");

        // Openers and clipboard access block, keep them off the event loop
        let handoff = Arc::clone(&self.handoff);
        tokio::task::spawn_blocking(move || handoff(&link))
            .await
            .map_err(|e| SubmissionError::Handoff(e.to_string()))?
    }
}

/// Build a `mailto:` link whose body lists every field as `Label: value`
pub fn mailto_link(recipient: &str, subject: &str, request: &BookingRequest) -> String {
    let body = request
        .fields
        .iter()
        .map(|f| {
            let value = if f.value.is_empty() { "-" } else { &f.value };
            format!("{}: {}", f.label, value)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let subject = match request.get("fullName") {
        Some(name) if !name.is_empty() => format!("{subject} - {name}"),
        _ => subject.to_string(),
    };

    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

/// Open the link with the system opener, falling back to the clipboard
fn system_handoff(link: &str) -> Result<Receipt, SubmissionError> {
    let opened = crate::platform::open_url_command(link)
        .status()
        .map_err(|e| e.to_string())
        .and_then(|status| {
            if status.success() {
                Ok(())
            } else {
                Err(format!("opener exited with {status}"))
            }
        });

    match opened {
        Ok(()) => Ok(Receipt::with_message(
            "Your email app should open with the booking details filled in.",
        )),
        Err(open_err) => {
            tracing::warn!("Could not open mail client: {open_err}; copying link instead");
            copy_to_clipboard(link)
                .map(|()| {
                    Receipt::with_message(
                        "The booking email link was copied to your clipboard.",
                    )
                })
                .map_err(|clip_err| {
                    SubmissionError::Handoff(format!("{open_err}; clipboard: {clip_err}"))
                })
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)
}
