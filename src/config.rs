//! Configuration handling for the TUI

use crate::transport::{http, mailto, simulated};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable selecting the HTTP transport with a given endpoint
pub const ENDPOINT_ENV: &str = "BOOKING_ENDPOINT";
/// Environment variable selecting a transport by name with its defaults
pub const TRANSPORT_ENV: &str = "BOOKING_TRANSPORT";

/// Which transport delivers booking requests in this deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Wait, then report success
    Simulated {
        #[serde(default = "default_delay_ms")]
        delay_ms: u64,
    },
    /// Hand a prefilled email to the desktop mail client
    Mailto {
        #[serde(default = "default_recipient")]
        recipient: String,
        #[serde(default = "default_subject")]
        subject: String,
    },
    /// POST the booking to a backend endpoint
    Http {
        endpoint: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

fn default_delay_ms() -> u64 {
    simulated::DEFAULT_DELAY.as_millis() as u64
}

fn default_recipient() -> String {
    mailto::DEFAULT_RECIPIENT.to_string()
}

fn default_subject() -> String {
    mailto::DEFAULT_SUBJECT.to_string()
}

fn default_timeout_secs() -> u64 {
    http::DEFAULT_TIMEOUT_SECS
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Simulated {
            delay_ms: default_delay_ms(),
        }
    }
}

impl TransportConfig {
    /// Defaults for a transport named on the command line or environment
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "simulated" => Some(Self::default()),
            "mailto" => Some(Self::Mailto {
                recipient: default_recipient(),
                subject: default_subject(),
            }),
            "http" => Some(Self::Http {
                endpoint: http::DEFAULT_ENDPOINT.to_string(),
                timeout_secs: default_timeout_secs(),
            }),
            _ => None,
        }
    }
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    /// Booking transport for this deployment
    #[serde(default)]
    pub transport: TransportConfig,
    /// Capture mouse events (default on)
    pub mouse: Option<bool>,
}

impl SiteConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "jttraumatherapy", "booking-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Path of the persisted preferences file
    pub fn preferences_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("preferences.json"))
    }

    /// Path of the log file
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("booking-tui.log"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(
            std::env::var(TRANSPORT_ENV).ok().as_deref(),
            std::env::var(ENDPOINT_ENV).ok().as_deref(),
        );
        Ok(config)
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Apply `BOOKING_TRANSPORT` then `BOOKING_ENDPOINT`; the endpoint wins
    fn apply_overrides(&mut self, transport: Option<&str>, endpoint: Option<&str>) {
        if let Some(name) = transport {
            match TransportConfig::from_name(name) {
                Some(selected) => self.transport = selected,
                None => tracing::warn!("Ignoring unknown {TRANSPORT_ENV} value {name:?}"),
            }
        }
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            let timeout_secs = match &self.transport {
                TransportConfig::Http { timeout_secs, .. } => *timeout_secs,
                _ => default_timeout_secs(),
            };
            self.transport = TransportConfig::Http {
                endpoint: endpoint.trim().to_string(),
                timeout_secs,
            };
        }
    }

    pub fn mouse_enabled(&self) -> bool {
        self.mouse.unwrap_or(true)
    }
}
