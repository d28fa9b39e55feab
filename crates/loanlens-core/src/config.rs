//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    pub api_base_url: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_level: String,
    /// Write logs to the rolling file in the log directory as well.
    pub log_to_file: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_file: true,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
