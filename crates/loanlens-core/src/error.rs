//! Error types for the LoanLens client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire LoanLens client.
///
/// Variants follow how a failure is surfaced: authentication problems end up
/// as a form-level message, transport failures as a retry prompt, and
/// validation failures never leave the process.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LoanLensError {
    /// Credential missing, rejected, or expired.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Transport failure (no response from the backend).
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed user input, caught before any network call
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Backend answered, but not in the documented response schema.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LoanLensError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Validation error for a single input field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Maps a non-success HTTP status to the matching variant.
    ///
    /// 401 and 403 are credential problems and become `Auth`; everything
    /// else keeps its status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Auth(message),
            _ => Self::Http { status, message },
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an authentication error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a transport failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Message suitable for showing next to the form that triggered the call.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(message) => message.clone(),
            Self::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            Self::Validation { message, .. } => message.clone(),
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LoanLensError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LoanLensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LoanLensError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LoanLensError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used at the binary boundary)
impl From<anyhow::Error> for LoanLensError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, LoanLensError>`.
pub type Result<T> = std::result::Result<T, LoanLensError>;
