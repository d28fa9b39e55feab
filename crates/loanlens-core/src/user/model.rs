//! Identity and credential domain model.
//!
//! Both values are produced by the backend and treated as opaque by the
//! client: the identity is displayed, the credential is replayed as a bearer
//! token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The authenticated user as described by the backend.
///
/// Unknown fields are kept in `extra` so that a round trip through the
/// client does not drop anything the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user id (`id` or `_id` on the wire).
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Role string such as `user` or `admin`.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// Name shown in greetings; falls back to the email address.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case("admin"))
    }
}

/// Opaque bearer token.
///
/// `Debug` and `Display` never print the token itself.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<redacted, {} bytes>)", self.0.len())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
