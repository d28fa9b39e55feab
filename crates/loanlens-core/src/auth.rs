//! Authentication requests and the pinned response schema.
//!
//! Login and registration answers are expected as
//! `{ "success": bool, "message": str?, "data": { "token": str, "user": {..} } }`.
//! Any other shape is a hard authentication failure; the client does not
//! try alternative layouts.

use crate::error::{LoanLensError, Result};
use crate::user::{Credential, Identity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Credential and identity extracted from an auth response.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthGrant {
    pub credential: Credential,
    pub identity: Option<Identity>,
}

const NO_TOKEN_LOGIN: &str = "Login failed - no token received";

/// Extracts the grant from a login response.
///
/// Fails with [`LoanLensError::Auth`] when `data.token` is missing or empty.
/// The server's `message`, when present, becomes the error text.
pub fn parse_login_response(raw: &Value) -> Result<AuthGrant> {
    extract_grant(raw)?.ok_or_else(|| LoanLensError::auth(server_message(raw, NO_TOKEN_LOGIN)))
}

/// Extracts the grant from a registration response.
///
/// Registration without auto-login is valid, so a missing token yields
/// `Ok(None)`.
pub fn parse_register_response(raw: &Value) -> Result<Option<AuthGrant>> {
    extract_grant(raw)
}

/// Decodes the identity from a `GET /auth/me` response (`{data: user}`).
pub fn parse_me_response(raw: &Value) -> Result<Identity> {
    let user = raw
        .get("data")
        .filter(|value| value.is_object())
        .ok_or_else(|| LoanLensError::auth("Identity lookup returned no user"))?;
    Ok(serde_json::from_value(user.clone())?)
}

fn extract_grant(raw: &Value) -> Result<Option<AuthGrant>> {
    let Some(data) = raw.get("data") else {
        return Ok(None);
    };

    let token = match data.get("token").and_then(Value::as_str) {
        Some(token) if !token.trim().is_empty() => token,
        _ => return Ok(None),
    };

    let identity = match data.get("user") {
        Some(user) if user.is_object() => Some(
            serde_json::from_value(user.clone())
                .map_err(|e| LoanLensError::protocol(format!("Malformed user object: {e}")))?,
        ),
        _ => None,
    };

    Ok(Some(AuthGrant {
        credential: Credential::new(token),
        identity,
    }))
}

fn server_message(raw: &Value, fallback: &str) -> String {
    raw.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}
