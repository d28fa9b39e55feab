//! Response envelope used by every non-auth endpoint.
//!
//! The backend wraps payloads as `{ "success": bool, "data": T, "message": str }`.

use loanlens_core::{LoanLensError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl Envelope {
    fn parse(raw: Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(LoanLensError::protocol("Response body is not a JSON object"));
        }
        let envelope: Envelope = serde_json::from_value(raw)?;
        if envelope.success == Some(false) {
            return Err(LoanLensError::protocol(
                envelope
                    .message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        Ok(envelope)
    }
}

/// Decodes the `data` field, which must be present.
pub fn decode_data<T: DeserializeOwned>(raw: Value) -> Result<T> {
    let envelope = Envelope::parse(raw)?;
    match envelope.data {
        Some(data) if !data.is_null() => serde_json::from_value(data).map_err(|e| {
            LoanLensError::protocol(format!("Unexpected response data: {e}"))
        }),
        _ => Err(LoanLensError::protocol("Response carried no data")),
    }
}

/// Decodes the `data` field, falling back to `T::default()` when absent.
pub fn decode_data_or_default<T: DeserializeOwned + Default>(raw: Value) -> Result<T> {
    let envelope = Envelope::parse(raw)?;
    match envelope.data {
        Some(data) if !data.is_null() => serde_json::from_value(data).map_err(|e| {
            LoanLensError::protocol(format!("Unexpected response data: {e}"))
        }),
        _ => Ok(T::default()),
    }
}

/// Checks that the call was acknowledged, ignoring any payload.
pub fn expect_ack(raw: Value) -> Result<()> {
    if raw.is_null() {
        return Ok(());
    }
    Envelope::parse(raw).map(|_| ())
}

/// Best-effort `message` from an error body.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}
