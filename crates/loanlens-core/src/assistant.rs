//! Assistant chat payloads.

use crate::dashboard::{DashboardSnapshot, LoanSummary};
use serde::{Deserialize, Serialize};

/// Body of `POST /assistant/chat`.
///
/// The assistant only echoes figures computed by the server, so every
/// request carries the current snapshot numbers along with the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    #[serde(rename = "totalEMI")]
    pub total_emi: f64,
    pub stress_score: f64,
    pub loans: Vec<LoanSummary>,
}

impl ChatRequest {
    /// Builds a request from a snapshot, replacing non-finite figures with 0.
    pub fn from_snapshot(message: impl Into<String>, snapshot: &DashboardSnapshot) -> Self {
        Self {
            message: message.into(),
            monthly_income: finite_or_zero(snapshot.monthly_income),
            monthly_expenses: finite_or_zero(snapshot.monthly_expenses),
            total_emi: finite_or_zero(snapshot.total_emi),
            stress_score: finite_or_zero(snapshot.stress_score),
            loans: snapshot.recent_loans.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    /// Reply with template artifacts from the server scrubbed out.
    pub fn sanitized(&self) -> String {
        if self.reply.trim().is_empty() {
            return "No response received".to_string();
        }
        self.reply
            .replace("NaN", "0.00")
            .replace("undefined", "unavailable")
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
