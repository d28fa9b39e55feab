//! Financial information, analysis and suggestion payloads.

use crate::dashboard::LoanSummary;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `PUT /dashboard/financial-info`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInfo {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

/// Body of `POST /finance/analyze` and `POST /stress/analyze`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub loans: Vec<LoanSummary>,
}

/// Free-form analysis produced by the backend.
///
/// The shape of these reports is owned by the server; the client keeps every
/// field and only offers typed access to the common ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AnalysisReport {
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Priority attached to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Info,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub title: String,
    #[serde(alias = "description")]
    pub message: String,
    pub priority: Priority,
}

/// Ratio and risk figures attached to a suggestion report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StressMetrics {
    /// Share of income spent on debt, `0.0..=1.0`.
    pub debt_ratio: f64,
    pub risk_score: f64,
}

/// Response of `POST /suggestions/get`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestionsReport {
    pub suggestions: Vec<Suggestion>,
    pub stress_metrics: Option<StressMetrics>,
}
