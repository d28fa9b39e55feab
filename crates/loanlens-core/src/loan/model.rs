//! Loan domain model.

use serde::{Deserialize, Serialize};

/// Body of `POST /loan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    #[serde(rename = "type")]
    pub loan_type: String,
    pub amount: f64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    /// Tenure in months.
    pub duration: u32,
}

/// A loan record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Loan {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(rename = "type", alias = "loanType")]
    pub loan_type: String,
    pub amount: f64,
    pub interest_rate: f64,
    #[serde(alias = "tenureMonths")]
    pub duration: Option<u32>,
    pub status: Option<String>,
    pub emi: Option<f64>,
}

/// Loan terms fed into a what-if simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedLoan {
    pub amount: f64,
    pub interest_rate: f64,
    pub tenure_months: u32,
}

/// Adjustments applied on top of a [`SimulatedLoan`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhatIf {
    /// Extra amount paid on top of the EMI each month.
    #[serde(rename = "extraEMI")]
    pub extra_emi: f64,
    /// One-off prepayment.
    pub prepayment: f64,
}

/// Body of `POST /loan/simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub loan: SimulatedLoan,
    pub what_if: WhatIf,
}

/// Server-computed outcome of a simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationResult {
    pub debt_ratio: f64,
    pub stress_level: Option<String>,
    pub risk_score: f64,
    pub interest_saved: f64,
    pub new_emi: f64,
    pub months: Option<u32>,
    /// ISO-8601 date the loan would be paid off.
    pub new_end_date: Option<String>,
}
