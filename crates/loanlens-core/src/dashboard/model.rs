//! Dashboard snapshot domain model.
//!
//! A snapshot is the aggregate financial read-model computed by the backend.
//! The client never derives these numbers itself; it only caches and
//! displays them.

use serde::{Deserialize, Serialize};

/// Aggregate figures returned by `GET /dashboard`.
///
/// Missing numeric fields decode as zero, matching how the backend reports a
/// user who has not entered financial information yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    /// Sum of the EMIs of all active loans.
    #[serde(rename = "totalEMI")]
    pub total_emi: f64,
    /// Debt stress score in `0..=100`.
    pub stress_score: f64,
    /// Most recent loans, newest first.
    pub recent_loans: Vec<LoanSummary>,
    /// Historical stress values, when the backend tracks them.
    pub stress_trend: Vec<StressPoint>,
}

impl DashboardSnapshot {
    /// Income left after expenses, before loan repayments.
    pub fn disposable_income(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }

    /// Whether the user has entered an income yet.
    pub fn has_income(&self) -> bool {
        self.monthly_income > 0.0
    }

    /// Stress score clamped into the documented range.
    pub fn clamped_stress_score(&self) -> f64 {
        if self.stress_score.is_nan() {
            return 0.0;
        }
        self.stress_score.clamp(0.0, 100.0)
    }
}

/// Loan entry embedded in a snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanSummary {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(rename = "type", alias = "loanType")]
    pub loan_type: String,
    pub amount: f64,
    pub interest_rate: f64,
    pub status: Option<String>,
    pub emi: f64,
}

impl LoanSummary {
    pub fn label(&self) -> &str {
        if self.loan_type.trim().is_empty() {
            "Loan"
        } else {
            &self.loan_type
        }
    }

    /// Status as displayed; the backend omits it for active loans.
    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or("ACTIVE")
    }
}

/// One sample of the stress trend series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StressPoint {
    #[serde(alias = "month", alias = "date")]
    pub label: String,
    pub stress: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_backend_payload() {
        let snapshot: DashboardSnapshot = serde_json::from_value(json!({
            "monthlyIncome": 50000,
            "monthlyExpenses": 20000,
            "totalEMI": 12000.5,
            "stressScore": 42,
            "recentLoans": [
                {"_id": "l1", "type": "Home Loan", "amount": 150000, "interestRate": 3.5, "status": "ACTIVE", "emi": 870.0}
            ]
        }))
        .unwrap();

        assert_eq!(snapshot.total_emi, 12000.5);
        assert_eq!(snapshot.recent_loans.len(), 1);
        assert_eq!(snapshot.recent_loans[0].id.as_deref(), Some("l1"));
        assert_eq!(snapshot.disposable_income(), 30000.0);
        assert!(snapshot.stress_trend.is_empty());
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let snapshot: DashboardSnapshot = serde_json::from_value(json!({})).unwrap();
        assert!(!snapshot.has_income());
        assert!(snapshot.recent_loans.is_empty());
    }

    #[test]
    fn test_loan_type_alias_and_label() {
        let loan: LoanSummary =
            serde_json::from_value(json!({"loanType": "Car", "emi": 300})).unwrap();
        assert_eq!(loan.label(), "Car");
        assert_eq!(loan.status_or_default(), "ACTIVE");

        let unnamed = LoanSummary::default();
        assert_eq!(unnamed.label(), "Loan");
    }

    #[test]
    fn test_stress_score_is_clamped() {
        let snapshot = DashboardSnapshot {
            stress_score: 140.0,
            ..Default::default()
        };
        assert_eq!(snapshot.clamped_stress_score(), 100.0);
    }
}
