//! Presentation helpers over server-computed stress figures.
//!
//! Nothing here recomputes the stress score; these functions only bucket and
//! break down numbers that already came back in a snapshot.

use crate::dashboard::DashboardSnapshot;
use serde::Serialize;
use std::fmt;

/// Coarse bucket for a stress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    /// Buckets a `0..=100` score: below 34 is low, below 67 medium.
    pub fn from_score(score: f64) -> Self {
        if score < 34.0 {
            Self::Low
        } else if score < 67.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Your financial health is good. Keep maintaining!",
            Self::Medium => "Monitor your finances carefully. Avoid new loans.",
            Self::High => "Critical! Take immediate action to reduce debt.",
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

/// Share of disposable income consumed by one loan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanStress {
    pub name: String,
    pub amount: f64,
    pub emi: f64,
    /// Percentage of disposable income, rounded.
    pub stress: i64,
}

/// Per-loan stress contribution, highest first.
///
/// Each loan contributes `emi / (income - expenses)` as a rounded
/// percentage. With no disposable income every contribution is 0.
pub fn loan_stress_contributions(snapshot: &DashboardSnapshot) -> Vec<LoanStress> {
    let disposable = snapshot.disposable_income();

    let mut contributions: Vec<LoanStress> = snapshot
        .recent_loans
        .iter()
        .map(|loan| LoanStress {
            name: loan.label().to_string(),
            amount: loan.amount,
            emi: loan.emi,
            stress: if disposable > 0.0 {
                (loan.emi / disposable * 100.0).round() as i64
            } else {
                0
            },
        })
        .collect();

    contributions.sort_by(|a, b| b.stress.cmp(&a.stress));
    contributions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::LoanSummary;

    fn loan(name: &str, emi: f64) -> LoanSummary {
        LoanSummary {
            loan_type: name.to_string(),
            emi,
            ..Default::default()
        }
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(StressLevel::from_score(0.0), StressLevel::Low);
        assert_eq!(StressLevel::from_score(33.9), StressLevel::Low);
        assert_eq!(StressLevel::from_score(34.0), StressLevel::Medium);
        assert_eq!(StressLevel::from_score(66.9), StressLevel::Medium);
        assert_eq!(StressLevel::from_score(67.0), StressLevel::High);
    }

    #[test]
    fn test_contributions_sorted_descending() {
        let snapshot = DashboardSnapshot {
            monthly_income: 5000.0,
            monthly_expenses: 3000.0,
            recent_loans: vec![loan("Car", 200.0), loan("Home", 900.0)],
            ..Default::default()
        };

        let contributions = loan_stress_contributions(&snapshot);
        assert_eq!(contributions[0].name, "Home");
        assert_eq!(contributions[0].stress, 45);
        assert_eq!(contributions[1].stress, 10);
    }

    #[test]
    fn test_no_disposable_income() {
        let snapshot = DashboardSnapshot {
            monthly_income: 1000.0,
            monthly_expenses: 1500.0,
            recent_loans: vec![loan("Car", 200.0)],
            ..Default::default()
        };
        assert_eq!(loan_stress_contributions(&snapshot)[0].stress, 0);
    }
}
