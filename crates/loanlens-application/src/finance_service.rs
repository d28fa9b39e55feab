//! Finance Service
//!
//! Financial information updates and the server-side analysis endpoints.
//! Analysis requests are built from the cached dashboard snapshot, refilled
//! only when the session signal has moved past it.

use crate::dashboard::DashboardCache;
use crate::session::SessionStore;
use loanlens_core::Result;
use loanlens_core::dashboard::DashboardSnapshot;
use loanlens_core::finance::{AnalysisReport, AnalysisRequest, SuggestionsReport};
use loanlens_core::gateway::Gateway;
use loanlens_core::stress::{LoanStress, StressLevel, loan_stress_contributions};
use loanlens_core::validation::FinancialInfoForm;
use std::sync::Arc;

/// Stress figures of the current snapshot, bucketed for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StressOverview {
    pub score: f64,
    pub level: StressLevel,
    pub disposable_income: f64,
    pub contributions: Vec<LoanStress>,
}

impl StressOverview {
    fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let score = snapshot.clamped_stress_score();
        Self {
            score,
            level: StressLevel::from_score(score),
            disposable_income: snapshot.disposable_income(),
            contributions: loan_stress_contributions(snapshot),
        }
    }
}

pub struct FinanceService {
    gateway: Arc<dyn Gateway>,
    session: Arc<SessionStore>,
    dashboard: Arc<DashboardCache>,
}

impl FinanceService {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        session: Arc<SessionStore>,
        dashboard: Arc<DashboardCache>,
    ) -> Self {
        Self {
            gateway,
            session,
            dashboard,
        }
    }

    /// Validates and stores monthly income/expenses, then bumps the signal.
    pub async fn update_financial_info(&self, form: &FinancialInfoForm) -> Result<()> {
        let info = form.validate()?;
        self.gateway.update_financial_info(&info).await?;

        tracing::info!("Financial information updated");
        self.session.bump_signal();
        Ok(())
    }

    /// `POST /finance/analyze`
    pub async fn analyze(&self) -> Result<AnalysisReport> {
        let request = self.analysis_request().await?;
        self.gateway.analyze_finance(&request).await
    }

    /// `POST /stress/analyze`
    pub async fn stress_analysis(&self) -> Result<AnalysisReport> {
        let request = self.analysis_request().await?;
        self.gateway.analyze_stress(&request).await
    }

    /// `POST /suggestions/get`
    pub async fn suggestions(&self) -> Result<SuggestionsReport> {
        let request = self.analysis_request().await?;
        self.gateway.suggestions(&request).await
    }

    /// Local breakdown of the cached snapshot; no extra request when the
    /// cache is current.
    pub async fn stress_overview(&self) -> Result<StressOverview> {
        let snapshot = self.snapshot().await?;
        Ok(StressOverview::from_snapshot(&snapshot))
    }

    async fn snapshot(&self) -> Result<Arc<DashboardSnapshot>> {
        self.dashboard.sync_to(self.session.signal().revision).await
    }

    async fn analysis_request(&self) -> Result<AnalysisRequest> {
        let snapshot = self.snapshot().await?;
        Ok(AnalysisRequest {
            monthly_income: snapshot.monthly_income,
            monthly_expenses: snapshot.monthly_expenses,
            loans: snapshot.recent_loans.clone(),
        })
    }
}
