//! Loan Service
//!
//! Loan list, loan creation and what-if simulation on top of the gateway.
//! Creating a loan invalidates the dashboard through the session signal.

use crate::dashboard::DashboardCache;
use crate::session::SessionStore;
use loanlens_core::Result;
use loanlens_core::gateway::Gateway;
use loanlens_core::loan::{Loan, SimulationResult};
use loanlens_core::validation::{LoanForm, SimulationForm};
use std::sync::Arc;

pub struct LoanService {
    gateway: Arc<dyn Gateway>,
    session: Arc<SessionStore>,
    dashboard: Arc<DashboardCache>,
}

impl LoanService {
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

    /// `GET /loan`
    pub async fn list(&self) -> Result<Vec<Loan>> {
        self.gateway.list_loans().await
    }

    /// Validates and creates a loan, then bumps the signal once.
    pub async fn create(&self, form: &LoanForm) -> Result<Loan> {
        let new_loan = form.validate()?;
        let loan = self.gateway.create_loan(&new_loan).await?;

        tracing::info!(
            loan_type = %loan.loan_type,
            amount = loan.amount,
            "Loan created"
        );
        self.session.bump_signal();
        Ok(loan)
    }

    /// Runs a what-if simulation.
    ///
    /// Blank amount and rate are taken from the most recent cached loan when
    /// one exists; anything still blank falls back to the form defaults.
    /// Simulations are not persisted and do not touch the signal.
    pub async fn simulate(&self, form: &SimulationForm) -> Result<SimulationResult> {
        let request = self.seeded(form).validate()?;
        self.gateway.simulate(&request).await
    }

    fn seeded(&self, form: &SimulationForm) -> SimulationForm {
        let mut form = form.clone();
        let Some(snapshot) = self.dashboard.read() else {
            return form;
        };
        let Some(latest) = snapshot.recent_loans.first() else {
            return form;
        };

        if form.amount.trim().is_empty() && latest.amount > 0.0 {
            form.amount = latest.amount.to_string();
        }
        if form.interest_rate.trim().is_empty() && latest.interest_rate > 0.0 {
            form.interest_rate = latest.interest_rate.to_string();
        }
        form
    }
}
