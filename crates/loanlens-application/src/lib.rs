//! Application layer for the LoanLens client.
//!
//! Holds the session store, the dashboard cache with its invalidation
//! coupling, and the use-case services built on top of them.

pub mod admin_service;
pub mod app;
pub mod assistant_service;
pub mod dashboard;
pub mod finance_service;
pub mod loan_service;
pub mod session;

#[cfg(test)]
mod test_support;

pub use admin_service::AdminService;
pub use app::LoanLensApp;
pub use assistant_service::AssistantService;
pub use dashboard::{DashboardCache, RefillWorker, SnapshotView};
pub use finance_service::{FinanceService, StressOverview};
pub use loan_service::LoanService;
pub use session::{RegisterOutcome, SessionSignal, SessionStore};
