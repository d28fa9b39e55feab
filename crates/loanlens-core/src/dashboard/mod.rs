//! Dashboard read-model returned by the backend.

pub mod model;

pub use model::{DashboardSnapshot, LoanSummary, StressPoint};
