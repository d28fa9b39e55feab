pub mod assistant;
pub mod auth;
pub mod config;
pub mod credential;
pub mod dashboard;
pub mod error;
pub mod finance;
pub mod gateway;
pub mod loan;
pub mod stress;
pub mod user;
pub mod validation;

// Re-export common error type
pub use error::{LoanLensError, Result};
