//! Loan records and what-if simulation.

pub mod model;

pub use model::{Loan, NewLoan, SimulatedLoan, SimulationRequest, SimulationResult, WhatIf};
