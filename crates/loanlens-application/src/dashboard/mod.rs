//! Dashboard snapshot cache and its refill worker.

mod cache;
mod worker;

pub use cache::{DashboardCache, SnapshotView};
pub use worker::RefillWorker;
