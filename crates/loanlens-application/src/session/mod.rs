//! Session lifecycle and the invalidation signal.

pub mod signal;
pub mod store;

pub use signal::{SessionSignal, SignalChannel};
pub use store::{RegisterOutcome, SessionStore};
