//! User identity and credential domain.

pub mod model;

pub use model::{Credential, Identity};
