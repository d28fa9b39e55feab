//! Credential persistence trait.
//!
//! Defines the interface for keeping the bearer credential across process
//! restarts.

use crate::error::Result;
use crate::user::Credential;

/// Storage for the single persisted bearer credential.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Credential files have appropriate permissions (e.g., 600 on Unix)
/// - Credentials are never logged or exposed in error messages
pub trait CredentialStore: Send + Sync {
    /// Loads the persisted credential, if any.
    fn load(&self) -> Result<Option<Credential>>;

    /// Persists the credential, replacing any previous one.
    fn save(&self, credential: &Credential) -> Result<()>;

    /// Removes the persisted credential. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}
