//! Credential store implementations.
//!
//! The credential is persisted as a single string under the `token` key of
//! `credentials.json`, and survives restarts until an explicit logout.

use crate::paths::LoanLensPaths;
use crate::storage::AtomicJsonFile;
use loanlens_core::Result;
use loanlens_core::credential::CredentialStore;
use loanlens_core::user::Credential;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// On-disk layout of `credentials.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CredentialFile {
    token: Option<String>,
}

/// File-backed credential store.
///
/// Reads are served from an in-memory cache after the first load, since the
/// gateway consults the store on every request.
pub struct FileCredentialStore {
    file: AtomicJsonFile<CredentialFile>,
    /// `None` until the file has been read once.
    cached: RwLock<Option<Option<Credential>>>,
}

impl FileCredentialStore {
    /// Creates a store at the default location (or under `base_path`).
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = LoanLensPaths::new(base_path).credentials_file()?;
        Ok(Self::with_path(path))
    }

    /// Creates a store backed by an explicit file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            cached: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn set_cache(&self, value: Option<Credential>) {
        let mut write_lock = self.cached.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(value);
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        {
            let read_lock = self.cached.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = self
            .file
            .load()?
            .and_then(|file| file.token)
            .filter(|token| !token.trim().is_empty())
            .map(Credential::new);

        self.set_cache(loaded.clone());
        Ok(loaded)
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        self.file.save(&CredentialFile {
            token: Some(credential.expose().to_string()),
        })?;
        self.set_cache(Some(credential.clone()));
        tracing::debug!(path = %self.file.path().display(), "Credential persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.file.remove()?;
        self.set_cache(None);
        tracing::debug!(path = %self.file.path().display(), "Credential cleared");
        Ok(())
    }
}

/// Process-local credential store.
///
/// Used when persistence is disabled and by tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self
            .credential
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        *self.credential.write().unwrap_or_else(|e| e.into_inner()) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.credential.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
