//! Unified path management for loanlens files.
//!
//! All configuration, credential and log files are resolved here so that
//! every component agrees on the layout on each platform.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "loanlens";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for loanlens_core::LoanLensError {
    fn from(err: PathError) -> Self {
        loanlens_core::LoanLensError::config(err.to_string())
    }
}

/// Path layout for loanlens.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/loanlens/          # Config directory
/// ├── config.toml              # Client configuration
/// └── credentials.json         # Persisted bearer token
///
/// ~/.local/share/loanlens/     # Data directory
/// └── logs/
///     └── loanlens.log.YYYY-MM-DD
/// ```
///
/// A base override (used by tests and `--home`) places everything under a
/// single directory instead.
#[derive(Debug, Clone, Default)]
pub struct LoanLensPaths {
    base: Option<PathBuf>,
}

impl LoanLensPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the loanlens configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the loanlens data directory.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the credentials file.
    ///
    /// # Security Note
    ///
    /// The file is written with 600 permissions on Unix.
    pub fn credentials_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("credentials.json"))
    }

    pub fn log_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
