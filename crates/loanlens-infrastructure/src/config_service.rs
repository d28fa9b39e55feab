//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` and layers environment
//! overrides on top: defaults < config file < environment.

use crate::paths::LoanLensPaths;
use loanlens_core::config::ClientConfig;
use loanlens_core::{LoanLensError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "LOANLENS_API_URL";
pub const ENV_LOG: &str = "LOANLENS_LOG";
pub const ENV_TIMEOUT_SECS: &str = "LOANLENS_TIMEOUT_SECS";

/// Loads client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `config.toml` in the default config directory (or `base_path`).
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = LoanLensPaths::new(base_path).config_file()?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file and applies environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Loads the file only. A missing file yields defaults.
    pub fn load_file(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Writes the configuration back to disk.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(config)?)?;
        Ok(())
    }
}

fn apply_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url;
    }
    if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
        config.log_level = level;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
        let secs = raw.trim().parse::<u64>().map_err(|_| {
            LoanLensError::config(format!("{ENV_TIMEOUT_SECS} must be a number of seconds"))
        })?;
        config.request_timeout_secs = Some(secs);
    }
    Ok(())
}
