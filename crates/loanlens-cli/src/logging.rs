//! Tracing setup for the binary.
//!
//! Records go to a daily-rolling file in the log directory. Stderr only
//! receives warnings unless `--verbose` is given.

use anyhow::{Context, Result};
use loanlens_core::config::{ClientConfig, DEFAULT_LOG_LEVEL};
use loanlens_infrastructure::LoanLensPaths;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_PREFIX: &str = "loanlens.log";

/// Builds the filter: `RUST_LOG` wins over the configured level.
fn build_filter(config: &ClientConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber. Keep the guard alive until exit so the
/// file writer flushes.
pub fn init(config: &ClientConfig, home: Option<&Path>, verbose: bool) -> Result<Option<WorkerGuard>> {
    let stderr_level = if verbose { Level::TRACE } else { Level::WARN };
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr.with_max_level(stderr_level));

    let (file_layer, guard) = if config.log_to_file {
        let log_dir = LoanLensPaths::new(home).log_dir()?;
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

