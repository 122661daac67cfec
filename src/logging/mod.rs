//! Tracing subscriber initialization.
//!
//! Logs are written to a file so a host application's own output stays
//! untouched. Follow them with `tail -f` while debugging binding issues.

use crate::config::BindingConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Configured filter directive does not parse
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter {
        /// The rejected directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Build the event filter: `RUST_LOG` when set and valid, else `fallback`.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidFilter`] if `fallback` is needed and does not parse.
pub fn env_filter(fallback: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback).map_err(|e| LoggingError::InvalidFilter {
        filter: fallback.to_string(),
        reason: e.to_string(),
    })
}

/// Split a log path into its directory and file name, creating the directory.
fn prepare_log_file(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
            path: directory.to_path_buf(),
            source,
        })?;
    }

    Ok((directory, file_name))
}

/// Initialize the global tracing subscriber with file-based logging.
///
/// Writes to `config.log_file_path`, creating its directory if needed.
/// `RUST_LOG` takes precedence over `config.log_filter`.
///
/// # Errors
///
/// Fails if the directory cannot be created, the path has no file name, the
/// filter is invalid, or a global subscriber was already installed.
pub fn init(config: &BindingConfig) -> Result<(), LoggingError> {
    let (directory, file_name) = prepare_log_file(&config.log_file_path)?;
    let filter = env_filter(&config.log_filter)?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
