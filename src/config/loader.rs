//! Configuration file loading with precedence handling.

use crate::model::ErrorPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LISTBIND_CONFIG";
/// Environment variable overriding the error policy.
pub const ERROR_POLICY_ENV: &str = "LISTBIND_ERROR_POLICY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An override environment variable holds an unusable value.
    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; missing ones fall back to [`BindingConfig::default`].
/// Corresponds to `~/.config/listbind/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// How programmer errors are surfaced: `"panic"` or `"log"`.
    #[serde(default)]
    pub error_policy: Option<ErrorPolicy>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Filter directive used when `RUST_LOG` is unset, e.g. `"listbind=debug"`.
    #[serde(default)]
    pub log_filter: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file and env vars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConfig {
    /// How programmer errors are surfaced.
    pub error_policy: ErrorPolicy,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Fallback tracing filter.
    pub log_filter: String,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            log_file_path: default_log_path(),
            log_filter: "info".to_string(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/listbind/listbind.log` on Linux, the platform
/// equivalent elsewhere, or `listbind.log` in the current directory when no
/// state directory exists.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("listbind").join("listbind.log"),
        None => PathBuf::from("listbind.log"),
    }
}

/// Resolve default config file path.
///
/// Returns `None` if the platform has no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("listbind").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument
/// 2. `LISTBIND_CONFIG` environment variable
/// 3. Default path `~/.config/listbind/config.toml`
///
/// Missing config files are not errors.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> BindingConfig {
    let defaults = BindingConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    BindingConfig {
        error_policy: config.error_policy.unwrap_or(defaults.error_policy),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        log_filter: config.log_filter.unwrap_or(defaults.log_filter),
    }
}

/// Apply environment variable overrides to a merged config.
///
/// Checks `LISTBIND_ERROR_POLICY` (`panic` or `log`, case-insensitive).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnv`] if the variable is set to anything else.
pub fn apply_env_overrides(mut config: BindingConfig) -> Result<BindingConfig, ConfigError> {
    if let Ok(value) = std::env::var(ERROR_POLICY_ENV) {
        config.error_policy = value.parse().map_err(|e: crate::model::error::InvalidErrorPolicy| {
            ConfigError::InvalidEnv {
                var: ERROR_POLICY_ENV,
                reason: e.to_string(),
            }
        })?;
    }

    Ok(config)
}

/// Resolve the full configuration: file by precedence, merged onto defaults,
/// then environment overrides.
///
/// # Errors
///
/// Propagates file read, parse and environment errors.
pub fn load(config_path: Option<PathBuf>) -> Result<BindingConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    apply_env_overrides(merge_config(file))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
