//! Configuration management for the charter tracker.
//!
//! Provides TOML-based configuration with platform config paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/charter/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lookup and fan-out behavior
    pub scanning: ScanningConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `CHARTER_DEBUG_LOGGING`: Override per-row extraction logging (true/false)
    /// - `CHARTER_MAX_CONCURRENT_LOOKUPS`: Override the fan-out width cap
    /// - `CHARTER_REQUEST_TIMEOUT_SECS`: Override the per-attempt HTTP timeout
    pub fn load_with_env() -> ConfigResult<Self> {
        Self::load()?.with_env()
    }

    /// Apply environment overrides to an already loaded config and validate
    /// the result.
    pub fn with_env(mut self) -> ConfigResult<Self> {
        self.apply_env();
        self.validate()?;
        Ok(self)
    }

    /// Apply `CHARTER_*` environment overrides in place.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("CHARTER_DEBUG_LOGGING") {
            if let Ok(enabled) = val.parse() {
                self.scanning.debug_logging = enabled;
                tracing::debug!("Override scanning.debug_logging from env: {}", enabled);
            }
        }

        if let Ok(val) = std::env::var("CHARTER_MAX_CONCURRENT_LOOKUPS") {
            if let Ok(max) = val.parse() {
                self.scanning.max_concurrent_lookups = max;
                tracing::debug!("Override scanning.max_concurrent_lookups from env: {}", max);
            }
        }

        if let Ok(val) = std::env::var("CHARTER_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.scanning.request_timeout_secs = secs;
                tracing::debug!("Override scanning.request_timeout_secs from env: {}", secs);
            }
        }
    }

    /// Reject values the scanner cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scanning.max_concurrent_lookups == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.max_concurrent_lookups".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.scanning.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.request_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses platform base directories: `~/.config/charter/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "charter", "charter").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Lookup and fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Upper bound on concurrent per-boat lookups
    pub max_concurrent_lookups: usize,
    /// Per-attempt HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Log per-row extraction decisions
    pub debug_logging: bool,
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: 10,
            request_timeout_secs: 10,
            debug_logging: false,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
