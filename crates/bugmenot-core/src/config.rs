//! Configuration management for BugMeNot.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. The engine only ever reads configuration.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration.
///
/// This is loaded from `~/.config/bugmenot/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Outbound query settings
    pub query: QueryConfig,
    /// Search session settings
    pub session: SessionConfig,
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
    /// - `BUGMENOT_BASE_URL`: Override the site base URL
    /// - `BUGMENOT_TIMEOUT_SECS`: Override the request timeout
    /// - `BUGMENOT_DEFAULT_SORT`: Override the initial sort mode
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Values that fail to parse are ignored and the existing value is kept.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("BUGMENOT_BASE_URL") {
            tracing::debug!("Override query.base_url from env: {}", val);
            self.query.base_url = val;
        }

        if let Some(val) = lookup("BUGMENOT_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.query.timeout_secs = secs;
                tracing::debug!("Override query.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("BUGMENOT_DEFAULT_SORT") {
            tracing::debug!("Override session.default_sort from env: {}", val);
            self.session.default_sort = val;
        }
    }

    /// Check values that would otherwise fail late, at request time.
    pub fn validate(&self) -> ConfigResult<()> {
        let base = self.query.base_url.as_str();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "query.base_url".to_string(),
                reason: format!("expected an http(s) URL, got '{base}'"),
            });
        }

        if self.query.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "query.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/bugmenot/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "bugmenot", "bugmenot").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Outbound query settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Site root that `/view/<term>` is appended to
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://bugmenot.com".to_string(),
            timeout_secs: 30,
            user_agent: concat!("bugmenot-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Search session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial sort mode: `none`, `success-rate`, `votes` or `age`
    pub default_sort: String,
    /// Delay before a search is issued, so rapid edits collapse into one query
    pub debounce_ms: u64,
    /// Number of terms kept in the result cache (0 disables caching)
    pub cache_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_sort: "none".to_string(),
            debounce_ms: 250,
            cache_capacity: 32,
        }
    }
}
