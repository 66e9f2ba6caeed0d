//! Configuration loading, validation, and management for utmzz.
//!
//! Loads configuration from `~/.utmzz/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.utmzz/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Cookie names, lifetime and scope
    #[serde(default)]
    pub cookies: CookieConfig,

    /// Extra search engines recognized for organic attribution
    #[serde(default)]
    pub search_engines: Vec<SearchEngineConfig>,
}

/// Cookies read and written per page view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Cookie holding the attribution record
    #[serde(default = "default_record_name")]
    pub record_name: String,

    /// Classic analytics cookie, read in preference to `record_name`
    #[serde(default = "default_legacy_name")]
    pub legacy_name: String,

    /// Session marker cookie
    #[serde(default = "default_session_name")]
    pub session_name: String,

    /// Cookie path
    #[serde(default = "default_path")]
    pub path: String,

    /// Lifetime of the attribution cookie in days
    #[serde(default = "default_lifetime_days")]
    pub lifetime_days: u32,

    /// Cookie domain; defaults to the apex domain of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

fn default_record_name() -> String {
    "__utmzz".into()
}
fn default_legacy_name() -> String {
    "__utmz".into()
}
fn default_session_name() -> String {
    "__utmzzses".into()
}
fn default_path() -> String {
    "/".into()
}
/// Upper bound for `cookies.lifetime_days` (ten years).
pub const MAX_LIFETIME_DAYS: u32 = 3650;

fn default_lifetime_days() -> u32 {
    // six 30-day months
    180
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            record_name: default_record_name(),
            legacy_name: default_legacy_name(),
            session_name: default_session_name(),
            path: default_path(),
            lifetime_days: default_lifetime_days(),
            domain: None,
        }
    }
}

/// A custom search engine entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngineConfig {
    /// Apex domain of the engine (e.g. "duckduckgo.com")
    pub domain: String,

    /// Query parameter carrying the search keyword
    pub param: String,

    /// Source name written for organic visits
    pub name: String,
}

impl TrackerConfig {
    /// Load configuration from the default path (~/.utmzz/config.toml).
    ///
    /// Environment variables take precedence over the file:
    /// - `UTMZZ_COOKIE_DOMAIN`
    /// - `UTMZZ_LIFETIME_DAYS`
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            engines = config.search_engines.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(domain) = lookup("UTMZZ_COOKIE_DOMAIN").filter(|d| !d.is_empty()) {
            self.cookies.domain = Some(domain);
        }

        if let Some(days) = lookup("UTMZZ_LIFETIME_DAYS") {
            self.cookies.lifetime_days = days.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "UTMZZ_LIFETIME_DAYS must be a positive integer, got '{days}'"
                ))
            })?;
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".utmzz")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cookies = &self.cookies;
        let names = [
            ("record_name", &cookies.record_name),
            ("legacy_name", &cookies.legacy_name),
            ("session_name", &cookies.session_name),
        ];
        for (field, name) in names {
            if name.is_empty() || name.contains([';', '=', ' ']) {
                return Err(ConfigError::ValidationError(format!(
                    "cookies.{field} must be a non-empty cookie name, got '{name}'"
                )));
            }
        }

        if cookies.session_name == cookies.record_name
            || cookies.session_name == cookies.legacy_name
        {
            return Err(ConfigError::ValidationError(
                "cookies.session_name must differ from the record cookie names".into(),
            ));
        }

        if cookies.lifetime_days == 0 {
            return Err(ConfigError::ValidationError(
                "cookies.lifetime_days must be > 0".into(),
            ));
        }

        if cookies.lifetime_days > MAX_LIFETIME_DAYS {
            return Err(ConfigError::ValidationError(format!(
                "cookies.lifetime_days must be <= {MAX_LIFETIME_DAYS}, got {}",
                cookies.lifetime_days
            )));
        }

        for engine in &self.search_engines {
            if engine.domain.is_empty() || engine.param.is_empty() || engine.name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "search engine '{}' needs domain, param and name",
                    engine.domain
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
