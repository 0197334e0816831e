//! Project configuration
//!
//! A project is reached through two opaque strings, the API URL and the
//! access token. They can be supplied directly, read from the environment,
//! or (with the `cli` feature) loaded from a TOML file.

use crate::error::RedcapError;
use crate::transport::http::DEFAULT_TIMEOUT_SECS;
use serde::Deserialize;
use std::fmt;

/// Environment variable holding the REDCap API URL
pub const URL_ENV: &str = "REDCAP_API_URL";
/// Environment variable holding the REDCap API token
pub const TOKEN_ENV: &str = "REDCAP_API_TOKEN";
/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "REDCAP_TIMEOUT_SECS";

/// Connection settings for a REDCap project
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    /// API endpoint, e.g. `https://redcap.example.org/api/`
    pub url: String,
    pub token: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Fetch metadata, forms and events when the project is opened
    #[serde(default = "default_true")]
    pub initialize: bool,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl ProjectConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            initialize: true,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_initialize(mut self, initialize: bool) -> Self {
        self.initialize = initialize;
        self
    }

    /// Read the configuration from `REDCAP_API_URL`, `REDCAP_API_TOKEN` and
    /// the optional `REDCAP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, RedcapError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RedcapError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| RedcapError::ConfigError(format!("{} is not set", key)))
        };

        let mut config = Self::new(required(URL_ENV)?, required(TOKEN_ENV)?);
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                RedcapError::ConfigError(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    TIMEOUT_ENV, timeout
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document with `url`, `token` and optional
    /// `timeout_secs` / `initialize` keys.
    #[cfg(feature = "cli")]
    pub fn from_toml_str(content: &str) -> Result<Self, RedcapError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| RedcapError::ConfigError(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "cli")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, RedcapError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RedcapError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check that url and token are present and the timeout is non-zero
    pub fn validate(&self) -> Result<(), RedcapError> {
        if self.url.trim().is_empty() {
            return Err(RedcapError::ConfigError("API URL is empty".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(RedcapError::ConfigError("API token is empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(RedcapError::ConfigError(
                "Timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("initialize", &self.initialize)
            .finish()
    }
}
