//! Client configuration for the Berth console.
//!
//! Configuration priority: explicit overrides > environment variables >
//! config.toml > built-in defaults. File loading lives in
//! `berth-infrastructure`; this module owns the shape and the defaults.

use crate::error::{BerthError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL of the platform API, including the versioned prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9000/api/v0";

/// Environment variable overriding the API base URL.
pub const ENV_API_BASE_URL: &str = "BERTH_API_BASE_URL";

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_retries() -> u32 {
    0
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_expiry_check_interval_secs() -> u64 {
    30
}

/// Configuration consumed by the API client and the controllers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the platform API (e.g. `http://localhost:9000/api/v0`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Retry count accepted by the client. The request path does not
    /// consult this field; see DESIGN.md.
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Interval between silent session refreshes, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Interval between token validity re-checks, in seconds.
    #[serde(default = "default_expiry_check_interval_secs")]
    pub expiry_check_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            retries: default_retries(),
            poll_interval_secs: default_poll_interval_secs(),
            expiry_check_interval_secs: default_expiry_check_interval_secs(),
        }
    }
}

impl ClientConfig {
    /// Builds a config from defaults plus the environment.
    ///
    /// # Errors
    ///
    /// Returns a config error if the environment supplies a malformed
    /// base URL.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Applies environment overrides on top of the current values.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(ENV_API_BASE_URL) {
            if !raw.trim().is_empty() {
                self.base_url = normalize_base_url(&raw)?;
            }
        }
        Ok(())
    }

    /// Replaces the base URL, normalizing it first.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Expiry check interval as a `Duration`.
    pub fn expiry_check_interval(&self) -> Duration {
        Duration::from_secs(self.expiry_check_interval_secs)
    }
}

/// Normalizes a base URL: trims whitespace and trailing slashes, and
/// requires an http(s) scheme with a host.
///
/// # Errors
///
/// Returns `BerthError::Config` when the URL is empty, has no http(s)
/// scheme, or has no host.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(BerthError::config("base URL must not be empty"));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(BerthError::config(
            "base URL must use http:// or https:// and include a host",
        ));
    }
    let Some((_, remainder)) = trimmed.split_once("://") else {
        return Err(BerthError::config("base URL must include a host"));
    };
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(BerthError::config("base URL must include a host"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.retries, 0);
        assert_eq!(config.poll_interval_secs, 5);
    }

    #[test]
    fn test_normalize_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:9000/api/v0/").unwrap(),
            "http://localhost:9000/api/v0"
        );
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(normalize_base_url("   ").is_err());
    }

    #[test]
    fn test_normalize_rejects_missing_scheme() {
        assert!(normalize_base_url("localhost:9000").is_err());
    }

    #[test]
    fn test_normalize_rejects_missing_host() {
        assert!(normalize_base_url("http:///api/v0").is_err());
    }

    #[test]
    fn test_with_base_url() {
        let config = ClientConfig::default()
            .with_base_url("https://platform.example.com/api/v0/")
            .unwrap();
        assert_eq!(config.base_url, "https://platform.example.com/api/v0");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_value(serde_json::json!({"base_url": "http://h:1/api/v0"})).unwrap();
        assert_eq!(config.base_url, "http://h:1/api/v0");
        assert_eq!(config.poll_interval_secs, 5);
    }
}
