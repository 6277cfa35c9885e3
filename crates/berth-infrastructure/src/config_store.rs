//! Client configuration file storage.
//!
//! Loads `ClientConfig` from ~/.config/berth/config.toml, then layers the
//! environment on top. A missing file yields the built-in defaults.

use crate::paths::BerthPaths;
use berth_core::config::ClientConfig;
use berth_core::error::{BerthError, Result};
use std::fs;
use std::path::PathBuf;

/// Storage for the client configuration file (config.toml).
///
/// Read-only: the console never writes configuration back.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a ConfigStore at the default path (~/.config/berth/config.toml).
    ///
    /// # Errors
    ///
    /// Returns a config error when the config directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: BerthPaths::config_file()?,
        })
    }

    /// Creates a ConfigStore with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration.
    ///
    /// Priority: environment > config.toml > defaults.
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the file exists but does not
    /// parse, or a config error when the environment supplies a malformed
    /// base URL. A missing file is not an error.
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            toml::from_str(&content)
                .map_err(|e| BerthError::serialization("TOML", e.to_string()))?
        } else {
            ClientConfig::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Returns the path to the config file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_core::config::DEFAULT_API_BASE_URL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::with_path(dir.path().join("config.toml"));
        let config = store.load().unwrap();
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://10.0.0.5:9000/api/v0\"\n").unwrap();

        let config = ConfigStore::with_path(path).load().unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:9000/api/v0");
        assert_eq!(config.poll_interval_secs, 5);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").unwrap();

        assert!(ConfigStore::with_path(path).load().is_err());
    }
}
