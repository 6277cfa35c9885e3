//! Unified path management for Berth configuration files.
//!
//! All persisted client state lives under the platform config directory.
//! This ensures consistency across Linux, macOS, and Windows.

use berth_core::error::{BerthError, Result};
use std::path::PathBuf;

/// Unified path management for Berth.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/berth/             # Config directory
/// ├── config.toml              # Client configuration
/// └── token.json               # Bearer token and its expiry
/// ```
pub struct BerthPaths;

impl BerthPaths {
    /// Returns the Berth configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a config error when the platform config directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("berth"))
            .ok_or_else(|| BerthError::config("cannot find home directory"))
    }

    /// Returns the path to the client configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted token file.
    ///
    /// # Security Note
    ///
    /// The token file is written with mode 600 on Unix so only the owning
    /// user can read the credential.
    pub fn token_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("token.json"))
    }
}
