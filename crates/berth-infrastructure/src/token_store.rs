//! Persisted bearer token storage.
//!
//! Provides expiry-bound retention of the bearer token in
//! ~/.config/berth/token.json.

use crate::paths::BerthPaths;
use berth_core::auth::AuthToken;
use berth_core::error::Result;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;

/// Storage for the bearer token and its expiry.
///
/// Responsibilities:
/// - Persist the token/expiry pair to token.json
/// - Return the token only while the expiry lies in the future
/// - Clear storage when the persisted token is expired or unreadable
///
/// Does NOT:
/// - Perform network calls
/// - Decide who is logged in (the auth controller owns that)
/// - Encrypt the credential (plaintext JSON, mode 600 on Unix)
///
/// All operations are synchronous and side-effect only the persisted file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a TokenStore at the default path (~/.config/berth/token.json).
    ///
    /// # Errors
    ///
    /// Returns a config error when the config directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: BerthPaths::token_file()?,
        })
    }

    /// Creates a TokenStore with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persists the token and its expiry.
    ///
    /// The file is written via a temp file and an atomic rename so a crash
    /// mid-write never leaves a truncated credential behind.
    ///
    /// # Errors
    ///
    /// Returns an IO error when the file cannot be written, or a
    /// serialization error when the token cannot be encoded.
    pub fn save(&self, token: &AuthToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(token)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let mut file = File::create(&tmp_path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Returns the stored token while it is still valid.
    ///
    /// A missing file yields `None`. An expired or unreadable token is
    /// removed from storage before `None` is returned, so a later read does
    /// not repeat the check against stale data.
    pub fn token(&self) -> Option<AuthToken> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("failed to read token file: {e}");
                return None;
            }
        };

        let token: AuthToken = match serde_json::from_str(&content) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("discarding unreadable token file: {e}");
                self.clear();
                return None;
            }
        };

        if !token.is_valid() {
            self.clear();
            return None;
        }

        Some(token)
    }

    /// Returns the raw bearer string while the token is valid.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| t.token)
    }

    /// Returns true while a valid token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Returns true when the stored token expires within the margin.
    pub fn is_expiring_soon(&self) -> bool {
        self.token().is_some_and(|t| t.is_expiring_soon())
    }

    /// Removes the persisted token unconditionally.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("failed to remove token file: {e}"),
        }
    }

    /// Returns the path to the token file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TokenStore {
        TokenStore::with_path(dir.path().join("token.json"))
    }

    #[test]
    fn test_missing_file_is_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_save_then_read_valid_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let token = AuthToken::new("tok-1", Utc::now() + Duration::hours(1));
        store.save(&token).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.bearer().unwrap(), "tok-1");
    }

    #[test]
    fn test_expired_token_is_cleared_on_read() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let token = AuthToken::new("tok-1", Utc::now() - Duration::seconds(1));
        store.save(&token).unwrap();
        assert!(store.path().exists());

        assert!(store.token().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_cleared_on_read() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        assert!(store.token().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let token = AuthToken::new("tok-1", Utc::now() + Duration::hours(1));
        store.save(&token).unwrap();

        store.clear();
        store.clear();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_expiring_soon() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let token = AuthToken::new("tok-1", Utc::now() + Duration::minutes(2));
        store.save(&token).unwrap();
        assert!(store.is_expiring_soon());

        let token = AuthToken::new("tok-1", Utc::now() + Duration::hours(1));
        store.save(&token).unwrap();
        assert!(!store.is_expiring_soon());
    }

    #[test]
    fn test_save_overwrites_previous_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .save(&AuthToken::new("old", Utc::now() + Duration::hours(1)))
            .unwrap();
        store
            .save(&AuthToken::new("new", Utc::now() + Duration::hours(1)))
            .unwrap();

        assert_eq!(store.bearer().unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&AuthToken::new("tok-1", Utc::now() + Duration::hours(1)))
            .unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
