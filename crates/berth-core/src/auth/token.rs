//! Bearer token domain model.
//!
//! `AuthToken` pairs the opaque credential with its expiry and owns the
//! validity arithmetic. Persistence lives in `berth-infrastructure`.

use crate::error::{BerthError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Minutes before expiry at which a token counts as expiring soon.
pub const EXPIRY_MARGIN_MINUTES: i64 = 5;

/// Margin before expiry at which a token counts as expiring soon.
pub fn expiry_margin() -> Duration {
    Duration::minutes(EXPIRY_MARGIN_MINUTES)
}

/// An opaque bearer credential with its expiry timestamp.
///
/// A token is never considered usable past its expiry. Holders are expected
/// to check `is_valid` before attaching the credential to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Opaque credential string presented as `Authorization: Bearer <token>`
    pub token: String,
    /// Instant after which the credential must not be used
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Creates a token from its parts.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Parses a token from the wire representation (RFC 3339 expiry).
    ///
    /// # Errors
    ///
    /// Returns a security error when the expiry timestamp does not parse.
    pub fn parse(token: impl Into<String>, expires_at: &str) -> Result<Self> {
        let expires_at = DateTime::parse_from_rfc3339(expires_at)
            .map_err(|e| BerthError::security(format!("invalid token expiry: {e}")))?
            .with_timezone(&Utc);
        Ok(Self::new(token, expires_at))
    }

    /// Returns true while the expiry lies in the future relative to `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Returns true while the expiry lies in the future.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Returns true when the expiry falls within the margin of `now`.
    ///
    /// An already expired token is not "expiring soon"; it is invalid.
    pub fn is_expiring_soon_at(&self, now: DateTime<Utc>) -> bool {
        self.is_valid_at(now) && self.expires_at <= now + expiry_margin()
    }

    /// Returns true when the expiry falls within the margin of now.
    pub fn is_expiring_soon(&self) -> bool {
        self.is_expiring_soon_at(Utc::now())
    }
}
