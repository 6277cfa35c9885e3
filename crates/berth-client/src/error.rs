//! Uniform error shape for remote calls.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result alias for every API client method.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Stable machine-readable code attached to every failed call.
///
/// The wire form is the server status as a string when a response existed
/// (`"404"`), `NETWORK_ERROR` when no response was received, and
/// `UNKNOWN_ERROR` for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A response arrived with this non-success status
    Status(u16),
    /// No response was received
    Network,
    /// Anything else (decode failures, malformed payloads)
    Unknown,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "{status}"),
            Self::Network => write!(f, "NETWORK_ERROR"),
            Self::Unknown => write!(f, "UNKNOWN_ERROR"),
        }
    }
}

/// A failed remote call, normalized.
///
/// Every API client method resolves to either data or this shape; transport
/// exceptions are fully absorbed before a controller sees them.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiError {
    /// Stable code (see `ErrorCode`)
    pub code: ErrorCode,
    /// Human-readable message for the UI layer
    pub message: String,
    /// Raw error payload from the server, when one existed
    pub details: Option<Value>,
}

impl ApiError {
    /// A response arrived with a non-success status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Status(status),
            message: message.into(),
            details: None,
        }
    }

    /// No response was received.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Network,
            message: message.into(),
            details: None,
        }
    }

    /// Anything else went wrong.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Unknown,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches the raw server error payload.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns true for authentication failures (HTTP 401).
    pub fn is_authentication(&self) -> bool {
        matches!(self.code, ErrorCode::Status(401))
    }

    /// Returns true when no response was received.
    pub fn is_network(&self) -> bool {
        matches!(self.code, ErrorCode::Network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_wire_forms() {
        assert_eq!(ErrorCode::Status(404).to_string(), "404");
        assert_eq!(ErrorCode::Network.to_string(), "NETWORK_ERROR");
        assert_eq!(ErrorCode::Unknown.to_string(), "UNKNOWN_ERROR");
    }

    #[test]
    fn test_authentication_predicate() {
        assert!(ApiError::status(401, "nope").is_authentication());
        assert!(!ApiError::status(500, "boom").is_authentication());
        assert!(!ApiError::network("down").is_authentication());
    }

    #[test]
    fn test_display_is_the_message() {
        let err = ApiError::status(500, "internal error");
        assert_eq!(err.to_string(), "internal error");
    }
}
