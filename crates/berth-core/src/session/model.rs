//! Session domain model.
//!
//! A session is a single containerized runtime unit belonging to exactly
//! one workspace. Its status changes only through explicit start/stop calls
//! or through an external change observed by the polling refresher.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

/// Runtime status of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    Running,
    Stopped,
    Pending,
    Error,
}

impl SessionStatus {
    /// Returns true when a start call applies to this status.
    pub fn is_startable(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Returns true when a stop call applies to this status.
    pub fn is_stoppable(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Container descriptor attached to a session, when the platform reports one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Image reference the session runs
    pub image: String,
    /// Exposed ports
    #[serde(default)]
    pub ports: Vec<u16>,
    /// Environment variables passed to the container
    #[serde(default)]
    pub environment: HashMap<String, String>,
}

/// A containerized runtime unit belonging to a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier assigned by the platform
    pub id: String,
    /// Id of the owning workspace
    pub workspace_id: String,
    /// Display name
    pub name: String,
    /// Current runtime status
    pub status: SessionStatus,
    /// Timestamp when the session was created (RFC 3339)
    pub created_at: String,
    /// Timestamp when the session was last updated (RFC 3339)
    pub updated_at: String,
    /// Container descriptor, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_info: Option<ContainerInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_wire_form_is_lowercase() {
        assert_eq!(
            serde_json::to_value(SessionStatus::Running).unwrap(),
            serde_json::json!("running")
        );
        let status: SessionStatus = serde_json::from_value(serde_json::json!("stopped")).unwrap();
        assert_eq!(status, SessionStatus::Stopped);
    }

    #[test]
    fn test_status_display_and_parse() {
        assert_eq!(SessionStatus::Pending.to_string(), "pending");
        assert_eq!(
            SessionStatus::from_str("error").unwrap(),
            SessionStatus::Error
        );
        assert!(SessionStatus::from_str("paused").is_err());
    }

    #[test]
    fn test_startable_and_stoppable() {
        assert!(SessionStatus::Stopped.is_startable());
        assert!(!SessionStatus::Running.is_startable());
        assert!(SessionStatus::Running.is_stoppable());
        assert!(!SessionStatus::Pending.is_stoppable());
    }

    #[test]
    fn test_session_roundtrip_with_container_info() {
        let session = Session {
            id: "s-1".to_string(),
            workspace_id: "ws-1".to_string(),
            name: "builder".to_string(),
            status: SessionStatus::Stopped,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
            container_info: Some(ContainerInfo {
                image: "ubuntu:24.04".to_string(),
                ports: vec![8080],
                environment: HashMap::from([("TERM".to_string(), "xterm".to_string())]),
            }),
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
