//! Wire types for the platform API.
//!
//! Request and response bodies shared by the API client and the mock
//! backend. Entity payloads (`Workspace`, `Session`, `User`) serialize
//! directly from the domain models.

use crate::session::{ContainerInfo, SessionStatus};
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/internal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

/// Response of `POST /auth/internal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer credential
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Expiry timestamp (RFC 3339)
    pub expires_at: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Response of `GET /version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub build: String,
}

/// Body of `POST /workspaces`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /workspaces/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkspaceRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /workspaces/{ws_id}/sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    /// Initial status. The console defaults this to `stopped`.
    #[serde(default = "default_session_status")]
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_info: Option<ContainerInfo>,
}

fn default_session_status() -> SessionStatus {
    SessionStatus::Stopped
}

/// Response of the delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Error body returned by the platform on failed calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_status_defaults_to_stopped() {
        let req: CreateSessionRequest =
            serde_json::from_value(serde_json::json!({"name": "builder"})).unwrap();
        assert_eq!(req.status, SessionStatus::Stopped);
    }

    #[test]
    fn test_credentials_wire_field_names() {
        let creds = Credentials {
            user: "admin".to_string(),
            pass: "secret".to_string(),
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert!(json.get("user").is_some());
        assert!(json.get("pass").is_some());
    }
}
