//! Workspace domain model.

use serde::{Deserialize, Serialize};

/// A named container for one or more sessions.
///
/// The platform assigns the id at creation time and keeps it stable for the
/// lifetime of the workspace. The name is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique identifier assigned by the platform
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Timestamp when the workspace was created (RFC 3339)
    pub created_at: String,
    /// Timestamp when the workspace was last updated (RFC 3339)
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_omitted_when_absent() {
        let workspace = Workspace {
            id: "ws-1".to_string(),
            name: "Dev".to_string(),
            description: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&workspace).unwrap();
        assert!(json.get("description").is_none());
    }
}
