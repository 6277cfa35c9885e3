//! User domain model.

use serde::{Deserialize, Serialize};

/// A platform account, held only while a valid token exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier assigned by the platform
    pub id: String,
    /// Login name
    pub username: String,
    /// Contact address, when the platform knows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role strings granted to the account
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    /// Returns true when the account carries the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
