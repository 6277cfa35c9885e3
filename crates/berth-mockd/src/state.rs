//! In-memory state of the mock backend.
//!
//! Everything lives in process memory and disappears on restart. The mock
//! is a development fixture; nothing here persists.

use berth_core::protocol::LoginResponse;
use berth_core::session::{Session, SessionStatus};
use berth_core::user::User;
use berth_core::workspace::Workspace;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Lifetime of an issued bearer token.
const TOKEN_TTL_HOURS: i64 = 8;

/// All mutable state behind the mock API.
pub struct MockState {
    username: String,
    password: String,
    operator: User,
    /// Issued tokens and their expiry instants
    tokens: HashMap<String, DateTime<Utc>>,
    workspaces: Vec<Workspace>,
    /// Sessions keyed by owning workspace id
    sessions: HashMap<String, Vec<Session>>,
}

impl MockState {
    /// Creates an empty backend accepting the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let operator = User {
            id: Uuid::new_v4().to_string(),
            username: username.clone(),
            email: Some(format!("{username}@berth.local")),
            roles: vec!["admin".to_string()],
        };
        Self {
            username,
            password: password.into(),
            operator,
            tokens: HashMap::new(),
            workspaces: Vec::new(),
            sessions: HashMap::new(),
        }
    }

    /// Adds a demo workspace with two sessions so `berth watch` has
    /// something to show against a fresh server.
    pub fn seed_demo(&mut self) {
        let workspace = self.insert_workspace("Platform Dev", Some("seeded demo workspace"));
        let workspace_id = workspace.id.clone();
        self.insert_session(&workspace_id, "builder", SessionStatus::Running, None);
        self.insert_session(&workspace_id, "runner", SessionStatus::Stopped, None);
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// Validates credentials and issues a fresh token on success.
    pub fn login(&mut self, user: &str, pass: &str) -> Option<LoginResponse> {
        if user != self.username || pass != self.password {
            return None;
        }
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
        self.tokens.insert(token.clone(), expires_at);
        Some(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_at: expires_at.to_rfc3339(),
        })
    }

    /// Returns the operator when the token is known and unexpired.
    /// Expired tokens are dropped on sight.
    pub fn authenticate(&mut self, token: &str) -> Option<User> {
        match self.tokens.get(token) {
            Some(expires_at) if *expires_at > Utc::now() => Some(self.operator.clone()),
            Some(_) => {
                self.tokens.remove(token);
                None
            }
            None => None,
        }
    }

    /// Forgets an issued token. Used by tests to simulate revocation.
    pub fn revoke_token(&mut self, token: &str) {
        self.tokens.remove(token);
    }

    // ------------------------------------------------------------------
    // Workspaces
    // ------------------------------------------------------------------

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn insert_workspace(&mut self, name: &str, description: Option<&str>) -> Workspace {
        let now = Utc::now().to_rfc3339();
        let workspace = Workspace {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: now.clone(),
            updated_at: now,
        };
        self.workspaces.push(workspace.clone());
        self.sessions.insert(workspace.id.clone(), Vec::new());
        workspace
    }

    pub fn update_workspace(
        &mut self,
        workspace_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Option<Workspace> {
        let workspace = self.workspaces.iter_mut().find(|w| w.id == workspace_id)?;
        workspace.name = name.to_string();
        workspace.description = description.map(str::to_string);
        workspace.updated_at = Utc::now().to_rfc3339();
        Some(workspace.clone())
    }

    /// Removes a workspace and every session it owns.
    pub fn remove_workspace(&mut self, workspace_id: &str) -> bool {
        let before = self.workspaces.len();
        self.workspaces.retain(|w| w.id != workspace_id);
        self.sessions.remove(workspace_id);
        self.workspaces.len() < before
    }

    pub fn workspace_exists(&self, workspace_id: &str) -> bool {
        self.workspaces.iter().any(|w| w.id == workspace_id)
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    pub fn sessions(&self, workspace_id: &str) -> Option<&[Session]> {
        self.sessions.get(workspace_id).map(Vec::as_slice)
    }

    pub fn insert_session(
        &mut self,
        workspace_id: &str,
        name: &str,
        status: SessionStatus,
        container_info: Option<berth_core::session::ContainerInfo>,
    ) -> Option<Session> {
        if !self.workspace_exists(workspace_id) {
            return None;
        }
        let now = Utc::now().to_rfc3339();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            workspace_id: workspace_id.to_string(),
            name: name.to_string(),
            status,
            created_at: now.clone(),
            updated_at: now,
            container_info,
        };
        self.sessions
            .entry(workspace_id.to_string())
            .or_default()
            .push(session.clone());
        Some(session)
    }

    /// Sets a session's status, bumping its update timestamp.
    pub fn set_session_status(
        &mut self,
        workspace_id: &str,
        session_id: &str,
        status: SessionStatus,
    ) -> Option<Session> {
        let session = self
            .sessions
            .get_mut(workspace_id)?
            .iter_mut()
            .find(|s| s.id == session_id)?;
        session.status = status;
        session.updated_at = Utc::now().to_rfc3339();
        Some(session.clone())
    }

    pub fn remove_session(&mut self, workspace_id: &str, session_id: &str) -> bool {
        let Some(sessions) = self.sessions.get_mut(workspace_id) else {
            return false;
        };
        let before = sessions.len();
        sessions.retain(|s| s.id != session_id);
        sessions.len() < before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rejects_bad_credentials() {
        let mut state = MockState::new("admin", "admin");
        assert!(state.login("admin", "wrong").is_none());
        assert!(state.login("admin", "admin").is_some());
    }

    #[test]
    fn test_expired_token_is_dropped() {
        let mut state = MockState::new("admin", "admin");
        let response = state.login("admin", "admin").unwrap();
        state
            .tokens
            .insert(response.token.clone(), Utc::now() - Duration::seconds(1));

        assert!(state.authenticate(&response.token).is_none());
        assert!(!state.tokens.contains_key(&response.token));
    }

    #[test]
    fn test_workspace_delete_drops_sessions() {
        let mut state = MockState::new("admin", "admin");
        let workspace = state.insert_workspace("Dev", None);
        state.insert_session(&workspace.id, "builder", SessionStatus::Stopped, None);

        assert!(state.remove_workspace(&workspace.id));
        assert!(state.sessions(&workspace.id).is_none());
    }

    #[test]
    fn test_session_status_transition() {
        let mut state = MockState::new("admin", "admin");
        let workspace = state.insert_workspace("Dev", None);
        let session = state
            .insert_session(&workspace.id, "builder", SessionStatus::Stopped, None)
            .unwrap();

        let started = state
            .set_session_status(&workspace.id, &session.id, SessionStatus::Running)
            .unwrap();
        assert_eq!(started.status, SessionStatus::Running);
        assert!(started.updated_at >= session.updated_at);
    }

    #[test]
    fn test_seed_demo() {
        let mut state = MockState::new("admin", "admin");
        state.seed_demo();
        assert_eq!(state.workspaces().len(), 1);
        let workspace_id = state.workspaces()[0].id.clone();
        assert_eq!(state.sessions(&workspace_id).unwrap().len(), 2);
    }
}
