//! Session list controller.
//!
//! Mirrors the sessions of one selected workspace. The polling refresher
//! drives `load_silent` on this controller to reflect externally-changed
//! session status without user action.

use berth_client::api_client::ApiClient;
use berth_client::error::ApiResult;
use berth_core::protocol::CreateSessionRequest;
use berth_core::session::Session;
use std::sync::Arc;

/// Owns the in-memory session collection of a single workspace.
///
/// Like the workspace controller, local state changes only from
/// server-confirmed payloads.
pub struct SessionListController {
    client: Arc<ApiClient>,
    workspace_id: String,
    items: Vec<Session>,
}

impl SessionListController {
    pub fn new(client: Arc<ApiClient>, workspace_id: impl Into<String>) -> Self {
        Self {
            client,
            workspace_id: workspace_id.into(),
            items: Vec::new(),
        }
    }

    /// Id of the workspace this controller mirrors.
    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// The current collection.
    pub fn items(&self) -> &[Session] {
        &self.items
    }

    /// Fetches the full collection and replaces local state.
    pub async fn load(&mut self) -> ApiResult<()> {
        let items = self.client.list_sessions(&self.workspace_id).await?;
        self.items = items;
        Ok(())
    }

    /// Silent reload for background polling: a failure is traced and
    /// swallowed, and local state stays as it was.
    pub async fn load_silent(&mut self) {
        if let Err(e) = self.load().await {
            tracing::debug!(
                workspace_id = %self.workspace_id,
                "silent session refresh failed: {e}"
            );
        }
    }

    /// Creates a session and appends the canonical entity.
    pub async fn create(&mut self, request: &CreateSessionRequest) -> ApiResult<Session> {
        let session = self
            .client
            .create_session(&self.workspace_id, request)
            .await?;
        self.items.push(session.clone());
        Ok(session)
    }

    /// Starts one session, applying the server's payload in place.
    pub async fn start(&mut self, session_id: &str) -> ApiResult<Session> {
        let session = self
            .client
            .start_session(&self.workspace_id, session_id)
            .await?;
        self.replace(session.clone());
        Ok(session)
    }

    /// Stops one session, applying the server's payload in place.
    pub async fn stop(&mut self, session_id: &str) -> ApiResult<Session> {
        let session = self
            .client
            .stop_session(&self.workspace_id, session_id)
            .await?;
        self.replace(session.clone());
        Ok(session)
    }

    /// Deletes a session and removes the matching element.
    pub async fn delete(&mut self, session_id: &str) -> ApiResult<()> {
        self.client
            .delete_session(&self.workspace_id, session_id)
            .await?;
        self.items.retain(|s| s.id != session_id);
        Ok(())
    }

    /// Starts every stopped session, one call at a time.
    ///
    /// Each success is applied to local state as it resolves; a failure on
    /// one element is logged and does not abort the remaining elements.
    /// Returns the number of start calls issued, which is zero when
    /// nothing was stopped.
    pub async fn start_all(&mut self) -> usize {
        let targets: Vec<String> = self
            .items
            .iter()
            .filter(|s| s.status.is_startable())
            .map(|s| s.id.clone())
            .collect();

        for session_id in &targets {
            if let Err(e) = self.start(session_id).await {
                tracing::warn!(session_id = %session_id, "start failed: {e}");
            }
        }
        targets.len()
    }

    /// Stops every running session, one call at a time. Same error policy
    /// and return value as `start_all`.
    pub async fn stop_all(&mut self) -> usize {
        let targets: Vec<String> = self
            .items
            .iter()
            .filter(|s| s.status.is_stoppable())
            .map(|s| s.id.clone())
            .collect();

        for session_id in &targets {
            if let Err(e) = self.stop(session_id).await {
                tracing::warn!(session_id = %session_id, "stop failed: {e}");
            }
        }
        targets.len()
    }

    fn replace(&mut self, session: Session) {
        if let Some(existing) = self.items.iter_mut().find(|s| s.id == session.id) {
            *existing = session;
        } else {
            self.items.push(session);
        }
    }
}
