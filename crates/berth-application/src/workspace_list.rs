//! Workspace list controller.

use berth_client::api_client::ApiClient;
use berth_client::error::ApiResult;
use berth_core::protocol::{CreateWorkspaceRequest, UpdateWorkspaceRequest};
use berth_core::workspace::Workspace;
use std::sync::Arc;

/// Owns the in-memory workspace collection mirroring remote state.
///
/// Local state changes only from server-confirmed payloads: a create
/// appends the entity the server returned (server-assigned id and
/// timestamps), never a client-made placeholder. Mutators take `&mut self`,
/// so two loads on one controller cannot race each other.
pub struct WorkspaceListController {
    client: Arc<ApiClient>,
    items: Vec<Workspace>,
}

impl WorkspaceListController {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            items: Vec::new(),
        }
    }

    /// The current collection.
    pub fn items(&self) -> &[Workspace] {
        &self.items
    }

    /// Fetches the full collection and replaces local state.
    ///
    /// On failure local state is left unchanged; the caller surfaces the
    /// error message.
    pub async fn load(&mut self) -> ApiResult<()> {
        let items = self.client.list_workspaces().await?;
        self.items = items;
        Ok(())
    }

    /// Creates a workspace and appends the canonical entity.
    pub async fn create(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> ApiResult<Workspace> {
        let request = CreateWorkspaceRequest {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        let workspace = self.client.create_workspace(&request).await?;
        self.items.push(workspace.clone());
        Ok(workspace)
    }

    /// Updates a workspace and replaces the matching element in place.
    pub async fn update(
        &mut self,
        workspace_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> ApiResult<Workspace> {
        let request = UpdateWorkspaceRequest {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        let updated = self.client.update_workspace(workspace_id, &request).await?;
        if let Some(existing) = self.items.iter_mut().find(|w| w.id == updated.id) {
            *existing = updated.clone();
        } else {
            self.items.push(updated.clone());
        }
        Ok(updated)
    }

    /// Deletes a workspace and removes the matching element.
    pub async fn delete(&mut self, workspace_id: &str) -> ApiResult<()> {
        self.client.delete_workspace(workspace_id).await?;
        self.items.retain(|w| w.id != workspace_id);
        Ok(())
    }
}
