//! Workspace endpoints.

use crate::AppState;
use crate::auth::{ApiFailure, authenticate, failure};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use berth_core::protocol::{CreateWorkspaceRequest, DeleteResponse, UpdateWorkspaceRequest};
use berth_core::workspace::Workspace;

/// `GET /workspaces`
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Workspace>>, ApiFailure> {
    authenticate(&state, &headers).await?;
    Ok(Json(state.read().await.workspaces().to_vec()))
}

/// `POST /workspaces`
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<Json<Workspace>, ApiFailure> {
    authenticate(&state, &headers).await?;
    if request.name.trim().is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "workspace name must not be empty",
        ));
    }
    let workspace = state
        .write()
        .await
        .insert_workspace(request.name.trim(), request.description.as_deref());
    Ok(Json(workspace))
}

/// `PUT /workspaces/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateWorkspaceRequest>,
) -> Result<Json<Workspace>, ApiFailure> {
    authenticate(&state, &headers).await?;
    if request.name.trim().is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "workspace name must not be empty",
        ));
    }
    state
        .write()
        .await
        .update_workspace(
            &workspace_id,
            request.name.trim(),
            request.description.as_deref(),
        )
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "workspace not found"))
}

/// `DELETE /workspaces/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiFailure> {
    authenticate(&state, &headers).await?;
    if state.write().await.remove_workspace(&workspace_id) {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(failure(StatusCode::NOT_FOUND, "workspace not found"))
    }
}
