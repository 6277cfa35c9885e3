//! Session endpoints, nested under their owning workspace.

use crate::AppState;
use crate::auth::{ApiFailure, authenticate, failure};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use berth_core::protocol::{CreateSessionRequest, DeleteResponse};
use berth_core::session::{Session, SessionStatus};

/// `GET /workspaces/{ws_id}/sessions`
pub async fn list(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Session>>, ApiFailure> {
    authenticate(&state, &headers).await?;
    state
        .read()
        .await
        .sessions(&workspace_id)
        .map(|sessions| Json(sessions.to_vec()))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "workspace not found"))
}

/// `POST /workspaces/{ws_id}/sessions`
pub async fn create(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<Session>, ApiFailure> {
    authenticate(&state, &headers).await?;
    if request.name.trim().is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "session name must not be empty",
        ));
    }
    state
        .write()
        .await
        .insert_session(
            &workspace_id,
            request.name.trim(),
            request.status,
            request.container_info,
        )
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "workspace not found"))
}

/// `POST /workspaces/{ws_id}/sessions/{id}/start`
pub async fn start(
    State(state): State<AppState>,
    Path((workspace_id, session_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Session>, ApiFailure> {
    authenticate(&state, &headers).await?;
    state
        .write()
        .await
        .set_session_status(&workspace_id, &session_id, SessionStatus::Running)
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "session not found"))
}

/// `POST /workspaces/{ws_id}/sessions/{id}/stop`
pub async fn stop(
    State(state): State<AppState>,
    Path((workspace_id, session_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Session>, ApiFailure> {
    authenticate(&state, &headers).await?;
    state
        .write()
        .await
        .set_session_status(&workspace_id, &session_id, SessionStatus::Stopped)
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "session not found"))
}

/// `DELETE /workspaces/{ws_id}/sessions/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path((workspace_id, session_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiFailure> {
    authenticate(&state, &headers).await?;
    if state.write().await.remove_session(&workspace_id, &session_id) {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(failure(StatusCode::NOT_FOUND, "session not found"))
    }
}
