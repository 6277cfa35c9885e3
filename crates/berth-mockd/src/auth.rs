//! Auth endpoints and the bearer check shared by protected handlers.

use crate::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use berth_core::protocol::{ApiErrorBody, Credentials, LoginResponse};
use berth_core::user::User;

/// Error shape every handler returns on failure.
pub type ApiFailure = (StatusCode, Json<ApiErrorBody>);

pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (
        status,
        Json(ApiErrorBody {
            error: message.into(),
        }),
    )
}

/// Checks the bearer token and resolves the calling user.
///
/// Missing header, unknown token, and expired token all collapse to 401;
/// the console treats them identically.
pub(crate) async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, ApiFailure> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    let Some(token) = bearer else {
        return Err(failure(
            StatusCode::UNAUTHORIZED,
            "authentication required",
        ));
    };

    state
        .write()
        .await
        .authenticate(&token)
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "invalid or expired token"))
}

/// `POST /auth/internal`
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, ApiFailure> {
    state
        .write()
        .await
        .login(&credentials.user, &credentials.pass)
        .map(Json)
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "invalid credentials"))
}

/// `GET /auth/me`
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, ApiFailure> {
    let user = authenticate(&state, &headers).await?;
    Ok(Json(user))
}
