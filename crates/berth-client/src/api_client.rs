//! API gateway client.
//!
//! Single reqwest-backed client wrapping all remote calls (auth,
//! workspaces, sessions). Injects the bearer token on every
//! non-public request, normalizes all failures into `ApiError`, and
//! broadcasts a logout signal on authentication failure.

use crate::error::{ApiError, ApiResult};
use berth_core::auth::AuthToken;
use berth_core::config::{ClientConfig, normalize_base_url};
use berth_core::error::{BerthError, Result};
use berth_core::protocol::{
    ApiErrorBody, CreateSessionRequest, CreateWorkspaceRequest, Credentials, DeleteResponse,
    HealthResponse, LoginResponse, UpdateWorkspaceRequest, VersionResponse,
};
use berth_core::session::Session;
use berth_core::user::User;
use berth_core::workspace::Workspace;
use berth_infrastructure::token_store::TokenStore;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Broadcast by the client when a call fails with HTTP 401.
///
/// The auth controller registers the receiving end at construction time;
/// there is no ambient process-wide signal.
#[derive(Debug, Clone)]
pub struct LogoutSignal {
    /// Message from the rejecting response
    pub reason: String,
}

/// Whether a request carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// login, health, version
    Public,
    /// everything else
    Authenticated,
}

/// Single HTTP client for the platform API.
///
/// All methods return `ApiResult`: data on success, the uniform `ApiError`
/// otherwise. A missing or expired local token does not short-circuit an
/// authenticated call; the request goes out without the header and the
/// server rejects it, which keeps the failure shape identical everywhere.
pub struct ApiClient {
    http: Client,
    base_url: RwLock<String>,
    token_store: Arc<TokenStore>,
    logout_tx: RwLock<Option<mpsc::UnboundedSender<LogoutSignal>>>,
}

impl ApiClient {
    /// Creates a client from configuration and the shared token store.
    ///
    /// # Errors
    ///
    /// Returns a config error when the base URL is malformed, or an
    /// internal error when the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, token_store: Arc<TokenStore>) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| BerthError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: RwLock::new(base_url),
            token_store,
            logout_tx: RwLock::new(None),
        })
    }

    /// Registers the observer notified on authentication failure.
    ///
    /// Called by the auth controller when it is constructed. A later
    /// registration replaces the previous observer.
    pub fn register_logout_observer(&self, tx: mpsc::UnboundedSender<LogoutSignal>) {
        *self.logout_tx.write().expect("logout observer lock poisoned") = Some(tx);
    }

    /// Returns the base URL currently in effect.
    pub fn base_url(&self) -> String {
        self.base_url.read().expect("base url lock poisoned").clone()
    }

    /// Replaces the base URL at runtime without rebuilding the client.
    ///
    /// # Errors
    ///
    /// Returns a config error when the new URL is malformed; the previous
    /// URL stays in effect.
    pub fn update_base_url(&self, base_url: &str) -> Result<()> {
        let normalized = normalize_base_url(base_url)?;
        *self.base_url.write().expect("base url lock poisoned") = normalized;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Auth and system endpoints
    // ------------------------------------------------------------------

    /// `POST /auth/internal`. On success the returned token and expiry are
    /// persisted to the token store before this method returns.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let builder = self
            .request(Method::POST, "/auth/internal", Access::Public)
            .json(credentials);
        let response: LoginResponse = self.dispatch(builder, Access::Public).await?;

        let token = AuthToken::parse(&response.token, &response.expires_at)
            .map_err(|e| ApiError::unknown(format!("login returned an unusable token: {e}")))?;
        self.token_store
            .save(&token)
            .map_err(|e| ApiError::unknown(format!("failed to persist token: {e}")))?;

        Ok(response)
    }

    /// `GET /auth/me`.
    pub async fn current_user(&self) -> ApiResult<User> {
        let builder = self.request(Method::GET, "/auth/me", Access::Authenticated);
        self.dispatch(builder, Access::Authenticated).await
    }

    /// `GET /health`.
    pub async fn health(&self) -> ApiResult<HealthResponse> {
        let builder = self.request(Method::GET, "/health", Access::Public);
        self.dispatch(builder, Access::Public).await
    }

    /// `GET /version`.
    pub async fn version(&self) -> ApiResult<VersionResponse> {
        let builder = self.request(Method::GET, "/version", Access::Public);
        self.dispatch(builder, Access::Public).await
    }

    // ------------------------------------------------------------------
    // Workspace endpoints
    // ------------------------------------------------------------------

    /// `GET /workspaces`.
    pub async fn list_workspaces(&self) -> ApiResult<Vec<Workspace>> {
        let builder = self.request(Method::GET, "/workspaces", Access::Authenticated);
        self.dispatch(builder, Access::Authenticated).await
    }

    /// `POST /workspaces`.
    pub async fn create_workspace(&self, request: &CreateWorkspaceRequest) -> ApiResult<Workspace> {
        let builder = self
            .request(Method::POST, "/workspaces", Access::Authenticated)
            .json(request);
        self.dispatch(builder, Access::Authenticated).await
    }

    /// `PUT /workspaces/{id}`.
    pub async fn update_workspace(
        &self,
        workspace_id: &str,
        request: &UpdateWorkspaceRequest,
    ) -> ApiResult<Workspace> {
        let path = format!("/workspaces/{workspace_id}");
        let builder = self
            .request(Method::PUT, &path, Access::Authenticated)
            .json(request);
        self.dispatch(builder, Access::Authenticated).await
    }

    /// `DELETE /workspaces/{id}`.
    pub async fn delete_workspace(&self, workspace_id: &str) -> ApiResult<DeleteResponse> {
        let path = format!("/workspaces/{workspace_id}");
        let builder = self.request(Method::DELETE, &path, Access::Authenticated);
        self.dispatch(builder, Access::Authenticated).await
    }

    // ------------------------------------------------------------------
    // Session endpoints
    // ------------------------------------------------------------------

    /// `GET /workspaces/{ws_id}/sessions`.
    pub async fn list_sessions(&self, workspace_id: &str) -> ApiResult<Vec<Session>> {
        let path = format!("/workspaces/{workspace_id}/sessions");
        let builder = self.request(Method::GET, &path, Access::Authenticated);
        self.dispatch(builder, Access::Authenticated).await
    }

    /// `POST /workspaces/{ws_id}/sessions`.
    pub async fn create_session(
        &self,
        workspace_id: &str,
        request: &CreateSessionRequest,
    ) -> ApiResult<Session> {
        let path = format!("/workspaces/{workspace_id}/sessions");
        let builder = self
            .request(Method::POST, &path, Access::Authenticated)
            .json(request);
        self.dispatch(builder, Access::Authenticated).await
    }

    /// `POST /workspaces/{ws_id}/sessions/{id}/start`.
    pub async fn start_session(&self, workspace_id: &str, session_id: &str) -> ApiResult<Session> {
        let path = format!("/workspaces/{workspace_id}/sessions/{session_id}/start");
        let builder = self.request(Method::POST, &path, Access::Authenticated);
        self.dispatch(builder, Access::Authenticated).await
    }

    /// `POST /workspaces/{ws_id}/sessions/{id}/stop`.
    pub async fn stop_session(&self, workspace_id: &str, session_id: &str) -> ApiResult<Session> {
        let path = format!("/workspaces/{workspace_id}/sessions/{session_id}/stop");
        let builder = self.request(Method::POST, &path, Access::Authenticated);
        self.dispatch(builder, Access::Authenticated).await
    }

    /// `DELETE /workspaces/{ws_id}/sessions/{id}`.
    pub async fn delete_session(
        &self,
        workspace_id: &str,
        session_id: &str,
    ) -> ApiResult<DeleteResponse> {
        let path = format!("/workspaces/{workspace_id}/sessions/{session_id}");
        let builder = self.request(Method::DELETE, &path, Access::Authenticated);
        self.dispatch(builder, Access::Authenticated).await
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    fn request(&self, method: Method, path: &str, access: Access) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url());
        let mut builder = self.http.request(method, url);
        if access == Access::Authenticated {
            // An absent or expired token means the request goes out without
            // the header; the server rejects it with 401.
            if let Some(bearer) = self.token_store.bearer() {
                builder = builder.bearer_auth(bearer);
            }
        }
        builder
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        access: Access,
    ) -> ApiResult<T> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("request failed before a response arrived: {e}");
                return Err(ApiError::network(format!("request failed: {e}")));
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED && access == Access::Authenticated {
            let (message, details) = Self::read_error_body(response).await;
            let message =
                message.unwrap_or_else(|| "authentication required".to_string());
            self.broadcast_logout(&message);
            let mut error = ApiError::status(status.as_u16(), message);
            if let Some(details) = details {
                error = error.with_details(details);
            }
            return Err(error);
        }

        if !status.is_success() {
            let (message, details) = Self::read_error_body(response).await;
            let message = message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request rejected")
                    .to_string()
            });
            let mut error = ApiError::status(status.as_u16(), message);
            if let Some(details) = details {
                error = error.with_details(details);
            }
            return Err(error);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::unknown(format!("failed to decode response: {e}")))
    }

    /// Extracts `{"error": "..."}` from a failed response, falling back to
    /// the raw body text.
    async fn read_error_body(
        response: reqwest::Response,
    ) -> (Option<String>, Option<serde_json::Value>) {
        let text = response.text().await.unwrap_or_default();
        if text.trim().is_empty() {
            return (None, None);
        }
        match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => {
                let details = serde_json::from_str(&text).ok();
                (Some(body.error), details)
            }
            Err(_) => (Some(text), None),
        }
    }

    /// Clears the token store and notifies the registered observer.
    ///
    /// Runs once per failing call; there is no retry loop behind it.
    fn broadcast_logout(&self, reason: &str) {
        tracing::warn!("authentication failure, clearing stored token: {reason}");
        self.token_store.clear();
        if let Some(tx) = self
            .logout_tx
            .read()
            .expect("logout observer lock poisoned")
            .as_ref()
        {
            let _ = tx.send(LogoutSignal {
                reason: reason.to_string(),
            });
        }
    }
}
