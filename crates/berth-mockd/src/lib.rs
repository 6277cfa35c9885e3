//! Mock platform backend.
//!
//! Serves the workspace/session API the Berth console talks to, with all
//! state in memory. Used for local development and as the stub backend in
//! integration tests. Not a product.

pub mod auth;
pub mod sessions;
pub mod state;
pub mod system;
pub mod workspaces;

use axum::Router;
use axum::routing::{delete, get, post, put};
use state::MockState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Shared handle to the mock backend state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<RwLock<MockState>>,
}

impl AppState {
    /// Wraps a fresh `MockState` accepting the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockState::new(username, password))),
        }
    }

    /// Like `new`, plus the demo workspace.
    pub async fn seeded(username: impl Into<String>, password: impl Into<String>) -> Self {
        let state = Self::new(username, password);
        state.write().await.seed_demo();
        state
    }

    /// Read access to the underlying state.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, MockState> {
        self.inner.read().await
    }

    /// Write access to the underlying state. Tests use this to mutate
    /// sessions behind the console's back, standing in for another client.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, MockState> {
        self.inner.write().await
    }
}

/// Builds the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v0/auth/internal", post(auth::login))
        .route("/api/v0/auth/me", get(auth::me))
        .route("/api/v0/health", get(system::health))
        .route("/api/v0/version", get(system::version))
        .route(
            "/api/v0/workspaces",
            get(workspaces::list).post(workspaces::create),
        )
        .route(
            "/api/v0/workspaces/:workspace_id",
            put(workspaces::update).delete(workspaces::remove),
        )
        .route(
            "/api/v0/workspaces/:workspace_id/sessions",
            get(sessions::list).post(sessions::create),
        )
        .route(
            "/api/v0/workspaces/:workspace_id/sessions/:session_id",
            delete(sessions::remove),
        )
        .route(
            "/api/v0/workspaces/:workspace_id/sessions/:session_id/start",
            post(sessions::start),
        )
        .route(
            "/api/v0/workspaces/:workspace_id/sessions/:session_id/stop",
            post(sessions::stop),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the router on an ephemeral local port.
///
/// Returns the bound address and the serve task. Integration tests point a
/// client at `http://{addr}/api/v0`.
pub async fn serve_ephemeral(
    state: AppState,
) -> std::io::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await?;
    let addr = listener.local_addr()?;
    let app = router(state);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("mock server exited: {e}");
        }
    });
    Ok((addr, handle))
}
