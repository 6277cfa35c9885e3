//! Auth state controller.
//!
//! Owns the single source of truth for "who is logged in". Every transition
//! goes through the state machine in `berth_core::auth` and is published
//! over a watch channel; the rest of the console only ever subscribes.

use berth_client::api_client::{ApiClient, LogoutSignal};
use berth_core::auth::{AuthEvent, AuthState, reduce};
use berth_core::protocol::Credentials;
use berth_infrastructure::token_store::TokenStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

fn apply_event(state: &watch::Sender<AuthState>, event: AuthEvent) {
    state.send_modify(|current| {
        let next = reduce(current, event);
        *current = next;
    });
}

/// Controller owning the authentication state machine.
///
/// Construction registers a logout observer with the API client, so an
/// authentication failure on any call site drives this controller to
/// `Unauthenticated` without the failing caller's involvement.
///
/// Must be created inside a tokio runtime; the signal listener runs as a
/// background task for the life of the controller.
pub struct AuthController {
    client: Arc<ApiClient>,
    store: Arc<TokenStore>,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthController {
    /// Creates the controller in the `Loading` state and wires the logout
    /// signal from the API client into the state machine.
    pub fn new(client: Arc<ApiClient>, store: Arc<TokenStore>) -> Self {
        let (state_tx, _) = watch::channel(AuthState::initial());
        let state = Arc::new(state_tx);

        let (signal_tx, mut signal_rx) = mpsc::unbounded_channel::<LogoutSignal>();
        client.register_logout_observer(signal_tx);

        let listener_state = state.clone();
        tokio::spawn(async move {
            while let Some(signal) = signal_rx.recv().await {
                tracing::debug!("logout signal received: {}", signal.reason);
                apply_event(
                    &listener_state,
                    AuthEvent::SessionInvalidated {
                        error: Some(signal.reason),
                    },
                );
            }
        });

        Self {
            client,
            store,
            state,
        }
    }

    /// Subscribes to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// App-start transition out of `Loading`.
    ///
    /// Without a valid stored token the machine settles in
    /// `Unauthenticated` with no error. With one, the user is fetched; a
    /// failure clears the token and surfaces the message.
    pub async fn initialize(&self) {
        if !self.store.is_authenticated() {
            apply_event(&self.state, AuthEvent::SessionInvalidated { error: None });
            return;
        }
        match self.client.current_user().await {
            Ok(user) => apply_event(&self.state, AuthEvent::LoginSucceeded { user }),
            Err(e) => {
                // 401 already cleared the store via the gateway; clear
                // explicitly for every other failure shape.
                self.store.clear();
                apply_event(
                    &self.state,
                    AuthEvent::SessionInvalidated {
                        error: Some(e.message),
                    },
                );
            }
        }
    }

    /// Runs a full login: credentials, then the user fetch.
    ///
    /// A token that cannot be paired with a resolvable user is treated as
    /// a failed login; no partial state survives. Returns whether the
    /// machine ended up `Authenticated`.
    pub async fn login(&self, user: &str, pass: &str) -> bool {
        apply_event(&self.state, AuthEvent::LoginStarted);

        let credentials = Credentials {
            user: user.to_string(),
            pass: pass.to_string(),
        };
        if let Err(e) = self.client.login(&credentials).await {
            apply_event(&self.state, AuthEvent::LoginFailed { error: e.message });
            return false;
        }

        match self.client.current_user().await {
            Ok(user) => {
                apply_event(&self.state, AuthEvent::LoginSucceeded { user });
                true
            }
            Err(e) => {
                self.store.clear();
                apply_event(&self.state, AuthEvent::LoginFailed { error: e.message });
                false
            }
        }
    }

    /// Clears the stored token and settles in `Unauthenticated`. Idempotent.
    pub fn logout(&self) {
        self.store.clear();
        apply_event(&self.state, AuthEvent::LoggedOut);
    }

    /// Clears only the error message; no state transition.
    pub fn clear_error(&self) {
        apply_event(&self.state, AuthEvent::ErrorCleared);
    }

    /// Spawns the fixed-interval token validity re-check.
    ///
    /// Handles expiry that happens while the console sits idle, and token
    /// removal by another process sharing the store. Runs until the token
    /// is cancelled.
    pub fn spawn_expiry_watchdog(
        &self,
        interval: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let store = self.store.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval fires immediately; the first real check waits one period
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let believes_authenticated =
                            state.borrow().is_authenticated();
                        if believes_authenticated && !store.is_authenticated() {
                            tracing::info!("stored token no longer valid, forcing logout");
                            apply_event(
                                &state,
                                AuthEvent::SessionInvalidated {
                                    error: Some("session expired".to_string()),
                                },
                            );
                        }
                    }
                }
            }
        })
    }
}
