//! Authentication state machine.
//!
//! The single source of truth for "who is logged in" is an explicit
//! finite-state machine: a tagged union of states plus a pure transition
//! function. The controller in `berth-application` owns an instance and
//! publishes every transition over a watch channel; nothing else mutates
//! authentication state.

use crate::user::User;

/// Authentication state of the console.
///
/// The machine starts in `Loading` while the stored token is being
/// verified, and afterwards cycles between `Authenticated` and
/// `Unauthenticated` for the life of the process. No state is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Stored credentials are being verified against the platform
    Loading,
    /// A verified user holds a valid token
    Authenticated {
        /// The user fetched from the platform after token verification
        user: User,
    },
    /// Nobody is logged in
    Unauthenticated {
        /// Message describing why the last attempt failed, if any
        error: Option<String>,
    },
}

impl AuthState {
    /// Initial state at process start.
    pub fn initial() -> Self {
        Self::Loading
    }

    /// Returns true when a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    /// Returns the current error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { error } => error.as_deref(),
            _ => None,
        }
    }
}

/// Events that drive the authentication state machine.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A login attempt has been dispatched
    LoginStarted,
    /// Token and user were both obtained
    LoginSucceeded { user: User },
    /// The login call failed, or the token could not be paired with a user
    LoginFailed { error: String },
    /// The user asked to log out
    LoggedOut,
    /// The session became unusable outside a login attempt: a 401 from any
    /// call site, or the expiry watchdog finding the stored token invalid
    SessionInvalidated { error: Option<String> },
    /// The error message was acknowledged
    ErrorCleared,
}

/// Applies an event to a state, producing the next state.
///
/// This is the full transition table; callers never construct `AuthState`
/// values ad hoc. `ErrorCleared` is the only event that does not move the
/// machine: it rewrites the error field of `Unauthenticated` in place and
/// leaves every other state untouched.
pub fn reduce(state: &AuthState, event: AuthEvent) -> AuthState {
    match event {
        AuthEvent::LoginStarted => AuthState::Loading,
        AuthEvent::LoginSucceeded { user } => AuthState::Authenticated { user },
        AuthEvent::LoginFailed { error } => AuthState::Unauthenticated { error: Some(error) },
        AuthEvent::LoggedOut => AuthState::Unauthenticated { error: None },
        AuthEvent::SessionInvalidated { error } => AuthState::Unauthenticated { error },
        AuthEvent::ErrorCleared => match state {
            AuthState::Unauthenticated { .. } => AuthState::Unauthenticated { error: None },
            other => other.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            username: "admin".to_string(),
            email: None,
            roles: vec!["admin".to_string()],
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        assert_eq!(AuthState::initial(), AuthState::Loading);
    }

    #[test]
    fn test_login_cycle() {
        let state = reduce(&AuthState::initial(), AuthEvent::LoginStarted);
        assert_eq!(state, AuthState::Loading);

        let state = reduce(&state, AuthEvent::LoginSucceeded { user: user() });
        assert!(state.is_authenticated());
        assert_eq!(state.user().unwrap().username, "admin");
    }

    #[test]
    fn test_failed_login_carries_error() {
        let state = reduce(
            &AuthState::Loading,
            AuthEvent::LoginFailed {
                error: "invalid credentials".to_string(),
            },
        );
        assert!(!state.is_authenticated());
        assert_eq!(state.error(), Some("invalid credentials"));
    }

    #[test]
    fn test_logout_is_idempotent() {
        let state = reduce(
            &AuthState::Authenticated { user: user() },
            AuthEvent::LoggedOut,
        );
        assert_eq!(state, AuthState::Unauthenticated { error: None });

        let state = reduce(&state, AuthEvent::LoggedOut);
        assert_eq!(state, AuthState::Unauthenticated { error: None });
    }

    #[test]
    fn test_session_invalidated_from_authenticated() {
        let state = reduce(
            &AuthState::Authenticated { user: user() },
            AuthEvent::SessionInvalidated {
                error: Some("session expired".to_string()),
            },
        );
        assert_eq!(state.error(), Some("session expired"));
    }

    #[test]
    fn test_error_cleared_keeps_unauthenticated() {
        let state = AuthState::Unauthenticated {
            error: Some("boom".to_string()),
        };
        let state = reduce(&state, AuthEvent::ErrorCleared);
        assert_eq!(state, AuthState::Unauthenticated { error: None });
    }

    #[test]
    fn test_error_cleared_leaves_authenticated_untouched() {
        let state = AuthState::Authenticated { user: user() };
        let next = reduce(&state, AuthEvent::ErrorCleared);
        assert_eq!(next, state);
    }

    #[test]
    fn test_machine_cycles() {
        // login -> logout -> login again; no terminal state
        let state = reduce(&AuthState::initial(), AuthEvent::LoginSucceeded { user: user() });
        let state = reduce(&state, AuthEvent::LoggedOut);
        let state = reduce(&state, AuthEvent::LoginStarted);
        let state = reduce(&state, AuthEvent::LoginSucceeded { user: user() });
        assert!(state.is_authenticated());
    }
}
