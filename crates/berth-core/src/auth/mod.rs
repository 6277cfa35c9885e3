//! Authentication domain: bearer token and the auth state machine.

pub mod state;
pub mod token;

pub use state::{AuthEvent, AuthState, reduce};
pub use token::{AuthToken, EXPIRY_MARGIN_MINUTES, expiry_margin};
