//! HTTP client for the platform API.
//!
//! One client wraps every remote call the console makes. Failures never
//! escape as panics or raw transport errors; every method returns the
//! uniform `ApiError` shape.

pub mod api_client;
pub mod error;

pub use api_client::{ApiClient, LogoutSignal};
pub use error::{ApiError, ApiResult, ErrorCode};
