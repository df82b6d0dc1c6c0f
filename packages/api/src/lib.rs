//! Bonfire backend API client
//!
//! Thin HTTP client for the hosted Bonfire backend: authorization code
//! exchange and profile lookup. The backend owns the GitHub OAuth exchange;
//! this crate only carries the code over and attaches bearer credentials.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use types::{AuthRequest, AuthResponse, User};
