//! Error types for the session bootstrap flows

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("OAuth authorization failed: {0}")]
    OAuthFailed(String),

    #[error("Access denied by user")]
    AccessDenied,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Callback server error: {0}")]
    CallbackServer(String),

    #[error("Failed to open browser: {0}")]
    BrowserOpen(String),

    #[error("API request error: {0}")]
    Api(#[from] bonfire_api::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
