//! Request and response models for the Bonfire backend

use serde::{Deserialize, Serialize};

/// Identity record returned by the backend. Opaque to the client and
/// immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub login: String,
    pub avatar_url: String,
}

/// Authorization code exchange request
#[derive(Debug, Serialize)]
pub struct AuthRequest {
    pub code: String,
}

/// Authorization code exchange response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
