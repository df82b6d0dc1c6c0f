//! In-memory session state

use bonfire_api::User;

/// An authenticated session: the bearer token and the user it belongs to.
///
/// A `Session` only exists after a successful exchange or rehydration, so a
/// live user record always comes with a token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}
