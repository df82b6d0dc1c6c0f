//! Local persistence for session credentials
//!
//! One TOML file under the user's home directory holds the bearer token and,
//! for the device client, the serialized user record. The web client stores
//! the token only and re-fetches the profile on startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use bonfire_api::User;

use crate::error::{AuthError, AuthResult};

/// Session record persisted on disk.
///
/// The user record is stored alongside the token or not at all, so a
/// persisted user can never outlive its credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub user: Option<User>,
}

/// File-backed store for the persisted session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store at the default location (`~/.bonfire/session.toml`)
    pub fn new() -> AuthResult<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| AuthError::Storage("Could not determine home directory".to_string()))?;

        Ok(Self {
            path: home_dir.join(".bonfire").join("session.toml"),
        })
    }

    /// Create a store at a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if any.
    ///
    /// An absent file is a signed-out state, not an error.
    pub async fn load(&self) -> AuthResult<Option<PersistedSession>> {
        if !self.path.exists() {
            debug!("No persisted session at {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        let session: PersistedSession = toml::from_str(&content)
            .map_err(|e| AuthError::Storage(format!("Invalid session file: {}", e)))?;

        debug!("Loaded persisted session from {}", self.path.display());
        Ok(Some(session))
    }

    /// Save the session, replacing any previous record
    pub async fn save(&self, session: &PersistedSession) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(session)
            .map_err(|e| AuthError::Storage(format!("Failed to serialize session: {}", e)))?;

        fs::write(&self.path, content).await?;
        debug!("Persisted session to {}", self.path.display());
        Ok(())
    }

    /// Delete the persisted session (sign-out)
    pub async fn clear(&self) -> AuthResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
            debug!("Cleared persisted session at {}", self.path.display());
        }
        Ok(())
    }
}
