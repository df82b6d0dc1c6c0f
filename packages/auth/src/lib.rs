//! Bonfire session bootstrap
//!
//! Shared authentication flow for the Bonfire clients: build the GitHub
//! authorization URL, exchange the returned code through the backend,
//! persist the session locally, and rehydrate it on startup.
//!
//! Two bootstrap flavors exist, one per client:
//! - [`DeviceSession`] drives an interactive browser flow with a loopback
//!   callback listener and persists token plus user record.
//! - [`WebSession`] receives the authorization code embedded in a request
//!   URL, persists the token only, and re-fetches the profile on startup.

pub mod authorize;
pub mod device;
pub mod error;
pub mod server;
pub mod session;
pub mod store;
pub mod web;

pub use authorize::{authorize_url, ProviderConfig};
pub use device::DeviceSession;
pub use error::{AuthError, AuthResult};
pub use server::CallbackServer;
pub use session::Session;
pub use store::{PersistedSession, SessionStore};
pub use web::WebSession;
