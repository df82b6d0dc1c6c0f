//! Bonfire web client
//!
//! Serves the minimal web UI: a sign-in link when signed out, the profile
//! when signed in. OAuth callbacks land on `/` with a `?code=` parameter,
//! get exchanged once, and are redirected away so the code never stays in
//! the visible URL.

pub mod app;
pub mod config;
