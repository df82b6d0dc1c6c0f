//! CLI commands for the Bonfire device client

use colored::*;
use std::process;
use tracing::error;

use bonfire_api::ApiClient;
use bonfire_auth::{DeviceSession, SessionStore};

use crate::config::Config;

/// Build the session bootstrap from config, exiting on setup failures
fn bootstrap(config: &Config) -> DeviceSession {
    let api = match ApiClient::new(&config.api_url) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{} Failed to create API client: {}", "✗".red().bold(), e);
            process::exit(1);
        }
    };

    let store = match SessionStore::new() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{} Failed to open session store: {}", "✗".red().bold(), e);
            process::exit(1);
        }
    };

    DeviceSession::new(api, store).with_callback_port(config.callback_port)
}

pub async fn login(config: &Config, force: bool) {
    let mut session = bootstrap(config);

    if session.restore().await.unwrap_or(false) && !force {
        let user = session.user().map(|u| u.login.clone()).unwrap_or_default();
        println!(
            "{} Already signed in as {}",
            "✓".green().bold(),
            user.cyan()
        );
        println!("Use {} to re-authenticate", "bonfire login --force".yellow());
        return;
    }

    println!(
        "{}",
        "🔥 Opening browser for GitHub sign-in...".bold().cyan()
    );
    println!("   Waiting for the authorization callback.");
    println!();

    match session.sign_in().await {
        Ok(user) => {
            println!("{} Signed in as {}", "✓".green().bold(), user.login.cyan());
        }
        Err(e) => {
            error!("Sign-in failed: {}", e);
            eprintln!("{} Sign-in failed: {}", "✗".red().bold(), e);
            process::exit(1);
        }
    }
}

pub async fn logout(config: &Config) {
    let mut session = bootstrap(config);

    match session.sign_out().await {
        Ok(()) => {
            println!("{} Signed out", "✓".green().bold());
        }
        Err(e) => {
            eprintln!("{} Sign-out failed: {}", "✗".red().bold(), e);
            process::exit(1);
        }
    }
}

pub async fn status(config: &Config) {
    let mut session = bootstrap(config);
    let _ = session.restore().await;

    println!("{}", "🔥 Bonfire session".bold().cyan());
    println!();

    match session.user() {
        Some(user) => {
            println!("  {} Signed in", "✓".green().bold());
            println!("        Account: {}", user.login.cyan());
            println!("        Name:    {}", user.name.cyan());
        }
        None => {
            println!("  {} Not signed in", "✗".red().bold());
            println!();
            println!("Use {} to sign in", "bonfire login".yellow());
        }
    }
}

pub async fn whoami(config: &Config) {
    let mut session = bootstrap(config);
    let _ = session.restore().await;

    match session.user() {
        Some(user) => {
            println!("{}", user.login.bold());
            println!("Name:   {}", user.name);
            println!("Avatar: {}", user.avatar_url);
        }
        None => {
            eprintln!("{} Not signed in", "✗".red().bold());
            process::exit(1);
        }
    }
}
