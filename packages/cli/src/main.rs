use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "bonfire")]
#[command(about = "Bonfire - share what you're building, signed in with GitHub")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with GitHub via the system browser
    Login {
        /// Re-authenticate even if a valid session exists
        #[arg(long)]
        force: bool,
    },
    /// Sign out and delete the stored session
    Logout,
    /// Show the current session status
    Status,
    /// Print the signed-in user's profile
    Whoami,
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Login { force } => commands::login(&config, force).await,
        Commands::Logout => commands::logout(&config).await,
        Commands::Status => commands::status(&config).await,
        Commands::Whoami => commands::whoami(&config).await,
    }
}
