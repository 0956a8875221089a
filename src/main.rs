//! Board Relay - server entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use board_relay::{BoardProfile, RelayConfig};
use clap::Parser;
use cli::{Cli, Command};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            profile,
        } => run_server(config, host, port, profile).await,
        Command::Profiles => {
            list_profiles();
            Ok(())
        }
    }
}

/// Run the HTTP relay server
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_server(
    config: std::path::PathBuf,
    host: Option<String>,
    port: Option<u16>,
    profile: Option<BoardProfile>,
) -> Result<()> {
    initialize_tracing();

    let config = RelayConfig::load(&config)?.with_overrides(host, port, profile);
    info!(
        host = %config.host(),
        port = config.port(),
        profile = %config.profile(),
        "Starting board relay"
    );

    board_relay::serve(&config).await
}

fn list_profiles() {
    for profile in BoardProfile::iter() {
        println!("{:<14} {:>2} cells  {}", profile.to_string(), profile.cell_count(), profile.description());
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,board_relay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
