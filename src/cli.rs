//! Command-line interface for board_relay.

use board_relay::BoardProfile;
use clap::{Parser, Subcommand};

/// Board Relay - forwards physical board state to browser clients
#[derive(Parser, Debug)]
#[command(name = "board_relay")]
#[command(about = "Relay physical board state from embedded boards to a web page", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP relay server
    Serve {
        /// Path to TOML config file (defaults are used if it doesn't exist)
        #[arg(short, long, default_value = "board_relay.toml")]
        config: std::path::PathBuf,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Board profile to serve (overrides config)
        #[arg(long)]
        profile: Option<BoardProfile>,
    },

    /// List the supported board profiles
    Profiles,
}
