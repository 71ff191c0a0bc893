//! Command-line interface for the Quarto client.

use clap::{Parser, Subcommand};

/// Strictly Quarto - play Quarto against the computer in the terminal
#[derive(Parser, Debug)]
#[command(name = "quarto")]
#[command(about = "Terminal Quarto client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client config file
    #[arg(long, default_value = "quarto.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal UI
    Play {
        /// Seed for the computer player (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the engine's fresh game state as JSON
    State {
        /// Seed for the engine (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
    },
}
