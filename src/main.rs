//! Strictly Quarto - terminal client
//!
//! Play Quarto against the computer, or dump the engine's opening state.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::sync::Arc;
use strictly_quarto_client::{ClientConfig, Engine, EngineLoader, LocalEngineLoader, tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play { seed } => run_play(config.with_seed_override(seed)).await,
        Command::State { seed } => print_state(config.with_seed_override(seed)).await,
    }
}

/// Run the terminal UI
async fn run_play(config: ClientConfig) -> Result<()> {
    initialize_tracing(&config)?;
    let seed = config.resolve_seed();
    info!(seed, "Starting game");
    tui::run_tui(Arc::new(LocalEngineLoader::new(seed))).await
}

/// Print the fresh engine state as pretty JSON
#[instrument(skip(config))]
async fn print_state(config: ClientConfig) -> Result<()> {
    initialize_tracing(&config)?;
    let seed = config.resolve_seed();
    let engine = LocalEngineLoader::new(seed).load().await?;
    let raw = engine.fetch_game_state()?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Send logs to the configured file so the terminal stays clean.
fn initialize_tracing(config: &ClientConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
