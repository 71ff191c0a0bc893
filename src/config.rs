//! Client configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the terminal client, read from a TOML file.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// File that receives log output while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: String,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Seed for the computer's policy. Random when absent.
    #[serde(default)]
    engine_seed: Option<u64>,
}

fn default_log_file() -> String {
    "strictly_quarto.log".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            log_filter: default_log_filter(),
            engine_seed: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(log_file = %config.log_file, seed = ?config.engine_seed, "Config loaded");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the seed when one was given on the command line.
    pub fn with_seed_override(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            debug!(seed, "Overriding engine seed");
            self.engine_seed = Some(seed);
        }
        self
    }

    /// Returns the configured seed, or draws a fresh one.
    pub fn resolve_seed(&self) -> u64 {
        self.engine_seed.unwrap_or_else(rand::random)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
