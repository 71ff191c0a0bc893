//! Strictly Quarto client library.
//!
//! Plays Quarto against a computer opponent whose rules and strategy live in
//! an opaque engine. The client mirrors the engine's state, checks that the
//! human's selections are complete before submitting them, and sequences
//! human and computer turns.
//!
//! # Architecture
//!
//! - **model**: typed mirror of the engine state (pieces, board, game state)
//! - **engine**: the raw [`Engine`] boundary and the validating [`EngineAdapter`]
//! - **gate**: selection completeness checks run before any submission
//! - **orchestrator**: the [`TurnOrchestrator`] turn state machine
//! - **tui**: the terminal front end
//!
//! # Example
//!
//! ```no_run
//! use strictly_quarto_client::{EngineAdapter, FirstMover, LocalEngine, TurnOrchestrator};
//!
//! # fn example() -> anyhow::Result<()> {
//! let adapter = EngineAdapter::new(Box::new(LocalEngine::new(7)));
//! let mut game = TurnOrchestrator::start(adapter)?;
//! game.choose_first_player(FirstMover::Computer)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod engine;
pub mod gate;
pub mod model;
pub mod orchestrator;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError};

// Crate-level exports - Engine boundary
pub use engine::{
    Engine, EngineAdapter, EngineError, EngineErrorKind, EngineLoader, LocalEngine,
    LocalEngineLoader,
};

// Crate-level exports - Data model
pub use model::{Board, Cell, GameState, Outcome, Piece, PolicyAction};

// Crate-level exports - Orchestration
pub use orchestrator::{
    Committed, EngineOp, FirstMover, Flight, HumanStep, OrchestratorError, Phase, Progress,
    Staging, TurnOrchestrator,
};
