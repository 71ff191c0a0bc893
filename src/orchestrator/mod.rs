//! Turn orchestration.
//!
//! [`TurnOrchestrator`] sequences human and computer turns against the engine
//! through [`crate::engine::EngineAdapter`]. It owns the only mutable copy of
//! the mirrored state; presentation layers read it and send commands.

mod error;
#[allow(clippy::module_inception)]
mod orchestrator;
mod phase;

pub use error::{EngineOp, OrchestratorError};
pub use orchestrator::{Progress, TurnOrchestrator};
pub use phase::{Committed, FirstMover, Flight, HumanStep, Phase, Staging};
