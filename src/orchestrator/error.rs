//! Orchestrator errors.

use derive_more::{Display, From};

use crate::engine::EngineError;
use crate::gate::GateError;

/// Engine operation that failed during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EngineOp {
    /// State fetch.
    #[display("fetch_game_state")]
    FetchGameState,
    /// Computer move query.
    #[display("fetch_policy_action")]
    FetchPolicyAction,
    /// Move submission.
    #[display("play_turn")]
    PlayTurn,
    /// Game-over query.
    #[display("is_game_over")]
    IsGameOver,
    /// Winner query.
    #[display("judge_winner")]
    JudgeWinner,
    /// Reset.
    #[display("reset")]
    Reset,
}

/// Why a command was not applied or did not finish.
#[derive(Debug, Clone, Display, From)]
pub enum OrchestratorError {
    /// The selection was rejected by the legality gate.
    #[display("{}", _0)]
    #[from]
    Rejected(GateError),

    /// Command not valid in the current phase.
    #[display("Cannot {} while {}", command, phase)]
    OutOfTurn {
        /// The attempted command.
        command: &'static str,
        /// Label of the current phase.
        phase: &'static str,
    },

    /// An engine call failed. After an accepted mutation the phase is
    /// [`crate::orchestrator::Phase::Resyncing`]; otherwise nothing changed.
    #[display("Engine call {} failed: {}", operation, source)]
    EngineCall {
        /// Which call failed.
        operation: EngineOp,
        /// The underlying failure.
        source: EngineError,
    },
}

impl std::error::Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::EngineCall { source, .. } => Some(source),
            Self::OutOfTurn { .. } => None,
        }
    }
}

impl OrchestratorError {
    /// Wraps an engine failure for the given operation.
    pub fn engine(operation: EngineOp) -> impl FnOnce(EngineError) -> Self {
        move |source| Self::EngineCall { operation, source }
    }
}
