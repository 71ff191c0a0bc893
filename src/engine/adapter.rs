//! Typed, validated access to an [`Engine`].

use tracing::{debug, instrument};

use super::wire::{decode_action, decode_outcome, decode_state};
use super::{Engine, EngineError};
use crate::model::{Cell, GameState, Outcome, PolicyAction};

/// Wraps a raw engine and validates everything it says.
///
/// No game rules are checked here; the engine is trusted to accept or
/// reject submissions itself.
pub struct EngineAdapter {
    engine: Box<dyn Engine>,
}

impl std::fmt::Debug for EngineAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineAdapter").finish_non_exhaustive()
    }
}

impl EngineAdapter {
    /// Wraps an engine.
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Fetches the authoritative state.
    #[instrument(skip(self))]
    pub fn fetch_game_state(&self) -> Result<GameState, EngineError> {
        let json = self.engine.fetch_game_state()?;
        let state = decode_state(&json)?;
        debug!(
            placed = state.board().occupied_count(),
            available = state.available_pieces().len(),
            current_player = %state.current_player(),
            "Fetched game state"
        );
        Ok(state)
    }

    /// Asks the engine for the computer's move.
    #[instrument(skip(self))]
    pub fn fetch_policy_action(&mut self) -> Result<PolicyAction, EngineError> {
        let json = self.engine.fetch_policy_action()?;
        let action = decode_action(&json)?;
        debug!(%action, "Fetched policy action");
        Ok(action)
    }

    /// Submits a move.
    #[instrument(skip(self), fields(cell = %cell))]
    pub fn play_turn(&mut self, cell: Cell, piece_index: Option<usize>) -> Result<(), EngineError> {
        self.engine.play_turn(cell.row(), cell.col(), piece_index)
    }

    /// Checks whether the game has finished.
    #[instrument(skip(self))]
    pub fn is_game_over(&self) -> Result<bool, EngineError> {
        self.engine.is_game_over()
    }

    /// Asks for the result. Only meaningful once [`Self::is_game_over`] is true.
    #[instrument(skip(self))]
    pub fn judge_winner(&self, human_moved_first: bool) -> Result<Outcome, EngineError> {
        let label = self.engine.judge_winner(human_moved_first)?;
        decode_outcome(&label)
    }

    /// Discards the engine's game and starts a fresh one.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.engine.reset()
    }
}
