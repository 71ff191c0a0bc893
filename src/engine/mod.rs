//! The boundary to the rule engine.
//!
//! The engine owns every rule: placement legality, line detection and the
//! computer's strategy. The client talks to it through [`Engine`], a raw
//! text interface, and only ever sees typed, validated values through
//! [`EngineAdapter`].

mod adapter;
mod error;
mod local;
mod wire;

pub use adapter::EngineAdapter;
pub use error::{EngineError, EngineErrorKind};
pub use local::{LocalEngine, LocalEngineLoader};
pub use wire::{decode_action, decode_outcome, decode_state};

/// Raw engine interface. Queries answer JSON text or plain values.
///
/// Implementations perform the rules; callers must re-fetch the state after
/// every mutation to observe its effect.
pub trait Engine: Send {
    /// Returns the current state as JSON.
    fn fetch_game_state(&self) -> Result<String, EngineError>;

    /// Returns the computer's move for the current state as JSON.
    fn fetch_policy_action(&mut self) -> Result<String, EngineError>;

    /// Places the piece in hand at `(row, col)`, then hands off the
    /// available piece at `piece_index`, if any.
    fn play_turn(
        &mut self,
        row: usize,
        col: usize,
        piece_index: Option<usize>,
    ) -> Result<(), EngineError>;

    /// Checks whether the game has finished.
    fn is_game_over(&self) -> Result<bool, EngineError>;

    /// Names the winner relative to whether the human moved first.
    fn judge_winner(&self, human_moved_first: bool) -> Result<String, EngineError>;

    /// Starts a fresh game.
    fn reset(&mut self) -> Result<(), EngineError>;
}

/// One-time asynchronous construction of an engine.
#[async_trait::async_trait]
pub trait EngineLoader: Send + Sync {
    /// Loads the engine.
    async fn load(&self) -> Result<Box<dyn Engine>, EngineError>;
}
