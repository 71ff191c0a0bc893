//! Errors raised by the engine when a submission breaks the rules.

use derive_more::Display;

/// Why the engine refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RuleError {
    /// The game has already finished.
    #[display("Game is already over")]
    GameOver,

    /// The game is still running.
    #[display("Game is not over yet")]
    GameNotOver,

    /// Row or column outside the board.
    #[display("Cell ({}, {}) is outside the board", _0, _1)]
    OutOfBounds(usize, usize),

    /// The target cell already holds a piece.
    #[display("Cell ({}, {}) is already occupied", _0, _1)]
    CellOccupied(usize, usize),

    /// No piece has been handed to the player to move.
    #[display("No piece in hand to place")]
    NothingToPlace,

    /// Pieces remain but no hand-off index was given.
    #[display("A piece must be handed off while pieces remain")]
    MissingPieceIndex,

    /// A hand-off index was given although no pieces remain.
    #[display("No pieces remain to hand off")]
    UnexpectedPieceIndex,

    /// Hand-off index past the end of the available pieces.
    #[display("Piece index {} out of range ({} available)", index, available)]
    PieceIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of available pieces.
        available: usize,
    },

    /// State could not be encoded as JSON.
    #[display("Encoding failed: {}", _0)]
    Encoding(String),
}

impl std::error::Error for RuleError {}

impl From<serde_json::Error> for RuleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}
