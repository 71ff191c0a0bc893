//! Mirrored engine state.

use derive_getters::Getters;
use derive_more::Display;

use super::board::Board;
use super::piece::Piece;

/// Engine-defined marker of whose logical turn it is.
///
/// The client never interprets it; it is only shown and logged.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{}", _0)]
pub struct PlayerMarker(serde_json::Value);

impl PlayerMarker {
    /// Wraps the raw marker.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Returns the raw marker.
    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Authoritative game state as last fetched from the engine.
///
/// Built only by the engine adapter after validation, and replaced
/// wholesale after every round trip.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Pieces neither on the board nor in hand, in hand-off order.
    available_pieces: Vec<Piece>,
    /// Piece handed to the player to move, if any.
    selected_piece: Option<Piece>,
    /// Opaque turn marker.
    current_player: PlayerMarker,
}

impl GameState {
    /// Assembles a state. Callers are expected to check invariants.
    pub fn new(
        board: Board,
        available_pieces: Vec<Piece>,
        selected_piece: Option<Piece>,
        current_player: PlayerMarker,
    ) -> Self {
        Self {
            board,
            available_pieces,
            selected_piece,
            current_player,
        }
    }

    /// Checks whether the next submission is the final, hand-off-free one.
    pub fn is_final_placement(&self) -> bool {
        self.available_pieces.is_empty()
    }

    /// Iterates over every piece the state accounts for.
    pub fn all_pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.board
            .pieces()
            .chain(self.available_pieces.iter().copied())
            .chain(self.selected_piece)
    }
}
