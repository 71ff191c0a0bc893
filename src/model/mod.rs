//! Typed mirror of the engine's state.

mod action;
mod board;
mod invariants;
mod piece;
mod state;

pub use action::{Outcome, PolicyAction};
pub use board::{Board, Cell, BOARD_SIZE};
pub use invariants::{Invariant, MonotonicBoard, PieceConservation, Refresh};
pub use piece::{Color, Height, Piece, Shape, Surface, PIECE_COUNT};
pub use state::{GameState, PlayerMarker};
