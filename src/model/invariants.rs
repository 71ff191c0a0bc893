//! Invariants every mirrored state must satisfy.
//!
//! The engine is trusted with the rules, but not with keeping the client's
//! picture coherent: a state that loses or duplicates a piece, or a refresh
//! that clears a filled cell, is rejected at the boundary.

use super::board::Cell;
use super::piece::PIECE_COUNT;
use super::state::GameState;

/// A logical property that must hold for a given state.
pub trait Invariant<S: ?Sized> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Every one of the sixteen pieces appears exactly once across the board,
/// the available pieces and the piece in hand.
pub struct PieceConservation;

impl Invariant<GameState> for PieceConservation {
    fn holds(state: &GameState) -> bool {
        let mut seen = [false; PIECE_COUNT];
        for piece in state.all_pieces() {
            let slot = &mut seen[piece.index()];
            if *slot {
                return false;
            }
            *slot = true;
        }
        seen.iter().all(|s| *s)
    }

    fn description() -> &'static str {
        "Each of the 16 pieces appears exactly once"
    }
}

/// Two consecutive states of the same game.
#[derive(Debug, Clone, Copy)]
pub struct Refresh<'a> {
    /// State before the engine round trip.
    pub before: &'a GameState,
    /// State after the engine round trip.
    pub after: &'a GameState,
}

/// Filled cells stay filled with the same piece from one refresh to the next.
pub struct MonotonicBoard;

impl<'a> Invariant<Refresh<'a>> for MonotonicBoard {
    fn holds(refresh: &Refresh<'a>) -> bool {
        Cell::all().all(|cell| match refresh.before.board().get(cell) {
            Some(piece) => refresh.after.board().get(cell) == Some(piece),
            None => true,
        })
    }

    fn description() -> &'static str {
        "Placed pieces are never moved or removed"
    }
}
