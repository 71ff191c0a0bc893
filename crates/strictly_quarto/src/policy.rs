//! Computer move selection.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::rules::{completes_line, gives_win};
use crate::types::{GameState, PolicyAction};

/// Chooses a placement and hand-off for the player to move.
///
/// Takes an immediate win when the piece in hand allows one. Otherwise the
/// cell is random and the hand-off avoids pieces the opponent could win
/// with next turn, when such a piece exists.
///
/// Returns `None` when nothing is in hand or the board is full.
#[instrument(skip_all, fields(available = state.available_pieces.len()))]
pub fn choose_action<R: Rng>(state: &GameState, rng: &mut R) -> Option<PolicyAction> {
    let piece = state.selected_piece?;
    let empty = state.board.empty_cells();

    let winning = empty
        .iter()
        .copied()
        .find(|&(row, col)| completes_line(&state.board, row, col, piece));
    let (row, col) = match winning {
        Some(cell) => {
            debug!(row = cell.0, col = cell.1, "Winning placement found");
            cell
        }
        None => *empty.choose(rng)?,
    };

    if state.available_pieces.is_empty() {
        return Some(PolicyAction {
            row,
            col,
            piece_index: None,
        });
    }

    let mut after = state.board.clone();
    after.grid[row][col] = Some(piece);

    let safe: Vec<usize> = state
        .available_pieces
        .iter()
        .enumerate()
        .filter(|(_, candidate)| !gives_win(&after, **candidate))
        .map(|(index, _)| index)
        .collect();

    let piece_index = match safe.choose(rng) {
        Some(&index) => index,
        None => {
            debug!("Every hand-off gives the opponent a win");
            rng.gen_range(0..state.available_pieces.len())
        }
    };

    Some(PolicyAction {
        row,
        col,
        piece_index: Some(piece_index),
    })
}
