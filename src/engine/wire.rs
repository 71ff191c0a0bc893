//! JSON shapes at the engine boundary and their validation into the model.

use std::str::FromStr;

use serde::Deserialize;
use tracing::{instrument, warn};

use super::error::EngineError;
use crate::model::{
    Board, Cell, GameState, Invariant, Outcome, PieceConservation, Piece, PlayerMarker,
    PolicyAction, BOARD_SIZE,
};

#[derive(Debug, Deserialize)]
struct RawPiece {
    color: u8,
    shape: u8,
    height: u8,
    surface: u8,
}

impl RawPiece {
    fn validate(&self) -> Result<Piece, EngineError> {
        Piece::from_bits(self.color, self.shape, self.height, self.surface)
            .ok_or_else(|| EngineError::protocol(format!("Piece attributes must be 0 or 1: {:?}", self)))
    }
}

#[derive(Debug, Deserialize)]
struct RawBoard {
    grid: Vec<Vec<Option<RawPiece>>>,
}

#[derive(Debug, Deserialize)]
struct RawGameState {
    board: RawBoard,
    available_pieces: Vec<RawPiece>,
    selected_piece: Option<RawPiece>,
    current_player: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawPolicyAction {
    row: usize,
    col: usize,
    #[serde(default)]
    piece_index: Option<usize>,
}

/// Decodes and validates a serialized game state.
#[instrument(skip(json), fields(bytes = json.len()))]
pub fn decode_state(json: &str) -> Result<GameState, EngineError> {
    let raw: RawGameState = serde_json::from_str(json)?;

    if raw.board.grid.len() != BOARD_SIZE {
        return Err(EngineError::protocol(format!(
            "Board has {} rows, expected {}",
            raw.board.grid.len(),
            BOARD_SIZE
        )));
    }
    let mut grid = [[None; BOARD_SIZE]; BOARD_SIZE];
    for (row, cells) in raw.board.grid.iter().enumerate() {
        if cells.len() != BOARD_SIZE {
            return Err(EngineError::protocol(format!(
                "Board row {} has {} cells, expected {}",
                row,
                cells.len(),
                BOARD_SIZE
            )));
        }
        for (col, cell) in cells.iter().enumerate() {
            grid[row][col] = cell.as_ref().map(RawPiece::validate).transpose()?;
        }
    }

    let available_pieces = raw
        .available_pieces
        .iter()
        .map(RawPiece::validate)
        .collect::<Result<Vec<_>, _>>()?;
    let selected_piece = raw.selected_piece.as_ref().map(RawPiece::validate).transpose()?;

    let state = GameState::new(
        Board::from_grid(grid),
        available_pieces,
        selected_piece,
        PlayerMarker::new(raw.current_player),
    );

    if !PieceConservation::holds(&state) {
        let invariant = <PieceConservation as Invariant<GameState>>::description();
        warn!(invariant, "Engine state violates invariant");
        return Err(EngineError::protocol(invariant));
    }
    Ok(state)
}

/// Decodes and validates a serialized computer move.
#[instrument(skip(json))]
pub fn decode_action(json: &str) -> Result<PolicyAction, EngineError> {
    let raw: RawPolicyAction = serde_json::from_str(json)?;
    let cell = Cell::new(raw.row, raw.col).ok_or_else(|| {
        EngineError::protocol(format!("Policy cell ({}, {}) is off the board", raw.row, raw.col))
    })?;
    Ok(PolicyAction::new(cell, raw.piece_index))
}

/// Parses a winner label.
#[instrument]
pub fn decode_outcome(label: &str) -> Result<Outcome, EngineError> {
    Outcome::from_str(label.trim())
        .map_err(|_| EngineError::protocol(format!("Unknown winner label: {:?}", label)))
}
