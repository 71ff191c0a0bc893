//! Core domain types for Quarto.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Side length of the board.
pub const BOARD_SIZE: usize = 4;

/// Number of distinct pieces in a game.
pub const PIECE_COUNT: usize = 16;

/// One of the four binary traits every piece carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Attribute {
    /// Blue (0) or brown (1).
    Color,
    /// Square (0) or round (1).
    Shape,
    /// Short (0) or tall (1).
    Height,
    /// Solid (0) or hollow (1).
    Surface,
}

/// A Quarto piece, serialized with each attribute as `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Color bit.
    pub color: u8,
    /// Shape bit.
    pub shape: u8,
    /// Height bit.
    pub height: u8,
    /// Surface bit.
    pub surface: u8,
}

impl Piece {
    /// Builds the piece whose attribute bits spell `index` (color is bit 0).
    pub fn from_index(index: usize) -> Self {
        let bit = |shift: usize| ((index >> shift) & 1) as u8;
        Self {
            color: bit(0),
            shape: bit(1),
            height: bit(2),
            surface: bit(3),
        }
    }

    /// Returns the value of one attribute.
    pub fn attribute(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Color => self.color,
            Attribute::Shape => self.shape,
            Attribute::Height => self.height,
            Attribute::Surface => self.surface,
        }
    }

    /// Returns all sixteen pieces in index order.
    pub fn all() -> Vec<Piece> {
        (0..PIECE_COUNT).map(Piece::from_index).collect()
    }
}

/// Returns true when four pieces agree on at least one attribute.
pub fn share_attribute(pieces: &[Piece; BOARD_SIZE]) -> bool {
    Attribute::iter().any(|attribute| {
        let first = pieces[0].attribute(attribute);
        pieces.iter().all(|p| p.attribute(attribute) == first)
    })
}

/// 4x4 board serialized as `{ "grid": [[Piece | null; 4]; 4] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Rows of cells, top to bottom.
    pub grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Gets the piece at a cell, `None` when empty or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.grid.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Checks whether a cell is empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_none()
    }

    /// Checks whether every cell is filled.
    pub fn is_full(&self) -> bool {
        self.grid.iter().flatten().all(Option::is_some)
    }

    /// Lists empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_empty(row, col))
            .collect()
    }
}

/// Full engine state, serialized at the text boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    pub board: Board,
    /// Pieces neither placed nor in hand, in hand-off order.
    pub available_pieces: Vec<Piece>,
    /// Piece the player to move must place.
    pub selected_piece: Option<Piece>,
    /// `0` for the first mover, `1` for the second.
    pub current_player: u8,
}

/// A move chosen by the computer policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAction {
    /// Target row.
    pub row: usize,
    /// Target column.
    pub col: usize,
    /// Index into `available_pieces` to hand off; absent on the final placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_index: Option<usize>,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// A line was completed by the given player (`0` first mover, `1` second).
    Line(u8),
    /// Board filled without a line.
    Draw,
}
