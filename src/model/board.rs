//! The 4x4 board mirrored from the engine.

use derive_more::Display;

use super::piece::Piece;

/// Side length of the board.
pub const BOARD_SIZE: usize = 4;

/// A validated board coordinate. Defaults to the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[display("({}, {})", row, col)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    /// Creates a cell, `None` when either coordinate is off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Returns the row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the column.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Enumerates all cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Cell { row, col }))
    }
}

/// Grid of cells, each empty or holding one piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board from rows.
    pub fn from_grid(grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { grid }
    }

    /// Gets the piece at a cell.
    pub fn get(&self, cell: Cell) -> Option<Piece> {
        self.grid[cell.row][cell.col]
    }

    /// Checks whether a cell is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Iterates over placed pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().flatten().copied()
    }

    /// Counts filled cells.
    pub fn occupied_count(&self) -> usize {
        self.pieces().count()
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }
}
