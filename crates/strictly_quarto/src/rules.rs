//! Line detection.

use crate::types::{share_attribute, Board, Piece, BOARD_SIZE};

/// Every row, column and both main diagonals as cell coordinates.
pub fn lines() -> Vec<[(usize, usize); BOARD_SIZE]> {
    let mut lines = Vec::with_capacity(2 * BOARD_SIZE + 2);
    for i in 0..BOARD_SIZE {
        lines.push([(i, 0), (i, 1), (i, 2), (i, 3)]);
        lines.push([(0, i), (1, i), (2, i), (3, i)]);
    }
    lines.push([(0, 0), (1, 1), (2, 2), (3, 3)]);
    lines.push([(0, 3), (1, 2), (2, 1), (3, 0)]);
    lines
}

fn line_pieces(board: &Board, line: &[(usize, usize); BOARD_SIZE]) -> Option<[Piece; BOARD_SIZE]> {
    let [a, b, c, d] = line.map(|(row, col)| board.get(row, col));
    Some([a?, b?, c?, d?])
}

/// Checks whether any full line shares an attribute.
pub fn has_quarto(board: &Board) -> bool {
    lines()
        .iter()
        .filter_map(|line| line_pieces(board, line))
        .any(|pieces| share_attribute(&pieces))
}

/// Checks whether placing `piece` at an empty cell would complete a line.
pub fn completes_line(board: &Board, row: usize, col: usize, piece: Piece) -> bool {
    if !board.is_empty(row, col) {
        return false;
    }
    let mut trial = board.clone();
    trial.grid[row][col] = Some(piece);
    lines()
        .iter()
        .filter(|line| line.contains(&(row, col)))
        .filter_map(|line| line_pieces(&trial, line))
        .any(|pieces| share_attribute(&pieces))
}

/// Checks whether `piece` could complete a line anywhere on the board.
pub fn gives_win(board: &Board, piece: Piece) -> bool {
    board
        .empty_cells()
        .into_iter()
        .any(|(row, col)| completes_line(board, row, col, piece))
}
