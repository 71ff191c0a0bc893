//! Keyboard mapping and cursor movement.

use crossterm::event::KeyCode;

use crate::model::{Cell, BOARD_SIZE};
use crate::orchestrator::FirstMover;

/// Direction of an arrow key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
}

/// A user command, decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick who moves first.
    ChooseFirst(FirstMover),
    /// Move the focused cursor.
    Move(Nudge),
    /// Switch focus between the board and the piece tray.
    ToggleFocus,
    /// Select whatever the focused cursor points at.
    Select,
    /// Play the staged turn.
    Submit,
    /// Retry a stalled computer turn.
    RetryComputer,
    /// Start a new game.
    Reset,
    /// Leave the program.
    Quit,
}

/// Maps a key to a command.
pub fn command_for(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Char('1') | KeyCode::Char('h') => Command::ChooseFirst(FirstMover::Human),
        KeyCode::Char('2') | KeyCode::Char('c') => Command::ChooseFirst(FirstMover::Computer),
        KeyCode::Up => Command::Move(Nudge::Up),
        KeyCode::Down => Command::Move(Nudge::Down),
        KeyCode::Left => Command::Move(Nudge::Left),
        KeyCode::Right => Command::Move(Nudge::Right),
        KeyCode::Tab | KeyCode::BackTab => Command::ToggleFocus,
        KeyCode::Enter | KeyCode::Char(' ') => Command::Select,
        KeyCode::Char('p') => Command::Submit,
        KeyCode::Char('t') => Command::RetryComputer,
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Moves the board cursor, stopping at the edges.
pub fn move_cursor(cursor: Cell, nudge: Nudge) -> Cell {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match nudge {
        Nudge::Up => row.checked_sub(1).map(|row| (row, col)),
        Nudge::Down => Some((row + 1, col)),
        Nudge::Left => col.checked_sub(1).map(|col| (row, col)),
        Nudge::Right => Some((row, col + 1)),
    };
    target
        .and_then(|(row, col)| Cell::new(row, col))
        .unwrap_or(cursor)
}

/// Moves the tray cursor over `len` pieces laid out `BOARD_SIZE` per row.
pub fn move_tray(index: usize, len: usize, nudge: Nudge) -> usize {
    if len == 0 {
        return 0;
    }
    let target = match nudge {
        Nudge::Left => index.checked_sub(1),
        Nudge::Right => Some(index + 1),
        Nudge::Up => index.checked_sub(BOARD_SIZE),
        Nudge::Down => Some(index + BOARD_SIZE),
    };
    match target {
        Some(target) if target < len => target,
        _ => index.min(len - 1),
    }
}
