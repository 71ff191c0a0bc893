//! Orchestration phases.
//!
//! One tagged value replaces the pile of "is it my turn", "has the computer
//! played" and "is the game over" flags, so contradictory combinations
//! cannot be expressed.

use derive_more::Display;

use crate::model::{Cell, Outcome, PolicyAction};

/// Who takes the first move of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FirstMover {
    /// The human moves first.
    #[display("You")]
    Human,
    /// The computer moves first.
    #[display("Computer")]
    Computer,
}

impl FirstMover {
    /// Returns true when the human moves first.
    pub fn human_moved_first(self) -> bool {
        matches!(self, Self::Human)
    }
}

/// Selections the human has made this turn but not yet submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Staging {
    /// Cell chosen for the piece in hand.
    pub cell: Option<Cell>,
    /// Index of the piece chosen for the computer.
    pub piece_index: Option<usize>,
}

/// Single-flight state of the computer's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    /// Waiting to be run (or to be retried after a failure).
    Pending,
    /// Engine round trip under way; further triggers are ignored.
    InFlight,
}

/// A mutation the engine accepted whose resulting state is not yet mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Committed {
    /// The human's move was played.
    HumanMove(Cell),
    /// The computer's move was played.
    ComputerMove(PolicyAction),
    /// The engine started a fresh game.
    Reset,
}

/// Where the game is, from the client's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the human to pick who moves first.
    ChoosingFirstPlayer,
    /// The human is choosing a cell and a hand-off piece.
    HumanTurn(Staging),
    /// The engine applied a mutation but its follow-up queries failed.
    ///
    /// Only the queries are retried from here, never the mutation.
    Resyncing(Committed),
    /// The computer is to move.
    ComputerTurn(Flight),
    /// The game has ended.
    GameOver(Outcome),
}

impl Phase {
    /// Short label for status lines and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ChoosingFirstPlayer => "choosing first player",
            Self::HumanTurn(_) => "your turn",
            Self::Resyncing(_) => "resyncing with engine",
            Self::ComputerTurn(Flight::Pending) => "computer to move",
            Self::ComputerTurn(Flight::InFlight) => "computer thinking",
            Self::GameOver(_) => "game over",
        }
    }

    /// Returns the staged selections while it is the human's turn.
    pub fn staging(&self) -> Option<&Staging> {
        match self {
            Self::HumanTurn(staging) => Some(staging),
            _ => None,
        }
    }
}

/// Progress through the human's turn, derived from the staged selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanStep {
    /// No cell chosen yet.
    SelectingCell,
    /// Cell chosen, hand-off piece still missing.
    SelectingPiece,
    /// Cell chosen and no pieces remain to hand off.
    ReadyNoPieceNeeded,
    /// Cell and hand-off piece chosen.
    Ready,
}

impl HumanStep {
    /// Returns true when the turn may be submitted.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready | Self::ReadyNoPieceNeeded)
    }
}
