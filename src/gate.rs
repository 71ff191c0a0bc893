//! Move legality gate.
//!
//! Checks that a selection is complete and well-formed before anything is
//! sent to the engine. Whether the move is legal under the rules of the game
//! is never decided here.

use derive_more::Display;
use tracing::{debug, instrument};

use crate::model::{Board, Cell, GameState};
use crate::orchestrator::{HumanStep, Phase, Staging};

/// Why a selection or submission was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GateError {
    /// The chosen cell already holds a piece.
    #[display("Cell {} is already occupied. Please choose another cell.", _0)]
    CellOccupied(Cell),

    /// The chosen hand-off index is past the end of the available pieces.
    #[display("Piece {} does not exist ({} available)", index, available)]
    PieceOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of available pieces.
        available: usize,
    },

    /// The turn cannot be submitted yet.
    #[display("Please select a cell (and a piece to hand off) before playing your turn")]
    IncompleteSelection,
}

impl std::error::Error for GateError {}

/// A complete human move, ready for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Submission {
    /// Where the piece in hand goes.
    pub cell: Cell,
    /// Piece handed to the computer; `None` on the final placement.
    pub piece_index: Option<usize>,
}

/// Precondition: the chosen cell is empty on the mirrored board.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Checks the cell.
    #[instrument(skip(board))]
    pub fn check(board: &Board, cell: Cell) -> Result<(), GateError> {
        if board.is_empty(cell) {
            Ok(())
        } else {
            Err(GateError::CellOccupied(cell))
        }
    }
}

/// Precondition: the hand-off index names an available piece.
pub struct PieceIsAvailable;

impl PieceIsAvailable {
    /// Checks the index.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, index: usize) -> Result<(), GateError> {
        let available = state.available_pieces().len();
        if index < available {
            Ok(())
        } else {
            Err(GateError::PieceOutOfRange { index, available })
        }
    }
}

/// Precondition: it is the human's turn.
pub struct HumansTurn;

impl HumansTurn {
    /// Returns the staged selections, or rejects like an incomplete selection.
    #[instrument(skip(phase))]
    pub fn check(phase: &Phase) -> Result<&Staging, GateError> {
        phase.staging().ok_or(GateError::IncompleteSelection)
    }
}

/// Precondition: a cell is staged, plus a hand-off piece unless none remain.
pub struct SelectionComplete;

impl SelectionComplete {
    /// Builds the submission from the staged selections.
    #[instrument(skip(state))]
    pub fn check(staging: &Staging, state: &GameState) -> Result<Submission, GateError> {
        let cell = staging.cell.ok_or(GateError::IncompleteSelection)?;
        if state.is_final_placement() {
            return Ok(Submission::new(cell, None));
        }
        let index = staging.piece_index.ok_or(GateError::IncompleteSelection)?;
        Ok(Submission::new(cell, Some(index)))
    }
}

/// Composite precondition for submitting the human's turn.
pub struct ReadyToSubmit;

impl ReadyToSubmit {
    /// Validates all preconditions and returns the submission.
    #[instrument(skip_all)]
    pub fn check(phase: &Phase, state: &GameState) -> Result<Submission, GateError> {
        let staging = HumansTurn::check(phase)?;
        let submission = SelectionComplete::check(staging, state)?;
        CellIsEmpty::check(state.board(), submission.cell)?;
        if let Some(index) = submission.piece_index {
            PieceIsAvailable::check(state, index)?;
        }
        debug!(?submission, "Submission ready");
        Ok(submission)
    }
}

/// Where the human is within their turn.
pub fn human_step(staging: &Staging, state: &GameState) -> HumanStep {
    match (staging.cell, staging.piece_index) {
        (None, _) => HumanStep::SelectingCell,
        (Some(_), _) if state.is_final_placement() => HumanStep::ReadyNoPieceNeeded,
        (Some(_), None) => HumanStep::SelectingPiece,
        (Some(_), Some(_)) => HumanStep::Ready,
    }
}
