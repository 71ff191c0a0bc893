//! Computer moves and final results.

use derive_more::Display;
use strum::{AsRefStr, EnumString};

use super::board::Cell;

/// The engine's chosen computer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, derive_new::new)]
#[display("{} handing off {:?}", cell, piece_index)]
pub struct PolicyAction {
    /// Where the piece in hand goes.
    pub cell: Cell,
    /// Index into `available_pieces`; `None` on the final placement.
    pub piece_index: Option<usize>,
}

/// Final result of a game, from the human's side of the table.
///
/// Parsed from the engine's winner label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum Outcome {
    /// The human completed a line.
    #[display("You win!")]
    #[strum(serialize = "human")]
    HumanWins,
    /// The computer completed a line.
    #[display("The computer wins.")]
    #[strum(serialize = "computer")]
    ComputerWins,
    /// The board filled up without a line.
    #[display("Draw.")]
    #[strum(serialize = "draw")]
    Draw,
}
