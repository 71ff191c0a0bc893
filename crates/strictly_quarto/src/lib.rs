//! Pure Quarto game logic.
//!
//! Sixteen pieces, each a combination of four binary attributes, are placed
//! on a 4x4 board. The player to move places the piece their opponent chose
//! for them, then chooses the piece the opponent must place next. Four pieces
//! in a row, column or main diagonal sharing an attribute end the game.
//!
//! [`QuartoEngine`] owns one game and speaks JSON at its boundary:
//!
//! ```
//! use strictly_quarto::QuartoEngine;
//!
//! let mut engine = QuartoEngine::new(42);
//! engine.play_turn(0, 0, Some(3)).unwrap();
//! let json = engine.fetch_game_state().unwrap();
//! assert!(json.contains("available_pieces"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod policy;
mod rules;
mod types;

pub use engine::{initial_state_json, QuartoEngine, COMPUTER_LABEL, DRAW_LABEL, HUMAN_LABEL};
pub use error::RuleError;
pub use policy::choose_action;
pub use rules::{completes_line, has_quarto, lines};
pub use types::{
    share_attribute, Attribute, Board, Finish, GameState, Piece, PolicyAction, BOARD_SIZE,
    PIECE_COUNT,
};
