//! Stateful Quarto engine with a JSON text boundary.
//!
//! Every query returns JSON text and every command takes plain integers, so
//! the engine can sit behind any foreign boundary without sharing types.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

use crate::error::RuleError;
use crate::policy::choose_action;
use crate::rules::completes_line;
use crate::types::{Board, Finish, GameState, Piece, BOARD_SIZE, PIECE_COUNT};

/// Label returned by [`QuartoEngine::judge_winner`] when the human won.
pub const HUMAN_LABEL: &str = "human";
/// Label returned by [`QuartoEngine::judge_winner`] when the computer won.
pub const COMPUTER_LABEL: &str = "computer";
/// Label returned by [`QuartoEngine::judge_winner`] for a full board without a line.
pub const DRAW_LABEL: &str = "draw";

/// A single Quarto game plus the seeded RNG driving the computer.
#[derive(Debug, Clone)]
pub struct QuartoEngine {
    state: GameState,
    finish: Option<Finish>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl QuartoEngine {
    /// Creates an engine and deals the opening piece.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = fresh_state(&mut rng);
        info!(seed, "Quarto engine created");
        Self {
            state,
            finish: None,
            rng,
            seed,
        }
    }

    /// Returns the seed the engine was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the typed state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current state as JSON.
    #[instrument(skip(self))]
    pub fn fetch_game_state(&self) -> Result<String, RuleError> {
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Returns the computer's move for the player to move as JSON.
    #[instrument(skip(self))]
    pub fn fetch_policy_action(&mut self) -> Result<String, RuleError> {
        if self.finish.is_some() {
            return Err(RuleError::GameOver);
        }
        let action = choose_action(&self.state, &mut self.rng).ok_or(RuleError::NothingToPlace)?;
        debug!(?action, "Policy chose action");
        Ok(serde_json::to_string(&action)?)
    }

    /// Places the piece in hand at `(row, col)`, then hands off
    /// `available_pieces[piece_index]` to the opponent.
    ///
    /// The state is left untouched when the submission is rejected.
    #[instrument(skip(self), fields(player = self.state.current_player))]
    pub fn play_turn(
        &mut self,
        row: usize,
        col: usize,
        piece_index: Option<usize>,
    ) -> Result<(), RuleError> {
        if self.finish.is_some() {
            return Err(RuleError::GameOver);
        }
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(RuleError::OutOfBounds(row, col));
        }
        if !self.state.board.is_empty(row, col) {
            return Err(RuleError::CellOccupied(row, col));
        }
        let piece = self.state.selected_piece.ok_or(RuleError::NothingToPlace)?;
        let available = self.state.available_pieces.len();
        match piece_index {
            None if available > 0 => return Err(RuleError::MissingPieceIndex),
            Some(_) if available == 0 => return Err(RuleError::UnexpectedPieceIndex),
            Some(index) if index >= available => {
                return Err(RuleError::PieceIndexOutOfRange { index, available });
            }
            _ => {}
        }

        let mover = self.state.current_player;
        let wins = completes_line(&self.state.board, row, col, piece);
        self.state.board.grid[row][col] = Some(piece);
        let handed = piece_index.map(|index| self.state.available_pieces.remove(index));
        self.state.selected_piece = handed;
        self.state.current_player = 1 - mover;

        if wins {
            info!(mover, row, col, "Line completed");
            self.finish = Some(Finish::Line(mover));
        } else if self.state.board.is_full() {
            info!("Board full without a line");
            self.finish = Some(Finish::Draw);
        }
        Ok(())
    }

    /// Checks whether the game has finished.
    pub fn is_game_over(&self) -> bool {
        self.finish.is_some()
    }

    /// Names the winner relative to whether the human moved first.
    #[instrument(skip(self))]
    pub fn judge_winner(&self, human_moved_first: bool) -> Result<String, RuleError> {
        let label = match self.finish.ok_or(RuleError::GameNotOver)? {
            Finish::Draw => DRAW_LABEL,
            Finish::Line(mover) => {
                let first_mover_won = mover == 0;
                if first_mover_won == human_moved_first {
                    HUMAN_LABEL
                } else {
                    COMPUTER_LABEL
                }
            }
        };
        Ok(label.to_string())
    }

    /// Discards the current game and deals a new one.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = fresh_state(&mut self.rng);
        self.finish = None;
        info!("Engine reset");
    }
}

fn fresh_state<R: Rng>(rng: &mut R) -> GameState {
    let mut available_pieces = Piece::all();
    let opening = available_pieces.remove(rng.gen_range(0..PIECE_COUNT));
    GameState {
        board: Board::default(),
        available_pieces,
        selected_piece: Some(opening),
        current_player: 0,
    }
}

/// Returns the JSON of a freshly dealt game.
pub fn initial_state_json(seed: u64) -> Result<String, RuleError> {
    QuartoEngine::new(seed).fetch_game_state()
}
