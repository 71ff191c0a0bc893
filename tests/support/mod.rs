//! Scripted engine double that records every call.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use strictly_quarto::{GameState as EngineState, Piece as EnginePiece, PolicyAction as EngineAction};
use strictly_quarto_client::{Engine, EngineAdapter, EngineError, EngineOp};

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchGameState,
    FetchPolicyAction,
    PlayTurn(usize, usize, Option<usize>),
    IsGameOver,
    JudgeWinner(bool),
    Reset,
}

/// Shared view of the calls an engine received.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().expect("call log").push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().expect("call log").clone()
    }

    pub fn clear(&self) {
        self.0.lock().expect("call log").clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn plays(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::PlayTurn(..)))
            .collect()
    }
}

/// A tiny in-memory engine whose behaviour tests can script.
///
/// Placement follows the submitted move literally: the piece in hand goes to
/// the cell, or, when nothing is in hand, the piece at `piece_index` does.
/// The policy picks the first empty cell and hands off piece 0.
pub struct ScriptedEngine {
    state: EngineState,
    fresh: EngineState,
    log: CallLog,
    over_after: Option<usize>,
    winner: String,
    plays: usize,
    failures: Vec<(EngineOp, usize)>,
    seen: Mutex<Vec<EngineOp>>,
    state_override: Option<String>,
}

impl ScriptedEngine {
    /// Empty board, all sixteen pieces available, nothing in hand.
    pub fn empty_board() -> Self {
        Self::with_state(EngineState {
            board: Default::default(),
            available_pieces: EnginePiece::all(),
            selected_piece: None,
            current_player: 0,
        })
    }

    /// Starts from the given state.
    pub fn with_state(state: EngineState) -> Self {
        Self {
            fresh: state.clone(),
            state,
            log: CallLog::default(),
            over_after: None,
            winner: "draw".to_string(),
            plays: 0,
            failures: Vec::new(),
            seen: Mutex::new(Vec::new()),
            state_override: None,
        }
    }

    /// Fifteen pieces placed, one in hand, none available.
    pub fn one_cell_left() -> Self {
        let mut pieces = EnginePiece::all();
        let in_hand = pieces.pop();
        let mut state = EngineState {
            board: Default::default(),
            available_pieces: Vec::new(),
            selected_piece: in_hand,
            current_player: 0,
        };
        for (slot, piece) in pieces.into_iter().enumerate() {
            state.board.grid[slot / 4][slot % 4] = Some(piece);
        }
        Self::with_state(state)
    }

    /// Reports game over once `plays` turns have been accepted.
    pub fn game_over_after(mut self, plays: usize, winner: &str) -> Self {
        self.over_after = Some(plays);
        self.winner = winner.to_string();
        self
    }

    /// Makes the first call of `op` fail.
    pub fn fail_once(self, op: EngineOp) -> Self {
        self.fail_on_call(op, 1)
    }

    /// Makes the `nth` call of `op` fail, counting from 1 over the engine's
    /// whole life. Call it again to fail more calls.
    pub fn fail_on_call(mut self, op: EngineOp, nth: usize) -> Self {
        self.failures.push((op, nth));
        self
    }

    /// Answers every state fetch with this text.
    pub fn state_json(mut self, json: &str) -> Self {
        self.state_override = Some(json.to_string());
        self
    }

    /// Returns the call log handle.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Boxes the engine into an adapter, returning the call log alongside.
    pub fn into_adapter(self) -> (EngineAdapter, CallLog) {
        let log = self.log();
        (EngineAdapter::new(Box::new(self)), log)
    }

    fn check(&self, op: EngineOp) -> Result<(), EngineError> {
        let mut seen = self.seen.lock().expect("seen calls");
        seen.push(op);
        let nth = seen.iter().filter(|o| **o == op).count();
        if self.failures.contains(&(op, nth)) {
            return Err(EngineError::unavailable(format!("scripted {} failure", op)));
        }
        Ok(())
    }

    fn over(&self) -> bool {
        self.over_after.is_some_and(|n| self.plays >= n)
    }
}

impl Engine for ScriptedEngine {
    fn fetch_game_state(&self) -> Result<String, EngineError> {
        self.log.push(Call::FetchGameState);
        self.check(EngineOp::FetchGameState)?;
        if let Some(json) = &self.state_override {
            return Ok(json.clone());
        }
        Ok(serde_json::to_string(&self.state)?)
    }

    fn fetch_policy_action(&mut self) -> Result<String, EngineError> {
        self.log.push(Call::FetchPolicyAction);
        self.check(EngineOp::FetchPolicyAction)?;
        let (row, col) = self
            .state
            .board
            .empty_cells()
            .first()
            .copied()
            .ok_or_else(|| EngineError::rejected("board full"))?;
        let piece_index = (!self.state.available_pieces.is_empty()).then_some(0);
        Ok(serde_json::to_string(&EngineAction {
            row,
            col,
            piece_index,
        })?)
    }

    fn play_turn(
        &mut self,
        row: usize,
        col: usize,
        piece_index: Option<usize>,
    ) -> Result<(), EngineError> {
        self.log.push(Call::PlayTurn(row, col, piece_index));
        self.check(EngineOp::PlayTurn)?;
        if !self.state.board.is_empty(row, col) {
            return Err(EngineError::rejected("cell occupied"));
        }
        let available = self.state.available_pieces.len();
        if piece_index.is_some_and(|i| i >= available) {
            return Err(EngineError::rejected("piece index out of range"));
        }
        let placed = match self.state.selected_piece.take() {
            Some(piece) => {
                self.state.selected_piece =
                    piece_index.map(|i| self.state.available_pieces.remove(i));
                piece
            }
            None => {
                let index = piece_index.ok_or_else(|| EngineError::rejected("nothing to place"))?;
                self.state.available_pieces.remove(index)
            }
        };
        self.state.board.grid[row][col] = Some(placed);
        self.state.current_player = 1 - self.state.current_player;
        self.plays += 1;
        Ok(())
    }

    fn is_game_over(&self) -> Result<bool, EngineError> {
        self.log.push(Call::IsGameOver);
        self.check(EngineOp::IsGameOver)?;
        Ok(self.over() || self.state.board.is_full())
    }

    fn judge_winner(&self, human_moved_first: bool) -> Result<String, EngineError> {
        self.log.push(Call::JudgeWinner(human_moved_first));
        self.check(EngineOp::JudgeWinner)?;
        Ok(self.winner.clone())
    }

    fn reset(&mut self) -> Result<(), EngineError> {
        self.log.push(Call::Reset);
        self.check(EngineOp::Reset)?;
        self.state = self.fresh.clone();
        self.plays = 0;
        Ok(())
    }
}
