//! The turn state machine.

use tracing::{debug, info, instrument, warn};

use super::error::{EngineOp, OrchestratorError};
use super::phase::{Committed, FirstMover, Flight, HumanStep, Phase, Staging};
use crate::engine::{EngineAdapter, EngineError};
use crate::gate::{self, CellIsEmpty, PieceIsAvailable, ReadyToSubmit};
use crate::model::{Cell, GameState, Invariant, MonotonicBoard, Outcome, PolicyAction, Refresh};

/// What a command led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Control is back with the human.
    HumanToMove {
        /// The computer's reply, when the computer just moved.
        computer_move: Option<PolicyAction>,
    },
    /// The game ended.
    GameOver(Outcome),
    /// A fresh game is waiting for the first-player choice.
    NewGame,
    /// The trigger arrived outside a pending computer turn and did nothing.
    Ignored,
}

/// Sequences turns between the human and the engine's computer player.
///
/// Owns the mirrored [`GameState`]; presentation code only reads it. A
/// rejected mutation leaves the orchestrator exactly as it was. Once the
/// engine accepts one, the phase records it until the resulting state has
/// been fetched and judged, and retries repeat only those queries.
#[derive(Debug)]
pub struct TurnOrchestrator {
    adapter: EngineAdapter,
    state: GameState,
    phase: Phase,
    first_mover: Option<FirstMover>,
    last_placed: Option<Cell>,
}

impl TurnOrchestrator {
    /// Fetches the initial state and waits for the first-player choice.
    #[instrument(skip(adapter))]
    pub fn start(adapter: EngineAdapter) -> Result<Self, OrchestratorError> {
        let state = adapter
            .fetch_game_state()
            .map_err(OrchestratorError::engine(EngineOp::FetchGameState))?;
        info!("Orchestrator ready");
        Ok(Self {
            adapter,
            state,
            phase: Phase::ChoosingFirstPlayer,
            first_mover: None,
            last_placed: None,
        })
    }

    /// Returns the current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the mirrored engine state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the staged selections while it is the human's turn.
    pub fn staging(&self) -> Option<&Staging> {
        self.phase.staging()
    }

    /// Returns the most recently filled cell, for highlighting.
    pub fn last_placed(&self) -> Option<Cell> {
        self.last_placed
    }

    /// Returns who moved first, once chosen.
    pub fn first_mover(&self) -> Option<FirstMover> {
        self.first_mover
    }

    /// Returns the result once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Returns where the human is within their turn.
    pub fn human_step(&self) -> Option<HumanStep> {
        self.staging().map(|staging| gate::human_step(staging, &self.state))
    }

    /// Checks whether the staged selections may be submitted now.
    pub fn can_submit(&self) -> bool {
        ReadyToSubmit::check(&self.phase, &self.state).is_ok()
    }

    /// Fixes who moves first. A computer start plays its turn immediately.
    #[instrument(skip(self))]
    pub fn choose_first_player(&mut self, mover: FirstMover) -> Result<Progress, OrchestratorError> {
        if self.phase != Phase::ChoosingFirstPlayer {
            return Err(self.out_of_turn("choose the first player"));
        }
        self.first_mover = Some(mover);
        info!(%mover, "First player chosen");
        match mover {
            FirstMover::Human => {
                self.phase = Phase::HumanTurn(Staging::default());
                Ok(Progress::HumanToMove { computer_move: None })
            }
            FirstMover::Computer => {
                self.phase = Phase::ComputerTurn(Flight::Pending);
                self.run_computer_turn()
            }
        }
    }

    /// Stages the cell for the piece in hand.
    #[instrument(skip(self), fields(cell = %cell))]
    pub fn select_cell(&mut self, cell: Cell) -> Result<(), OrchestratorError> {
        let Phase::HumanTurn(staging) = &mut self.phase else {
            return Err(self.out_of_turn("select a cell"));
        };
        if let Err(err) = CellIsEmpty::check(self.state.board(), cell) {
            warn!(%err, "Cell selection rejected");
            return Err(err.into());
        }
        staging.cell = Some(cell);
        debug!("Cell staged");
        Ok(())
    }

    /// Stages the piece to hand to the computer.
    #[instrument(skip(self))]
    pub fn select_piece(&mut self, index: usize) -> Result<(), OrchestratorError> {
        let Phase::HumanTurn(staging) = &mut self.phase else {
            return Err(self.out_of_turn("select a piece"));
        };
        if let Err(err) = PieceIsAvailable::check(&self.state, index) {
            warn!(%err, "Piece selection rejected");
            return Err(err.into());
        }
        staging.piece_index = Some(index);
        debug!("Piece staged");
        Ok(())
    }

    /// Submits the human's move, then lets the computer reply once.
    ///
    /// If the human's move is accepted but the computer's reply fails, the
    /// error is returned with the phase left at a pending computer turn;
    /// [`Self::run_computer_turn`] retries it. While resyncing, this retries
    /// the resync instead of submitting anything.
    #[instrument(skip(self))]
    pub fn submit_turn(&mut self) -> Result<Progress, OrchestratorError> {
        if matches!(self.phase, Phase::Resyncing(_)) {
            return self.resync();
        }
        let submission = match ReadyToSubmit::check(&self.phase, &self.state) {
            Ok(submission) => submission,
            Err(err) => {
                warn!(%err, phase = self.phase.label(), "Submission rejected");
                return Err(err.into());
            }
        };

        if let Err(err) = self
            .adapter
            .play_turn(submission.cell, submission.piece_index)
        {
            warn!(%err, "Human turn rejected");
            return Err(OrchestratorError::engine(EngineOp::PlayTurn)(err));
        }
        info!(cell = %submission.cell, piece_index = ?submission.piece_index, "Human turn accepted");

        self.phase = Phase::Resyncing(Committed::HumanMove(submission.cell));
        self.resync()
    }

    /// Plays the computer's turn if one is pending; otherwise does nothing.
    ///
    /// While resyncing, this retries the resync and never asks the engine
    /// for another move.
    #[instrument(skip(self))]
    pub fn run_computer_turn(&mut self) -> Result<Progress, OrchestratorError> {
        match self.phase {
            Phase::Resyncing(_) => return self.resync(),
            Phase::ComputerTurn(Flight::Pending) => {}
            _ => {
                debug!(phase = self.phase.label(), "Computer turn trigger ignored");
                return Ok(Progress::Ignored);
            }
        }
        self.phase = Phase::ComputerTurn(Flight::InFlight);

        let action = match self.computer_move() {
            Ok(action) => action,
            Err(err) => {
                warn!(%err, "Computer turn aborted");
                self.phase = Phase::ComputerTurn(Flight::Pending);
                return Err(err);
            }
        };
        info!(%action, "Computer turn played");

        self.phase = Phase::Resyncing(Committed::ComputerMove(action));
        self.resync()
    }

    /// Starts a fresh game from any phase.
    ///
    /// A failed reset changes nothing. If the engine reset but its new state
    /// could not be fetched, the phase is [`Phase::Resyncing`].
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), OrchestratorError> {
        self.adapter
            .reset()
            .map_err(OrchestratorError::engine(EngineOp::Reset))?;
        self.phase = Phase::Resyncing(Committed::Reset);
        self.first_mover = None;
        self.last_placed = None;
        self.resync().map(|_| ())
    }

    /// Finishes the engine mutation recorded in [`Phase::Resyncing`].
    ///
    /// Refetches the state and, after a move, asks whether the game is over
    /// and who won. A failure keeps the phase, so calling this again repeats
    /// only the queries. Outside [`Phase::Resyncing`] it does nothing.
    #[instrument(skip(self))]
    pub fn resync(&mut self) -> Result<Progress, OrchestratorError> {
        let Phase::Resyncing(committed) = self.phase else {
            debug!(phase = self.phase.label(), "Nothing to resync");
            return Ok(Progress::Ignored);
        };

        let state = self
            .adapter
            .fetch_game_state()
            .map_err(OrchestratorError::engine(EngineOp::FetchGameState))?;

        let cell = match committed {
            Committed::Reset => {
                self.state = state;
                self.phase = Phase::ChoosingFirstPlayer;
                info!("Game reset");
                return Ok(Progress::NewGame);
            }
            Committed::HumanMove(cell) => cell,
            Committed::ComputerMove(action) => action.cell,
        };

        let refresh = Refresh {
            before: &self.state,
            after: &state,
        };
        if !MonotonicBoard::holds(&refresh) {
            warn!("Refetched board contradicts the mirrored board");
            return Err(OrchestratorError::EngineCall {
                operation: EngineOp::FetchGameState,
                source: EngineError::protocol(
                    <MonotonicBoard as Invariant<Refresh<'_>>>::description(),
                ),
            });
        }
        self.state = state;
        self.last_placed = Some(cell);

        let over = self
            .adapter
            .is_game_over()
            .map_err(OrchestratorError::engine(EngineOp::IsGameOver))?;
        if over {
            let human_moved_first = self.first_mover.is_some_and(FirstMover::human_moved_first);
            let outcome = self
                .adapter
                .judge_winner(human_moved_first)
                .map_err(OrchestratorError::engine(EngineOp::JudgeWinner))?;
            return Ok(self.finish(outcome));
        }

        match committed {
            Committed::ComputerMove(action) => {
                self.phase = Phase::HumanTurn(Staging::default());
                Ok(Progress::HumanToMove {
                    computer_move: Some(action),
                })
            }
            _ => {
                self.phase = Phase::ComputerTurn(Flight::Pending);
                self.run_computer_turn()
            }
        }
    }

    /// Asks the engine for its move and plays it.
    fn computer_move(&mut self) -> Result<PolicyAction, OrchestratorError> {
        let action = self
            .adapter
            .fetch_policy_action()
            .map_err(OrchestratorError::engine(EngineOp::FetchPolicyAction))?;
        self.adapter
            .play_turn(action.cell, action.piece_index)
            .map_err(OrchestratorError::engine(EngineOp::PlayTurn))?;
        Ok(action)
    }

    fn finish(&mut self, outcome: Outcome) -> Progress {
        info!(%outcome, "Game over");
        self.phase = Phase::GameOver(outcome);
        Progress::GameOver(outcome)
    }

    fn out_of_turn(&self, command: &'static str) -> OrchestratorError {
        warn!(command, phase = self.phase.label(), "Command out of turn");
        OrchestratorError::OutOfTurn {
            command,
            phase: self.phase.label(),
        }
    }
}
