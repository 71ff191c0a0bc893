//! Application state and command handling.

use tracing::{debug, info, warn};

use super::input::{move_cursor, move_tray, Command};
use crate::engine::{Engine, EngineAdapter, EngineError};
use crate::model::Cell;
use crate::orchestrator::{Flight, HumanStep, OrchestratorError, Phase, Progress, TurnOrchestrator};

/// Events delivered to the UI loop from background tasks.
pub enum AppEvent {
    /// The one-time engine load finished.
    EngineLoaded(Result<Box<dyn Engine>, EngineError>),
}

/// Where the engine is in its lifecycle.
#[derive(Debug)]
pub enum LoadState {
    /// Still loading; every game command is disabled.
    Loading,
    /// Loaded and playing.
    Ready(TurnOrchestrator),
    /// The engine could not be loaded; only quitting is possible.
    Failed(String),
}

/// Which cursor the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The 4x4 board.
    Board,
    /// The available pieces.
    Tray,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    load: LoadState,
    focus: Focus,
    board_cursor: Cell,
    tray_cursor: usize,
    notice: Option<String>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an application waiting for the engine.
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            focus: Focus::Board,
            board_cursor: Cell::default(),
            tray_cursor: 0,
            notice: None,
            should_quit: false,
        }
    }

    /// Returns the engine lifecycle state.
    pub fn load(&self) -> &LoadState {
        &self.load
    }

    /// Returns the orchestrator once the engine is ready.
    pub fn orchestrator(&self) -> Option<&TurnOrchestrator> {
        match &self.load {
            LoadState::Ready(orchestrator) => Some(orchestrator),
            _ => None,
        }
    }

    /// Returns which cursor is active.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the board cursor.
    pub fn board_cursor(&self) -> Cell {
        self.board_cursor
    }

    /// Returns the tray cursor.
    pub fn tray_cursor(&self) -> usize {
        self.tray_cursor
    }

    /// Returns the last feedback message, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Checks whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a background event.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::EngineLoaded(Ok(engine)) => {
                match TurnOrchestrator::start(EngineAdapter::new(engine)) {
                    Ok(orchestrator) => {
                        info!("Engine ready");
                        self.load = LoadState::Ready(orchestrator);
                    }
                    Err(err) => {
                        warn!(%err, "Engine loaded but initial state unusable");
                        self.load = LoadState::Failed(err.to_string());
                    }
                }
            }
            AppEvent::EngineLoaded(Err(err)) => {
                warn!(%err, "Engine failed to load");
                self.load = LoadState::Failed(err.to_string());
            }
        }
    }

    /// Applies a user command.
    pub fn handle_command(&mut self, command: Command) {
        debug!(?command, "Handling command");
        if command == Command::Quit {
            info!("User quit");
            self.should_quit = true;
            return;
        }

        let LoadState::Ready(orchestrator) = &mut self.load else {
            debug!("Engine not ready, command ignored");
            return;
        };

        let result = match command {
            Command::ChooseFirst(mover) => orchestrator.choose_first_player(mover).map(Some),
            Command::Move(nudge) => {
                match self.focus {
                    Focus::Board => self.board_cursor = move_cursor(self.board_cursor, nudge),
                    Focus::Tray => {
                        let len = orchestrator.state().available_pieces().len();
                        self.tray_cursor = move_tray(self.tray_cursor, len, nudge);
                    }
                }
                return;
            }
            Command::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Board => Focus::Tray,
                    Focus::Tray => Focus::Board,
                };
                return;
            }
            Command::Select => match self.focus {
                Focus::Board => orchestrator.select_cell(self.board_cursor).map(|()| None),
                Focus::Tray => orchestrator.select_piece(self.tray_cursor).map(|()| None),
            },
            Command::Submit => orchestrator.submit_turn().map(Some),
            Command::RetryComputer => orchestrator.run_computer_turn().map(Some),
            Command::Reset => orchestrator.reset().map(|()| {
                self.board_cursor = Cell::default();
                self.tray_cursor = 0;
                self.focus = Focus::Board;
                None
            }),
            Command::Quit => return,
        };

        self.notice = match result {
            Ok(Some(progress)) => describe(progress),
            Ok(None) => None,
            Err(err) => Some(rejection(&err)),
        };

        let len = orchestrator.state().available_pieces().len();
        self.tray_cursor = self.tray_cursor.min(len.saturating_sub(1));
    }

    /// One-line prompt for the current phase.
    pub fn status_line(&self) -> String {
        let orchestrator = match &self.load {
            LoadState::Loading => return "Loading engine...".to_string(),
            LoadState::Failed(_) => return "Engine failed to load. Press q to quit.".to_string(),
            LoadState::Ready(orchestrator) => orchestrator,
        };
        match orchestrator.phase() {
            Phase::ChoosingFirstPlayer => {
                "Who moves first? Press 1 for you or 2 for the computer.".to_string()
            }
            Phase::HumanTurn(_) => match orchestrator.human_step() {
                Some(HumanStep::SelectingCell) | None => {
                    "Your turn: choose a cell for the piece in hand.".to_string()
                }
                Some(HumanStep::SelectingPiece) => {
                    "Your turn: choose a piece for the computer (Tab to the tray).".to_string()
                }
                Some(HumanStep::ReadyNoPieceNeeded) => {
                    "Last piece. Press p to play it.".to_string()
                }
                Some(HumanStep::Ready) => "Press p to play your turn.".to_string(),
            },
            Phase::Resyncing(_) => {
                "Lost track of the engine after a move. Press t to resync.".to_string()
            }
            Phase::ComputerTurn(Flight::InFlight) => "Computer is thinking...".to_string(),
            Phase::ComputerTurn(Flight::Pending) => {
                "The computer's turn did not finish. Press t to retry.".to_string()
            }
            Phase::GameOver(outcome) => format!("{} Press r to play again.", outcome),
        }
    }
}

fn describe(progress: Progress) -> Option<String> {
    match progress {
        Progress::HumanToMove {
            computer_move: Some(action),
        } => Some(format!("Computer placed at {}.", action.cell)),
        Progress::HumanToMove { computer_move: None } | Progress::NewGame | Progress::Ignored => {
            None
        }
        Progress::GameOver(outcome) => Some(outcome.to_string()),
    }
}

fn rejection(err: &OrchestratorError) -> String {
    match err {
        OrchestratorError::Rejected(gate) => gate.to_string(),
        OrchestratorError::OutOfTurn { .. } => err.to_string(),
        OrchestratorError::EngineCall { .. } => format!("{}. Try again.", err),
    }
}
