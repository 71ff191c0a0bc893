//! Turn orchestration against a scripted engine.

mod support;

use strictly_quarto_client::gate::GateError;
use strictly_quarto_client::{
    Cell, Committed, EngineOp, FirstMover, Flight, HumanStep, OrchestratorError, Outcome, Phase,
    Progress, Staging, TurnOrchestrator,
};
use support::{Call, ScriptedEngine};

fn cell(row: usize, col: usize) -> Cell {
    Cell::new(row, col).expect("cell on board")
}

fn started(engine: ScriptedEngine) -> (TurnOrchestrator, support::CallLog) {
    let (adapter, log) = engine.into_adapter();
    let game = TurnOrchestrator::start(adapter).expect("start");
    (game, log)
}

fn human_first(engine: ScriptedEngine) -> (TurnOrchestrator, support::CallLog) {
    let (mut game, log) = started(engine);
    let progress = game
        .choose_first_player(FirstMover::Human)
        .expect("choose human");
    assert_eq!(progress, Progress::HumanToMove { computer_move: None });
    log.clear();
    (game, log)
}

#[test]
fn test_start_waits_for_first_player() {
    let (game, log) = started(ScriptedEngine::empty_board());
    assert_eq!(game.phase(), &Phase::ChoosingFirstPlayer);
    assert_eq!(game.first_mover(), None);
    assert_eq!(game.state().available_pieces().len(), 16);
    assert_eq!(log.calls(), vec![Call::FetchGameState]);
}

#[test]
fn test_human_move_then_one_computer_move() {
    let (mut game, log) = human_first(ScriptedEngine::empty_board());
    let third = game.state().available_pieces()[3];

    game.select_cell(cell(0, 0)).expect("empty cell");
    game.select_piece(3).expect("available piece");
    assert!(game.can_submit());

    let progress = game.submit_turn().expect("submit");

    assert_eq!(
        log.calls(),
        vec![
            Call::PlayTurn(0, 0, Some(3)),
            Call::FetchGameState,
            Call::IsGameOver,
            Call::FetchPolicyAction,
            Call::PlayTurn(0, 1, Some(0)),
            Call::FetchGameState,
            Call::IsGameOver,
        ]
    );
    let Progress::HumanToMove {
        computer_move: Some(action),
    } = progress
    else {
        panic!("expected the computer to reply, got {:?}", progress);
    };
    assert_eq!(action.cell, cell(0, 1));
    assert_eq!(game.state().board().get(cell(0, 0)), Some(third));
    assert_eq!(game.state().available_pieces().len(), 14);
    assert_eq!(game.phase(), &Phase::HumanTurn(Staging::default()));
    assert_eq!(game.last_placed(), Some(cell(0, 1)));
}

#[test]
fn test_stalled_computer_turn_keeps_human_move_and_retries() {
    let engine = ScriptedEngine::empty_board().fail_once(EngineOp::FetchPolicyAction);
    let (mut game, log) = human_first(engine);
    let third = game.state().available_pieces()[3];
    game.select_cell(cell(0, 0)).expect("empty cell");
    game.select_piece(3).expect("available piece");

    let err = game.submit_turn().expect_err("policy fails");
    assert!(matches!(
        err,
        OrchestratorError::EngineCall {
            operation: EngineOp::FetchPolicyAction,
            ..
        }
    ));

    assert_eq!(game.phase(), &Phase::ComputerTurn(Flight::Pending));
    assert_eq!(game.state().board().get(cell(0, 0)), Some(third));
    assert_eq!(game.state().available_pieces().len(), 15);
    assert_eq!(game.last_placed(), Some(cell(0, 0)));

    let progress = game.run_computer_turn().expect("retry");
    assert!(matches!(progress, Progress::HumanToMove { computer_move: Some(_) }));
    assert_eq!(log.count(|c| matches!(c, Call::PlayTurn(..))), 2);
}

#[test]
fn test_occupied_cell_is_rejected_without_engine_call() {
    let (mut game, log) = human_first(ScriptedEngine::empty_board());
    game.select_cell(cell(0, 0)).expect("empty cell");
    game.select_piece(0).expect("available piece");
    game.submit_turn().expect("submit");
    log.clear();
    let before = game.phase().clone();

    let err = game.select_cell(cell(0, 0)).expect_err("occupied");

    assert!(matches!(
        err,
        OrchestratorError::Rejected(GateError::CellOccupied(c)) if c == cell(0, 0)
    ));
    assert!(err.to_string().contains("occupied"));
    assert_eq!(game.phase(), &before);
    assert!(log.calls().is_empty());
}

#[test]
fn test_final_placement_needs_no_piece() {
    let (mut game, log) = human_first(ScriptedEngine::one_cell_left());
    assert!(game.state().is_final_placement());

    game.select_cell(cell(3, 3)).expect("last empty cell");
    assert_eq!(game.human_step(), Some(HumanStep::ReadyNoPieceNeeded));
    assert!(game.can_submit());

    let progress = game.submit_turn().expect("submit");

    assert_eq!(progress, Progress::GameOver(Outcome::Draw));
    assert_eq!(log.plays(), vec![Call::PlayTurn(3, 3, None)]);
    assert_eq!(log.count(|c| matches!(c, Call::JudgeWinner(true))), 1);
}

#[test]
fn test_game_over_after_human_move_stops_play() {
    let engine = ScriptedEngine::empty_board().game_over_after(1, "human");
    let (mut game, log) = human_first(engine);
    game.select_cell(cell(2, 1)).expect("empty cell");
    game.select_piece(5).expect("available piece");

    let progress = game.submit_turn().expect("submit");

    assert_eq!(progress, Progress::GameOver(Outcome::HumanWins));
    assert_eq!(game.outcome(), Some(Outcome::HumanWins));
    assert_eq!(
        log.calls(),
        vec![
            Call::PlayTurn(2, 1, Some(5)),
            Call::FetchGameState,
            Call::IsGameOver,
            Call::JudgeWinner(true),
        ]
    );

    assert_eq!(game.run_computer_turn().expect("no-op"), Progress::Ignored);
    assert!(matches!(
        game.select_cell(cell(0, 0)),
        Err(OrchestratorError::OutOfTurn { .. })
    ));
    assert!(matches!(
        game.submit_turn(),
        Err(OrchestratorError::Rejected(GateError::IncompleteSelection))
    ));
    assert_eq!(log.count(|c| matches!(c, Call::JudgeWinner(_))), 1);
    assert_eq!(log.count(|c| matches!(c, Call::FetchPolicyAction)), 0);
}

#[test]
fn test_computer_first_plays_immediately_and_judges_with_flag() {
    let engine = ScriptedEngine::empty_board().game_over_after(3, "computer");
    let (mut game, log) = started(engine);
    log.clear();

    let progress = game
        .choose_first_player(FirstMover::Computer)
        .expect("computer first");

    assert!(matches!(progress, Progress::HumanToMove { computer_move: Some(_) }));
    assert_eq!(game.first_mover(), Some(FirstMover::Computer));
    assert_eq!(log.plays(), vec![Call::PlayTurn(0, 0, Some(0))]);

    game.select_cell(cell(1, 1)).expect("empty cell");
    game.select_piece(0).expect("available piece");
    let progress = game.submit_turn().expect("submit");

    assert_eq!(progress, Progress::GameOver(Outcome::ComputerWins));
    assert_eq!(log.count(|c| matches!(c, Call::JudgeWinner(false))), 1);
    assert_eq!(log.count(|c| matches!(c, Call::FetchPolicyAction)), 2);
}

#[test]
fn test_duplicate_triggers_do_not_replay_computer() {
    let (mut game, log) = human_first(ScriptedEngine::empty_board());

    assert_eq!(game.run_computer_turn().expect("no-op"), Progress::Ignored);

    game.select_cell(cell(0, 0)).expect("empty cell");
    game.select_piece(0).expect("available piece");
    game.submit_turn().expect("submit");
    assert_eq!(game.run_computer_turn().expect("no-op"), Progress::Ignored);
    assert_eq!(game.run_computer_turn().expect("no-op"), Progress::Ignored);

    assert_eq!(log.count(|c| matches!(c, Call::FetchPolicyAction)), 1);
    assert_eq!(log.plays().len(), 2);
}

#[test]
fn test_submit_without_selection_makes_no_call() {
    let (mut game, log) = human_first(ScriptedEngine::empty_board());
    assert!(!game.can_submit());
    assert!(matches!(
        game.submit_turn(),
        Err(OrchestratorError::Rejected(GateError::IncompleteSelection))
    ));

    game.select_cell(cell(0, 0)).expect("empty cell");
    assert_eq!(game.human_step(), Some(HumanStep::SelectingPiece));
    assert!(!game.can_submit());
    assert!(game.submit_turn().is_err());

    assert!(log.calls().is_empty());
}

#[test]
fn test_piece_index_out_of_range_is_rejected() {
    let (mut game, _log) = human_first(ScriptedEngine::empty_board());
    let err = game.select_piece(16).expect_err("no such piece");
    assert!(matches!(
        err,
        OrchestratorError::Rejected(GateError::PieceOutOfRange {
            index: 16,
            available: 16
        })
    ));
    assert_eq!(game.staging(), Some(&Staging::default()));
}

#[test]
fn test_failed_submission_rolls_back() {
    let engine = ScriptedEngine::empty_board().fail_once(EngineOp::PlayTurn);
    let (mut game, log) = human_first(engine);
    let before = game.state().clone();
    game.select_cell(cell(1, 2)).expect("empty cell");
    game.select_piece(4).expect("available piece");
    let staged = game.phase().clone();

    let err = game.submit_turn().expect_err("play fails");

    assert!(matches!(
        err,
        OrchestratorError::EngineCall {
            operation: EngineOp::PlayTurn,
            ..
        }
    ));
    assert_eq!(game.phase(), &staged);
    assert_eq!(game.state(), &before);
    assert_eq!(game.last_placed(), None);

    game.submit_turn().expect("retry succeeds");
    assert_eq!(log.count(|c| *c == Call::PlayTurn(1, 2, Some(4))), 2);
}

fn staged_human_move(game: &mut TurnOrchestrator) {
    game.select_cell(cell(0, 0)).expect("empty cell");
    game.select_piece(2).expect("available piece");
}

fn assert_failed(result: Result<Progress, OrchestratorError>, op: EngineOp) {
    match result {
        Err(OrchestratorError::EngineCall { operation, .. }) => assert_eq!(operation, op),
        other => panic!("expected {} to fail, got {:?}", op, other),
    }
}

#[test]
fn test_state_fetch_after_human_move_resyncs_without_replaying() {
    // The first fetch belongs to start.
    let engine = ScriptedEngine::empty_board().fail_on_call(EngineOp::FetchGameState, 2);
    let (mut game, log) = human_first(engine);
    let before = game.state().clone();
    staged_human_move(&mut game);

    assert_failed(game.submit_turn(), EngineOp::FetchGameState);
    assert_eq!(
        game.phase(),
        &Phase::Resyncing(Committed::HumanMove(cell(0, 0)))
    );
    assert_eq!(game.state(), &before);
    assert_eq!(game.staging(), None);
    assert!(matches!(
        game.select_cell(cell(1, 1)),
        Err(OrchestratorError::OutOfTurn { .. })
    ));

    let progress = game.submit_turn().expect("resync");

    assert!(matches!(progress, Progress::HumanToMove { computer_move: Some(_) }));
    assert_eq!(log.count(|c| *c == Call::PlayTurn(0, 0, Some(2))), 1);
    assert_eq!(log.plays().len(), 2);
    assert_eq!(game.state().board().occupied_count(), 2);
    assert_eq!(game.phase(), &Phase::HumanTurn(Staging::default()));
}

#[test]
fn test_game_over_query_after_human_move_resyncs() {
    let engine = ScriptedEngine::empty_board().fail_once(EngineOp::IsGameOver);
    let (mut game, log) = human_first(engine);
    staged_human_move(&mut game);

    assert_failed(game.submit_turn(), EngineOp::IsGameOver);
    assert_eq!(
        game.phase(),
        &Phase::Resyncing(Committed::HumanMove(cell(0, 0)))
    );
    assert_eq!(game.state().board().occupied_count(), 1);
    assert_eq!(game.last_placed(), Some(cell(0, 0)));

    let progress = game.run_computer_turn().expect("resync");

    assert!(matches!(progress, Progress::HumanToMove { computer_move: Some(_) }));
    assert_eq!(log.plays().len(), 2);
    assert_eq!(log.count(|c| matches!(c, Call::FetchPolicyAction)), 1);
    assert_eq!(game.state().board().occupied_count(), 2);
}

#[test]
fn test_judge_after_winning_human_move_resyncs() {
    let engine = ScriptedEngine::empty_board()
        .game_over_after(1, "human")
        .fail_once(EngineOp::JudgeWinner);
    let (mut game, log) = human_first(engine);
    staged_human_move(&mut game);

    assert_failed(game.submit_turn(), EngineOp::JudgeWinner);
    assert_eq!(game.outcome(), None);

    let progress = game.submit_turn().expect("resync");

    assert_eq!(progress, Progress::GameOver(Outcome::HumanWins));
    assert_eq!(log.plays(), vec![Call::PlayTurn(0, 0, Some(2))]);
    assert_eq!(log.count(|c| *c == Call::JudgeWinner(true)), 2);
    assert_eq!(log.count(|c| matches!(c, Call::FetchPolicyAction)), 0);
    assert_eq!(game.state().board().occupied_count(), 1);
}

#[test]
fn test_state_fetch_after_computer_move_never_asks_for_another_move() {
    // Start, the human's move, then the computer's move.
    let engine = ScriptedEngine::empty_board().fail_on_call(EngineOp::FetchGameState, 3);
    let (mut game, log) = human_first(engine);
    staged_human_move(&mut game);

    assert_failed(game.submit_turn(), EngineOp::FetchGameState);
    assert!(matches!(
        game.phase(),
        Phase::Resyncing(Committed::ComputerMove(action)) if action.cell == cell(0, 1)
    ));
    assert_eq!(game.state().board().occupied_count(), 1);

    let progress = game.run_computer_turn().expect("resync");

    let Progress::HumanToMove {
        computer_move: Some(action),
    } = progress
    else {
        panic!("expected the computer's move, got {:?}", progress);
    };
    assert_eq!(action.cell, cell(0, 1));
    assert_eq!(log.plays().len(), 2);
    assert_eq!(log.count(|c| matches!(c, Call::FetchPolicyAction)), 1);
    assert_eq!(game.state().board().occupied_count(), 2);
    assert_eq!(game.last_placed(), Some(cell(0, 1)));
    assert_eq!(game.phase(), &Phase::HumanTurn(Staging::default()));
}

#[test]
fn test_game_over_query_after_computer_move_resyncs() {
    let engine = ScriptedEngine::empty_board().fail_on_call(EngineOp::IsGameOver, 2);
    let (mut game, log) = human_first(engine);
    staged_human_move(&mut game);

    assert_failed(game.submit_turn(), EngineOp::IsGameOver);
    assert!(matches!(
        game.phase(),
        Phase::Resyncing(Committed::ComputerMove(_))
    ));
    assert_eq!(game.state().board().occupied_count(), 2);

    // Submitting again only finishes the resync.
    let progress = game.submit_turn().expect("resync");

    assert!(matches!(progress, Progress::HumanToMove { computer_move: Some(_) }));
    assert_eq!(log.plays().len(), 2);
    assert_eq!(log.count(|c| matches!(c, Call::FetchPolicyAction)), 1);
    assert_eq!(game.phase(), &Phase::HumanTurn(Staging::default()));
}

#[test]
fn test_judge_after_winning_computer_move_resyncs() {
    let engine = ScriptedEngine::empty_board()
        .game_over_after(2, "computer")
        .fail_once(EngineOp::JudgeWinner);
    let (mut game, log) = human_first(engine);
    staged_human_move(&mut game);

    assert_failed(game.submit_turn(), EngineOp::JudgeWinner);

    let progress = game.run_computer_turn().expect("resync");

    assert_eq!(progress, Progress::GameOver(Outcome::ComputerWins));
    assert_eq!(log.plays().len(), 2);
    assert_eq!(log.count(|c| matches!(c, Call::FetchPolicyAction)), 1);
    assert_eq!(game.state().board().occupied_count(), 2);
    assert_eq!(game.run_computer_turn().expect("no-op"), Progress::Ignored);
}

#[test]
fn test_state_fetch_after_reset_resyncs_without_resetting_again() {
    // Start, the human's move, the computer's move, then the reset.
    let engine = ScriptedEngine::empty_board().fail_on_call(EngineOp::FetchGameState, 4);
    let (mut game, log) = human_first(engine);
    let initial = game.state().clone();
    staged_human_move(&mut game);
    game.submit_turn().expect("submit");

    assert!(matches!(
        game.reset(),
        Err(OrchestratorError::EngineCall {
            operation: EngineOp::FetchGameState,
            ..
        })
    ));
    assert_eq!(game.phase(), &Phase::Resyncing(Committed::Reset));
    assert_eq!(game.first_mover(), None);
    assert_eq!(game.last_placed(), None);
    assert!(matches!(
        game.choose_first_player(FirstMover::Human),
        Err(OrchestratorError::OutOfTurn { .. })
    ));

    assert_eq!(game.resync().expect("resync"), Progress::NewGame);

    assert_eq!(game.phase(), &Phase::ChoosingFirstPlayer);
    assert_eq!(game.state(), &initial);
    assert_eq!(log.count(|c| matches!(c, Call::Reset)), 1);
    assert_eq!(game.resync().expect("no-op"), Progress::Ignored);
}

#[test]
fn test_reset_from_any_phase() {
    let (mut game, log) = started(ScriptedEngine::empty_board());
    let initial = game.state().clone();

    game.reset().expect("reset while choosing");
    assert_eq!(game.phase(), &Phase::ChoosingFirstPlayer);

    game.choose_first_player(FirstMover::Human).expect("human");
    game.select_cell(cell(0, 0)).expect("empty cell");
    game.reset().expect("reset while staging");
    assert_eq!(game.phase(), &Phase::ChoosingFirstPlayer);
    assert_eq!(game.staging(), None);

    game.choose_first_player(FirstMover::Computer).expect("computer");
    game.reset().expect("reset mid-game");

    assert_eq!(game.phase(), &Phase::ChoosingFirstPlayer);
    assert_eq!(game.state(), &initial);
    assert_eq!(game.first_mover(), None);
    assert_eq!(game.last_placed(), None);
    assert_eq!(log.count(|c| matches!(c, Call::Reset)), 3);
}

#[test]
fn test_failed_reset_changes_nothing() {
    let engine = ScriptedEngine::empty_board().fail_once(EngineOp::Reset);
    let (mut game, _log) = human_first(engine);
    game.select_cell(cell(0, 0)).expect("empty cell");
    let before = game.phase().clone();

    assert!(matches!(
        game.reset(),
        Err(OrchestratorError::EngineCall {
            operation: EngineOp::Reset,
            ..
        })
    ));
    assert_eq!(game.phase(), &before);
    assert_eq!(game.first_mover(), Some(FirstMover::Human));
}

#[test]
fn test_first_player_is_fixed_once_chosen() {
    let (mut game, _log) = human_first(ScriptedEngine::empty_board());
    assert!(matches!(
        game.choose_first_player(FirstMover::Computer),
        Err(OrchestratorError::OutOfTurn { .. })
    ));
    assert_eq!(game.first_mover(), Some(FirstMover::Human));
}

#[test]
fn test_commands_before_choice_are_out_of_turn() {
    let (mut game, log) = started(ScriptedEngine::empty_board());
    log.clear();
    assert!(matches!(
        game.select_cell(cell(0, 0)),
        Err(OrchestratorError::OutOfTurn { .. })
    ));
    assert!(matches!(
        game.select_piece(0),
        Err(OrchestratorError::OutOfTurn { .. })
    ));
    assert_eq!(game.run_computer_turn().expect("no-op"), Progress::Ignored);
    assert!(log.calls().is_empty());
}

#[test]
fn test_corrupt_initial_state_fails_start() {
    let engine = ScriptedEngine::empty_board().state_json(r#"{"board":{"grid":[]}}"#);
    let (adapter, _log) = engine.into_adapter();
    assert!(TurnOrchestrator::start(adapter).is_err());
}
