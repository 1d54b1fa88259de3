//! Integration tests for full game sessions driven through the public API

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{anyhow, Result};

use tui_blocks::core::{
    Board, CyclingSource, GameSession, GameSnapshot, PieceFactory, PieceSource, Rules,
    SessionStatus, TickReport,
};
use tui_blocks::engine::{FrameSink, InputSource, Runner, RunnerConfig};
use tui_blocks::leaderboard::{panel_lines, LeaderboardStore, MemoryStore, ScoreEntry};
use tui_blocks::types::{GameAction, Marker, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn only(kind: PieceKind) -> CyclingSource {
    CyclingSource::of_kinds(&[kind], Marker::Red)
}

/// Tick with no input until the current piece locks.
fn drop_until_lock<S: PieceSource>(session: &mut GameSession<S>) -> TickReport {
    for _ in 0..=BOARD_HEIGHT {
        let report = session.tick(None);
        if report.lock.is_some() || session.is_finished() {
            return report;
        }
    }
    panic!("piece never locked");
}

#[test]
fn test_level_and_speed_progression() {
    // Ten rows with a four-wide well under the I spawn columns.
    let mut board = Board::new();
    for row in 10..BOARD_HEIGHT as i8 {
        board.fill_row_except(row, &[3, 4, 5, 6], Marker::Blue);
    }
    let mut session = GameSession::with_board(board, only(PieceKind::I), Rules::default());
    assert_eq!(session.level(), 1);
    assert_eq!(session.tick_interval(), Duration::from_millis(500));

    for cleared in 1..=10u32 {
        let report = drop_until_lock(&mut session);
        assert_eq!(report.lock.map(|l| l.lines_cleared()), Some(1));
        assert_eq!(session.lines(), cleared);

        match cleared {
            1..=4 => assert_eq!(session.level(), 1),
            5..=9 => {
                assert_eq!(session.level(), 2);
                assert_eq!(session.tick_interval_ms(), 450);
            }
            _ => {
                assert_eq!(session.level(), 3);
                assert_eq!(session.tick_interval_ms(), 400);
            }
        }
    }
    assert_eq!(session.score(), 10 * (10 + 100));
}

#[test]
fn test_double_clear_scores_lock_plus_two_lines() {
    let mut board = Board::new();
    board.fill_row_except(18, &[4, 5], Marker::Green);
    board.fill_row_except(19, &[4, 5], Marker::Green);
    let mut session = GameSession::with_board(board, only(PieceKind::O), Rules::default());

    let report = drop_until_lock(&mut session);
    let lock = report.lock.expect("lock event");
    assert_eq!(lock.score_delta, 10 + 200);
    assert_eq!(lock.lines_cleared(), 2);
    assert_eq!(session.score(), 210);
    assert_eq!(session.board().filled_count(), 0);
}

#[test]
fn test_level_rises_by_at_most_one_per_lock() {
    let mut board = Board::new();
    board.fill_row_except(18, &[4, 5], Marker::Green);
    board.fill_row_except(19, &[4, 5], Marker::Green);
    let rules = Rules::default().with_lines_per_level(1);
    let mut session = GameSession::with_board(board, only(PieceKind::O), rules);

    let report = drop_until_lock(&mut session);
    assert_eq!(session.lines(), 2);
    assert_eq!(session.level(), 2);
    assert!(report.lock.map_or(false, |l| l.level_up));
}

#[test]
fn test_blocked_spawn_is_game_over_without_gravity() {
    let mut board = Board::new();
    board.fill_row_except(0, &[], Marker::Red);
    board.fill_row_except(1, &[], Marker::Red);
    let mut session = GameSession::with_board(board, only(PieceKind::T), Rules::default());

    assert_eq!(session.status(), SessionStatus::GameOver);
    assert_eq!(session.score(), 0);
    assert_eq!(session.current().row(), 0);

    // Further ticks and actions change nothing.
    let report = session.tick(Some(GameAction::MoveLeft));
    assert_eq!(report.status, SessionStatus::GameOver);
    assert!(!report.action_applied && !report.fell && report.lock.is_none());
}

#[test]
fn test_quit_is_not_game_over() {
    let mut session = GameSession::new(PieceFactory::seeded(1), Rules::default());
    let report = session.tick(Some(GameAction::Quit));
    assert_eq!(report.status, SessionStatus::Quit);
    assert_eq!(session.current().row(), 0);
}

#[test]
fn test_restart_resets_everything() {
    let mut board = Board::new();
    board.fill_row_except(19, &[4, 5], Marker::Green);
    let mut session = GameSession::with_board(board, only(PieceKind::O), Rules::default());
    drop_until_lock(&mut session);
    assert!(session.score() > 0);

    session.restart();
    assert_eq!(session.score(), 0);
    assert_eq!(session.level(), 1);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.tick_interval_ms(), 500);
    assert_eq!(session.board().filled_count(), 0);
    assert_eq!(session.status(), SessionStatus::Playing);
}

#[test]
fn test_random_play_keeps_pieces_in_bounds() {
    let actions = [
        Some(GameAction::MoveLeft),
        Some(GameAction::Rotate),
        None,
        Some(GameAction::MoveRight),
        Some(GameAction::SoftDrop),
        Some(GameAction::Rotate),
        Some(GameAction::MoveRight),
    ];
    let mut session = GameSession::new(PieceFactory::seeded(99), Rules::default());

    for i in 0..50_000 {
        if session.is_finished() {
            break;
        }
        session.tick(actions[i % actions.len()]);
        if session.status() == SessionStatus::Playing {
            for (row, col) in session.current().cells() {
                assert!(row < BOARD_HEIGHT as i8);
                assert!((0..BOARD_WIDTH as i8).contains(&col));
                assert!(row < 0 || !session.board().is_occupied(row, col));
            }
        }
    }
    assert_eq!(session.status(), SessionStatus::GameOver);
}

struct Script(VecDeque<Result<Option<GameAction>>>);

impl InputSource for Script {
    fn poll(&mut self, _budget: Duration) -> Result<Option<GameAction>> {
        self.0.pop_front().unwrap_or(Ok(Some(GameAction::Quit)))
    }
}

#[derive(Default)]
struct Frames {
    frames: Vec<GameSnapshot>,
    broken_after: Option<usize>,
}

impl FrameSink for Frames {
    fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        if self.broken_after.is_some_and(|n| self.frames.len() >= n) {
            return Err(anyhow!("terminal went away"));
        }
        self.frames.push(*snap);
        Ok(())
    }
}

#[test]
fn test_runner_plays_until_quit() {
    let mut session = GameSession::new(only(PieceKind::T), Rules::default());
    let mut input = Script(
        vec![
            Ok(Some(GameAction::MoveLeft)),
            Ok(Some(GameAction::MoveLeft)),
            Ok(None),
        ]
        .into(),
    );
    let mut sink = Frames::default();

    let report = Runner::new(&mut input, &mut sink)
        .with_config(RunnerConfig {
            wipe_step: Duration::ZERO,
        })
        .run(&mut session);

    assert!(report.quit());
    assert!(!report.degraded());
    assert_eq!(report.ticks, 4);
    assert_eq!(session.current().col(), 2);
    assert_eq!(session.current().row(), 3);
    // Initial frame plus one per completed tick.
    assert_eq!(sink.frames.len(), 4);
}

#[test]
fn test_runner_survives_broken_terminal() {
    let mut session = GameSession::new(only(PieceKind::T), Rules::default());
    let mut input = Script((0..5).map(|_| Ok(None)).collect());
    let mut sink = Frames {
        broken_after: Some(2),
        ..Frames::default()
    };

    let report = Runner::new(&mut input, &mut sink)
        .with_config(RunnerConfig {
            wipe_step: Duration::ZERO,
        })
        .run(&mut session);

    assert!(report.quit());
    assert_eq!(report.render_failures, 4);
    assert_eq!(session.current().row(), 5);
}

#[test]
fn test_leaderboard_degrades_when_unavailable() {
    let store = MemoryStore::unavailable();
    assert_eq!(panel_lines(&store, 10), ["Leaderboard unavailable"]);

    let mut store = MemoryStore::new();
    store.append(ScoreEntry::new("ann", 120)).unwrap();
    assert_eq!(panel_lines(&store, 10), ["1. ann        120"]);
}
