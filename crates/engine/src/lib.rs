//! Tick driver for a [`GameSession`].
//!
//! The runner owns nothing global: input and output are collaborator handles
//! passed in by the caller. One iteration waits for at most one action within
//! the session's tick interval, advances the session by one tick and draws a
//! frame. A line clear plays its wipe animation inline, which holds the next
//! tick back until the wipe is done.
//!
//! Collaborator failures never end a session. They are logged, counted in the
//! [`SessionReport`] and play continues.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info, warn};

use tui_blocks_core::{GameSession, GameSnapshot, LineClear, PieceSource, SessionStatus};
use tui_blocks_types::{GameAction, WIPE_STEP_MS};

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

/// Source of player actions.
pub trait InputSource {
    /// Wait up to `budget` for one recognized action.
    ///
    /// Returns as soon as a recognized key arrives, or `None` once the budget
    /// is spent. Unrecognized input is swallowed.
    fn poll(&mut self, budget: Duration) -> Result<Option<GameAction>>;
}

/// Consumer of rendered frames.
pub trait FrameSink {
    fn draw(&mut self, snap: &GameSnapshot) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Pause between wipe animation frames.
    pub wipe_step: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            wipe_step: Duration::from_millis(WIPE_STEP_MS as u64),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub end: SessionStatus,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub ticks: u64,
    pub render_failures: u32,
    pub input_failures: u32,
}

impl SessionReport {
    /// Some collaborator failed at least once during the session.
    pub fn degraded(&self) -> bool {
        self.render_failures > 0 || self.input_failures > 0
    }

    pub fn quit(&self) -> bool {
        self.end == SessionStatus::Quit
    }
}

pub struct Runner<'a> {
    input: &'a mut dyn InputSource,
    sink: &'a mut dyn FrameSink,
    config: RunnerConfig,
    render_failures: u32,
    input_failures: u32,
}

impl<'a> Runner<'a> {
    pub fn new(input: &'a mut dyn InputSource, sink: &'a mut dyn FrameSink) -> Self {
        Self {
            input,
            sink,
            config: RunnerConfig::default(),
            render_failures: 0,
            input_failures: 0,
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Drive `session` until game over or quit.
    pub fn run<S: PieceSource>(&mut self, session: &mut GameSession<S>) -> SessionReport {
        let mut ticks: u64 = 0;
        self.draw(&session.snapshot());

        while !session.is_finished() {
            let action = self.poll(session.tick_interval());
            let report = session.tick(action);
            ticks += 1;

            if report.status == SessionStatus::Quit {
                break;
            }

            if let Some(clear) = report.lock.as_ref().and_then(|lock| lock.clear.as_ref()) {
                self.play_wipe(clear);
            }

            self.draw(&session.snapshot());
        }

        let report = SessionReport {
            end: session.status(),
            score: session.score(),
            level: session.level(),
            lines: session.lines(),
            ticks,
            render_failures: self.render_failures,
            input_failures: self.input_failures,
        };
        info!(
            "session ended: {:?}, score {}, level {}, lines {}, {} ticks",
            report.end, report.score, report.level, report.lines, report.ticks
        );
        report
    }

    fn poll(&mut self, budget: Duration) -> Option<GameAction> {
        let started = Instant::now();
        match self.input.poll(budget) {
            Ok(action) => action,
            Err(err) => {
                self.input_failures += 1;
                if self.input_failures == 1 {
                    warn!("input unavailable, continuing without it: {err:#}");
                } else {
                    debug!("input poll failed again: {err:#}");
                }
                // Keep gravity on schedule even without input.
                if let Some(left) = budget.checked_sub(started.elapsed()) {
                    thread::sleep(left);
                }
                None
            }
        }
    }

    fn play_wipe(&mut self, clear: &LineClear) {
        for frame in clear.wipe_frames() {
            self.draw(&frame);
            if !self.config.wipe_step.is_zero() {
                thread::sleep(self.config.wipe_step);
            }
        }
    }

    fn draw(&mut self, snap: &GameSnapshot) {
        if let Err(err) = self.sink.draw(snap) {
            self.render_failures += 1;
            if self.render_failures == 1 {
                warn!("render target unavailable, continuing without it: {err:#}");
            } else {
                debug!("draw failed again: {err:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use anyhow::anyhow;
    use tui_blocks_core::{Board, CyclingSource, Rules};
    use tui_blocks_types::{Marker, PieceKind, WIPE_CODE};

    /// Replays a script of poll results, then quits.
    struct ScriptedInput {
        script: VecDeque<Result<Option<GameAction>>>,
        budgets: Vec<Duration>,
    }

    impl ScriptedInput {
        fn new(script: Vec<Result<Option<GameAction>>>) -> Self {
            Self {
                script: script.into(),
                budgets: Vec::new(),
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn poll(&mut self, budget: Duration) -> Result<Option<GameAction>> {
            self.budgets.push(budget);
            self.script
                .pop_front()
                .unwrap_or(Ok(Some(GameAction::Quit)))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<GameSnapshot>,
        fail: bool,
    }

    impl FrameSink for RecordingSink {
        fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
            if self.fail {
                return Err(anyhow!("no terminal"));
            }
            self.frames.push(*snap);
            Ok(())
        }
    }

    fn fast() -> RunnerConfig {
        RunnerConfig {
            wipe_step: Duration::ZERO,
        }
    }

    fn idle_ticks(n: usize) -> Vec<Result<Option<GameAction>>> {
        (0..n).map(|_| Ok(None)).collect()
    }

    #[test]
    fn quit_ends_session_without_gravity() {
        let mut session = GameSession::new(
            CyclingSource::of_kinds(&[PieceKind::T], Marker::Red),
            Rules::default(),
        );
        let mut input = ScriptedInput::new(vec![Ok(Some(GameAction::Quit))]);
        let mut sink = RecordingSink::default();

        let report = Runner::new(&mut input, &mut sink)
            .with_config(fast())
            .run(&mut session);

        assert!(report.quit());
        assert_eq!(report.ticks, 1);
        assert_eq!(session.current().row(), 0);
        // Only the initial frame was drawn.
        assert_eq!(sink.frames.len(), 1);
    }

    #[test]
    fn polls_with_the_session_tick_interval() {
        let mut session = GameSession::new(
            CyclingSource::of_kinds(&[PieceKind::T], Marker::Red),
            Rules::default(),
        );
        let mut input = ScriptedInput::new(idle_ticks(3));
        let mut sink = RecordingSink::default();

        Runner::new(&mut input, &mut sink)
            .with_config(fast())
            .run(&mut session);

        assert!(input
            .budgets
            .iter()
            .all(|&b| b == Duration::from_millis(500)));
        assert_eq!(input.budgets.len(), 4);
        assert_eq!(session.current().row(), 3);
    }

    #[test]
    fn line_clear_plays_wipe_frames() {
        let mut board = Board::new();
        board.fill_row_except(19, &[4, 5], Marker::Blue);
        let mut session = GameSession::with_board(
            board,
            CyclingSource::of_kinds(&[PieceKind::O], Marker::Red),
            Rules::default(),
        );
        // 18 falls, then the lock on the 19th tick.
        let mut input = ScriptedInput::new(idle_ticks(19));
        let mut sink = RecordingSink::default();

        let report = Runner::new(&mut input, &mut sink)
            .with_config(fast())
            .run(&mut session);

        assert_eq!(report.lines, 1);
        assert_eq!(report.score, 110);
        let wiped: Vec<_> = sink
            .frames
            .iter()
            .filter(|f| f.board[19].contains(&WIPE_CODE))
            .collect();
        assert_eq!(wiped.len(), 10);
        assert!(wiped[9].board[19].iter().all(|&c| c == WIPE_CODE));
    }

    #[test]
    fn wipe_before_blocked_spawn_shows_the_pre_clear_game() {
        let mut board = Board::new();
        board.fill_row_except(1, &[4, 5], Marker::Blue);
        board.set(2, 4, Some(Marker::Red));
        board.set(2, 5, Some(Marker::Red));
        let mut session = GameSession::with_board(
            board,
            CyclingSource::of_kinds(&[PieceKind::O], Marker::Yellow),
            Rules::default(),
        );
        let mut input = ScriptedInput::new(idle_ticks(3));
        let mut sink = RecordingSink::default();

        let report = Runner::new(&mut input, &mut sink)
            .with_config(fast())
            .run(&mut session);

        assert_eq!(report.end, SessionStatus::GameOver);
        assert_eq!(report.ticks, 1);
        assert_eq!(report.lines, 1);
        assert_eq!(report.score, 110);

        let wiped: Vec<_> = sink
            .frames
            .iter()
            .filter(|f| f.board[1].contains(&WIPE_CODE))
            .collect();
        assert_eq!(wiped.len(), 10);
        for frame in &wiped {
            assert_eq!(frame.status, SessionStatus::Playing);
            assert_eq!(frame.score, 10);
            assert_eq!(frame.lines, 0);
        }
        // The locked O is still above the wiped row.
        assert_eq!(wiped[0].board[0][4], Marker::Yellow.code());
        assert_eq!(sink.frames.last().unwrap().status, SessionStatus::GameOver);
    }

    #[test]
    fn game_over_ends_the_run() {
        let mut board = Board::new();
        board.set(2, 4, Some(Marker::Red));
        board.set(2, 5, Some(Marker::Red));
        let mut session = GameSession::with_board(
            board,
            CyclingSource::of_kinds(&[PieceKind::O], Marker::Red),
            Rules::default(),
        );
        let mut input = ScriptedInput::new(idle_ticks(5));
        let mut sink = RecordingSink::default();

        let report = Runner::new(&mut input, &mut sink)
            .with_config(fast())
            .run(&mut session);

        assert_eq!(report.end, SessionStatus::GameOver);
        assert_eq!(report.score, 10);
        assert_eq!(report.ticks, 1);
        assert_eq!(sink.frames.last().unwrap().status, SessionStatus::GameOver);
    }

    #[test]
    fn render_failures_degrade_instead_of_aborting() {
        let mut session = GameSession::new(
            CyclingSource::of_kinds(&[PieceKind::T], Marker::Red),
            Rules::default(),
        );
        let mut input = ScriptedInput::new(idle_ticks(2));
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        let report = Runner::new(&mut input, &mut sink)
            .with_config(fast())
            .run(&mut session);

        assert!(report.quit());
        assert!(report.degraded());
        assert_eq!(report.render_failures, 3);
        assert_eq!(session.current().row(), 2);
    }

    #[test]
    fn input_failures_are_counted() {
        let mut session = GameSession::new(
            CyclingSource::of_kinds(&[PieceKind::T], Marker::Red),
            Rules {
                base_tick_ms: 1,
                min_tick_ms: 1,
                ..Rules::default()
            },
        );
        let mut input = ScriptedInput::new(vec![Err(anyhow!("tty gone")), Ok(None)]);
        let mut sink = RecordingSink::default();

        let report = Runner::new(&mut input, &mut sink)
            .with_config(fast())
            .run(&mut session);

        assert_eq!(report.input_failures, 1);
        assert!(report.degraded());
        assert_eq!(session.current().row(), 2);
    }
}
