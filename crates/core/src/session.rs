//! Game session - the tick-driven state machine
//!
//! The session exclusively owns the board, the falling piece and the one-piece
//! lookahead. Callers drive it with [`GameSession::tick`], one call per tick
//! interval, passing at most one recognized action. Renderers only ever see
//! [`GameSnapshot`]s.
//!
//! One tick:
//! 1. apply the action (invalid moves and rotations are silently dropped,
//!    quit ends the session before gravity),
//! 2. gravity: move down one row, or
//! 3. lock the piece, award the lock bonus,
//! 4. clear full rows and award the clear bonus,
//! 5. level check and tick interval update,
//! 6. promote the lookahead and draw a new one; a blocked spawn is game over.

use std::time::Duration;

use log::{debug, info};

use crate::board::Board;
use crate::factory::{PieceFactory, PieceSource};
use crate::piece::Piece;
use crate::scoring::Rules;
use crate::snapshot::{GameSnapshot, LineClear, SessionStatus};
use crate::types::GameAction;

/// Everything that happened when a piece locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// Cells written to the board (cells above the top are dropped).
    pub cells_written: usize,
    /// Points gained by this lock, clear bonus included.
    pub score_delta: u32,
    pub clear: Option<LineClear>,
    pub level_up: bool,
}

impl LockEvent {
    pub fn lines_cleared(&self) -> usize {
        self.clear.as_ref().map_or(0, LineClear::count)
    }
}

/// Result of one [`GameSession::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// The action changed the piece (moved or rotated).
    pub action_applied: bool,
    /// Gravity moved the piece down.
    pub fell: bool,
    pub lock: Option<LockEvent>,
    /// Status after the tick.
    pub status: SessionStatus,
}

impl TickReport {
    fn idle(status: SessionStatus) -> Self {
        Self {
            action_applied: false,
            fell: false,
            lock: None,
            status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession<S = PieceFactory> {
    board: Board,
    current: Piece,
    next: Piece,
    source: S,
    rules: Rules,
    score: u32,
    level: u32,
    lines: u32,
    tick_ms: u32,
    status: SessionStatus,
}

impl<S: PieceSource> GameSession<S> {
    /// Start a session on an empty board.
    pub fn new(source: S, rules: Rules) -> Self {
        Self::with_board(Board::new(), source, rules)
    }

    /// Start a session on a prepared board.
    ///
    /// If the first piece does not fit, the session starts in `GameOver`.
    pub fn with_board(board: Board, mut source: S, rules: Rules) -> Self {
        let current = source.next_piece();
        let next = source.next_piece();
        let mut session = Self {
            board,
            current,
            next,
            source,
            rules,
            score: 0,
            level: 1,
            lines: 0,
            tick_ms: rules.tick_interval_ms(1),
            status: SessionStatus::Playing,
        };
        session.check_spawn();
        info!("session started (tick {}ms)", session.tick_ms);
        session
    }

    /// Throw the round away and start over with an empty board.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.current = self.source.next_piece();
        self.next = self.source.next_piece();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.tick_ms = self.rules.tick_interval_ms(1);
        self.status = SessionStatus::Playing;
        self.check_spawn();
        info!("session restarted");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Try to translate the falling piece; no state changes on failure.
    pub fn try_move(&mut self, d_row: i8, d_col: i8) -> bool {
        if self.is_finished() || !self.current.fits(&self.board, d_row, d_col) {
            return false;
        }
        self.current.shift(d_row, d_col);
        true
    }

    /// Single-attempt clockwise rotation at the current anchor.
    pub fn try_rotate(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.current.rotate_clockwise(&self.board)
    }

    /// Apply one player action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.is_finished() {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.try_move(0, -1),
            GameAction::MoveRight => self.try_move(0, 1),
            GameAction::SoftDrop => self.try_move(1, 0),
            GameAction::Rotate => self.try_rotate(),
            GameAction::Quit => {
                self.status = SessionStatus::Quit;
                info!("player quit with score {}", self.score);
                true
            }
        }
    }

    /// Advance the game by one tick.
    pub fn tick(&mut self, action: Option<GameAction>) -> TickReport {
        if self.is_finished() {
            return TickReport::idle(self.status);
        }

        let action_applied = action.map_or(false, |a| self.apply_action(a));
        if self.is_finished() {
            return TickReport::idle(self.status);
        }

        if self.try_move(1, 0) {
            return TickReport {
                action_applied,
                fell: true,
                lock: None,
                status: self.status,
            };
        }

        let lock = self.lock_current();
        TickReport {
            action_applied,
            fell: false,
            lock: Some(lock),
            status: self.status,
        }
    }

    /// Lock the falling piece where it is and run clearing, leveling and respawn.
    pub fn lock_current(&mut self) -> LockEvent {
        let score_before = self.score;

        let cells_written = self.board.lock(self.current.cells(), self.current.marker());
        self.score = self.score.saturating_add(self.rules.lock_bonus);
        debug!(
            "locked {:?} at ({}, {}), {} cells",
            self.current.kind(),
            self.current.row(),
            self.current.col(),
            cells_written
        );

        let full_rows = self.board.find_full_rows();
        let clear = if full_rows.is_empty() {
            None
        } else {
            let before = self.pre_clear_view();
            self.board.clear_rows(&full_rows);
            let count = full_rows.len();
            self.score = self
                .score
                .saturating_add(self.rules.line_clear_score(count));
            self.lines = self.lines.saturating_add(count as u32);
            info!("cleared {} rows {:?}, {} lines total", count, full_rows, self.lines);
            Some(LineClear::new(full_rows, before))
        };

        let level = self.rules.next_level(self.level, self.lines);
        let level_up = level != self.level;
        if level_up {
            info!("level up: {} -> {}", self.level, level);
        }
        self.level = level;
        self.tick_ms = self.rules.tick_interval_ms(self.level);

        self.current = self.next;
        self.next = self.source.next_piece();
        self.check_spawn();

        LockEvent {
            cells_written,
            score_delta: self.score - score_before,
            clear,
            level_up,
        }
    }

    /// The view shown while full rows are wiped: locked board, lock bonus
    /// counted, lookahead not yet promoted.
    fn pre_clear_view(&self) -> GameSnapshot {
        let mut view = GameSnapshot::default();
        self.board.write_code_grid(&mut view.board);
        view.next = Some(self.next.into());
        view.score = self.score;
        view.level = self.level;
        view.lines = self.lines;
        view.tick_ms = self.tick_ms;
        view
    }

    fn check_spawn(&mut self) {
        if self.status == SessionStatus::Playing && !self.current.fits(&self.board, 0, 0) {
            self.status = SessionStatus::GameOver;
            info!("game over: spawn blocked, final score {}", self.score);
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_code_grid(&mut out.board);

        // The piece that ended the game is not part of the final picture.
        if self.status == SessionStatus::Playing {
            let code = self.current.marker().code();
            for (row, col) in self.current.cells() {
                if row >= 0 && col >= 0 {
                    if let Some(cell) = out
                        .board
                        .get_mut(row as usize)
                        .and_then(|r| r.get_mut(col as usize))
                    {
                        *cell = code;
                    }
                }
            }
        }

        out.next = Some(self.next.into());
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.tick_ms = self.tick_ms;
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
