//! Read-only views of a session for renderers.
//!
//! Snapshots are plain `Copy` data: the board is a grid of marker codes with
//! the falling piece composited in. The line-clear wipe is exposed as a
//! sequence of snapshots that progressively paint the cleared rows.

use crate::board::RowSet;
use crate::piece::Piece;
use crate::pieces::Bitmap;
use crate::types::{Marker, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, WIPE_CODE};

/// Marker-code grid, row-major (0 = empty, [`WIPE_CODE`] = being wiped).
pub type CodeGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Playing,
    /// A freshly spawned piece did not fit.
    GameOver,
    /// The player asked to leave.
    Quit,
}

impl SessionStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, SessionStatus::Playing)
    }
}

/// Lookahead piece as shown in the NEXT panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePreview {
    pub kind: PieceKind,
    pub marker: Marker,
    pub bitmap: Bitmap,
}

impl From<Piece> for PiecePreview {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            marker: value.marker(),
            bitmap: *value.bitmap(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: CodeGrid,
    pub next: Option<PiecePreview>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub tick_ms: u32,
    pub status: SessionStatus,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            next: None,
            score: 0,
            level: 1,
            lines: 0,
            tick_ms: 0,
            status: SessionStatus::Playing,
        }
    }
}

/// Rows removed by one lock, with the game as it looked just before removal.
///
/// `before` is captured after the lock bonus and ahead of clearing, leveling
/// and respawn: the full rows are still on the board, NEXT still shows the
/// piece about to spawn and the status is always `Playing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    rows: RowSet,
    before: GameSnapshot,
}

impl LineClear {
    pub(crate) fn new(rows: RowSet, before: GameSnapshot) -> Self {
        Self { rows, before }
    }

    /// Cleared row indices, top to bottom.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Animation frames: each frame paints one more cell of the cleared rows.
    ///
    /// Rows are wiped in order, left to right, on top of the pre-clear view.
    pub fn wipe_frames(&self) -> WipeFrames<'_> {
        WipeFrames {
            rows: &self.rows,
            frame: self.before,
            row_idx: 0,
            col: 0,
        }
    }
}

/// Iterator returned by [`LineClear::wipe_frames`].
#[derive(Debug, Clone)]
pub struct WipeFrames<'a> {
    rows: &'a [usize],
    frame: GameSnapshot,
    row_idx: usize,
    col: usize,
}

impl Iterator for WipeFrames<'_> {
    type Item = GameSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        let &row = self.rows.get(self.row_idx)?;
        self.frame.board[row][self.col] = WIPE_CODE;

        self.col += 1;
        if self.col == BOARD_WIDTH as usize {
            self.col = 0;
            self.row_idx += 1;
        }
        Some(self.frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.rows.len() * BOARD_WIDTH as usize;
        let done = self.row_idx * BOARD_WIDTH as usize + self.col;
        let left = total.saturating_sub(done);
        (left, Some(left))
    }
}
