//! Piece module - the active falling piece
//!
//! A piece is a shape kind, its current rotation bitmap, a top-left anchor and
//! the marker it will leave on the board. Translation is decided by the session
//! (it owns the board); rotation is a single attempt at the unchanged anchor.

use crate::board::Board;
use crate::pieces::{spawn_bitmap, Bitmap};
use crate::types::{Coord, Marker, PieceKind, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    bitmap: Bitmap,
    row: i8,
    col: i8,
    marker: Marker,
}

impl Piece {
    /// Create a piece at its spawn position: row 0, horizontally centred.
    pub fn new(kind: PieceKind, marker: Marker) -> Self {
        let bitmap = spawn_bitmap(kind);
        let col = (BOARD_WIDTH / 2) as i8 - (bitmap.cols() / 2) as i8;
        Self {
            kind,
            bitmap,
            row: 0,
            col,
            marker,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn col(&self) -> i8 {
        self.col
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Absolute cells of the piece, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.shifted_cells(0, 0)
    }

    /// Absolute cells the piece would cover after moving by `(d_row, d_col)`.
    pub fn shifted_cells(&self, d_row: i8, d_col: i8) -> impl Iterator<Item = Coord> + '_ {
        let row = self.row + d_row;
        let col = self.col + d_col;
        self.bitmap
            .cells()
            .map(move |(r, c)| (row + r as i8, col + c as i8))
    }

    /// Whether the piece fits on `board` after moving by `(d_row, d_col)`.
    pub fn fits(&self, board: &Board, d_row: i8, d_col: i8) -> bool {
        board.is_occupiable(self.shifted_cells(d_row, d_col))
    }

    /// Move the anchor without any checks. The session validates first.
    pub(crate) fn shift(&mut self, d_row: i8, d_col: i8) {
        self.row += d_row;
        self.col += d_col;
    }

    /// Rotate 90° clockwise in place if the rotated bitmap fits at the same anchor.
    ///
    /// Returns false and leaves the piece untouched otherwise.
    pub fn rotate_clockwise(&mut self, board: &Board) -> bool {
        let rotated = self.bitmap.rotated_cw();
        let (row, col) = (self.row, self.col);
        let fits = board.is_occupiable(
            rotated
                .cells()
                .map(|(r, c)| (row + r as i8, col + c as i8)),
        );
        if fits {
            self.bitmap = rotated;
        }
        fits
    }

    /// Place the piece at an explicit anchor (scenario setup).
    pub fn with_position(mut self, row: i8, col: i8) -> Self {
        self.row = row;
        self.col = col;
        self
    }
}
