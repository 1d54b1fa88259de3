//! Pieces module - tetromino shape catalog and the rotation transform
//!
//! Every shape is a small occupancy bitmap stored in its spawn orientation.
//! Rotation is one generic transform for all kinds (no kick tables, no
//! per-kind special cases): the clockwise image of a bitmap is the transpose of
//! its row-reversed matrix, so row `i` of the result is column `i` of the
//! source read bottom to top.

use crate::types::PieceKind;

/// Largest side of any bitmap in the catalog.
pub const MAX_DIM: usize = 4;

/// Occupancy bitmap of a piece in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmap {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_DIM]; MAX_DIM],
}

impl Bitmap {
    /// Build a bitmap from rows of 0/1 values.
    ///
    /// Panics if the rows are empty, ragged, or larger than [`MAX_DIM`]; the
    /// catalog below is the only production caller.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_DIM, "bad bitmap height");
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_DIM, "bad bitmap width");

        let mut bits = [[false; MAX_DIM]; MAX_DIM];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged bitmap");
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
            }
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn is_set(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.bits[row as usize][col as usize]
    }

    /// Occupied `(row, col)` offsets in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).filter_map(move |c| self.is_set(r, c).then_some((r, c)))
        })
    }

    /// Number of occupied cells
    pub fn count(&self) -> usize {
        self.cells().count()
    }

    /// The 90° clockwise image of this bitmap.
    pub fn rotated_cw(&self) -> Self {
        let mut bits = [[false; MAX_DIM]; MAX_DIM];
        // New dimensions are swapped: result[i][j] = source[rows - 1 - j][i].
        for i in 0..self.cols as usize {
            for j in 0..self.rows as usize {
                bits[i][j] = self.bits[self.rows as usize - 1 - j][i];
            }
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

/// Spawn-orientation bitmap for a piece kind
pub fn spawn_bitmap(kind: PieceKind) -> Bitmap {
    match kind {
        PieceKind::I => Bitmap::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => Bitmap::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::L => Bitmap::from_rows(&[&[1, 0], &[1, 0], &[1, 1]]),
        PieceKind::J => Bitmap::from_rows(&[&[0, 1], &[0, 1], &[1, 1]]),
        PieceKind::T => Bitmap::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
        PieceKind::S => Bitmap::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::Z => Bitmap::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
    }
}
