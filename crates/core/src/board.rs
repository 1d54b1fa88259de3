//! Board module - manages the game grid
//!
//! The board is a 20x10 grid where each cell is either empty or holds the fill
//! marker of the piece that locked there. Storage is a flat row-major array.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 is the left edge.
//!
//! Cells above the board (`row < 0`) are tolerated everywhere: they pass the
//! occupancy check unless their column is out of range and they are dropped on
//! lock. Nothing here panics on out-of-range input.

use arrayvec::ArrayVec;

use crate::types::{Cell, Coord, Marker, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices returned by [`Board::find_full_rows`] (never allocates).
pub type RowSet = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`; returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check whether a single target cell may hold a mino.
    ///
    /// The row must be above the floor and the column on the board. Rows above
    /// the top are accepted without looking at any cell.
    pub fn is_cell_occupiable(&self, row: i8, col: i8) -> bool {
        if row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return false;
        }
        row < 0 || !self.is_occupied(row, col)
    }

    /// True iff every target cell is occupiable (see [`Board::is_cell_occupiable`]).
    pub fn is_occupiable<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = Coord>,
    {
        cells
            .into_iter()
            .all(|(row, col)| self.is_cell_occupiable(row, col))
    }

    /// Write `marker` into every in-bounds cell; the rest is silently dropped.
    ///
    /// Returns how many cells were written.
    pub fn lock<I>(&mut self, cells: I, marker: Marker) -> usize
    where
        I: IntoIterator<Item = Coord>,
    {
        cells
            .into_iter()
            .filter(|&(row, col)| self.set(row, col, Some(marker)))
            .count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Borrow one row of cells. Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        let start = row * width;
        &self.cells[start..start + width]
    }

    /// Indices of all full rows, top to bottom.
    pub fn find_full_rows(&self) -> RowSet {
        (0..BOARD_HEIGHT as usize)
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Remove the given rows and refill the top with empty rows.
    ///
    /// Remaining rows keep their relative order. Indices out of range and
    /// duplicates are ignored. Returns the number of rows removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_row = BOARD_HEIGHT as usize;
        let mut removed = 0;

        // Two-pointer compaction, scanning bottom to top.
        for read_row in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&read_row) {
                removed += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        self.cells[..write_row * width].fill(None);
        removed
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Write the board as marker codes (0 = empty) into a row-major grid.
    pub fn write_code_grid(
        &self,
        out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    ) {
        for (row, out_row) in out.iter_mut().enumerate() {
            for (cell, code) in self.row(row).iter().zip(out_row.iter_mut()) {
                *code = cell.map(|m| m.code()).unwrap_or(0);
            }
        }
    }

    /// Fill every column of `row` except the listed ones.
    ///
    /// Convenience for setting up stacks; out-of-range rows are ignored.
    pub fn fill_row_except(&mut self, row: i8, holes: &[i8], marker: Marker) {
        for col in 0..BOARD_WIDTH as i8 {
            if !holes.contains(&col) {
                self.set(row, col, Some(marker));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
