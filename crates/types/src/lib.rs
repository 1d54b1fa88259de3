//! Core types module - shared data structures and constants
//!
//! Pure data types with no external dependencies, usable from the game-state
//! engine, the tick driver, and the terminal layers alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - Coordinates are `(row, col)` pairs throughout.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 500 | Tick interval at level 1 |
//! | `TICK_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_TICK_MS` | 100 | Interval floor |
//! | `WIPE_STEP_MS` | 20 | Pause per cell of the line-clear wipe |
//! | `POLL_SLICE_MS` | 10 | Longest single non-blocking input poll |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{Marker, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(Marker::ALL.len(), 6);
//! assert_eq!(Marker::from_code(Marker::Cyan.code()), Some(Marker::Cyan));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Tick interval at level 1 (milliseconds)
pub const BASE_TICK_MS: u32 = 500;

/// Tick interval reduction per level above 1 (milliseconds)
pub const TICK_STEP_MS: u32 = 50;

/// Shortest tick interval regardless of level (milliseconds)
pub const MIN_TICK_MS: u32 = 100;

/// Delay between frames of the line-clear wipe animation (milliseconds)
pub const WIPE_STEP_MS: u32 = 20;

/// Longest single blocking wait inside an input poll (milliseconds)
pub const POLL_SLICE_MS: u32 = 10;

/// Points awarded for every locked piece
pub const LOCK_BONUS: u32 = 10;

/// Points awarded per cleared row
pub const LINE_CLEAR_BONUS: u32 = 100;

/// Level rises when cumulative lines reach `level * LINES_PER_LEVEL`
pub const LINES_PER_LEVEL: u32 = 5;

/// Longest accepted leaderboard name
pub const MAX_NAME_LEN: usize = 10;

/// Name recorded when the player submits a blank name
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    L,
    J,
    T,
    S,
    Z,
}

impl PieceKind {
    /// The full catalog, in a fixed order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];
}

/// Fill marker written into a cell when a piece locks.
///
/// The palette is independent of the piece kind: any kind may carry any marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Red,
    Blue,
    Yellow,
    Green,
    Magenta,
    Cyan,
}

impl Marker {
    pub const ALL: [Marker; 6] = [
        Marker::Red,
        Marker::Blue,
        Marker::Yellow,
        Marker::Green,
        Marker::Magenta,
        Marker::Cyan,
    ];

    /// Compact non-zero code used in snapshot grids (0 is empty).
    pub fn code(&self) -> u8 {
        match self {
            Marker::Red => 1,
            Marker::Blue => 2,
            Marker::Yellow => 3,
            Marker::Green => 4,
            Marker::Magenta => 5,
            Marker::Cyan => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Marker::Red),
            2 => Some(Marker::Blue),
            3 => Some(Marker::Yellow),
            4 => Some(Marker::Green),
            5 => Some(Marker::Magenta),
            6 => Some(Marker::Cyan),
            _ => None,
        }
    }
}

/// Snapshot code for a cell that is being wiped by the line-clear animation.
pub const WIPE_CODE: u8 = 7;

/// Player actions recognized during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Quit,
}

/// Cell on the board (None = empty, Some = filled with a marker)
pub type Cell = Option<Marker>;

/// Absolute board coordinate as `(row, col)`.
pub type Coord = (i8, i8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_codes_are_distinct_and_nonzero() {
        let mut seen = [false; 8];
        for marker in Marker::ALL {
            let code = marker.code();
            assert!(code != 0 && code != WIPE_CODE);
            assert!(!seen[code as usize]);
            seen[code as usize] = true;
            assert_eq!(Marker::from_code(code), Some(marker));
        }
        assert_eq!(Marker::from_code(0), None);
        assert_eq!(Marker::from_code(WIPE_CODE), None);
    }
}
