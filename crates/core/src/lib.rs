//! Core game logic - pure, deterministic, and testable
//!
//! All game rules and state live here, with no dependency on terminals,
//! keyboards or storage:
//!
//! - **Deterministic**: a seeded factory or a scripted source replays the same game
//! - **Total**: no operation returns an error; invalid moves are simply refused
//! - **Allocation-free hot path**: the board is a flat array, row sets are `ArrayVec`s
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 grid with occupancy checks, locking and row compaction
//! - [`pieces`]: shape bitmaps in spawn orientation and the clockwise transform
//! - [`piece`]: the falling piece (anchor, bitmap, marker) and single-attempt rotation
//! - [`factory`]: uniform random piece draws
//! - [`scoring`]: lock/clear bonuses, leveling and tick speed
//! - [`session`]: the tick state machine that owns everything above
//! - [`snapshot`]: read-only views and the line-clear wipe frames
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{GameSession, PieceFactory, Rules};
//! use tui_blocks_types::GameAction;
//!
//! let mut session = GameSession::new(PieceFactory::seeded(12345), Rules::default());
//!
//! session.tick(Some(GameAction::MoveRight));
//! session.tick(Some(GameAction::Rotate));
//! session.tick(None);
//!
//! assert_eq!(session.level(), 1);
//! assert_eq!(session.tick_interval_ms(), 500);
//! ```

pub mod board;
pub mod factory;
pub mod piece;
pub mod pieces;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowSet};
pub use factory::{CyclingSource, PieceFactory, PieceSource};
pub use piece::Piece;
pub use pieces::{spawn_bitmap, Bitmap};
pub use scoring::Rules;
pub use session::{GameSession, LockEvent, TickReport};
pub use snapshot::{GameSnapshot, LineClear, PiecePreview, SessionStatus, WipeFrames};
