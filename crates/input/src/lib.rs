//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides
//! [`TerminalInput`], an [`InputSource`](tui_blocks_engine::InputSource) that
//! polls the terminal in short non-blocking slices until a recognized key
//! arrives or the tick budget runs out.

pub mod map;
pub mod terminal;

pub use tui_blocks_types as types;

pub use map::{map_key, should_quit};
pub use terminal::TerminalInput;
