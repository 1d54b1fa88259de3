//! Terminal falling-block game (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_blocks::{core,engine,input,leaderboard,term,types}`
//! and adds the command-line configuration and the screen flow used by the
//! binary.

pub mod app;
pub mod config;

pub use tui_blocks_core as core;
pub use tui_blocks_engine as engine;
pub use tui_blocks_input as input;
pub use tui_blocks_leaderboard as leaderboard;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;
