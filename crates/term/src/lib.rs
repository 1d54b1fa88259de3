//! Terminal rendering for the falling-block game.
//!
//! Everything is drawn into a [`FrameBuffer`] first; the
//! [`TerminalRenderer`] then flushes only the cells that changed since the
//! previous frame. Board cells are two columns wide so they look square.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screens;
pub mod sink;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{marker_rgb, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screens::{render_screen, Screen};
pub use sink::TerminalSink;
