//! Frame sinks that put snapshots and menu screens on the terminal.

use anyhow::Result;

use tui_blocks_engine::FrameSink;

use crate::core::GameSnapshot;
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;
use crate::screens::{render_screen, Screen};

/// Draws game frames through a [`TerminalRenderer`].
///
/// The framebuffer is reused across frames and only resized when the
/// terminal size changes.
pub struct TerminalSink<'r> {
    renderer: &'r mut TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    leaderboard: Vec<String>,
}

impl<'r> TerminalSink<'r> {
    pub fn new(renderer: &'r mut TerminalRenderer) -> Self {
        let (w, h) = renderer.size();
        Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(w, h),
            leaderboard: Vec::new(),
        }
    }

    /// Lines for the in-game LEADERBOARD panel.
    pub fn with_leaderboard(mut self, lines: Vec<String>) -> Self {
        self.leaderboard = lines;
        self
    }

    /// Draw a menu screen instead of a game frame.
    pub fn show(&mut self, screen: &Screen<'_>) -> Result<()> {
        let viewport = self.viewport();
        render_screen(screen, viewport, &mut self.fb);
        self.renderer.present(&mut self.fb)
    }

    fn viewport(&self) -> Viewport {
        let (w, h) = self.renderer.size();
        Viewport::new(w, h)
    }
}

impl FrameSink for TerminalSink<'_> {
    fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        let viewport = self.viewport();
        self.view
            .render_into(snap, &self.leaderboard, viewport, &mut self.fb);
        self.renderer.present(&mut self.fb)
    }
}
