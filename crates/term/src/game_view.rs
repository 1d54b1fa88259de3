//! GameView: lays a [`GameSnapshot`] out on a terminal framebuffer.
//!
//! Pure (no I/O), so every panel can be unit-tested.
//!
//! ```text
//!  ┌─ LEADERBOARD ─┐ ┌────────────────────┐ ┌─ NEXT ─┐
//!  │ 1. ann   900  │ │                    │ │  ██    │
//!  └───────────────┘ │       board        │ └────────┘
//!  ┌─ CONTROLS ────┐ │                    │ ┌─ STATS ┐
//!  │ ← move left   │ │                    │ │ SCORE  │
//! ```

use crate::core::{GameSnapshot, PiecePreview, SessionStatus};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Marker, BOARD_HEIGHT, BOARD_WIDTH, WIPE_CODE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub const LEFT_PANEL_W: u16 = 26;
pub const RIGHT_PANEL_W: u16 = 16;
const GAP: u16 = 1;
const LEADERBOARD_ROWS: u16 = 10;

pub const CONTROLS: [&str; 5] = [
    "← move left",
    "→ move right",
    "↓ soft drop",
    "↑ rotate",
    "Q quit",
];

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const FRAME: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));

/// Foreground colour for a marker.
pub fn marker_rgb(marker: Marker) -> Rgb {
    match marker {
        Marker::Red => Rgb::new(220, 80, 80),
        Marker::Blue => Rgb::new(80, 120, 220),
        Marker::Yellow => Rgb::new(240, 220, 80),
        Marker::Green => Rgb::new(100, 220, 120),
        Marker::Magenta => Rgb::new(200, 120, 220),
        Marker::Cyan => Rgb::new(80, 220, 220),
    }
}

const WIPE_RGB: Rgb = Rgb::new(255, 255, 255);

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 makes cells look roughly square in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Outer size of the bordered board.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render a snapshot into `fb`, resizing it to the viewport.
    ///
    /// `leaderboard` holds preformatted lines for the LEADERBOARD panel; an
    /// empty slice shows a placeholder.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        leaderboard: &[String],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let total_w = LEFT_PANEL_W + GAP + frame_w + GAP + RIGHT_PANEL_W;
        let left_x = viewport.width.saturating_sub(total_w) / 2;
        let top = viewport.height.saturating_sub(frame_h) / 2;
        let board_x = left_x + LEFT_PANEL_W + GAP;
        let right_x = board_x + frame_w + GAP;

        self.draw_board(fb, snap, board_x, top);
        let controls_y = draw_leaderboard(fb, leaderboard, left_x, top);
        draw_controls(fb, left_x, controls_y);
        let stats_y = self.draw_next(fb, snap.next.as_ref(), right_x, top);
        draw_stats(fb, snap, right_x, stats_y);

        if snap.status == SessionStatus::GameOver {
            draw_overlay(fb, board_x, top, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        leaderboard: &[String],
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, leaderboard, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let (frame_w, frame_h) = self.frame_size();
        fb.fill_rect(x + 1, y + 1, frame_w - 2, frame_h - 2, ' ', playfield(Rgb::new(0, 0, 0)));
        fb.draw_panel(x, y, frame_w, frame_h, None, FRAME);

        for (row, cells) in snap.board.iter().enumerate() {
            for (col, &code) in cells.iter().enumerate() {
                let (ch, style) = match code {
                    0 => ('·', playfield(Rgb::new(90, 90, 100)).dim()),
                    WIPE_CODE => ('█', playfield(WIPE_RGB).bold()),
                    code => match Marker::from_code(code) {
                        Some(m) => ('█', playfield(marker_rgb(m))),
                        None => ('?', playfield(WIPE_RGB)),
                    },
                };
                let px = x + 1 + col as u16 * self.cell_w;
                let py = y + 1 + row as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }
    }

    /// NEXT panel; returns the row below it.
    fn draw_next(&self, fb: &mut FrameBuffer, next: Option<&PiecePreview>, x: u16, y: u16) -> u16 {
        let h = 6;
        fb.draw_panel(x, y, RIGHT_PANEL_W, h, Some("NEXT"), FRAME);
        if let Some(preview) = next {
            let bm = &preview.bitmap;
            let style = CellStyle::fg(marker_rgb(preview.marker));
            let inner_w = RIGHT_PANEL_W - 2;
            let ox = x + 1 + inner_w.saturating_sub(bm.cols() as u16 * self.cell_w) / 2;
            let oy = y + 1 + (4 - bm.rows() as u16) / 2;
            for (r, c) in bm.cells() {
                fb.fill_rect(
                    ox + c as u16 * self.cell_w,
                    oy + r as u16,
                    self.cell_w,
                    1,
                    '█',
                    style,
                );
            }
        }
        y + h
    }
}

fn playfield(fg: Rgb) -> CellStyle {
    CellStyle {
        bg: PLAYFIELD_BG,
        ..CellStyle::fg(fg)
    }
}

fn draw_stats(fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
    fb.draw_panel(x, y, RIGHT_PANEL_W, 8, Some("STATS"), FRAME);
    let rows = [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)];
    for (i, (label, value)) in rows.into_iter().enumerate() {
        let ry = y + 1 + 2 * i as u16;
        fb.put_str(x + 2, ry, label, LABEL);
        fb.put_u32(x + 2, ry + 1, value, VALUE);
    }
}

/// LEADERBOARD panel; returns the row below it.
fn draw_leaderboard(fb: &mut FrameBuffer, lines: &[String], x: u16, y: u16) -> u16 {
    let h = LEADERBOARD_ROWS + 2;
    fb.draw_panel(x, y, LEFT_PANEL_W, h, Some("LEADERBOARD"), FRAME);
    let inner = (LEFT_PANEL_W - 4) as usize;
    if lines.is_empty() {
        fb.put_str(x + 2, y + 1, "No scores yet", VALUE.dim());
    }
    for (i, line) in lines.iter().take(LEADERBOARD_ROWS as usize).enumerate() {
        for (dx, ch) in line.chars().take(inner).enumerate() {
            fb.put_char(x + 2 + dx as u16, y + 1 + i as u16, ch, VALUE);
        }
    }
    y + h
}

fn draw_controls(fb: &mut FrameBuffer, x: u16, y: u16) {
    fb.draw_panel(x, y, LEFT_PANEL_W, CONTROLS.len() as u16 + 2, Some("CONTROLS"), FRAME);
    for (i, line) in CONTROLS.iter().enumerate() {
        fb.put_str(x + 2, y + 1 + i as u16, line, VALUE);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let tx = x + w.saturating_sub(text_w) / 2;
    let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
    fb.put_str(tx, y + h / 2, text, style);
}
