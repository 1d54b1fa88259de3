//! Menu screens shown around a game: welcome, game over, name entry and the
//! full leaderboard.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{Viewport, CONTROLS};
use crate::types::MAX_NAME_LEN;

const PANEL_W: u16 = 50;

/// What the screen between games is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    Welcome,
    /// Final score with the save / restart / quit / leaderboard prompt.
    GameOver {
        score: u32,
        /// The score was already submitted (or the submission failed).
        saved: bool,
        notice: Option<&'a str>,
    },
    NameEntry {
        score: u32,
        name: &'a str,
    },
    Leaderboard {
        lines: &'a [String],
    },
}

struct Line<'a> {
    text: &'a str,
    style: CellStyle,
}

const TEXT: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220));
const HEADING: CellStyle = CellStyle::fg(Rgb::new(220, 120, 220)).bold();
const KEY_HINT: CellStyle = CellStyle::fg(Rgb::new(80, 220, 220)).bold();
const WARN: CellStyle = CellStyle::fg(Rgb::new(240, 200, 80));

fn line(text: &str, style: CellStyle) -> Line<'_> {
    Line { text, style }
}

/// Render `screen` centred in the viewport.
pub fn render_screen(screen: &Screen<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::default().into_cell(' '));

    match *screen {
        Screen::Welcome => {
            let mut lines = vec![
                line("Welcome to Blocks!", HEADING),
                line("", TEXT),
                line("Controls:", TEXT.bold()),
            ];
            lines.extend(CONTROLS.iter().map(|c| line(c, TEXT)));
            lines.push(line("", TEXT));
            lines.push(line("Press Enter to begin...", KEY_HINT));
            draw_box(fb, viewport, "BLOCKS", Rgb::new(80, 220, 220), &lines);
        }
        Screen::GameOver {
            score,
            saved,
            notice,
        } => {
            let score_text = format!("Score: {score}");
            let mut lines = Vec::new();
            if saved {
                lines.push(line("Your score has been recorded!", TEXT.bold()));
                lines.push(line("", TEXT));
            }
            lines.push(line(&score_text, TEXT.bold()));
            lines.push(line("", TEXT));
            if saved {
                lines.push(line("Press R to restart, Q to quit,", KEY_HINT));
                lines.push(line("or L to view the leaderboard.", KEY_HINT));
            } else {
                lines.push(line("Would you like to record your score?", TEXT));
                lines.push(line("", TEXT));
                lines.push(line("Press Enter to save your score,", KEY_HINT));
                lines.push(line("R to restart, Q to quit,", KEY_HINT));
                lines.push(line("or L to view the leaderboard.", KEY_HINT));
            }
            if let Some(notice) = notice {
                lines.push(line("", TEXT));
                lines.push(line(notice, WARN));
            }
            draw_box(fb, viewport, "GAME OVER", Rgb::new(220, 80, 80), &lines);
        }
        Screen::NameEntry { score, name } => {
            let score_text = format!("Score: {score}");
            let limit = format!("(max {MAX_NAME_LEN} characters, Enter to submit)");
            let input = format!("> {name}_");
            let lines = [
                line("Enter a username for the leaderboard:", HEADING),
                line(&limit, TEXT),
                line("", TEXT),
                line(&input, TEXT.bold()),
                line("", TEXT),
                line(&score_text, TEXT),
            ];
            draw_box(fb, viewport, "SAVE SCORE", Rgb::new(80, 220, 220), &lines);
        }
        Screen::Leaderboard { lines: entries } => {
            let mut lines: Vec<Line<'_>> = if entries.is_empty() {
                vec![line("No scores yet", TEXT.dim())]
            } else {
                entries.iter().map(|e| line(e, TEXT)).collect()
            };
            lines.push(line("", TEXT));
            lines.push(line("Press L to return.", KEY_HINT));
            draw_box(fb, viewport, "LEADERBOARD", Rgb::new(80, 120, 220), &lines);
        }
    }
}

fn draw_box(
    fb: &mut FrameBuffer,
    viewport: Viewport,
    title: &str,
    border: Rgb,
    lines: &[Line<'_>],
) {
    let w = PANEL_W.min(viewport.width);
    let h = (lines.len() as u16 + 4).min(viewport.height);
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;

    fb.draw_panel(x, y, w, h, Some(title), CellStyle::fg(border));

    let inner = w.saturating_sub(4) as usize;
    for (i, l) in lines.iter().enumerate() {
        let row = y + 2 + i as u16;
        if row + 1 >= y + h {
            break;
        }
        let text: String = l.text.chars().take(inner).collect();
        let len = text.chars().count() as u16;
        let tx = x + w.saturating_sub(len) / 2;
        fb.put_str(tx, row, &text, l.style);
    }
}
