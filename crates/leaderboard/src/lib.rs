//! Persistent high-score table.
//!
//! Stores are injected behind [`LeaderboardStore`], so the game keeps working
//! (with a placeholder panel) when the table cannot be read or written.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

pub use tui_blocks_types as types;

use crate::types::{DEFAULT_PLAYER_NAME, MAX_NAME_LEN};

/// Entries shown in the in-game panel.
pub const PANEL_ENTRIES: usize = 10;
/// Entries shown on the full leaderboard screen.
pub const SCREEN_ENTRIES: usize = 20;

/// Shown in place of the table when the store cannot be reached.
pub const UNAVAILABLE_TEXT: &str = "Leaderboard unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("leaderboard I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard data is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("leaderboard is unavailable")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;

pub trait LeaderboardStore {
    /// The best `n` entries, highest score first.
    fn fetch_top(&self, n: usize) -> Result<Vec<ScoreEntry>>;

    fn append(&mut self, entry: ScoreEntry) -> Result<()>;
}

/// Highest scores first; equal scores keep insertion order.
pub fn top_entries(mut entries: Vec<ScoreEntry>, n: usize) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(n);
    entries
}

/// One line per entry: `"{rank}. {name:<10} {score}"`.
pub fn format_lines(entries: &[ScoreEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {:<width$} {}", i + 1, e.name, e.score, width = MAX_NAME_LEN))
        .collect()
}

/// Panel lines for the top `n`, or the unavailable placeholder.
pub fn panel_lines(store: &dyn LeaderboardStore, n: usize) -> Vec<String> {
    match store.fetch_top(n) {
        Ok(entries) => format_lines(&entries),
        Err(err) => {
            log::warn!("could not load leaderboard: {err}");
            vec![UNAVAILABLE_TEXT.to_string()]
        }
    }
}

/// Trim the typed name; a blank name becomes the default player name.
pub fn normalize_name(input: &str) -> String {
    let name: String = input.trim().chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name
    }
}
