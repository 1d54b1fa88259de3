//! In-process leaderboard, for tests and for running without a score file.

use crate::{top_entries, LeaderboardError, LeaderboardStore, Result, ScoreEntry};

#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Vec<ScoreEntry>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            available: true,
        }
    }

    pub fn with_entries(entries: Vec<ScoreEntry>) -> Self {
        Self {
            entries,
            available: true,
        }
    }

    /// A store whose every call fails with [`LeaderboardError::Unavailable`].
    pub fn unavailable() -> Self {
        Self {
            entries: Vec::new(),
            available: false,
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}

impl LeaderboardStore for MemoryStore {
    fn fetch_top(&self, n: usize) -> Result<Vec<ScoreEntry>> {
        if !self.available {
            return Err(LeaderboardError::Unavailable);
        }
        Ok(top_entries(self.entries.clone(), n))
    }

    fn append(&mut self, entry: ScoreEntry) -> Result<()> {
        if !self.available {
            return Err(LeaderboardError::Unavailable);
        }
        self.entries.push(entry);
        Ok(())
    }
}
