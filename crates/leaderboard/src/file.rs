//! Leaderboard kept as a JSON array in a local file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::{top_entries, LeaderboardStore, Result, ScoreEntry};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in insertion order. A missing file reads as empty.
    pub fn load(&self) -> Result<Vec<ScoreEntry>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Rewrite the whole file. Entries go to a temporary file next to the
    /// target first and are renamed into place, so a failed write leaves the
    /// previous leaderboard intact.
    fn save(&self, entries: &[ScoreEntry]) -> Result<()> {
        let dir = match self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                dir
            }
            None => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        let mut w = BufWriter::new(tmp);
        serde_json::to_writer_pretty(&mut w, entries)?;
        let tmp = w.into_inner().map_err(|e| e.into_error())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl LeaderboardStore for JsonFileStore {
    fn fetch_top(&self, n: usize) -> Result<Vec<ScoreEntry>> {
        Ok(top_entries(self.load()?, n))
    }

    fn append(&mut self, entry: ScoreEntry) -> Result<()> {
        let mut entries = self.load()?;
        debug!(
            "saving score {} for {} to {}",
            entry.score,
            entry.name,
            self.path.display()
        );
        entries.push(entry);
        self.save(&entries)
    }
}
