//! Command-line configuration.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::{PieceFactory, Rules};
use crate::types::LINES_PER_LEVEL;

#[derive(Debug, Clone, Parser)]
#[command(name = "tui-blocks", about = "Falling-block puzzle game for the terminal")]
pub struct Config {
    /// Seed for a reproducible piece sequence (default: random)
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file holding the leaderboard
    #[arg(long, default_value = "leaderboard.json")]
    pub leaderboard: PathBuf,

    /// Lines to clear per level
    #[arg(long, default_value_t = LINES_PER_LEVEL)]
    pub lines_per_level: u32,

    /// Write logs to this file (RUST_LOG overrides the default `info` filter)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Start playing immediately
    #[arg(long)]
    pub skip_welcome: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            leaderboard: PathBuf::from("leaderboard.json"),
            lines_per_level: LINES_PER_LEVEL,
            log_file: None,
            skip_welcome: false,
        }
    }
}

impl Config {
    pub fn rules(&self) -> Rules {
        Rules::default().with_lines_per_level(self.lines_per_level)
    }

    pub fn piece_factory(&self) -> PieceFactory {
        match self.seed {
            Some(seed) => PieceFactory::seeded(seed),
            None => PieceFactory::from_entropy(),
        }
    }

    /// Install a file logger when `--log-file` was given.
    ///
    /// The terminal belongs to the renderer, so logs never go to stderr.
    pub fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = File::create(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()
            .context("logger already installed")?;
        Ok(())
    }
}
