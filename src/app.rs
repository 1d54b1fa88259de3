//! Screen flow around game sessions: welcome, play, game over, name entry.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};

use crate::config::Config;
use crate::core::{GameSession, PieceSource};
use crate::engine::Runner;
use crate::input::{should_quit, TerminalInput};
use crate::leaderboard::{
    normalize_name, panel_lines, LeaderboardError, LeaderboardStore, ScoreEntry, PANEL_ENTRIES,
    SCREEN_ENTRIES,
};
use crate::term::{Screen, TerminalRenderer, TerminalSink};
use crate::types::MAX_NAME_LEN;

/// How long a menu waits for a key before redrawing.
const MENU_POLL: Duration = Duration::from_millis(500);

pub const SAVE_FAILED_TEXT: &str = "Could not save score";

/// What the player asked for on a menu key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Stay,
    Restart,
    Quit,
    /// The full leaderboard was just opened and needs fresh lines.
    LeaderboardOpened,
    /// Submit this (already normalized) name.
    Save(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Prompt,
    NameEntry(String),
    Saved { failed: bool },
}

/// State of the menus shown after a game ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostGame {
    score: u32,
    phase: Phase,
    show_leaderboard: bool,
}

impl PostGame {
    pub fn new(score: u32) -> Self {
        Self {
            score,
            phase: Phase::Prompt,
            show_leaderboard: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MenuOutcome {
        if let Phase::NameEntry(name) = &mut self.phase {
            return match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    MenuOutcome::Quit
                }
                KeyCode::Enter => MenuOutcome::Save(normalize_name(name)),
                KeyCode::Backspace => {
                    name.pop();
                    MenuOutcome::Stay
                }
                KeyCode::Char(c) if !c.is_control() && name.chars().count() < MAX_NAME_LEN => {
                    name.push(c);
                    MenuOutcome::Stay
                }
                _ => MenuOutcome::Stay,
            };
        }

        if should_quit(key) {
            return MenuOutcome::Quit;
        }
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => MenuOutcome::Restart,
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.show_leaderboard = !self.show_leaderboard;
                if self.show_leaderboard {
                    MenuOutcome::LeaderboardOpened
                } else {
                    MenuOutcome::Stay
                }
            }
            KeyCode::Enter if self.phase == Phase::Prompt => {
                self.show_leaderboard = false;
                self.phase = Phase::NameEntry(String::new());
                MenuOutcome::Stay
            }
            _ => MenuOutcome::Stay,
        }
    }

    /// Record the result of submitting the score.
    pub fn saved(&mut self, result: &std::result::Result<(), LeaderboardError>) {
        self.phase = Phase::Saved {
            failed: result.is_err(),
        };
    }

    pub fn screen<'a>(&'a self, leaderboard: &'a [String]) -> Screen<'a> {
        if self.show_leaderboard {
            return Screen::Leaderboard { lines: leaderboard };
        }
        match &self.phase {
            Phase::Prompt => Screen::GameOver {
                score: self.score,
                saved: false,
                notice: None,
            },
            Phase::NameEntry(name) => Screen::NameEntry {
                score: self.score,
                name,
            },
            Phase::Saved { failed } => Screen::GameOver {
                score: self.score,
                saved: true,
                notice: failed.then_some(SAVE_FAILED_TEXT),
            },
        }
    }
}

pub struct App<'a, S: PieceSource> {
    renderer: &'a mut TerminalRenderer,
    input: TerminalInput,
    store: Box<dyn LeaderboardStore>,
    session: GameSession<S>,
    skip_welcome: bool,
}

impl<'a, S: PieceSource> App<'a, S> {
    pub fn new(
        config: &Config,
        renderer: &'a mut TerminalRenderer,
        store: Box<dyn LeaderboardStore>,
        session: GameSession<S>,
    ) -> Self {
        Self {
            renderer,
            input: TerminalInput::new(),
            store,
            session,
            skip_welcome: config.skip_welcome,
        }
    }

    /// Run until the player quits.
    pub fn run(&mut self) -> Result<()> {
        if !self.skip_welcome && !self.welcome()? {
            return Ok(());
        }

        loop {
            let Some(score) = self.play() else {
                return Ok(());
            };
            if !self.post_game(score)? {
                return Ok(());
            }
            self.session.restart();
        }
    }

    /// Returns `false` when the player quit from the welcome screen.
    fn welcome(&mut self) -> Result<bool> {
        let mut sink = TerminalSink::new(self.renderer);
        loop {
            sink.show(&Screen::Welcome)?;
            if let Some(key) = self.input.next_key(MENU_POLL)? {
                if should_quit(key) {
                    return Ok(false);
                }
                if key.code == KeyCode::Enter {
                    return Ok(true);
                }
            }
        }
    }

    /// Play one round; `None` when the player quit mid-game.
    fn play(&mut self) -> Option<u32> {
        let lines = panel_lines(self.store.as_ref(), PANEL_ENTRIES);
        self.renderer.invalidate();
        let mut sink = TerminalSink::new(self.renderer).with_leaderboard(lines);

        info!("starting a new round");
        let report = Runner::new(&mut self.input, &mut sink).run(&mut self.session);
        if report.degraded() {
            warn!(
                "round finished with {} render and {} input failures",
                report.render_failures, report.input_failures
            );
        }
        (!report.quit()).then_some(report.score)
    }

    /// Returns `true` to play again.
    fn post_game(&mut self, score: u32) -> Result<bool> {
        let mut menu = PostGame::new(score);
        let mut board_lines: Vec<String> = Vec::new();
        self.renderer.invalidate();
        let mut sink = TerminalSink::new(self.renderer);

        loop {
            sink.show(&menu.screen(&board_lines))?;
            let Some(key) = self.input.next_key(MENU_POLL)? else {
                continue;
            };
            match menu.handle_key(key) {
                MenuOutcome::Stay => {}
                MenuOutcome::Restart => return Ok(true),
                MenuOutcome::Quit => return Ok(false),
                MenuOutcome::LeaderboardOpened => {
                    board_lines = panel_lines(self.store.as_ref(), SCREEN_ENTRIES);
                }
                MenuOutcome::Save(name) => {
                    info!("saving score {score} for {name}");
                    let result = self.store.append(ScoreEntry::new(name, score));
                    if let Err(err) = &result {
                        warn!("could not save score: {err}");
                    }
                    menu.saved(&result);
                }
            }
        }
    }
}
