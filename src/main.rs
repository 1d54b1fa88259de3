//! Terminal falling-block game (default binary).

use anyhow::Result;
use clap::Parser;
use log::info;

use tui_blocks::app::App;
use tui_blocks::config::Config;
use tui_blocks::core::GameSession;
use tui_blocks::leaderboard::JsonFileStore;
use tui_blocks::term::TerminalRenderer;

fn main() -> Result<()> {
    let config = Config::parse();
    config.init_logging()?;
    info!("starting with {:?}", config);

    let store = Box::new(JsonFileStore::new(&config.leaderboard));
    let session = GameSession::new(config.piece_factory(), config.rules());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = App::new(&config, &mut term, store, session).run();

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    println!("Thanks for playing!");
    Ok(())
}
