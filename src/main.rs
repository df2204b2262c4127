//! Side Scroller entry point
//!
//! Loads settings and runs the game in the terminal.

use side_scroller::platform::TerminalPlatform;
use side_scroller::{App, GameError, Settings};

fn run() -> Result<(), GameError> {
    let settings = Settings::load_or_default()?;
    let mut app = App::new(TerminalPlatform::new(), settings);
    let stats = app.execute()?;
    log::info!("Final stats: {:?}", stats);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Side Scroller starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("side-scroller: {e}");
        std::process::exit(1);
    }
}
