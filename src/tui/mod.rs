//! Terminal front end.

mod app;
mod input;
mod keymap;
mod ui;

pub use app::{App, Engine};
pub use keymap::Keymap;

use crate::error::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use std::io;

/// Take over the terminal and run until the user quits.
pub fn run(app: &mut App) -> Result<()> {
    let mut terminal = ratatui::try_init()?;
    let result = execute!(io::stdout(), EnableMouseCapture)
        .and_then(|()| input::run_app(&mut terminal, app));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result?;
    Ok(())
}
