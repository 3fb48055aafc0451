//! Cellpad - formula keypad for a shared spreadsheet, with TUI

mod config;
mod error;
mod logging;
mod replay;
mod tui;

use anyhow::Context;
use cellpad_core::FormulaEditor;
use cellpad_engine::MemoryEngine;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use config::{Overrides, load_config};
use logging::LogTarget;

#[derive(Debug, Parser)]
#[command(name = "cellpad", version, about = "Edit spreadsheet formulas from a keypad.")]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(long, value_name = "FILE", conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long)]
    no_config: bool,

    /// Document name shown in the status bar
    #[arg(short, long)]
    document: Option<String>,

    /// User name shown in the status bar
    #[arg(short, long)]
    user: Option<String>,

    /// Sheet width in columns
    #[arg(long)]
    columns: Option<usize>,

    /// Sheet height in rows
    #[arg(long)]
    rows: Option<usize>,

    /// Apply a whitespace-separated action script and print the result
    /// (non-interactive), e.g. "cell:C3 edit_toggle 7 + cell:A1"
    #[arg(short, long, value_name = "SCRIPT")]
    replay: Option<String>,

    /// Also print the sheet as a markdown table after a replay
    #[arg(long, requires = "replay")]
    grid: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn log_target(&self) -> LogTarget {
        match (&self.log_file, &self.replay) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Some(_)) => LogTarget::Stderr,
            (None, None) => LogTarget::Off,
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            document: self.document.clone(),
            user: self.user.clone(),
            columns: self.columns,
            rows: self.rows,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_target()).context("failed to set up logging")?;

    let (mut config, mut warnings) = if cli.no_config {
        Default::default()
    } else {
        load_config(cli.config.as_deref())
    };
    warnings.extend(config.apply(cli.overrides()));
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let session = config.session.clone();
    info!(document = %session.document, user = %session.user, "opening session");
    let engine: tui::Engine = Box::new(MemoryEngine::new(session.clone()));
    let mut editor = FormulaEditor::new(engine).context("failed to start editing session")?;

    if let Some(script) = &cli.replay {
        let report = replay::run(&mut editor, script, cli.grid);
        editor.close().context("failed to close session")?;
        print!("{}", report.context("replay failed")?);
        return Ok(());
    }

    let (keymap, key_warnings) = tui::Keymap::with_overrides(&config.keys);
    for warning in key_warnings {
        eprintln!("Warning: {}", warning);
    }
    let mut app = tui::App::new(editor, keymap, &session);
    let result = tui::run(&mut app);
    app.close().context("failed to close session")?;
    result.context("terminal error")?;
    Ok(())
}
