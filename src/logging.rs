//! Tracing subscriber setup.
//!
//! The filter comes from `CELLPAD_LOG` (e.g. `CELLPAD_LOG=cellpad_core=debug`),
//! defaulting to `warn`.

use crate::error::{CellpadError, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CELLPAD_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Where log lines go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// Drop everything (the TUI owns the terminal).
    Off,
    Stderr,
    /// Append to a file.
    File(PathBuf),
}

pub fn init(target: LogTarget) -> Result<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    installed.map_err(|err| CellpadError::Logging(err.to_string()))
}
