//! Error types for Cellpad core.

use cellpad_engine::EngineError;
use thiserror::Error;

/// Errors that can occur while setting up or scripting a formula editor
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("Empty action")]
    EmptyAction,
}

pub type Result<T> = std::result::Result<T, CoreError>;
