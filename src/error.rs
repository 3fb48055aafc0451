//! Error types for the Cellpad application

use thiserror::Error;

/// Errors that can occur in the Cellpad application
#[derive(Error, Debug)]
pub enum CellpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] cellpad_core::CoreError),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CellpadError>;
