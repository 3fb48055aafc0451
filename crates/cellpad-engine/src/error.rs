//! Error types for sheet engines.

use thiserror::Error;

/// Errors a sheet engine can report for a single call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid cell label: '{0}'")]
    InvalidCellLabel(String),

    #[error("Cell {label} is outside the {columns}x{rows} sheet")]
    OutOfBounds {
        label: String,
        columns: usize,
        rows: usize,
    },

    #[error("Cell {0} cannot reference itself")]
    SelfReference(String),

    #[error("Engine session is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, EngineError>;
