//! Reference evaluation engine.
//!
//! - [`CellRef`] - A1 label parsing
//! - [`TokenKind`], [`render_formula`] - Token classification and formula text
//! - [`Evaluator`] - Rhai-backed arithmetic over token formulas
//! - [`format_value`] - Format computed values for display

mod cell_ref;
mod eval;
mod format;
mod token;

pub use cell_ref::CellRef;
pub use eval::{CellValue, EvalError, Evaluator, Formulas};
pub use format::{format_number, format_value};
pub use token::{TokenKind, render_formula};
