//! cellpad-core - UI-agnostic formula editing state machine.

pub mod editor;
pub mod error;

pub use editor::{
    ActionQueue, CellClick, Command, DisplaySnapshot, EditMode, FormulaEditor, UserAction,
    parse_script,
};
pub use error::{CoreError, Result};

pub use cellpad_engine::{SheetDisplay, SheetEngine};
