//! Formula editing state machine (UI-agnostic).

mod command;
mod mode;
mod queue;
mod snapshot;
mod state;

pub use command::{Command, UserAction, parse_script};
pub use mode::{CellClick, EditMode};
pub use queue::ActionQueue;
pub use snapshot::DisplaySnapshot;
pub use state::FormulaEditor;
