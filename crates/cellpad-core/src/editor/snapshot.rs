use cellpad_engine::{SheetDisplay, SheetEngine};

use super::EditMode;

/// Everything the rendering layer shows, read from the engine in one pass.
///
/// A snapshot is never patched: each refresh builds a new one from scratch,
/// and it is only published if every query succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplaySnapshot {
    /// Formula text of the working cell
    pub formula: String,
    /// Computed result of the working cell
    pub result: String,
    /// Human-readable edit status
    pub status: String,
    /// Display text of every cell
    pub cells: SheetDisplay,
    /// Label of the working cell
    pub current_cell: String,
    /// Edit mode read in the same pass
    pub mode: EditMode,
    /// Incremented on every successful refresh
    pub revision: u64,
}

impl DisplaySnapshot {
    /// Query the engine in display order:
    /// formula, result, status, grid, working cell, edit status.
    pub(crate) fn fetch<E: SheetEngine + ?Sized>(
        engine: &E,
        revision: u64,
    ) -> cellpad_engine::Result<Self> {
        let formula = engine.formula_string()?;
        let result = engine.result_string()?;
        let status = engine.edit_status_string()?;
        let cells = engine.sheet_display()?;
        let current_cell = engine.working_cell_label()?;
        let mode = EditMode::from_status(engine.edit_status()?);
        Ok(DisplaySnapshot {
            formula,
            result,
            status,
            cells,
            current_cell,
            mode,
            revision,
        })
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }
}
