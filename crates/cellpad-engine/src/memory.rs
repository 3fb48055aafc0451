//! In-process sheet engine.

use crate::client::{SheetDisplay, SheetEngine};
use crate::engine::{CellRef, Evaluator, Formulas, format_value, render_formula};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLUMNS: usize = 8;
pub const DEFAULT_ROWS: usize = 10;

/// Identity and shape of an editing session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the document being edited
    pub document: String,
    /// Name of the user editing it
    pub user: String,
    pub columns: usize,
    pub rows: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            document: "untitled".to_string(),
            user: "anonymous".to_string(),
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
        }
    }
}

/// A sheet engine that keeps every formula in memory and evaluates on read.
pub struct MemoryEngine {
    config: SessionConfig,
    formulas: Formulas,
    working: CellRef,
    editing: bool,
    evaluator: Evaluator,
    closed: bool,
}

impl MemoryEngine {
    /// Start a session with the working cell at A1, not editing.
    pub fn new(mut config: SessionConfig) -> Self {
        config.columns = config.columns.max(1);
        config.rows = config.rows.max(1);
        MemoryEngine {
            config,
            formulas: Formulas::new(),
            working: CellRef::new(0, 0),
            editing: false,
            evaluator: Evaluator::new(),
            closed: false,
        }
    }

    /// Tokens of the working cell's formula.
    pub fn tokens(&self) -> &[String] {
        self.formulas
            .get(&self.working)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tokens of any cell's formula.
    pub fn tokens_at(&self, cell: CellRef) -> &[String] {
        self.formulas.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(EngineError::Closed)
        } else {
            Ok(())
        }
    }

    fn resolve(&self, label: &str) -> Result<CellRef> {
        let cell =
            CellRef::parse(label).ok_or_else(|| EngineError::InvalidCellLabel(label.to_string()))?;
        if !cell.within(self.config.columns, self.config.rows) {
            return Err(EngineError::OutOfBounds {
                label: cell.to_string(),
                columns: self.config.columns,
                rows: self.config.rows,
            });
        }
        Ok(cell)
    }

    fn working_tokens_mut(&mut self) -> &mut Vec<String> {
        self.formulas.entry(self.working).or_default()
    }
}

impl SheetEngine for MemoryEngine {
    fn formula_string(&self) -> Result<String> {
        self.ensure_open()?;
        Ok(render_formula(self.tokens()))
    }

    fn result_string(&self) -> Result<String> {
        self.ensure_open()?;
        let value = self.evaluator.evaluate(self.working, &self.formulas);
        Ok(format_value(&value))
    }

    fn sheet_display(&self) -> Result<SheetDisplay> {
        self.ensure_open()?;
        let mut display = SheetDisplay::new(self.config.columns, self.config.rows);
        let cells: Vec<CellRef> = display.iter().map(|(cell, _)| cell).collect();
        let values = self.evaluator.evaluate_all(cells, &self.formulas);
        for (cell, value) in values {
            display.set(cell, format_value(&value));
        }
        Ok(display)
    }

    fn edit_status_string(&self) -> Result<String> {
        self.ensure_open()?;
        Ok(if self.editing {
            format!("editing: {}", self.working)
        } else {
            format!("current cell: {}", self.working)
        })
    }

    fn working_cell_label(&self) -> Result<String> {
        self.ensure_open()?;
        Ok(self.working.to_string())
    }

    fn edit_status(&self) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.editing)
    }

    fn set_edit_status(&mut self, editing: bool) -> Result<()> {
        self.ensure_open()?;
        self.editing = editing;
        Ok(())
    }

    fn add_token(&mut self, token: &str) -> Result<()> {
        self.ensure_open()?;
        if !token.is_empty() {
            self.working_tokens_mut().push(token.to_string());
        }
        Ok(())
    }

    fn remove_token(&mut self) -> Result<()> {
        self.ensure_open()?;
        if let Some(tokens) = self.formulas.get_mut(&self.working) {
            tokens.pop();
        }
        Ok(())
    }

    fn clear_formula(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.formulas.remove(&self.working);
        Ok(())
    }

    fn add_cell(&mut self, label: &str) -> Result<()> {
        self.ensure_open()?;
        let cell = self.resolve(label)?;
        if cell == self.working {
            return Err(EngineError::SelfReference(cell.to_string()));
        }
        self.working_tokens_mut().push(cell.to_string());
        Ok(())
    }

    fn set_working_cell_by_label(&mut self, label: &str) -> Result<()> {
        self.ensure_open()?;
        self.working = self.resolve(label)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }
}
