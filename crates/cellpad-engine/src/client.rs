//! The contract a formula front end requires from a sheet engine.
//!
//! The engine owns the authoritative state: every cell's token buffer, the
//! edit status, and the working cell. Front ends only call these operations
//! and re-read the results.

use crate::engine::CellRef;
use crate::error::Result;

/// Display text for every cell of a sheet, stored row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetDisplay {
    columns: usize,
    rows: usize,
    cells: Vec<String>,
}

impl SheetDisplay {
    /// A sheet of the given size with every cell blank.
    pub fn new(columns: usize, rows: usize) -> Self {
        SheetDisplay {
            columns,
            rows,
            cells: vec![String::new(); columns.saturating_mul(rows)],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, cell: CellRef) -> Option<usize> {
        cell.within(self.columns, self.rows)
            .then(|| cell.row * self.columns + cell.col)
    }

    pub fn get(&self, cell: CellRef) -> Option<&str> {
        self.index(cell).map(|i| self.cells[i].as_str())
    }

    /// Look up a cell by its A1 label.
    pub fn get_label(&self, label: &str) -> Option<&str> {
        CellRef::parse(label).and_then(|cell| self.get(cell))
    }

    /// Set the text of one cell. Returns false if the cell is outside the sheet.
    pub fn set(&mut self, cell: CellRef, text: impl Into<String>) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = text.into();
                true
            }
            None => false,
        }
    }

    /// The display strings of one row, left to right.
    pub fn row(&self, row: usize) -> Option<&[String]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// Every cell with its display text, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &str)> {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, text)| (CellRef::new(i % columns, i / columns), text.as_str()))
    }
}

/// Operations a sheet engine exposes to the formula editor.
///
/// Queries take `&self`; mutations take `&mut self` and must have settled
/// when they return.
pub trait SheetEngine {
    /// Formula text of the working cell.
    fn formula_string(&self) -> Result<String>;

    /// Computed, displayable result of the working cell.
    fn result_string(&self) -> Result<String>;

    /// Display text for every cell.
    fn sheet_display(&self) -> Result<SheetDisplay>;

    /// Human-readable status derived from the edit status.
    fn edit_status_string(&self) -> Result<String>;

    /// Label of the working cell.
    fn working_cell_label(&self) -> Result<String>;

    fn edit_status(&self) -> Result<bool>;

    fn set_edit_status(&mut self, editing: bool) -> Result<()>;

    /// Append a token to the working cell's formula.
    fn add_token(&mut self, token: &str) -> Result<()>;

    /// Remove the last token of the working cell's formula. No-op when empty.
    fn remove_token(&mut self) -> Result<()>;

    /// Empty the working cell's formula.
    fn clear_formula(&mut self) -> Result<()>;

    /// Append a reference to `label` to the working cell's formula.
    fn add_cell(&mut self, label: &str) -> Result<()>;

    fn set_working_cell_by_label(&mut self, label: &str) -> Result<()>;

    /// End the session. Engines that hold no resources keep the default.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<E: SheetEngine + ?Sized> SheetEngine for Box<E> {
    fn formula_string(&self) -> Result<String> {
        (**self).formula_string()
    }

    fn result_string(&self) -> Result<String> {
        (**self).result_string()
    }

    fn sheet_display(&self) -> Result<SheetDisplay> {
        (**self).sheet_display()
    }

    fn edit_status_string(&self) -> Result<String> {
        (**self).edit_status_string()
    }

    fn working_cell_label(&self) -> Result<String> {
        (**self).working_cell_label()
    }

    fn edit_status(&self) -> Result<bool> {
        (**self).edit_status()
    }

    fn set_edit_status(&mut self, editing: bool) -> Result<()> {
        (**self).set_edit_status(editing)
    }

    fn add_token(&mut self, token: &str) -> Result<()> {
        (**self).add_token(token)
    }

    fn remove_token(&mut self) -> Result<()> {
        (**self).remove_token()
    }

    fn clear_formula(&mut self) -> Result<()> {
        (**self).clear_formula()
    }

    fn add_cell(&mut self, label: &str) -> Result<()> {
        (**self).add_cell(label)
    }

    fn set_working_cell_by_label(&mut self, label: &str) -> Result<()> {
        (**self).set_working_cell_by_label(label)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_display_lookup_by_label() {
        let mut display = SheetDisplay::new(3, 2);
        assert!(display.set(CellRef::new(2, 1), "42"));
        assert_eq!(display.get_label("C2"), Some("42"));
        assert_eq!(display.get_label("A1"), Some(""));
        assert_eq!(display.get_label("D1"), None);
        assert_eq!(display.get_label("not a cell"), None);
    }

    #[test]
    fn test_sheet_display_rejects_out_of_range_set() {
        let mut display = SheetDisplay::new(2, 2);
        assert!(!display.set(CellRef::new(2, 0), "x"));
        assert!(display.iter().all(|(_, text)| text.is_empty()));
    }

    #[test]
    fn test_sheet_display_iterates_row_major() {
        let display = SheetDisplay::new(2, 2);
        let labels: Vec<String> = display.iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(labels, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(display.row(1).map(|r| r.len()), Some(2));
        assert!(display.row(2).is_none());
    }
}
