use cellpad_engine::SheetEngine;
use tracing::{debug, trace, warn};

use super::{CellClick, Command, DisplaySnapshot, EditMode, UserAction};
use crate::error::Result;

/// Formula editing front end for one engine session.
///
/// The editor owns its engine from [`FormulaEditor::new`] until
/// [`FormulaEditor::close`]. Every action runs the engine mutation to
/// completion and then refreshes the published [`DisplaySnapshot`].
/// Engine failures never surface from actions: they are logged, and the
/// refresh still runs so the snapshot matches whatever the engine now holds.
pub struct FormulaEditor<E> {
    engine: E,
    snapshot: DisplaySnapshot,
}

impl<E: SheetEngine> FormulaEditor<E> {
    /// Attach to an engine and take the first snapshot.
    pub fn new(engine: E) -> Result<Self> {
        let snapshot = DisplaySnapshot::fetch(&engine, 0)?;
        debug!(
            cell = %snapshot.current_cell,
            mode = snapshot.mode.name(),
            "formula editor attached"
        );
        Ok(FormulaEditor { engine, snapshot })
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> &DisplaySnapshot {
        &self.snapshot
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Apply any user action.
    pub fn dispatch(&mut self, action: UserAction) -> &DisplaySnapshot {
        match action {
            UserAction::Command(command) => self.execute(command),
            UserAction::Button(label) => self.press_button(label.as_deref()),
            UserAction::CellClick(label) => self.click_cell(label.as_deref()),
        }
    }

    /// Run `edit_toggle`, `clear` or `allClear`.
    pub fn execute(&mut self, command: Command) -> &DisplaySnapshot {
        let outcome = self.apply_command(command);
        self.settle(command.name(), outcome)
    }

    /// A number, operator or parenthesis button was pressed.
    pub fn press_button(&mut self, label: Option<&str>) -> &DisplaySnapshot {
        let token = label.unwrap_or_default();
        let outcome = self.append_token(token);
        self.settle("button", outcome)
    }

    /// A grid cell was clicked.
    pub fn click_cell(&mut self, label: Option<&str>) -> &DisplaySnapshot {
        let label = label.unwrap_or_default();
        let outcome = self.route_cell_click(label);
        self.settle("cell_click", outcome)
    }

    /// Re-read every display value from the engine.
    ///
    /// The new snapshot replaces the published one only if all queries
    /// succeeded; otherwise the previous snapshot stays.
    pub fn refresh(&mut self) -> &DisplaySnapshot {
        let revision = self.snapshot.revision + 1;
        match DisplaySnapshot::fetch(&self.engine, revision) {
            Ok(snapshot) => {
                trace!(revision, cell = %snapshot.current_cell, "snapshot published");
                self.snapshot = snapshot;
            }
            Err(err) => {
                warn!(
                    revision = self.snapshot.revision,
                    error = %err,
                    "refresh failed, keeping previous snapshot"
                );
            }
        }
        &self.snapshot
    }

    /// End the session and hand the engine back.
    pub fn close(mut self) -> Result<E> {
        self.engine.close()?;
        debug!("formula editor closed");
        Ok(self.engine)
    }

    fn apply_command(&mut self, command: Command) -> cellpad_engine::Result<()> {
        match command {
            Command::EditToggle => {
                let mode = EditMode::from_status(self.engine.edit_status()?);
                self.engine.set_edit_status(mode.toggled().is_editing())
            }
            Command::Clear => self.engine.remove_token(),
            Command::AllClear => self.engine.clear_formula(),
        }
    }

    fn append_token(&mut self, token: &str) -> cellpad_engine::Result<()> {
        self.engine.set_edit_status(EditMode::begin_token().is_editing())?;
        self.engine.add_token(token)
    }

    fn route_cell_click(&mut self, label: &str) -> cellpad_engine::Result<()> {
        let mode = EditMode::from_status(self.engine.edit_status()?);
        match mode.route_cell_click(label) {
            CellClick::AppendReference(label) => self.engine.add_cell(&label),
            CellClick::Navigate(label) => self.engine.set_working_cell_by_label(&label),
        }
    }

    fn settle(
        &mut self,
        action: &'static str,
        outcome: cellpad_engine::Result<()>,
    ) -> &DisplaySnapshot {
        match outcome {
            Ok(()) => debug!(action, "engine mutation settled"),
            Err(err) => warn!(action, error = %err, "engine rejected mutation"),
        }
        self.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellpad_engine::{MemoryEngine, SessionConfig};

    fn editor() -> FormulaEditor<MemoryEngine> {
        FormulaEditor::new(MemoryEngine::new(SessionConfig::default())).unwrap()
    }

    #[test]
    fn first_snapshot_is_revision_zero() {
        let editor = editor();
        assert_eq!(editor.snapshot().revision, 0);
        assert_eq!(editor.snapshot().current_cell, "A1");
        assert_eq!(editor.snapshot().mode, EditMode::Viewing);
    }

    #[test]
    fn scenario_from_viewing_to_cleared_formula() {
        let mut editor = editor();

        let snap = editor.click_cell(Some("C3"));
        assert_eq!(snap.current_cell, "C3");
        assert_eq!(snap.mode, EditMode::Viewing);
        assert_eq!(snap.formula, "");

        assert!(editor.execute(Command::EditToggle).is_editing());

        let snap = editor.press_button(Some("7")).clone();
        assert_eq!(editor.engine().tokens(), ["7"]);
        assert!(snap.is_editing());

        editor.click_cell(Some("A1"));
        assert_eq!(editor.engine().tokens(), ["7", "A1"]);
        assert_eq!(editor.snapshot().formula, "7 A1");

        editor.execute(Command::Clear);
        assert_eq!(editor.engine().tokens(), ["7"]);
        assert_eq!(editor.snapshot().result, "7");

        editor.execute(Command::AllClear);
        assert!(editor.engine().tokens().is_empty());
        assert_eq!(editor.snapshot().formula, "");
        assert_eq!(editor.snapshot().status, "editing: C3");
    }

    #[test]
    fn rejected_mutation_still_refreshes() {
        let mut editor = editor();
        editor.execute(Command::EditToggle);
        let before = editor.snapshot().revision;
        // A1 is the working cell, so the engine refuses the self reference.
        let snap = editor.click_cell(Some("A1"));
        assert_eq!(snap.revision, before + 1);
        assert_eq!(snap.formula, "");
    }

    #[test]
    fn missing_labels_are_permissive() {
        let mut editor = editor();
        let snap = editor.press_button(None);
        assert!(snap.is_editing());
        assert!(editor.engine().tokens().is_empty());

        editor.execute(Command::EditToggle);
        let snap = editor.click_cell(None);
        assert_eq!(snap.current_cell, "A1");
    }

    #[test]
    fn close_returns_closed_engine() {
        let editor = editor();
        let engine = editor.close().unwrap();
        assert!(engine.formula_string().is_err());
    }
}
