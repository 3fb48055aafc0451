//! Application state.
//!
//! [`App`] wraps the formula editor with the terminal-only state: the
//! keyboard cursor, the pending action queue, and the geometry of the last
//! frame for mouse hit-testing.

use cellpad_core::{ActionQueue, Command, DisplaySnapshot, FormulaEditor, SheetEngine, UserAction};
use cellpad_engine::SessionConfig;
use cellpad_engine::engine::CellRef;
use ratatui::layout::Rect;
use tracing::debug;

use super::keymap::{AppAction, Keymap};
use crate::error::Result;

/// A keypad button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeypadKey {
    Token(&'static str),
    Command(Command),
}

impl KeypadKey {
    /// Text shown on the button. The edit toggle reads "done" while editing.
    pub fn label(self, editing: bool) -> &'static str {
        match self {
            KeypadKey::Token(token) => token,
            KeypadKey::Command(Command::EditToggle) if editing => "done",
            KeypadKey::Command(Command::EditToggle) => "edit",
            KeypadKey::Command(Command::Clear) => "C",
            KeypadKey::Command(Command::AllClear) => "AC",
        }
    }

    pub fn action(self) -> UserAction {
        match self {
            KeypadKey::Token(token) => UserAction::button(token),
            KeypadKey::Command(command) => UserAction::Command(command),
        }
    }
}

pub const KEYPAD: [[KeypadKey; 4]; 5] = {
    use KeypadKey::{Command as C, Token as T};
    [
        [T("7"), T("8"), T("9"), T("/")],
        [T("4"), T("5"), T("6"), T("*")],
        [T("1"), T("2"), T("3"), T("-")],
        [T("0"), T("."), T("("), T(")")],
        [T("+"), C(Command::EditToggle), C(Command::Clear), C(Command::AllClear)],
    ]
};

/// Screen geometry of the last drawn frame.
#[derive(Clone, Debug, Default)]
pub struct FrameLayout {
    /// Grid area including its border
    pub grid: Rect,
    pub keypad: Vec<(Rect, KeypadKey)>,
}

pub type Engine = Box<dyn SheetEngine>;

pub struct App {
    pub editor: FormulaEditor<Engine>,
    /// Actions waiting to be applied, in submission order
    pub queue: ActionQueue,
    pub keymap: Keymap,
    /// Keyboard cursor (column)
    pub cursor_col: usize,
    /// Keyboard cursor (row)
    pub cursor_row: usize,
    pub columns: usize,
    pub rows: usize,
    pub document: String,
    pub user: String,
    pub layout: FrameLayout,
    pub should_quit: bool,
}

impl App {
    pub fn new(editor: FormulaEditor<Engine>, keymap: Keymap, session: &SessionConfig) -> Self {
        let start = CellRef::parse(&editor.snapshot().current_cell).unwrap_or(CellRef::new(0, 0));
        App {
            editor,
            queue: ActionQueue::new(),
            keymap,
            cursor_col: start.col,
            cursor_row: start.row,
            columns: session.columns,
            rows: session.rows,
            document: session.document.clone(),
            user: session.user.clone(),
            layout: FrameLayout::default(),
            should_quit: false,
        }
    }

    pub fn snapshot(&self) -> &DisplaySnapshot {
        self.editor.snapshot()
    }

    pub fn cursor_cell(&self) -> CellRef {
        CellRef::new(self.cursor_col, self.cursor_row)
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let max_col = self.columns.saturating_sub(1) as i64;
        let max_row = self.rows.saturating_sub(1) as i64;
        self.cursor_col = (self.cursor_col as i64 + dx as i64).clamp(0, max_col) as usize;
        self.cursor_row = (self.cursor_row as i64 + dy as i64).clamp(0, max_row) as usize;
    }

    /// Handle a translated key action.
    pub fn handle(&mut self, action: AppAction) {
        match action {
            AppAction::Button(label) => self.queue.submit(UserAction::Button(Some(label))),
            AppAction::Command(command) => self.queue.submit(UserAction::Command(command)),
            AppAction::ClickCursor => {
                let label = self.cursor_cell().to_string();
                self.queue.submit(UserAction::cell(label));
            }
            AppAction::Move(dx, dy) => self.move_cursor(dx, dy),
            AppAction::Quit => self.should_quit = true,
        }
    }

    /// A grid cell was clicked with the mouse.
    pub fn click_cell(&mut self, cell: CellRef) {
        self.cursor_col = cell.col;
        self.cursor_row = cell.row;
        self.queue.submit(UserAction::cell(cell.to_string()));
    }

    pub fn press_keypad(&mut self, key: KeypadKey) {
        self.queue.submit(key.action());
    }

    /// Apply every queued action to the editor.
    pub fn flush(&mut self) {
        let applied = self.queue.drain_into(&mut self.editor);
        if applied > 0 {
            debug!(applied, revision = self.snapshot().revision, "actions applied");
        }
    }

    /// End the editing session.
    pub fn close(self) -> Result<()> {
        self.editor.close()?;
        Ok(())
    }
}
