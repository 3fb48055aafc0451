/// The edit-mode gate.
///
/// The engine stores edit status as a boolean; the editor lifts it into
/// this two-state machine so every transition has a name:
/// - [`Editing`](EditMode::Editing): cell clicks append references to the formula
/// - [`Viewing`](EditMode::Viewing): cell clicks move the working cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    /// A formula is under construction.
    Editing,
    /// Navigating the sheet and viewing committed values.
    #[default]
    Viewing,
}

/// What a cell click should do, as decided by [`EditMode::route_cell_click`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellClick {
    /// Append a reference to the clicked cell to the working formula.
    AppendReference(String),
    /// Make the clicked cell the working cell.
    Navigate(String),
}

impl EditMode {
    pub fn from_status(editing: bool) -> Self {
        if editing {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }

    pub fn is_editing(self) -> bool {
        self == EditMode::Editing
    }

    /// `edit_toggle`.
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Editing => EditMode::Viewing,
            EditMode::Viewing => EditMode::Editing,
        }
    }

    /// Mode entered by pressing a token button, from either mode.
    pub const fn begin_token() -> Self {
        EditMode::Editing
    }

    pub fn route_cell_click(self, label: &str) -> CellClick {
        match self {
            EditMode::Editing => CellClick::AppendReference(label.to_string()),
            EditMode::Viewing => CellClick::Navigate(label.to_string()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EditMode::Editing => "editing",
            EditMode::Viewing => "viewing",
        }
    }
}
