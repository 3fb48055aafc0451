//! UI rendering

use super::app::{App, FrameLayout, KEYPAD, KeypadKey};
use super::keymap::AppAction;
use cellpad_core::Command;
use cellpad_engine::engine::CellRef;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 4;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const HINT_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 4;
pub(crate) const CELL_WIDTH: u16 = 8;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;
pub(crate) const KEY_WIDTH: u16 = 6;
pub(crate) const KEY_HEIGHT: u16 = 3;

/// Formula bar, status line, body (grid + keypad), hint line.
pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
            Constraint::Min(KEY_HEIGHT * KEYPAD.len() as u16),
            Constraint::Length(HINT_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

fn split_body(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(ROW_HEADER_WIDTH + CELL_WIDTH + 2),
            Constraint::Length(KEY_WIDTH * 4),
        ])
        .split(area);
    [chunks[0], chunks[1]]
}

/// Button rectangles of the keypad, row by row.
pub(crate) fn keypad_buttons(area: Rect) -> Vec<(Rect, KeypadKey)> {
    let mut buttons = Vec::new();
    for (r, row) in KEYPAD.iter().enumerate() {
        for (c, key) in row.iter().enumerate() {
            let rect = Rect {
                x: area.x + c as u16 * KEY_WIDTH,
                y: area.y + r as u16 * KEY_HEIGHT,
                width: KEY_WIDTH,
                height: KEY_HEIGHT,
            };
            if rect.right() <= area.right() && rect.bottom() <= area.bottom() {
                buttons.push((rect, *key));
            }
        }
    }
    buttons
}

pub(crate) fn keypad_key_at(layout: &FrameLayout, x: u16, y: u16) -> Option<KeypadKey> {
    layout
        .keypad
        .iter()
        .find(|(rect, _)| x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom())
        .map(|(_, key)| *key)
}

/// Map a screen position inside the grid to a cell.
pub(crate) fn grid_cell_at(
    layout: &FrameLayout,
    columns: usize,
    rows: usize,
    x: u16,
    y: u16,
) -> Option<CellRef> {
    let grid = layout.grid;
    if grid.width < 3 || grid.height < 3 {
        return None;
    }
    let inner_x = grid.x + 1;
    let inner_y = grid.y + 1;
    let inner_right = grid.right().saturating_sub(1);
    let inner_bottom = grid.bottom().saturating_sub(1);
    if x < inner_x || x >= inner_right || y < inner_y || y >= inner_bottom {
        return None;
    }

    // Header row contains column letters, not data cells.
    if y == inner_y {
        return None;
    }
    let row = (y - inner_y - 1) as usize;
    if row >= rows {
        return None;
    }

    let first_cell_x = inner_x + ROW_HEADER_WIDTH + GRID_COLUMN_SPACING;
    if x < first_cell_x {
        return None;
    }
    let offset = x - first_cell_x;
    let stride = CELL_WIDTH + GRID_COLUMN_SPACING;
    if offset % stride >= CELL_WIDTH {
        return None;
    }
    let col = (offset / stride) as usize;
    (col < columns).then(|| CellRef::new(col, row))
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let [formula_area, status_area, body_area, hint_area] = split_main_chunks(f.area());
    let [grid_area, keypad_area] = split_body(body_area);

    app.layout = FrameLayout {
        grid: grid_area,
        keypad: keypad_buttons(keypad_area),
    };

    draw_formula_bar(f, app, formula_area);
    draw_status_bar(f, app, status_area);
    draw_grid(f, app, grid_area);
    draw_keypad(f, app);
    draw_hint_bar(f, app, hint_area);
}

fn mode_color(editing: bool) -> Color {
    if editing { Color::Yellow } else { Color::Cyan }
}

fn draw_formula_bar(f: &mut Frame, app: &App, area: Rect) {
    let snap = app.snapshot();
    let result_style = if snap.result.starts_with('#') {
        Style::default().fg(Color::Red)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{}: ", snap.current_cell), Style::default().fg(Color::DarkGray)),
            Span::raw(snap.formula.clone()),
        ]),
        Line::from(vec![
            Span::styled("= ", Style::default().fg(Color::DarkGray)),
            Span::styled(snap.result.clone(), result_style),
        ]),
    ];

    let title = if snap.is_editing() { " Editing " } else { " Formula " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(mode_color(snap.is_editing())));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let snap = app.snapshot();
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", snap.mode.name().to_uppercase()),
            Style::default()
                .fg(Color::Black)
                .bg(mode_color(snap.is_editing())),
        ),
        Span::raw(format!(" {}", snap.status)),
        Span::styled(
            format!("  {} @ {}", app.user, app.document),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let snap = app.snapshot();
    let working = CellRef::parse(&snap.current_cell);
    let cursor = app.cursor_cell();

    let mut header_cells = vec![Cell::from(" ")];
    for col in 0..app.columns {
        let style = if col == cursor.col {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        header_cells.push(Cell::from(CellRef::col_to_letters(col)).style(style));
    }
    let header = Row::new(header_cells).height(1);

    let mut rows = Vec::new();
    for row in 0..app.rows {
        let row_style = if row == cursor.row {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut cells = vec![Cell::from(format!("{}", row + 1)).style(row_style)];

        for col in 0..app.columns {
            let cell_ref = CellRef::new(col, row);
            let display = snap.cells.get(cell_ref).unwrap_or_default().to_string();

            let mut style = if Some(cell_ref) == working {
                Style::default()
                    .fg(Color::Black)
                    .bg(mode_color(snap.is_editing()))
                    .add_modifier(Modifier::BOLD)
            } else if display.starts_with('#') {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            if cell_ref == cursor {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
            }
            cells.push(Cell::from(display).style(style));
        }
        rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend((0..app.columns).map(|_| Constraint::Length(CELL_WIDTH)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Cellpad "))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

fn draw_keypad(f: &mut Frame, app: &App) {
    let editing = app.snapshot().is_editing();
    for (rect, key) in &app.layout.keypad {
        let style = match key {
            KeypadKey::Token(_) => Style::default(),
            KeypadKey::Command(Command::EditToggle) => Style::default().fg(mode_color(editing)),
            KeypadKey::Command(_) => Style::default().fg(Color::Magenta),
        };
        let button = Paragraph::new(key.label(editing))
            .style(style)
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, *rect);
    }
}

fn draw_hint_bar(f: &mut Frame, app: &App, area: Rect) {
    let key = |action: AppAction| app.keymap.key_for(&action).unwrap_or_else(|| "-".to_string());
    let hint = format!(
        "{}:edit/done  {}:clear  {}:all clear  {}:click cell  arrows:move  {}:quit",
        key(AppAction::Command(Command::EditToggle)),
        key(AppAction::Command(Command::Clear)),
        key(AppAction::Command(Command::AllClear)),
        key(AppAction::ClickCursor),
        key(AppAction::Quit),
    );
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FrameLayout {
        let grid = Rect::new(0, 0, 80, 20);
        FrameLayout {
            grid,
            keypad: keypad_buttons(Rect::new(80, 0, KEY_WIDTH * 4, KEY_HEIGHT * 5)),
        }
    }

    #[test]
    fn grid_cell_at_maps_first_cells() {
        let layout = layout();
        // Border (1) + row header (4) + spacing (1) puts A at x=6.
        assert_eq!(grid_cell_at(&layout, 8, 10, 6, 2), Some(CellRef::new(0, 0)));
        assert_eq!(grid_cell_at(&layout, 8, 10, 13, 2), Some(CellRef::new(0, 0)));
        assert_eq!(grid_cell_at(&layout, 8, 10, 14, 2), None);
        assert_eq!(grid_cell_at(&layout, 8, 10, 15, 3), Some(CellRef::new(1, 1)));
    }

    #[test]
    fn grid_cell_at_ignores_headers_and_border() {
        let layout = layout();
        assert_eq!(grid_cell_at(&layout, 8, 10, 6, 1), None);
        assert_eq!(grid_cell_at(&layout, 8, 10, 0, 5), None);
        assert_eq!(grid_cell_at(&layout, 8, 10, 3, 5), None);
        assert_eq!(grid_cell_at(&layout, 8, 10, 6, 12), None);
    }

    #[test]
    fn keypad_hit_testing() {
        let layout = layout();
        assert_eq!(layout.keypad.len(), 20);
        assert_eq!(keypad_key_at(&layout, 80, 0), Some(KeypadKey::Token("7")));
        assert_eq!(keypad_key_at(&layout, 85, 2), Some(KeypadKey::Token("7")));
        assert_eq!(
            keypad_key_at(&layout, 99, 14),
            Some(KeypadKey::Command(Command::AllClear))
        );
        assert_eq!(keypad_key_at(&layout, 79, 0), None);
    }

    #[test]
    fn keypad_drops_buttons_that_do_not_fit() {
        let buttons = keypad_buttons(Rect::new(0, 0, KEY_WIDTH * 2, KEY_HEIGHT));
        assert_eq!(buttons.len(), 2);
    }
}
