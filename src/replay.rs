//! Non-interactive mode: run an action script and print the final snapshot.

use cellpad_core::{
    ActionQueue, DisplaySnapshot, FormulaEditor, SheetDisplay, SheetEngine, parse_script,
};
use cellpad_engine::engine::CellRef;
use tracing::info;

use crate::error::Result;

/// Replay `script` through `editor` in order. Returns the printable report.
pub fn run<E: SheetEngine>(
    editor: &mut FormulaEditor<E>,
    script: &str,
    grid: bool,
) -> Result<String> {
    let mut queue = ActionQueue::new();
    queue.extend(parse_script(script)?);
    let applied = queue.drain_into(editor);
    info!(applied, "replay finished");

    let mut out = render_snapshot(editor.snapshot());
    if grid {
        out.push('\n');
        out.push_str(&render_grid(&editor.snapshot().cells));
    }
    Ok(out)
}

pub fn render_snapshot(snap: &DisplaySnapshot) -> String {
    format!(
        "cell: {}\nmode: {}\nstatus: {}\nformula: {}\nresult: {}\n",
        snap.current_cell,
        snap.mode.name(),
        snap.status,
        snap.formula,
        snap.result
    )
}

/// Markdown table of the whole sheet.
pub fn render_grid(display: &SheetDisplay) -> String {
    let mut out = String::from("|   |");
    for col in 0..display.columns() {
        out.push_str(&format!(" {} |", CellRef::col_to_letters(col)));
    }
    out.push_str("\n|---|");
    for _ in 0..display.columns() {
        out.push_str("---|");
    }
    out.push('\n');
    for row in 0..display.rows() {
        out.push_str(&format!("| {} |", row + 1));
        for text in display.row(row).unwrap_or_default() {
            out.push_str(&format!(" {} |", text));
        }
        out.push('\n');
    }
    out
}
