use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use super::app::App;
use super::ui;

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let (x, y) = (mouse.column, mouse.row);
    if let Some(cell) = ui::grid_cell_at(&app.layout, app.columns, app.rows, x, y) {
        app.click_cell(cell);
    } else if let Some(key) = ui::keypad_key_at(&app.layout, x, y) {
        app.press_keypad(key);
    }
}

fn handle_event(app: &mut App, event: Event) {
    match event {
        // Only process key press events (Windows reports Press + Release)
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if let Some(action) = app.keymap.translate(key) {
                app.handle(action);
            }
        }
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        _ => {}
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Block for one event, then queue everything already waiting so it
        // replays in order before the next frame.
        handle_event(app, event::read()?);
        while !app.should_quit && event::poll(Duration::ZERO)? {
            handle_event(app, event::read()?);
        }
        app.flush();

        if app.should_quit {
            return Ok(());
        }
    }
}
