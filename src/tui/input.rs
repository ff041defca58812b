//! Event dispatch for the TUI.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use super::app::StackApp;

/// Handle a terminal event, mutating app state.
pub fn handle_event(app: &mut StackApp, event: Event, now: Duration) {
    // Global bindings
    match &event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                app.should_quit = true;
                return;
            }
            _ => {}
        },
        Event::Mouse(mouse) => {
            if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                app.on_pointer(mouse.column, mouse.row, now);
            }
        }
        Event::Resize(_, rows) => {
            app.resize(*rows);
            return;
        }
        _ => {}
    }

    // Gestures
    if let Some(direction) = app.router.route(&event) {
        app.controller.dispatch(direction, now);
    }
}
