use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Monitor),
        KeyCode::Char('2') => app.set_view(View::Trends),
        KeyCode::Char('3') => app.set_view(View::Alarms),

        // Control selection (up/down) and adjustment (left/right)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_control(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_control(),
        KeyCode::Left | KeyCode::Char('h') => app.adjust_selected_control(-1.0),
        KeyCode::Right | KeyCode::Char('l') => app.adjust_selected_control(1.0),
        KeyCode::PageUp => app.adjust_selected_control(5.0),
        KeyCode::PageDown => app.adjust_selected_control(-5.0),

        // Alarm actions
        KeyCode::Char('m') => app.silence_alarms(),
        KeyCode::Char('r') => app.reset_alarms(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
