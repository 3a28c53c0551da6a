//! Timer view input handler

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::focus_timing::Mode;

/// Handle key in timer view (normal mode)
pub fn handle_timer_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char(' ') => app.toggle_timer(),
        KeyCode::Char('r') => app.reset_timer(),
        KeyCode::Char('f') => app.switch_mode(Mode::Focus),
        KeyCode::Char('b') => app.switch_mode(Mode::ShortBreak),
        KeyCode::Char('l') => app.switch_mode(Mode::LongBreak),
        KeyCode::Char('e') => app.begin_time_edit(),
        KeyCode::Char('p') => app.cycle_active_project(),
        KeyCode::Char('s') => app.open_settings(),
        _ => {}
    }
    Ok(())
}
