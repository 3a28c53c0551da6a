//! Stats view input handler

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;

/// Handle key in stats view (normal mode)
pub fn handle_stats_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') => {
            app.state.stats_window = app.state.stats_window.next();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.state.stats_window = app.state.stats_window.prev();
        }
        _ => {}
    }
    Ok(())
}
