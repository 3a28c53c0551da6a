//! Confirmation dialog handlers

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;

/// Handle key when confirming project deletion
pub fn handle_confirming_project_delete_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.confirm_delete_project();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.state.cancel_input();
        }
        _ => {}
    }
    Ok(())
}
