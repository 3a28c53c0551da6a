//! Projects view input handler
//!
//! Navigation moves over the flattened project tree. Task keys act on task
//! rows only; project keys act on the project of whatever row is selected.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;

/// Handle key in projects view (normal mode)
pub fn handle_projects_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let row_count = app.project_row_count();

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.state.select_next(row_count);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.state.select_prev(row_count);
        }
        KeyCode::Enter => app.set_active_project_from_selection(),
        KeyCode::Char('n') => app.begin_add_project(),
        KeyCode::Char('c') => app.begin_add_checkpoint(),
        KeyCode::Char('t') => app.begin_add_task(),
        KeyCode::Char('x') | KeyCode::Char(' ') => app.toggle_selected_task(),
        KeyCode::Char('e') => app.begin_edit_task(),
        KeyCode::Char('C') => app.complete_selected_project(),
        KeyCode::Char('d') => app.request_delete_project(),
        _ => {}
    }
    Ok(())
}
