//! Normal mode input handlers
//!
//! Keys shared by every view are handled here; the rest go to the handler of
//! the current view.

pub mod projects;
pub mod stats;
pub mod timer;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, View};

/// Handle key in normal mode
pub fn handle_normal_mode_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            app.state.should_quit = true;
            return Ok(());
        }
        KeyCode::Tab => {
            app.state.view = app.state.view.next();
            return Ok(());
        }
        KeyCode::BackTab => {
            app.state.view = app.state.view.prev();
            return Ok(());
        }
        KeyCode::Esc => {
            app.state.notifications.dismiss_latest();
            return Ok(());
        }
        _ => {}
    }

    match app.state.view {
        View::Timer => timer::handle_timer_key(app, key),
        View::Projects => projects::handle_projects_key(app, key),
        View::Stats => stats::handle_stats_key(app, key),
    }
}
