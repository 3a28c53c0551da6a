//! Main input dispatch logic
//!
//! Routes keyboard events to appropriate handlers based on current mode.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode};

/// Handle a key event by routing to the appropriate mode handler
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Only process key press events (not release/repeat)
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    // Handle Ctrl+C specially
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.state
            .notifications
            .warn("Ctrl+C disabled. Press 'q' to quit.");
        return Ok(());
    }

    match app.state.input_mode {
        InputMode::Normal => super::normal::handle_normal_mode_key(app, key),
        InputMode::ConfirmingProjectDelete => {
            super::dialogs::handle_confirming_project_delete_key(app, key)
        }
        InputMode::EditingTime
        | InputMode::EditingSettings
        | InputMode::AddingProject
        | InputMode::AddingCheckpoint
        | InputMode::AddingTask
        | InputMode::EditingTask => super::text_input::handle_text_input_key(app, key),
    }
}
