//! Text input mode handlers
//!
//! All dialogs share one line of input; what a dialog accepts depends on the
//! input mode.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, InputMode};

/// Longest text accepted for names and tasks
const MAX_TEXT_LEN: usize = 80;

/// Longest `MM:SS` value
const MAX_TIME_LEN: usize = 5;

/// Longest settings value, e.g. "120 30 45"
const MAX_SETTINGS_LEN: usize = 16;

/// Handle key in any text input dialog
pub fn handle_text_input_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.state.cancel_input();
        }
        KeyCode::Enter => {
            app.submit_input();
        }
        KeyCode::Backspace => {
            app.state.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            if accepts_char(app.state.input_mode, &app.state.input_buffer, c) {
                app.state.input_buffer.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Whether `c` may be appended to `buffer` in `mode`
fn accepts_char(mode: InputMode, buffer: &str, c: char) -> bool {
    let len = buffer.chars().count();
    match mode {
        InputMode::EditingTime => len < MAX_TIME_LEN && (c.is_ascii_digit() || c == ':'),
        InputMode::EditingSettings => {
            len < MAX_SETTINGS_LEN && (c.is_ascii_digit() || matches!(c, ' ' | ',' | '/'))
        }
        InputMode::AddingProject
        | InputMode::AddingCheckpoint
        | InputMode::AddingTask
        | InputMode::EditingTask => len < MAX_TEXT_LEN && !c.is_control(),
        InputMode::Normal | InputMode::ConfirmingProjectDelete => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_input_accepts_digits_and_colon() {
        assert!(accepts_char(InputMode::EditingTime, "12", ':'));
        assert!(accepts_char(InputMode::EditingTime, "12:", '3'));
        assert!(!accepts_char(InputMode::EditingTime, "12", 'a'));
        assert!(!accepts_char(InputMode::EditingTime, "12:34", '5'));
    }

    #[test]
    fn test_settings_input_accepts_separators() {
        assert!(accepts_char(InputMode::EditingSettings, "25", ' '));
        assert!(accepts_char(InputMode::EditingSettings, "25", '/'));
        assert!(accepts_char(InputMode::EditingSettings, "25", ','));
        assert!(!accepts_char(InputMode::EditingSettings, "25", 'm'));
    }

    #[test]
    fn test_text_input_is_capped() {
        let long = "x".repeat(MAX_TEXT_LEN);
        assert!(accepts_char(InputMode::AddingTask, "Outline", ' '));
        assert!(accepts_char(InputMode::AddingProject, "", '📚'));
        assert!(!accepts_char(InputMode::AddingTask, &long, 'y'));
    }

    #[test]
    fn test_normal_mode_accepts_nothing() {
        assert!(!accepts_char(InputMode::Normal, "", 'a'));
    }
}
