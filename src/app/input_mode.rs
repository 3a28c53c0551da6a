//! Input mode enum
//!
//! Defines how keyboard input is handled based on the current mode.

/// Input mode determines how keyboard input is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - keys are handled as commands
    #[default]
    Normal,
    /// Editing the remaining time (MM:SS)
    EditingTime,
    /// Editing the three durations in the settings dialog
    EditingSettings,
    /// Adding a new project - typing "emoji title" or "title"
    AddingProject,
    /// Adding a checkpoint to the selected project
    AddingCheckpoint,
    /// Adding a task to the selected checkpoint
    AddingTask,
    /// Editing the selected task's text
    EditingTask,
    /// Confirming project deletion
    ConfirmingProjectDelete,
}

impl InputMode {
    /// Whether keys are collected into the input buffer
    pub fn is_text_input(&self) -> bool {
        !matches!(self, InputMode::Normal | InputMode::ConfirmingProjectDelete)
    }

    /// Dialog title for text input modes
    pub fn prompt_title(&self) -> &'static str {
        match self {
            InputMode::EditingTime => " Edit Time ",
            InputMode::EditingSettings => " Settings ",
            InputMode::AddingProject => " New Project ",
            InputMode::AddingCheckpoint => " New Checkpoint ",
            InputMode::AddingTask => " New Task ",
            InputMode::EditingTask => " Edit Task ",
            InputMode::Normal | InputMode::ConfirmingProjectDelete => "",
        }
    }

    /// Hint shown under the input field
    pub fn prompt_hint(&self) -> &'static str {
        match self {
            InputMode::EditingTime => "MM:SS, up to 99:59",
            InputMode::EditingSettings => "focus / short break / long break minutes",
            InputMode::AddingProject | InputMode::AddingCheckpoint => {
                "Optional emoji first, e.g. \"📚 Thesis\""
            }
            InputMode::AddingTask | InputMode::EditingTask => "Task text",
            InputMode::Normal | InputMode::ConfirmingProjectDelete => "",
        }
    }
}
