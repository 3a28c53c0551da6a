//! Application state management
//!
//! Contains the main AppState struct, the flattened project tree used by the
//! projects view, and navigation helpers.

use crate::focus_timing::StatsWindow;
use crate::project::{CheckpointId, ProjectId, ProjectStore, TaskId};
use crate::tui::NotificationManager;

use super::input_mode::InputMode;
use super::view::View;

/// One selectable line in the projects view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRow {
    Project(ProjectId),
    Checkpoint(ProjectId, CheckpointId),
    Task(ProjectId, CheckpointId, TaskId),
}

impl ProjectRow {
    /// Project this row belongs to
    pub fn project_id(&self) -> ProjectId {
        match *self {
            ProjectRow::Project(id)
            | ProjectRow::Checkpoint(id, _)
            | ProjectRow::Task(id, _, _) => id,
        }
    }

    /// Checkpoint this row belongs to, if any
    pub fn checkpoint_id(&self) -> Option<CheckpointId> {
        match *self {
            ProjectRow::Project(_) => None,
            ProjectRow::Checkpoint(_, id) | ProjectRow::Task(_, id, _) => Some(id),
        }
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match *self {
            ProjectRow::Task(_, _, id) => Some(id),
            _ => None,
        }
    }
}

/// Flatten active projects into rows: each project, then its checkpoints,
/// each followed by its tasks
pub fn project_rows(store: &ProjectStore) -> Vec<ProjectRow> {
    let mut rows = Vec::new();
    for project in store.active_projects() {
        rows.push(ProjectRow::Project(project.id));
        for checkpoint in &project.checkpoints {
            rows.push(ProjectRow::Checkpoint(project.id, checkpoint.id));
            rows.extend(
                checkpoint
                    .tasks
                    .iter()
                    .map(|task| ProjectRow::Task(project.id, checkpoint.id, task.id)),
            );
        }
    }
    rows
}

/// Application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view
    pub view: View,
    /// Current input mode
    pub input_mode: InputMode,
    /// Text typed into the current input dialog
    pub input_buffer: String,
    /// Selected row in the projects view
    pub selected_row: usize,
    /// Window shown in the stats view
    pub stats_window: StatsWindow,
    /// Project awaiting delete confirmation
    pub pending_delete_project: Option<ProjectId>,
    /// Transient notifications
    pub notifications: NotificationManager,
    /// Whether the screen must be redrawn
    pub needs_render: bool,
    /// Whether the application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Select the next row, wrapping around
    pub fn select_next(&mut self, item_count: usize) {
        if item_count > 0 {
            let current = self.selected_row.min(item_count - 1);
            self.selected_row = (current + 1) % item_count;
        } else {
            self.selected_row = 0;
        }
    }

    /// Select the previous row, wrapping around
    pub fn select_prev(&mut self, item_count: usize) {
        if item_count > 0 {
            let current = self.selected_row.min(item_count - 1);
            self.selected_row = current.checked_sub(1).unwrap_or(item_count - 1);
        } else {
            self.selected_row = 0;
        }
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp_selection(&mut self, item_count: usize) {
        self.selected_row = self.selected_row.min(item_count.saturating_sub(1));
    }

    /// Open a text input dialog, pre-filled with `initial`
    pub fn begin_input(&mut self, mode: InputMode, initial: impl Into<String>) {
        self.input_mode = mode;
        self.input_buffer = initial.into();
    }

    /// Close the input dialog, discarding what was typed
    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.pending_delete_project = None;
    }

    /// Close the input dialog, returning what was typed
    pub fn take_input(&mut self) -> String {
        self.input_mode = InputMode::Normal;
        std::mem::take(&mut self.input_buffer)
    }
}
