//! Application state and main event loop
//!
//! This module contains the central application state and the main event loop
//! that ties together the timer, the project store and the terminal UI.

// Submodules
mod input_mode;
mod state;
mod view;

// Re-exports from submodules
pub use input_mode::InputMode;
pub use state::{project_rows, AppState, ProjectRow};
pub use view::View;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{self, Event};

use crate::config::{self, Config, RuntimeState};
use crate::focus_timing::{FocusLog, FocusStats, Mode, SessionLog, Timer, TimerEvent};
use crate::project::{split_emoji_prefix, CheckpointId, ProjectError, ProjectId, ProjectStore};
use crate::tui::views::{
    frame_layout, render_confirm_dialog, render_footer, render_header, render_input_dialog,
    render_notifications, render_projects_view, render_stats_view, render_timer_view,
    ConfirmDialogConfig,
};
use crate::tui::{NotificationType, Tui};

/// Longest the loop waits for a terminal event
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How long a cycle completion notification stays up
const CYCLE_NOTIFICATION_DURATION: Duration = Duration::from_secs(30);

/// Main application struct
pub struct App {
    /// Application configuration
    pub(crate) config: Config,
    /// Application state
    pub(crate) state: AppState,
    /// Project store for project/checkpoint/task persistence
    pub(crate) project_store: ProjectStore,
    /// Pomodoro timer with its session and focus logs
    pub(crate) timer: Timer,
    /// Runtime state as last written to disk
    runtime: RuntimeState,
    /// Terminal UI
    pub(crate) tui: Tui,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = Config::load();

        // Load project store (or create empty if doesn't exist)
        let project_store = ProjectStore::open();
        tracing::debug!(
            "Loaded {} projects, {} completed tasks",
            project_store.project_count(),
            project_store.completed_task_count()
        );

        let sessions = SessionLog::open(config::sessions_file_path());
        let focus_log = FocusLog::open(config::focus_log_file_path());
        tracing::debug!(
            "Loaded {} sessions, {} focus seconds",
            sessions.len(),
            focus_log.len()
        );

        let mut timer = Timer::new(&config, sessions, focus_log);

        // Drop a remembered project that was deleted or completed meanwhile
        let saved = RuntimeState::load();
        let active_project = saved
            .active_project_id
            .filter(|id| project_store.get_project(*id).is_some_and(|p| !p.completed));
        timer.set_active_project(active_project);
        timer.restore_completed_pomodoros(saved.completed_pomodoros);

        let runtime = RuntimeState {
            active_project_id: timer.active_project(),
            completed_pomodoros: timer.completed_pomodoros(),
        };

        let state = AppState {
            stats_window: config.default_stats_window,
            ..Default::default()
        };

        // Create TUI
        let tui = Tui::new()?;

        Ok(Self {
            config,
            state,
            project_store,
            timer,
            runtime,
            tui,
        })
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        // Enter TUI mode
        self.tui.enter()?;

        tracing::info!("pomotrack started. Press Space to start, 'q' to quit.");

        // Main event loop
        let result = self.event_loop().await;

        // A run still counting down ends as an interrupted session
        if self.timer.is_running() {
            if let Err(e) = self.timer.pause() {
                tracing::warn!("Failed to pause timer on exit: {}", e);
            }
        }
        self.persist_runtime_state();

        // Exit TUI mode (also done in Drop, but explicit is clearer)
        self.tui.exit()?;

        result
    }

    /// Main event loop
    async fn event_loop(&mut self) -> Result<()> {
        // Always render on first frame
        self.state.needs_render = true;

        loop {
            // Only render when something has changed
            if self.state.needs_render {
                self.render()?;
                self.state.needs_render = false;
            }

            // Wake up in time for the next countdown tick
            let timeout = poll_timeout(self.timer.next_tick_in());
            let terminal_event = next_event(move || {
                if event::poll(timeout)? {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            })
            .await?;

            match terminal_event {
                Some(Event::Key(key)) => {
                    crate::input::handle_key_event(self, key)?;
                    self.state.needs_render = true;
                }
                Some(Event::Resize(_, _)) => {
                    self.state.needs_render = true;
                }
                _ => {}
            }

            if self.timer.poll(&self.project_store) > 0 {
                self.state.needs_render = true;
            }
            if self.process_timer_events() {
                self.state.needs_render = true;
            }

            // Tick notifications (remove expired)
            if self.state.notifications.tick() {
                self.state.needs_render = true;
            }

            self.persist_runtime_state();

            // Check if we should quit
            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle events queued by the timer
    /// Returns true if any events were processed
    fn process_timer_events(&mut self) -> bool {
        let events = self.timer.drain_events();
        for event in &events {
            if let TimerEvent::CycleCompleted {
                finished,
                completed_pomodoros,
            } = *event
            {
                self.state.notifications.push_for(
                    NotificationType::CycleComplete {
                        finished,
                        next: finished.after_completion(),
                        completed_pomodoros,
                    },
                    CYCLE_NOTIFICATION_DURATION,
                );
                if self.config.bell_enabled() {
                    self.tui.bell();
                }
            }
        }
        !events.is_empty()
    }

    /// Write runtime state if the active project or the counter changed
    fn persist_runtime_state(&mut self) {
        let current = RuntimeState {
            active_project_id: self.timer.active_project(),
            completed_pomodoros: self.timer.completed_pomodoros(),
        };
        if current == self.runtime {
            return;
        }
        if let Err(e) = current.save() {
            tracing::error!("Failed to save runtime state: {:#}", e);
        }
        self.runtime = current;
    }

    /// Show a rejected command to the user
    pub(crate) fn report(&mut self, error: impl std::fmt::Display) {
        let message = error.to_string();
        tracing::debug!("Rejected: {}", message);
        self.state.notifications.warn(message);
    }

    fn save_projects(&mut self) {
        if let Err(e) = self.project_store.save() {
            tracing::error!("Failed to save projects: {:#}", e);
            self.state
                .notifications
                .warn(format!("Failed to save projects: {}", e));
        }
    }

    // ========================================================================
    // Timer actions
    // ========================================================================

    /// Start or pause the countdown
    pub(crate) fn toggle_timer(&mut self) {
        if let Err(e) = self.timer.toggle(&self.project_store) {
            self.report(e);
        }
    }

    pub(crate) fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub(crate) fn switch_mode(&mut self, mode: Mode) {
        self.timer.switch_mode(mode);
    }

    /// Open the time editor, pre-filled with the remaining time
    pub(crate) fn begin_time_edit(&mut self) {
        if self.timer.is_running() {
            self.report(crate::focus_timing::TimerError::EditWhileRunning);
            return;
        }
        let current = self.timer.snapshot().format_remaining();
        self.state.begin_input(InputMode::EditingTime, current);
    }

    /// Open the settings dialog, pre-filled with the current durations
    pub(crate) fn open_settings(&mut self) {
        let current = format!(
            "{} {} {}",
            self.config.focus_minutes, self.config.short_break_minutes, self.config.long_break_minutes
        );
        self.state.begin_input(InputMode::EditingSettings, current);
    }

    /// Make the next active project the one focus time goes to
    pub(crate) fn cycle_active_project(&mut self) {
        match next_active_project(&self.project_store, self.timer.active_project()) {
            Some(id) => self.activate_project(id),
            None => self.report("No active projects. Add one in the Projects view"),
        }
    }

    fn activate_project(&mut self, id: ProjectId) {
        self.timer.set_active_project(Some(id));
        if let Some(project) = self.project_store.get_project(id) {
            tracing::info!("Active project: {}", project.title);
            let message = format!("Active project: {}", project.label());
            self.state.notifications.info(message);
        }
    }

    /// Stop attributing focus time to `id` if it is the active project
    fn release_project(&mut self, id: ProjectId) {
        if self.timer.active_project() != Some(id) {
            return;
        }
        if self.timer.is_running() {
            if let Err(e) = self.timer.pause() {
                tracing::warn!("Failed to pause timer: {}", e);
            }
        }
        self.timer.set_active_project(None);
    }

    // ========================================================================
    // Project actions
    // ========================================================================

    /// Row under the cursor in the projects view
    pub(crate) fn selected_row(&self) -> Option<ProjectRow> {
        project_rows(&self.project_store)
            .get(self.state.selected_row)
            .copied()
    }

    pub(crate) fn project_row_count(&self) -> usize {
        project_rows(&self.project_store).len()
    }

    /// Make the selected row's project the active one
    pub(crate) fn set_active_project_from_selection(&mut self) {
        if let Some(row) = self.selected_row() {
            self.activate_project(row.project_id());
        }
    }

    pub(crate) fn begin_add_project(&mut self) {
        self.state.begin_input(InputMode::AddingProject, "");
    }

    pub(crate) fn begin_add_checkpoint(&mut self) {
        if self.selected_row().is_none() {
            self.report("Add a project first");
            return;
        }
        self.state.begin_input(InputMode::AddingCheckpoint, "");
    }

    pub(crate) fn begin_add_task(&mut self) {
        let Some(row) = self.selected_row() else {
            self.report("Add a project first");
            return;
        };
        if checkpoint_for_new_task(&self.project_store, row).is_none() {
            self.report("Add a checkpoint first");
            return;
        }
        self.state.begin_input(InputMode::AddingTask, "");
    }

    /// Open the task editor for the selected task
    pub(crate) fn begin_edit_task(&mut self) {
        let Some(ProjectRow::Task(project_id, checkpoint_id, task_id)) = self.selected_row()
        else {
            return;
        };
        let text = self
            .project_store
            .get_project(project_id)
            .and_then(|p| p.checkpoint(checkpoint_id))
            .and_then(|cp| cp.tasks.iter().find(|t| t.id == task_id))
            .map(|t| t.text.clone());
        if let Some(text) = text {
            self.state.begin_input(InputMode::EditingTask, text);
        }
    }

    /// Toggle the selected task's completion
    pub(crate) fn toggle_selected_task(&mut self) {
        let Some(ProjectRow::Task(project_id, _, task_id)) = self.selected_row() else {
            return;
        };
        match self.project_store.toggle_task(project_id, task_id) {
            Ok(_) => self.save_projects(),
            Err(e) => self.report(e),
        }
    }

    /// Mark the selected row's project as completed
    pub(crate) fn complete_selected_project(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let project_id = row.project_id();
        self.release_project(project_id);
        match self.project_store.complete_project(project_id) {
            Ok(()) => {
                self.save_projects();
                self.state.notifications.info("Project completed");
                self.state.clamp_selection(self.project_row_count());
            }
            Err(e) => self.report(e),
        }
    }

    /// Ask for confirmation before deleting the selected row's project
    pub(crate) fn request_delete_project(&mut self) {
        if let Some(row) = self.selected_row() {
            self.state.pending_delete_project = Some(row.project_id());
            self.state.input_mode = InputMode::ConfirmingProjectDelete;
        }
    }

    /// Delete the project awaiting confirmation
    pub(crate) fn confirm_delete_project(&mut self) {
        let Some(project_id) = self.state.pending_delete_project.take() else {
            self.state.input_mode = InputMode::Normal;
            return;
        };
        self.state.input_mode = InputMode::Normal;
        self.release_project(project_id);
        match self.project_store.delete_project(project_id) {
            Ok(_) => {
                self.save_projects();
                self.state.clamp_selection(self.project_row_count());
            }
            Err(e) => self.report(e),
        }
    }

    // ========================================================================
    // Text input
    // ========================================================================

    /// Apply the text typed into the current dialog
    pub(crate) fn submit_input(&mut self) {
        let mode = self.state.input_mode;
        let input = self.state.take_input();

        match mode {
            InputMode::EditingTime => {
                if let Err(e) = self.timer.set_time_manually(&input) {
                    self.report(e);
                }
            }
            InputMode::EditingSettings => self.apply_settings(&input),
            InputMode::AddingProject => {
                let (emoji, title) = split_emoji_prefix(&input);
                match self.project_store.add_project(title, emoji) {
                    Ok(id) => {
                        self.save_projects();
                        if self.timer.active_project().is_none() {
                            self.activate_project(id);
                        }
                    }
                    Err(e) => self.report(e),
                }
            }
            InputMode::AddingCheckpoint => {
                let Some(row) = self.selected_row() else {
                    return;
                };
                let (emoji, title) = split_emoji_prefix(&input);
                let result =
                    self.project_store
                        .add_checkpoint(row.project_id(), title, emoji, None);
                self.after_project_edit(result);
            }
            InputMode::AddingTask => {
                let Some(row) = self.selected_row() else {
                    return;
                };
                let result = match checkpoint_for_new_task(&self.project_store, row) {
                    Some(checkpoint_id) => {
                        self.project_store
                            .add_task(row.project_id(), checkpoint_id, &input)
                    }
                    None => Err(ProjectError::CheckpointNotFound(CheckpointId::nil())),
                };
                self.after_project_edit(result);
            }
            InputMode::EditingTask => {
                let Some(ProjectRow::Task(project_id, _, task_id)) = self.selected_row() else {
                    return;
                };
                match self.project_store.rename_task(project_id, task_id, &input) {
                    Ok(true) => self.save_projects(),
                    Ok(false) => {}
                    Err(e) => self.report(e),
                }
            }
            InputMode::Normal | InputMode::ConfirmingProjectDelete => {}
        }
    }

    fn after_project_edit<T>(&mut self, result: Result<T, ProjectError>) {
        match result {
            Ok(_) => self.save_projects(),
            Err(e) => self.report(e),
        }
    }

    /// Validate, save and apply new durations
    fn apply_settings(&mut self, input: &str) {
        let config = match self.config.with_durations_from(input) {
            Ok(config) => config,
            Err(e) => {
                self.report(format!("{:#}", e));
                return;
            }
        };
        if let Err(e) = config.save() {
            tracing::error!("Failed to save config: {:#}", e);
            self.report(format!("Failed to save settings: {}", e));
            return;
        }
        self.timer.reconfigure(&config);
        self.config = config;
        self.state.notifications.info("Settings saved");
    }

    /// Render the current state
    fn render(&mut self) -> Result<()> {
        let state = &self.state;
        let project_store = &self.project_store;
        let timer = &self.timer;
        let snapshot = timer.snapshot();

        self.tui.draw(|frame| {
            let area = frame.size();
            let (header, body, footer) = frame_layout(area);

            render_header(frame, header, state.view, &snapshot);

            match state.view {
                View::Timer => {
                    let active = timer
                        .active_project()
                        .and_then(|id| project_store.get_project(id));
                    render_timer_view(frame, body, &snapshot, active);
                }
                View::Projects => {
                    let rows = project_rows(project_store);
                    render_projects_view(
                        frame,
                        body,
                        project_store,
                        &rows,
                        state.selected_row,
                        timer.active_project(),
                    );
                }
                View::Stats => {
                    let stats = FocusStats::compute(
                        state.stats_window,
                        Local::now(),
                        timer.focus_log(),
                        timer.sessions(),
                        project_store,
                    );
                    render_stats_view(frame, body, &stats);
                }
            }

            render_footer(frame, footer, state.view, state.input_mode);

            // Render text input dialog
            if state.input_mode.is_text_input() {
                render_input_dialog(
                    frame,
                    area,
                    state.input_mode.prompt_title(),
                    &state.input_buffer,
                    state.input_mode.prompt_hint(),
                );
            }

            // Render project delete confirmation dialog
            if state.input_mode == InputMode::ConfirmingProjectDelete {
                if let Some(project) = state
                    .pending_delete_project
                    .and_then(|id| project_store.get_project(id))
                {
                    let progress = project.progress();
                    let mut warnings = vec![format!(
                        "{} checkpoints and {} tasks will be removed",
                        project.checkpoints.len(),
                        progress.total
                    )];
                    if timer.active_project() == Some(project.id) {
                        warnings.push("This is the active project".to_string());
                    }
                    let name = project.label();
                    render_confirm_dialog(
                        frame,
                        area,
                        ConfirmDialogConfig {
                            title: " Confirm Delete ",
                            item_label: "project",
                            item_name: &name,
                            warnings,
                        },
                    );
                }
            }

            // Render notifications overlay
            let visible_notifications = state.notifications.visible();
            if !visible_notifications.is_empty() {
                render_notifications(frame, area, &visible_notifications);
            }
        })?;

        Ok(())
    }

    /// Get a reference to the project store
    pub fn project_store(&self) -> &ProjectStore {
        &self.project_store
    }
}

/// How long to wait for a terminal event before polling the timer again
fn poll_timeout(next_tick_in: Option<Duration>) -> Duration {
    next_tick_in
        .unwrap_or(MAX_POLL_INTERVAL)
        .min(MAX_POLL_INTERVAL)
}

/// Run a blocking terminal read on the blocking pool
async fn next_event<F>(read: F) -> Result<Option<Event>>
where
    F: FnOnce() -> std::io::Result<Option<Event>> + Send + 'static,
{
    let event = tokio::task::spawn_blocking(read)
        .await
        .context("Terminal event reader panicked")??;
    Ok(event)
}

/// The active project after `current`, in creation order, wrapping around
fn next_active_project(store: &ProjectStore, current: Option<ProjectId>) -> Option<ProjectId> {
    let ids: Vec<ProjectId> = store.active_projects().iter().map(|p| p.id).collect();
    let next = current
        .and_then(|id| ids.iter().position(|p| *p == id))
        .map_or(0, |i| (i + 1) % ids.len().max(1));
    ids.get(next).copied()
}

/// Checkpoint a new task on `row` goes into: the row's own checkpoint, or the
/// project's last one when a project row is selected
fn checkpoint_for_new_task(store: &ProjectStore, row: ProjectRow) -> Option<CheckpointId> {
    row.checkpoint_id().or_else(|| {
        store
            .get_project(row.project_id())
            .and_then(|p| p.checkpoints.last())
            .map(|cp| cp.id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn store() -> ProjectStore {
        ProjectStore::with_path(PathBuf::from("/nonexistent/projects.json"))
    }

    #[test]
    fn test_poll_timeout_is_bounded() {
        assert_eq!(poll_timeout(None), MAX_POLL_INTERVAL);
        assert_eq!(
            poll_timeout(Some(Duration::from_millis(40))),
            Duration::from_millis(40)
        );
        assert_eq!(poll_timeout(Some(Duration::from_secs(5))), MAX_POLL_INTERVAL);
    }

    #[tokio::test]
    async fn test_next_event_runs_reader_off_the_runtime() {
        let resized = next_event(|| Ok(Some(Event::Resize(80, 24)))).await.unwrap();
        assert_eq!(resized, Some(Event::Resize(80, 24)));

        let idle = next_event(|| Ok(None)).await.unwrap();
        assert_eq!(idle, None);

        let failed = next_event(|| Err(std::io::Error::other("tty gone"))).await;
        assert!(failed.is_err());
    }

    #[test]
    fn test_next_active_project_cycles() {
        let mut store = store();
        let a = store.add_project("A", "").unwrap();
        let b = store.add_project("B", "").unwrap();

        assert_eq!(next_active_project(&store, None), Some(a));
        assert_eq!(next_active_project(&store, Some(a)), Some(b));
        assert_eq!(next_active_project(&store, Some(b)), Some(a));
    }

    #[test]
    fn test_next_active_project_skips_completed() {
        let mut store = store();
        let a = store.add_project("A", "").unwrap();
        let b = store.add_project("B", "").unwrap();
        store.complete_project(b).unwrap();

        assert_eq!(next_active_project(&store, Some(a)), Some(a));
        // A stale selection restarts from the first project
        assert_eq!(next_active_project(&store, Some(b)), Some(a));
    }

    #[test]
    fn test_next_active_project_empty_store() {
        assert_eq!(next_active_project(&store(), None), None);
    }

    #[test]
    fn test_checkpoint_for_new_task() {
        let mut store = store();
        let project = store.add_project("Thesis", "").unwrap();
        let row = ProjectRow::Project(project);
        assert_eq!(checkpoint_for_new_task(&store, row), None);

        let first = store.add_checkpoint(project, "Draft", "", None).unwrap();
        let last = store.add_checkpoint(project, "Review", "", None).unwrap();
        assert_eq!(checkpoint_for_new_task(&store, row), Some(last));
        assert_eq!(
            checkpoint_for_new_task(&store, ProjectRow::Checkpoint(project, first)),
            Some(first)
        );
    }
}
