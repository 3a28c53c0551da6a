//! Project, checkpoint and task management module
//!
//! Projects group work into checkpoints, and checkpoints hold tasks. Focus
//! time is attributed to projects; task and project completion feed the
//! lifetime totals shown in the statistics view.

pub mod store;

pub use store::ProjectStore;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a project
pub type ProjectId = Uuid;

/// Unique identifier for a checkpoint
pub type CheckpointId = Uuid;

/// Unique identifier for a task
pub type TaskId = Uuid;

/// Color given to checkpoints created without one
pub const DEFAULT_CHECKPOINT_COLOR: &str = "#ff0055";

/// Errors from project store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Project not found")]
    ProjectNotFound(ProjectId),
    #[error("Checkpoint not found")]
    CheckpointNotFound(CheckpointId),
    #[error("Task not found")]
    TaskNotFound(TaskId),
}

/// Read access to projects, as needed by the timer
pub trait ProjectDirectory {
    /// Display name of a project, if it exists
    fn display_name(&self, id: ProjectId) -> Option<&str>;

    /// Whether a project exists and has not been completed
    fn is_active(&self, id: ProjectId) -> bool;
}

/// A single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, open task
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
        }
    }
}

/// A milestone within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: CheckpointId,
    pub title: String,
    #[serde(default)]
    pub emoji: String,
    /// Hex color used when rendering the checkpoint title
    #[serde(default = "default_checkpoint_color")]
    pub color: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

fn default_checkpoint_color() -> String {
    DEFAULT_CHECKPOINT_COLOR.to_string()
}

impl Checkpoint {
    /// Create a new checkpoint with no tasks
    pub fn new(title: String, emoji: String, color: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            emoji,
            color: color.unwrap_or_else(default_checkpoint_color),
            tasks: Vec::new(),
        }
    }

    /// Title prefixed with the emoji, if any
    pub fn label(&self) -> String {
        with_emoji(&self.emoji, &self.title)
    }
}

/// A project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,
    /// Display name
    pub title: String,
    /// Optional emoji shown before the title
    #[serde(default)]
    pub emoji: String,
    /// Checkpoints in creation order
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    /// Whether the project has been marked complete
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project
    pub fn new(title: String, emoji: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            emoji,
            checkpoints: Vec::new(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Name recorded in the focus log
    pub fn display_name(&self) -> &str {
        &self.title
    }

    /// Title prefixed with the emoji, if any
    pub fn label(&self) -> String {
        with_emoji(&self.emoji, &self.title)
    }

    /// Completed vs. total tasks across all checkpoints
    pub fn progress(&self) -> Progress {
        let tasks = self.checkpoints.iter().flat_map(|cp| cp.tasks.iter());
        let (completed, total) = tasks.fold((0, 0), |(done, total), task| {
            (done + usize::from(task.completed), total + 1)
        });
        Progress { completed, total }
    }

    /// Get a checkpoint by ID
    pub fn checkpoint(&self, id: CheckpointId) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|cp| cp.id == id)
    }

    fn checkpoint_mut(&mut self, id: CheckpointId) -> Result<&mut Checkpoint, ProjectError> {
        self.checkpoints
            .iter_mut()
            .find(|cp| cp.id == id)
            .ok_or(ProjectError::CheckpointNotFound(id))
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task, ProjectError> {
        self.checkpoints
            .iter_mut()
            .flat_map(|cp| cp.tasks.iter_mut())
            .find(|t| t.id == id)
            .ok_or(ProjectError::TaskNotFound(id))
    }
}

fn with_emoji(emoji: &str, title: &str) -> String {
    if emoji.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", emoji, title)
    }
}

/// Split user input into an optional leading emoji and a title
///
/// "📚 Thesis" yields `("📚", "Thesis")`; input whose first word contains a
/// letter or digit has no emoji.
pub fn split_emoji_prefix(input: &str) -> (&str, &str) {
    let input = input.trim();
    let Some((first, rest)) = input.split_once(char::is_whitespace) else {
        return ("", input);
    };
    if first.chars().any(char::is_alphanumeric) {
        ("", input)
    } else {
        (first, rest.trim())
    }
}

/// Task completion within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion ratio in `[0, 1]`; zero when there are no tasks
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_tasks(states: &[bool]) -> Project {
        let mut project = Project::new("Thesis".to_string(), String::new());
        let mut checkpoint = Checkpoint::new("Draft".to_string(), String::new(), None);
        for (i, done) in states.iter().enumerate() {
            let mut task = Task::new(format!("task {}", i));
            task.completed = *done;
            checkpoint.tasks.push(task);
        }
        project.checkpoints.push(checkpoint);
        project
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("Thesis".to_string(), "📚".to_string());
        assert_eq!(project.display_name(), "Thesis");
        assert_eq!(project.label(), "📚 Thesis");
        assert!(!project.completed);
        assert!(project.checkpoints.is_empty());
    }

    #[test]
    fn test_progress() {
        let project = project_with_tasks(&[true, false, true, false]);
        let progress = project.progress();
        assert_eq!(progress, Progress { completed: 2, total: 4 });
        assert_eq!(progress.to_string(), "2/4");
        assert!((progress.ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_without_tasks() {
        let project = Project::new("Empty".to_string(), String::new());
        assert_eq!(project.progress().ratio(), 0.0);
        assert_eq!(project.progress().to_string(), "0/0");
    }

    #[test]
    fn test_checkpoint_default_color() {
        let checkpoint = Checkpoint::new("Draft".to_string(), String::new(), None);
        assert_eq!(checkpoint.color, DEFAULT_CHECKPOINT_COLOR);
        assert_eq!(checkpoint.label(), "Draft");
    }

    #[test]
    fn test_split_emoji_prefix() {
        assert_eq!(split_emoji_prefix("📚 Thesis"), ("📚", "Thesis"));
        assert_eq!(split_emoji_prefix("  🚀  Launch plan "), ("🚀", "Launch plan"));
        assert_eq!(split_emoji_prefix("Thesis draft"), ("", "Thesis draft"));
        assert_eq!(split_emoji_prefix("Thesis"), ("", "Thesis"));
        assert_eq!(split_emoji_prefix("📚"), ("", "📚"));
    }

    #[test]
    fn test_project_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "6f1c1f1e-7d3b-4a7e-9a53-1f0e0b7c2d11",
            "title": "Legacy",
            "created_at": "2026-01-01T00:00:00Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.title, "Legacy");
        assert!(!project.completed);
        assert!(project.emoji.is_empty());
    }
}
