//! Project persistence
//!
//! Handles saving and loading the project/checkpoint/task tree and the
//! mutations the UI triggers on it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{
    Checkpoint, CheckpointId, Progress, Project, ProjectDirectory, ProjectError, ProjectId, Task,
    TaskId,
};
use crate::config::config_dir;
use crate::storage;

/// Store for persisting projects
#[derive(Debug)]
pub struct ProjectStore {
    /// Projects in creation order
    projects: Vec<Project>,
    /// Path to the projects.json file
    store_path: PathBuf,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::with_path(projects_file_path())
    }
}

impl ProjectStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a custom path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            projects: Vec::new(),
            store_path: path,
        }
    }

    /// Get all projects
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    /// Projects that are not completed, oldest first
    pub fn active_projects(&self) -> Vec<&Project> {
        let mut active: Vec<_> = self.projects.iter().filter(|p| !p.completed).collect();
        active.sort_by_key(|p| p.created_at);
        active
    }

    /// Projects marked complete
    pub fn completed_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.completed).collect()
    }

    /// Get a project by ID
    pub fn get_project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn project_mut(&mut self, id: ProjectId) -> Result<&mut Project, ProjectError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProjectError::ProjectNotFound(id))
    }

    /// Add a new project
    pub fn add_project(&mut self, title: &str, emoji: &str) -> Result<ProjectId, ProjectError> {
        let title = non_empty(title)?;
        let project = Project::new(title, emoji.trim().to_string());
        let id = project.id;
        tracing::info!("Added project '{}'", project.title);
        self.projects.push(project);
        Ok(id)
    }

    /// Remove a project with all its checkpoints and tasks
    pub fn delete_project(&mut self, id: ProjectId) -> Result<Project, ProjectError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(ProjectError::ProjectNotFound(id))?;
        let project = self.projects.remove(index);
        tracing::info!("Deleted project '{}'", project.title);
        Ok(project)
    }

    /// Mark a project as completed
    pub fn complete_project(&mut self, id: ProjectId) -> Result<(), ProjectError> {
        let project = self.project_mut(id)?;
        project.completed = true;
        tracing::info!("Completed project '{}'", project.title);
        Ok(())
    }

    /// Add a checkpoint to a project
    pub fn add_checkpoint(
        &mut self,
        project_id: ProjectId,
        title: &str,
        emoji: &str,
        color: Option<&str>,
    ) -> Result<CheckpointId, ProjectError> {
        let title = non_empty(title)?;
        let project = self.project_mut(project_id)?;
        let checkpoint = Checkpoint::new(
            title,
            emoji.trim().to_string(),
            color.map(str::to_string),
        );
        let id = checkpoint.id;
        project.checkpoints.push(checkpoint);
        Ok(id)
    }

    /// Add a task to a checkpoint
    pub fn add_task(
        &mut self,
        project_id: ProjectId,
        checkpoint_id: CheckpointId,
        text: &str,
    ) -> Result<TaskId, ProjectError> {
        let text = non_empty(text)?;
        let checkpoint = self.project_mut(project_id)?.checkpoint_mut(checkpoint_id)?;
        let task = Task::new(text);
        let id = task.id;
        checkpoint.tasks.push(task);
        Ok(id)
    }

    /// Set a task's completion flag
    pub fn set_task_completed(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
        completed: bool,
    ) -> Result<(), ProjectError> {
        self.project_mut(project_id)?.task_mut(task_id)?.completed = completed;
        Ok(())
    }

    /// Flip a task's completion flag, returning the new value
    pub fn toggle_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<bool, ProjectError> {
        let task = self.project_mut(project_id)?.task_mut(task_id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Change a task's text
    ///
    /// Blank or unchanged text leaves the task as it was and returns `false`.
    pub fn rename_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
        text: &str,
    ) -> Result<bool, ProjectError> {
        let task = self.project_mut(project_id)?.task_mut(task_id)?;
        let text = text.trim();
        if text.is_empty() || text == task.text {
            return Ok(false);
        }
        task.text = text.to_string();
        Ok(true)
    }

    /// Task progress for a project
    pub fn progress(&self, project_id: ProjectId) -> Option<Progress> {
        self.get_project(project_id).map(Project::progress)
    }

    /// Completed tasks across every project, completed or not
    pub fn completed_task_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|p| p.checkpoints.iter())
            .flat_map(|cp| cp.tasks.iter())
            .filter(|t| t.completed)
            .count()
    }

    /// Number of completed projects
    pub fn completed_project_count(&self) -> usize {
        self.projects.iter().filter(|p| p.completed).count()
    }

    /// Get the number of projects
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Load store from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let Some(content) = storage::read_optional(path)? else {
            return Ok(Self::with_path(path.to_path_buf()));
        };

        let projects: Vec<Project> = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content).context("Failed to parse projects file")?
        };

        Ok(Self {
            projects,
            store_path: path.to_path_buf(),
        })
    }

    /// Load the store for the session, never failing
    ///
    /// An unreadable file is moved aside to `projects.json.corrupt` so the
    /// first save does not overwrite it, and the store starts empty.
    pub fn open() -> Self {
        Self::open_at(&projects_file_path())
    }

    /// [`ProjectStore::open`] for a specific path
    pub fn open_at(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load project store: {:#}, starting fresh", e);
            if let Err(e) = storage::quarantine(path) {
                tracing::error!("Failed to set aside project store: {:#}", e);
            }
            Self::with_path(path.to_path_buf())
        })
    }

    /// Save store to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.store_path)
    }

    /// Save store to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_json(path, &self.projects).context("Failed to write projects file")
    }
}

impl ProjectDirectory for ProjectStore {
    fn display_name(&self, id: ProjectId) -> Option<&str> {
        self.get_project(id).map(Project::display_name)
    }

    fn is_active(&self, id: ProjectId) -> bool {
        self.get_project(id).is_some_and(|p| !p.completed)
    }
}

fn non_empty(text: &str) -> Result<String, ProjectError> {
    let text = text.trim();
    if text.is_empty() {
        Err(ProjectError::EmptyTitle)
    } else {
        Ok(text.to_string())
    }
}

/// Get the path to the projects file
pub fn projects_file_path() -> PathBuf {
    config_dir().join("projects.json")
}
