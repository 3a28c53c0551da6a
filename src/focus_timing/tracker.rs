//! Focus activity logging
//!
//! While a focus countdown runs with an active project, every elapsed second
//! appends one [`FocusLogEntry`]. The number of entries in a time window is
//! the focused time for that window, so the log is the raw material for all
//! focus statistics.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Mode;
use crate::project::ProjectId;
use crate::storage;

/// One focused second
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusLogEntry {
    /// When the second elapsed
    pub timestamp: DateTime<Utc>,
    /// Project the second is attributed to
    pub project_id: ProjectId,
    /// Project display name at that instant (not updated on later renames)
    pub project_name: String,
}

/// Append-only focus activity log, held in memory and written through to disk
#[derive(Debug, Default)]
pub struct FocusLog {
    entries: Vec<FocusLogEntry>,
    /// Backing JSON-lines file; `None` keeps the log in memory only
    path: Option<PathBuf>,
}

impl FocusLog {
    /// Create a log that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the log stored at `path`
    ///
    /// Malformed lines are skipped; an unreadable file is treated as empty.
    /// A torn last line is terminated so new entries start on a line of
    /// their own.
    pub fn open(path: PathBuf) -> Self {
        let entries = storage::read_json_lines(&path).unwrap_or_else(|e| {
            tracing::warn!(
                "Focus log at {} is unreadable, starting with an empty history: {:#}",
                path.display(),
                e
            );
            Vec::new()
        });
        tracing::debug!("Loaded {} focus log entries", entries.len());
        if let Err(e) = storage::terminate_last_line(&path) {
            tracing::warn!("Failed to repair focus log tail: {:#}", e);
        }
        Self {
            entries,
            path: Some(path),
        }
    }

    /// Log one elapsed second of focus
    ///
    /// An entry is only produced while running in focus mode with an active
    /// project; otherwise this returns `None` and the log is unchanged.
    pub fn log_focus_second(
        &mut self,
        mode: Mode,
        running: bool,
        project: Option<(ProjectId, &str)>,
        timestamp: DateTime<Utc>,
    ) -> Option<&FocusLogEntry> {
        if mode != Mode::Focus || !running {
            return None;
        }
        let (project_id, project_name) = project?;

        let entry = FocusLogEntry {
            timestamp,
            project_id,
            project_name: project_name.to_string(),
        };

        if let Some(path) = &self.path {
            if let Err(e) = storage::append_json_line(path, &entry) {
                tracing::error!("Failed to append focus log entry: {:#}", e);
            }
        }

        self.entries.push(entry);
        self.entries.last()
    }

    /// All entries in the order they were logged
    pub fn entries(&self) -> &[FocusLogEntry] {
        &self.entries
    }

    /// Entries at or after `start`
    pub fn entries_since(&self, start: DateTime<Utc>) -> impl Iterator<Item = &FocusLogEntry> {
        self.entries.iter().filter(move |e| e.timestamp >= start)
    }

    /// Number of entries (focused seconds) overall
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
