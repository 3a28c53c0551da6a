//! Session recorder
//!
//! Keeps the append-only log of focus runs. A record is written when a
//! focus run is paused, reset or completes; records are never changed or
//! removed afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Mode;
use crate::project::ProjectId;
use crate::storage;

/// How a focus run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// The countdown reached zero
    Completed,
    /// The run was paused or reset before reaching zero
    Interrupted,
}

/// A recorded focus run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique identifier for this record
    pub id: Uuid,
    /// Project the run was attributed to
    pub project_id: Option<ProjectId>,
    /// Mode of the run (always focus for records written by the timer)
    pub mode: Mode,
    /// Configured length of the mode, in seconds
    pub duration_seconds: u32,
    /// When the countdown was started
    pub start_time: DateTime<Utc>,
    /// When the run was paused, reset or completed
    pub end_time: DateTime<Utc>,
    /// How the run ended
    pub status: SessionStatus,
}

impl SessionRecord {
    /// Wall-clock time between start and end
    pub fn elapsed(&self) -> Duration {
        let diff = self.end_time - self.start_time;
        Duration::from_secs(diff.num_seconds().max(0) as u64)
    }

    /// Whether the run reached zero
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

/// Append-only session log, held in memory and written through to disk
#[derive(Debug, Default)]
pub struct SessionLog {
    records: Vec<SessionRecord>,
    /// Backing file; `None` keeps the log in memory only
    path: Option<PathBuf>,
}

impl SessionLog {
    /// Create a log that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the log stored at `path`
    ///
    /// A missing file is an empty history. A malformed one is moved aside to
    /// `sessions.json.corrupt` and the log starts empty.
    pub fn open(path: PathBuf) -> Self {
        let records = match Self::read(&path) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "Session log at {} is unreadable, starting with an empty history: {:#}",
                    path.display(),
                    e
                );
                if let Err(e) = storage::quarantine(&path) {
                    tracing::error!("Failed to set aside session log: {:#}", e);
                }
                Vec::new()
            }
        };
        tracing::debug!("Loaded {} session records", records.len());
        Self {
            records,
            path: Some(path),
        }
    }

    fn read(path: &Path) -> Result<Vec<SessionRecord>> {
        let Some(content) = storage::read_optional(path)? else {
            return Ok(Vec::new());
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).context("Failed to parse session log")
    }

    /// Record the end of a focus run
    ///
    /// Does nothing when no project is active or the mode is a break; those
    /// runs are not meaningful as sessions. Returns the new record otherwise.
    pub fn record(
        &mut self,
        project_id: Option<ProjectId>,
        mode: Mode,
        duration_seconds: u32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        status: SessionStatus,
    ) -> Option<&SessionRecord> {
        let project_id = project_id?;
        if mode.is_break() {
            return None;
        }

        self.records.push(SessionRecord {
            id: Uuid::new_v4(),
            project_id: Some(project_id),
            mode,
            duration_seconds,
            start_time,
            end_time,
            status,
        });
        self.persist();

        tracing::info!("Recorded {:?} focus session", status);
        self.records.last()
    }

    fn persist(&self) {
        if let Some(path) = &self.path {
            if let Err(e) = storage::save_json(path, &self.records) {
                tracing::error!("Failed to save session log: {:#}", e);
            }
        }
    }

    /// All records in the order they were written
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Records whose end time is at or after `start`
    pub fn ended_since(&self, start: DateTime<Utc>) -> impl Iterator<Item = &SessionRecord> {
        self.records.iter().filter(move |r| r.end_time >= start)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
