//! Log file retention

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};

use super::LOG_FILE_PREFIX;

/// Days a log file is kept
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Delete log files older than the retention period
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(DEFAULT_RETENTION_DAYS * 24 * 60 * 60))
        .unwrap_or(SystemTime::UNIX_EPOCH);
    cleanup_logs_older_than(logs_dir, cutoff)
}

fn is_log_file(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")
}

/// Delete log files last modified before `cutoff`
fn cleanup_logs_older_than(logs_dir: &Path, cutoff: SystemTime) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let entries = fs::read_dir(logs_dir)
        .with_context(|| format!("Failed to read {}", logs_dir.display()))?;

    let mut deleted = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.file_name().and_then(|n| n.to_str()).is_some_and(is_log_file) {
            continue;
        }

        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        if modified >= cutoff {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => deleted += 1,
            Err(e) => tracing::warn!("Failed to remove old log {}: {}", path.display(), e),
        }
    }

    if deleted > 0 {
        tracing::info!("Removed {} old log files", deleted);
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_nonexistent_dir() {
        let path = Path::new("/nonexistent/path/for/testing");
        assert_eq!(cleanup_old_logs(path).unwrap(), 0);
    }

    #[test]
    fn test_cleanup_keeps_recent_files() {
        let temp_dir = TempDir::new().unwrap();
        let log_file = temp_dir.path().join("pomotrack-2026-01-21_14-30-45.log");
        fs::write(&log_file, "recent").unwrap();

        assert_eq!(cleanup_old_logs(temp_dir.path()).unwrap(), 0);
        assert!(log_file.exists());
    }

    #[test]
    fn test_cleanup_removes_only_pomotrack_logs() {
        let temp_dir = TempDir::new().unwrap();
        let ours = temp_dir.path().join("pomotrack-2026-01-01_00-00-00.log");
        let other = temp_dir.path().join("other-2026-01-01_00-00-00.log");
        let notes = temp_dir.path().join("notes.txt");
        for path in [&ours, &other, &notes] {
            fs::write(path, "x").unwrap();
        }

        // A cutoff in the future makes every file "old"
        let cutoff = SystemTime::now() + Duration::from_secs(60);
        assert_eq!(cleanup_logs_older_than(temp_dir.path(), cutoff).unwrap(), 1);

        assert!(!ours.exists());
        assert!(other.exists());
        assert!(notes.exists());
    }

    #[test]
    fn test_is_log_file() {
        assert!(is_log_file("pomotrack-2026-01-01_00-00-00.log"));
        assert!(!is_log_file("pomotrack-2026-01-01_00-00-00.txt"));
        assert!(!is_log_file("notes-2026-01-01_00-00-00.log"));
    }
}
