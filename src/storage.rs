//! File helpers shared by the persisted stores
//!
//! Whole collections are rewritten through a temporary file and a rename so a
//! crash never leaves half a collection on disk. Append-only logs are stored
//! as JSON lines, one record per line.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read a file, returning `None` if it does not exist
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Replace the contents of `path` atomically
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    fs::write(tmp_path, content)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(tmp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize data")?;
    write_atomic(path, &content)
}

/// Append a single record as one JSON line
pub fn append_json_line<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut line = serde_json::to_string(value).context("Failed to serialize record")?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    // A single write keeps the line whole
    file.write_all(line.as_bytes())
        .with_context(|| format!("Failed to append to {}", path.display()))?;

    Ok(())
}

/// End the file at `path` with a newline if it does not already
///
/// A crash can leave a torn last line with no terminator; appending after it
/// would glue the next record onto the fragment. A missing or empty file is
/// left alone.
pub fn terminate_last_line(path: &Path) -> Result<()> {
    let mut file = match OpenOptions::new().read(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).with_context(|| format!("Failed to open {}", path.display())),
    };

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    if len == 0 {
        return Ok(());
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))
        .and_then(|_| file.read_exact(&mut last))
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if last[0] != b'\n' {
        tracing::warn!("Terminating torn last line in {}", path.display());
        file.write_all(b"\n")
            .with_context(|| format!("Failed to append to {}", path.display()))?;
    }
    Ok(())
}

/// Read every parseable JSON line from `path`
///
/// A missing file yields an empty list. Lines that fail to parse (for
/// example a torn final line after a crash, even one cut inside a multibyte
/// character) are skipped with a warning.
pub fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for line in bytes.split(|b| *b == b'\n') {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::debug!("Skipping malformed line in {}: {}", path.display(), e);
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(
            "Skipped {} malformed line(s) in {}",
            skipped,
            path.display()
        );
    }

    Ok(records)
}

/// Move an unreadable file aside to `<name>.corrupt`
///
/// Keeps the damaged data out of the way of the next write instead of
/// letting it be overwritten. Returns the new path.
pub fn quarantine(path: &Path) -> Result<PathBuf> {
    let mut corrupt_name = path.as_os_str().to_owned();
    corrupt_name.push(".corrupt");
    let corrupt_path = PathBuf::from(corrupt_name);

    fs::rename(path, &corrupt_path).with_context(|| {
        format!(
            "Failed to move {} to {}",
            path.display(),
            corrupt_path.display()
        )
    })?;
    tracing::warn!(
        "Moved unreadable {} to {}",
        path.display(),
        corrupt_path.display()
    );
    Ok(corrupt_path)
}
