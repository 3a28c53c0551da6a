//! Logging for pomotrack
//!
//! The terminal belongs to the TUI, so everything is logged to a timestamped
//! file in the logs directory. Old files are pruned at startup.

mod file_writer;
mod retention;

pub use file_writer::{init_file_logging, LogFileInfo};
pub use retention::cleanup_old_logs;

/// File name prefix shared by every log file
const LOG_FILE_PREFIX: &str = "pomotrack-";
