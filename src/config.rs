//! Configuration management for pomotrack
//!
//! Two small records live here: [`Config`] holds the user-tunable timer
//! durations (TOML, edited through the settings dialog) and [`RuntimeState`]
//! remembers the active project and the completed-pomodoro counter between
//! runs (JSON). Both are read once at startup; anything missing or malformed
//! falls back to defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::focus_timing::stats::StatsWindow;
use crate::focus_timing::Mode;
use crate::project::ProjectId;
use crate::storage;

/// Upper bound for any configured duration, in minutes
pub const MAX_DURATION_MINUTES: u32 = 999;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Focus (pomodoro) length in minutes (default: 25)
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,

    /// Short break length in minutes (default: 5)
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,

    /// Long break length in minutes (default: 15)
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,

    /// Window shown when the stats view opens
    #[serde(default)]
    pub default_stats_window: StatsWindow,

    /// Cycle completion cue: "bell" (terminal bell) or "none"
    #[serde(default = "default_notification_method")]
    pub notification_method: String,
}

fn default_focus_minutes() -> u32 {
    25
}

fn default_short_break_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

fn default_notification_method() -> String {
    "bell".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            default_stats_window: StatsWindow::default(),
            notification_method: default_notification_method(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`
    ///
    /// A missing file yields the defaults. An unreadable, unparsable or
    /// invalid file is logged and also yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    fn try_load_from(path: &Path) -> Result<Option<Self>> {
        let Some(content) = storage::read_optional(path)? else {
            return Ok(None);
        };
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        storage::write_atomic(path, &content)
    }

    /// Check that every duration is a positive number of minutes
    pub fn validate(&self) -> Result<()> {
        for (name, minutes) in [
            ("focus_minutes", self.focus_minutes),
            ("short_break_minutes", self.short_break_minutes),
            ("long_break_minutes", self.long_break_minutes),
        ] {
            if minutes == 0 || minutes > MAX_DURATION_MINUTES {
                anyhow::bail!(
                    "{} must be between 1 and {} (got {})",
                    name,
                    MAX_DURATION_MINUTES,
                    minutes
                );
            }
        }
        Ok(())
    }

    /// Configured length of `mode` in minutes
    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_minutes,
            Mode::ShortBreak => self.short_break_minutes,
            Mode::LongBreak => self.long_break_minutes,
        }
    }

    /// Configured length of `mode` in seconds
    pub fn duration_secs(&self, mode: Mode) -> u32 {
        self.minutes(mode) * 60
    }

    /// Whether cycle completion should ring the terminal bell
    pub fn bell_enabled(&self) -> bool {
        self.notification_method != "none"
    }

    /// Parse the settings dialog format: three minute values, e.g. "25 5 15"
    pub fn with_durations_from(&self, input: &str) -> Result<Self> {
        let values: Vec<u32> = input
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<u32>().with_context(|| format!("'{}' is not a number", s)))
            .collect::<Result<_>>()?;

        let &[focus, short_break, long_break] = values.as_slice() else {
            anyhow::bail!("Expected three values: focus, short break, long break");
        };

        let config = Self {
            focus_minutes: focus,
            short_break_minutes: short_break,
            long_break_minutes: long_break,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }
}

/// State remembered between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeState {
    /// Project that focus time is attributed to
    #[serde(default)]
    pub active_project_id: Option<ProjectId>,
    /// Focus cycles completed in the current set of five
    #[serde(default)]
    pub completed_pomodoros: u8,
}

impl RuntimeState {
    /// Load runtime state from the default location
    pub fn load() -> Self {
        Self::load_from(&runtime_state_path())
    }

    /// Load runtime state from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let parsed = storage::read_optional(path).and_then(|content| {
            content
                .map(|c| serde_json::from_str::<Self>(&c).context("Failed to parse runtime state"))
                .transpose()
        });

        match parsed {
            Ok(Some(mut state)) => {
                state.completed_pomodoros %= 5;
                state
            }
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring runtime state at {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save runtime state to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&runtime_state_path())
    }

    /// Save runtime state to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_json(path, self)
    }
}

/// Get the base data directory (~/.pomotrack)
/// Falls back to ./.pomotrack if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for data");
        PathBuf::from(".pomotrack")
    })
}

/// Try to get the base data directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pomotrack"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the runtime state file
pub fn runtime_state_path() -> PathBuf {
    config_dir().join("state.json")
}

/// Get the path to the session log
pub fn sessions_file_path() -> PathBuf {
    config_dir().join("sessions.json")
}

/// Get the path to the focus activity log
pub fn focus_log_file_path() -> PathBuf {
    config_dir().join("focus_log.jsonl")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Ensure all required directories exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(config_dir()).context("Failed to create data directory")?;
    std::fs::create_dir_all(logs_dir()).context("Failed to create logs directory")?;
    Ok(())
}
