//! Focus timing module: the Pomodoro engine
//!
//! This module provides:
//! - The timer state machine (focus / short break / long break)
//! - The session recorder (completed and interrupted focus runs)
//! - The focus activity log (one entry per focused second)
//! - Statistics over the logs for today, the last 7 days and the last 28 days

pub mod session;
pub mod stats;
pub mod timer;
pub mod tracker;

pub use session::{SessionLog, SessionRecord, SessionStatus};
pub use stats::{FocusStats, StatsWindow};
pub use timer::{Timer, TimerError, TimerEvent, TimerSnapshot};
pub use tracker::{FocusLog, FocusLogEntry};

use serde::{Deserialize, Serialize};

/// Timer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Focused work (a pomodoro)
    #[default]
    Focus,
    /// Short break between pomodoros
    ShortBreak,
    /// Long break, only entered by explicit selection
    LongBreak,
}

impl Mode {
    /// All modes in display order
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Mode entered automatically when a cycle in this mode finishes
    ///
    /// Focus always advances to a short break and every break returns to
    /// focus. Long breaks are never entered automatically.
    pub fn after_completion(&self) -> Mode {
        match self {
            Mode::Focus => Mode::ShortBreak,
            Mode::ShortBreak | Mode::LongBreak => Mode::Focus,
        }
    }

    /// Whether this is a break mode
    pub fn is_break(&self) -> bool {
        !matches!(self, Mode::Focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_never_enters_long_break() {
        let mut mode = Mode::Focus;
        for _ in 0..20 {
            mode = mode.after_completion();
            assert_ne!(mode, Mode::LongBreak);
        }
        assert_eq!(Mode::LongBreak.after_completion(), Mode::Focus);
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&Mode::ShortBreak).unwrap(),
            "\"short-break\""
        );
        let parsed: Mode = serde_json::from_str("\"long-break\"").unwrap();
        assert_eq!(parsed, Mode::LongBreak);
    }
}
