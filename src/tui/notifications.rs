//! Notification management for TUI
//!
//! Transient messages shown in the corner of the screen: cycle completions
//! and rejected commands.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::focus_timing::Mode;
use crate::focus_timing::timer::POMODOROS_PER_SET;

/// How long a notification stays up unless given its own duration
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(5);

/// Types of notifications that can be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    /// A countdown reached zero
    CycleComplete {
        finished: Mode,
        next: Mode,
        completed_pomodoros: u8,
    },
    /// Informational message
    Info { message: String },
    /// A command was rejected
    Warning { message: String },
}

impl NotificationType {
    /// Get a title for this notification type
    pub fn title(&self) -> &str {
        match self {
            NotificationType::CycleComplete { finished, .. } => match finished {
                Mode::Focus => "Pomodoro Complete",
                Mode::ShortBreak | Mode::LongBreak => "Break Over",
            },
            NotificationType::Info { .. } => "Info",
            NotificationType::Warning { .. } => "Warning",
        }
    }

    /// Get the message content
    pub fn message(&self) -> String {
        match self {
            NotificationType::CycleComplete {
                finished: Mode::Focus,
                next,
                completed_pomodoros,
            } => {
                // The counter wraps to 0 on the pomodoro that closes a set
                let done = match *completed_pomodoros {
                    0 => POMODOROS_PER_SET,
                    n => n,
                };
                format!(
                    "{}/{} pomodoros done. Next up: {}",
                    done,
                    POMODOROS_PER_SET,
                    next.label()
                )
            }
            NotificationType::CycleComplete { next, .. } => {
                format!("Next up: {}", next.label())
            }
            NotificationType::Info { message } | NotificationType::Warning { message } => {
                message.clone()
            }
        }
    }
}

/// A notification to be displayed
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique identifier
    pub id: Uuid,
    /// Type and content of notification
    pub notification_type: NotificationType,
    /// When the notification was created
    pub created_at: Instant,
    /// How long before auto-dismiss
    pub auto_dismiss: Duration,
}

impl Notification {
    /// Create a new notification
    pub fn new(notification_type: NotificationType, auto_dismiss: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            notification_type,
            created_at: Instant::now(),
            auto_dismiss,
        }
    }

    /// Check if this notification should be dismissed
    pub fn should_dismiss(&self) -> bool {
        self.created_at.elapsed() >= self.auto_dismiss
    }

    /// Get remaining time before auto-dismiss
    pub fn remaining_time(&self) -> Duration {
        self.auto_dismiss.saturating_sub(self.created_at.elapsed())
    }
}

/// Manages a queue of notifications
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    /// Maximum number of visible notifications
    max_visible: usize,
}

impl NotificationManager {
    /// Create a new notification manager
    pub fn new(max_visible: usize) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible,
        }
    }

    /// Push a notification with the default duration
    pub fn push(&mut self, notification_type: NotificationType) {
        self.push_for(notification_type, DEFAULT_NOTIFICATION_DURATION);
    }

    /// Push a notification that stays up for `duration`
    pub fn push_for(&mut self, notification_type: NotificationType, duration: Duration) {
        self.notifications
            .push_back(Notification::new(notification_type, duration));

        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    /// Shorthand for a warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(NotificationType::Warning {
            message: message.into(),
        });
    }

    /// Shorthand for an info message
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationType::Info {
            message: message.into(),
        });
    }

    /// Remove expired notifications, returning whether any were removed
    pub fn tick(&mut self) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.should_dismiss());
        self.notifications.len() != before
    }

    /// Visible notifications, most recent first
    pub fn visible(&self) -> Vec<&Notification> {
        self.notifications.iter().rev().collect()
    }

    /// Dismiss the most recent notification
    pub fn dismiss_latest(&mut self) {
        self.notifications.pop_back();
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(3)
    }
}
