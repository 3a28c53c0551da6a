//! Time sources used by the timer
//!
//! The timer needs two kinds of time: wall-clock timestamps for session and
//! focus-log records, and a monotonic instant for scheduling countdown ticks.
//! Both come from a [`Clock`] so tests can drive time by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Provides wall-clock and monotonic time
pub trait Clock {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;

    /// Current monotonic instant
    fn instant(&self) -> Instant;
}

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock
///
/// Cloned handles share the same time, so a test can keep one handle and
/// give the other to the timer.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base_time: DateTime<Utc>,
    base_instant: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock frozen at the given wall-clock time
    pub fn starting_at(time: DateTime<Utc>) -> Self {
        Self {
            base_time: time,
            base_instant: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let offset =
            chrono::Duration::from_std(self.offset.get()).unwrap_or(chrono::Duration::zero());
        self.base_time + offset
    }

    fn instant(&self) -> Instant {
        self.base_instant + self.offset.get()
    }
}
