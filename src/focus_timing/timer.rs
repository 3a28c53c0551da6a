//! Pomodoro timer state machine
//!
//! The timer owns the current mode, the remaining seconds and the single
//! countdown source. Ticks are driven by [`Timer::poll`], which the event
//! loop calls between terminal events; every accepted tick feeds the focus
//! log, and pause / reset / natural completion of a focus run feed the
//! session log.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::session::{SessionLog, SessionStatus};
use super::tracker::FocusLog;
use super::Mode;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::project::{ProjectDirectory, ProjectId};

/// Interval between countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Number of pomodoros shown in a set before the counter wraps
pub const POMODOROS_PER_SET: u8 = 5;

/// Rejected timer commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Invalid time format. Use MM:SS")]
    InvalidTimeFormat,
    #[error("Time must be between 00:00 and 99:59")]
    TimeOutOfRange,
    #[error("Select a project first")]
    NoActiveProject,
    #[error("Pause the timer before editing the time")]
    EditWhileRunning,
    #[error("Timer is already running")]
    AlreadyRunning,
    #[error("Timer is not running")]
    NotRunning,
}

/// Point-in-time view of the timer for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub seconds_remaining: u32,
    /// Length of the current run; the denominator for progress
    pub total_seconds: u32,
    pub running: bool,
    pub completed_pomodoros: u8,
}

impl TimerSnapshot {
    /// Format remaining time as MM:SS
    pub fn format_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.seconds_remaining / 60,
            self.seconds_remaining % 60
        )
    }

    /// Elapsed fraction of the current run in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.seconds_remaining);
        f64::from(elapsed) / f64::from(self.total_seconds)
    }
}

/// Notifications queued by the timer for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A tick was accepted
    Tick(TimerSnapshot),
    /// The mode changed, by selection, completion or reconfiguration
    ModeChanged(Mode),
    /// A countdown reached zero
    CycleCompleted {
        finished: Mode,
        completed_pomodoros: u8,
    },
}

/// The active countdown source
///
/// Holding one is what makes the timer "running"; dropping it cancels the
/// countdown.
#[derive(Debug)]
struct Countdown {
    next_due: Instant,
}

impl Countdown {
    fn starting_at(now: Instant) -> Self {
        Self {
            next_due: now + TICK_INTERVAL,
        }
    }
}

/// The Pomodoro timer
#[derive(Debug)]
pub struct Timer<C: Clock = SystemClock> {
    config: Config,
    mode: Mode,
    seconds_remaining: u32,
    /// Length of the current run: the mode duration, or a longer manual edit
    span_seconds: u32,
    countdown: Option<Countdown>,
    /// Start of the focus run that has not been recorded yet
    session_started_at: Option<DateTime<Utc>>,
    active_project: Option<ProjectId>,
    completed_pomodoros: u8,
    sessions: SessionLog,
    focus_log: FocusLog,
    events: Vec<TimerEvent>,
    clock: C,
}

impl Timer<SystemClock> {
    /// Create a paused focus timer using the system clock
    pub fn new(config: &Config, sessions: SessionLog, focus_log: FocusLog) -> Self {
        Self::with_clock(config, sessions, focus_log, SystemClock)
    }
}

impl<C: Clock> Timer<C> {
    /// Create a paused focus timer with a custom clock
    pub fn with_clock(config: &Config, sessions: SessionLog, focus_log: FocusLog, clock: C) -> Self {
        let seconds = config.duration_secs(Mode::Focus);
        Self {
            config: config.clone(),
            mode: Mode::Focus,
            seconds_remaining: seconds,
            span_seconds: seconds,
            countdown: None,
            session_started_at: None,
            active_project: None,
            completed_pomodoros: 0,
            sessions,
            focus_log,
            events: Vec::new(),
            clock,
        }
    }

    /// Configured length of `mode` in seconds
    pub fn duration(&self, mode: Mode) -> u32 {
        self.config.duration_secs(mode)
    }

    /// Cancel any countdown and load the full duration of `mode`
    ///
    /// An unrecorded focus run is discarded without a session record.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.countdown = None;
        if self.session_started_at.take().is_some() {
            tracing::debug!("Discarding unrecorded {} run", self.mode.label());
        }
        self.mode = mode;
        self.load_full_duration();
        tracing::info!("Switched to {}", mode.label());
        self.events.push(TimerEvent::ModeChanged(mode));
    }

    /// Begin counting down
    ///
    /// Focus runs need an active project that exists and is not completed.
    pub fn start(&mut self, projects: &dyn ProjectDirectory) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::AlreadyRunning);
        }
        if self.mode == Mode::Focus
            && !self.active_project.is_some_and(|id| projects.is_active(id))
        {
            return Err(TimerError::NoActiveProject);
        }

        self.session_started_at = Some(self.clock.now());
        self.countdown = Some(Countdown::starting_at(self.clock.instant()));
        tracing::info!(
            "Started {} at {}",
            self.mode.label(),
            self.snapshot().format_remaining()
        );
        Ok(())
    }

    /// Stop counting down, recording an interrupted focus session
    pub fn pause(&mut self) -> Result<(), TimerError> {
        if self.countdown.take().is_none() {
            return Err(TimerError::NotRunning);
        }
        self.record_session(SessionStatus::Interrupted);
        tracing::info!(
            "Paused {} at {}",
            self.mode.label(),
            self.snapshot().format_remaining()
        );
        Ok(())
    }

    /// Start when paused, pause when running
    pub fn toggle(&mut self, projects: &dyn ProjectDirectory) -> Result<(), TimerError> {
        if self.is_running() {
            self.pause()
        } else {
            self.start(projects)
        }
    }

    /// Cancel the countdown, reload the mode duration and clear the counter
    ///
    /// A focus run in progress is recorded as interrupted.
    pub fn reset(&mut self) {
        self.countdown = None;
        self.record_session(SessionStatus::Interrupted);
        self.load_full_duration();
        self.completed_pomodoros = 0;
        tracing::info!("Reset {}", self.mode.label());
        self.events.push(TimerEvent::Tick(self.snapshot()));
    }

    /// Advance the countdown by one second
    ///
    /// Ignored while paused. A tick that finds the countdown already at zero
    /// completes the cycle without logging a focus second.
    pub fn tick(&mut self, projects: &dyn ProjectDirectory) {
        if !self.is_running() {
            return;
        }
        if self.seconds_remaining == 0 {
            self.finish_cycle();
            return;
        }

        self.seconds_remaining -= 1;

        let project = self
            .active_project
            .map(|id| (id, projects.display_name(id).unwrap_or_default()));
        let now = self.clock.now();
        self.focus_log.log_focus_second(self.mode, true, project, now);

        self.events.push(TimerEvent::Tick(self.snapshot()));

        if self.seconds_remaining == 0 {
            self.finish_cycle();
        }
    }

    fn finish_cycle(&mut self) {
        self.countdown = None;
        let finished = self.mode;

        if finished == Mode::Focus {
            self.record_session(SessionStatus::Completed);
            self.completed_pomodoros = (self.completed_pomodoros + 1) % POMODOROS_PER_SET;
        } else {
            self.session_started_at = None;
        }

        tracing::info!("{} cycle completed", finished.label());
        self.events.push(TimerEvent::CycleCompleted {
            finished,
            completed_pomodoros: self.completed_pomodoros,
        });

        self.switch_mode(finished.after_completion());
    }

    /// Overwrite the remaining time with an `MM:SS` value
    ///
    /// Only allowed while paused. Nothing is recorded.
    pub fn set_time_manually(&mut self, input: &str) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::EditWhileRunning);
        }
        let seconds = parse_manual_time(input)?;

        self.seconds_remaining = seconds;
        self.span_seconds = self.duration(self.mode).max(seconds);
        tracing::debug!("Remaining time set to {}", self.snapshot().format_remaining());
        self.events.push(TimerEvent::Tick(self.snapshot()));
        Ok(())
    }

    /// Fire every tick that is due, returning how many fired
    pub fn poll(&mut self, projects: &dyn ProjectDirectory) -> u32 {
        let now = self.clock.instant();
        let mut fired = 0;
        while let Some(countdown) = self.countdown.as_mut() {
            if countdown.next_due > now {
                break;
            }
            countdown.next_due += TICK_INTERVAL;
            self.tick(projects);
            fired += 1;
        }
        fired
    }

    /// Time until the next tick is due, if a countdown is active
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.countdown
            .as_ref()
            .map(|c| c.next_due.saturating_duration_since(self.clock.instant()))
    }

    /// Select the project that focus time is attributed to
    pub fn set_active_project(&mut self, project: Option<ProjectId>) {
        self.active_project = project;
    }

    /// Restore the counter saved by a previous run
    pub fn restore_completed_pomodoros(&mut self, count: u8) {
        self.completed_pomodoros = count % POMODOROS_PER_SET;
    }

    /// Apply new durations as a full reset
    ///
    /// The countdown is cancelled without a record and the timer returns to
    /// a fresh focus run. The active project and the counter are kept.
    pub fn reconfigure(&mut self, config: &Config) {
        self.config = config.clone();
        self.switch_mode(Mode::Focus);
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current state for display
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            total_seconds: self.span_seconds,
            running: self.is_running(),
            completed_pomodoros: self.completed_pomodoros,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Check if a countdown is active
    pub fn is_running(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn active_project(&self) -> Option<ProjectId> {
        self.active_project
    }

    pub fn completed_pomodoros(&self) -> u8 {
        self.completed_pomodoros
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sessions(&self) -> &SessionLog {
        &self.sessions
    }

    pub fn focus_log(&self) -> &FocusLog {
        &self.focus_log
    }

    fn load_full_duration(&mut self) {
        self.seconds_remaining = self.duration(self.mode);
        self.span_seconds = self.seconds_remaining;
    }

    fn record_session(&mut self, status: SessionStatus) {
        let Some(start_time) = self.session_started_at.take() else {
            return;
        };
        self.sessions.record(
            self.active_project,
            self.mode,
            self.duration(self.mode),
            start_time,
            self.clock.now(),
            status,
        );
    }
}

/// Parse `M:SS` or `MM:SS` into seconds
pub fn parse_manual_time(input: &str) -> Result<u32, TimerError> {
    let (minutes, seconds) = input
        .trim()
        .split_once(':')
        .ok_or(TimerError::InvalidTimeFormat)?;

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&minutes.len())
        || seconds.len() != 2
        || !all_digits(minutes)
        || !all_digits(seconds)
    {
        return Err(TimerError::InvalidTimeFormat);
    }

    let minutes: u32 = minutes.parse().map_err(|_| TimerError::InvalidTimeFormat)?;
    let seconds: u32 = seconds.parse().map_err(|_| TimerError::InvalidTimeFormat)?;
    if minutes > 99 || seconds > 59 {
        return Err(TimerError::TimeOutOfRange);
    }

    Ok(minutes * 60 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::focus_timing::stats::{FocusStats, StatsWindow};
    use crate::project::ProjectStore;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    struct Fixture {
        timer: Timer<ManualClock>,
        clock: ManualClock,
        projects: ProjectStore,
        project: ProjectId,
    }

    fn fixture() -> Fixture {
        let noon = Local::now()
            .date_naive()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let start = Local.from_local_datetime(&noon).earliest().unwrap();
        let clock = ManualClock::starting_at(start.with_timezone(&Utc));

        let mut projects = ProjectStore::with_path(PathBuf::from("/nonexistent/projects.json"));
        let project = projects.add_project("P", "").unwrap();

        let timer = Timer::with_clock(
            &Config::default(),
            SessionLog::in_memory(),
            FocusLog::in_memory(),
            clock.clone(),
        );
        Fixture {
            timer,
            clock,
            projects,
            project,
        }
    }

    fn running_focus() -> Fixture {
        let mut f = fixture();
        f.timer.set_active_project(Some(f.project));
        f.timer.start(&f.projects).unwrap();
        f
    }

    fn advance_and_poll(f: &mut Fixture, secs: u64) -> u32 {
        f.clock.advance(Duration::from_secs(secs));
        f.timer.poll(&f.projects)
    }

    #[test]
    fn test_initial_state() {
        let f = fixture();
        assert_eq!(f.timer.mode(), Mode::Focus);
        assert_eq!(f.timer.seconds_remaining(), 1500);
        assert!(!f.timer.is_running());
        assert_eq!(f.timer.completed_pomodoros(), 0);
    }

    #[test]
    fn test_switch_mode_loads_duration_and_stops() {
        let mut f = running_focus();
        for mode in Mode::ALL {
            f.timer.switch_mode(mode);
            assert_eq!(f.timer.seconds_remaining(), f.timer.config().minutes(mode) * 60);
            assert!(!f.timer.is_running());
        }
    }

    #[test]
    fn test_switch_mode_while_running_writes_no_record() {
        let mut f = running_focus();
        advance_and_poll(&mut f, 30);

        f.timer.switch_mode(Mode::ShortBreak);

        assert!(f.timer.sessions().is_empty());
        assert_eq!(f.timer.focus_log().len(), 30);
        f.timer.reset();
        assert!(f.timer.sessions().is_empty());
    }

    #[test]
    fn test_start_without_project_fails() {
        let mut f = fixture();
        assert_eq!(f.timer.start(&f.projects), Err(TimerError::NoActiveProject));
        assert!(!f.timer.is_running());
    }

    #[test]
    fn test_start_with_completed_project_fails() {
        let mut f = fixture();
        f.projects.complete_project(f.project).unwrap();
        f.timer.set_active_project(Some(f.project));
        assert_eq!(f.timer.start(&f.projects), Err(TimerError::NoActiveProject));
    }

    #[test]
    fn test_break_starts_without_project() {
        let mut f = fixture();
        f.timer.switch_mode(Mode::ShortBreak);
        assert!(f.timer.start(&f.projects).is_ok());
        assert!(f.timer.is_running());
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut f = running_focus();
        assert_eq!(f.timer.start(&f.projects), Err(TimerError::AlreadyRunning));

        advance_and_poll(&mut f, 1);
        assert_eq!(f.timer.seconds_remaining(), 1499);
    }

    #[test]
    fn test_ticks_follow_clock() {
        let mut f = running_focus();
        assert_eq!(advance_and_poll(&mut f, 0), 0);
        assert_eq!(f.timer.next_tick_in(), Some(TICK_INTERVAL));

        f.clock.advance(Duration::from_millis(400));
        assert_eq!(f.timer.poll(&f.projects), 0);
        assert_eq!(f.timer.next_tick_in(), Some(Duration::from_millis(600)));

        f.clock.advance(Duration::from_millis(600));
        assert_eq!(f.timer.poll(&f.projects), 1);
        assert_eq!(advance_and_poll(&mut f, 3), 3);
        assert_eq!(f.timer.seconds_remaining(), 1496);
    }

    #[test]
    fn test_pause_mid_focus_records_interrupted_session() {
        let mut f = running_focus();
        advance_and_poll(&mut f, 10);

        f.timer.pause().unwrap();

        let records = f.timer.sessions().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, SessionStatus::Interrupted);
        assert_eq!(records[0].project_id, Some(f.project));
        assert_eq!(records[0].duration_seconds, 1500);
        assert_eq!(records[0].elapsed(), Duration::from_secs(10));

        let entries = f.timer.focus_log().entries();
        assert_eq!(entries.len(), 10);
        assert!(entries.iter().all(|e| e.project_id == f.project && e.project_name == "P"));
        assert_eq!(f.timer.next_tick_in(), None);
    }

    #[test]
    fn test_paused_run_counts_toward_today() {
        let mut f = running_focus();
        advance_and_poll(&mut f, 10);
        f.timer.pause().unwrap();

        let stats = FocusStats::compute(
            StatsWindow::Today,
            f.clock.now().with_timezone(&Local),
            f.timer.focus_log(),
            f.timer.sessions(),
            &f.projects,
        );
        assert_eq!(stats.focus_seconds, 10);
        assert_eq!(stats.interrupted_sessions, 1);
    }

    #[test]
    fn test_pause_twice_is_rejected() {
        let mut f = running_focus();
        advance_and_poll(&mut f, 5);
        f.timer.pause().unwrap();

        assert_eq!(f.timer.pause(), Err(TimerError::NotRunning));
        assert_eq!(f.timer.sessions().len(), 1);
    }

    #[test]
    fn test_paused_timer_does_not_tick() {
        let mut f = running_focus();
        f.timer.pause().unwrap();
        assert_eq!(advance_and_poll(&mut f, 5), 0);

        f.timer.tick(&f.projects);
        assert_eq!(f.timer.seconds_remaining(), 1500);
        assert!(f.timer.focus_log().is_empty());
    }

    #[test]
    fn test_natural_focus_completion() {
        let mut f = fixture();
        f.timer.set_active_project(Some(f.project));
        f.timer.set_time_manually("0:01").unwrap();
        f.timer.start(&f.projects).unwrap();
        f.timer.drain_events();

        advance_and_poll(&mut f, 1);

        let records = f.timer.sessions().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, SessionStatus::Completed);
        assert_eq!(f.timer.completed_pomodoros(), 1);
        assert_eq!(f.timer.mode(), Mode::ShortBreak);
        assert_eq!(f.timer.seconds_remaining(), 300);
        assert!(!f.timer.is_running());
        assert_eq!(f.timer.focus_log().len(), 1);

        let events = f.timer.drain_events();
        assert!(events.contains(&TimerEvent::CycleCompleted {
            finished: Mode::Focus,
            completed_pomodoros: 1,
        }));
        assert_eq!(events.last(), Some(&TimerEvent::ModeChanged(Mode::ShortBreak)));
    }

    #[test]
    fn test_boundary_tick_completes_without_logging() {
        let mut f = fixture();
        f.timer.set_active_project(Some(f.project));
        f.timer.set_time_manually("00:00").unwrap();
        f.timer.start(&f.projects).unwrap();

        advance_and_poll(&mut f, 1);

        assert!(f.timer.focus_log().is_empty());
        assert_eq!(f.timer.mode(), Mode::ShortBreak);
        assert_eq!(f.timer.sessions().records()[0].status, SessionStatus::Completed);
    }

    #[test]
    fn test_break_completion_returns_to_focus() {
        let mut f = fixture();
        f.timer.switch_mode(Mode::LongBreak);
        f.timer.set_time_manually("0:02").unwrap();
        f.timer.start(&f.projects).unwrap();

        advance_and_poll(&mut f, 2);

        assert_eq!(f.timer.mode(), Mode::Focus);
        assert_eq!(f.timer.seconds_remaining(), 1500);
        assert!(f.timer.sessions().is_empty());
        assert!(f.timer.focus_log().is_empty());
        assert_eq!(f.timer.completed_pomodoros(), 0);
    }

    #[test]
    fn test_pomodoro_counter_wraps() {
        let mut f = fixture();
        f.timer.set_active_project(Some(f.project));
        f.timer.restore_completed_pomodoros(4);

        f.timer.set_time_manually("0:01").unwrap();
        f.timer.start(&f.projects).unwrap();
        advance_and_poll(&mut f, 1);

        assert_eq!(f.timer.completed_pomodoros(), 0);
    }

    #[test]
    fn test_restore_wraps_counter() {
        let mut f = fixture();
        f.timer.restore_completed_pomodoros(7);
        assert_eq!(f.timer.completed_pomodoros(), 2);
    }

    #[test]
    fn test_full_cycle_never_enters_long_break() {
        let mut f = fixture();
        f.timer.set_active_project(Some(f.project));
        for _ in 0..10 {
            f.timer.set_time_manually("0:01").unwrap();
            f.timer.start(&f.projects).unwrap();
            advance_and_poll(&mut f, 1);
            assert_ne!(f.timer.mode(), Mode::LongBreak);
        }
    }

    #[test]
    fn test_reset_records_interrupted_and_clears_counter() {
        let mut f = running_focus();
        f.timer.restore_completed_pomodoros(3);
        advance_and_poll(&mut f, 20);

        f.timer.reset();

        assert!(!f.timer.is_running());
        assert_eq!(f.timer.seconds_remaining(), 1500);
        assert_eq!(f.timer.completed_pomodoros(), 0);
        assert_eq!(f.timer.sessions().len(), 1);
        assert_eq!(
            f.timer.sessions().records()[0].status,
            SessionStatus::Interrupted
        );
    }

    #[test]
    fn test_reset_after_pause_writes_nothing_more() {
        let mut f = running_focus();
        advance_and_poll(&mut f, 3);
        f.timer.pause().unwrap();
        f.timer.reset();
        assert_eq!(f.timer.sessions().len(), 1);
    }

    #[test]
    fn test_set_time_manually() {
        let mut f = fixture();
        f.timer.set_time_manually("05:30").unwrap();
        assert_eq!(f.timer.seconds_remaining(), 330);
        assert!(f.timer.sessions().is_empty());

        assert_eq!(
            f.timer.set_time_manually("99:60"),
            Err(TimerError::TimeOutOfRange)
        );
        assert_eq!(
            f.timer.set_time_manually("5:3"),
            Err(TimerError::InvalidTimeFormat)
        );
        assert_eq!(f.timer.seconds_remaining(), 330);
    }

    #[test]
    fn test_set_time_while_running_fails() {
        let mut f = running_focus();
        assert_eq!(
            f.timer.set_time_manually("10:00"),
            Err(TimerError::EditWhileRunning)
        );
        assert_eq!(f.timer.seconds_remaining(), 1500);
    }

    #[test]
    fn test_manual_time_above_duration_extends_span() {
        let mut f = fixture();
        f.timer.set_time_manually("45:00").unwrap();

        let snapshot = f.timer.snapshot();
        assert_eq!(snapshot.seconds_remaining, 2700);
        assert_eq!(snapshot.total_seconds, 2700);
        assert_eq!(snapshot.progress(), 0.0);

        f.timer.switch_mode(Mode::Focus);
        assert_eq!(f.timer.snapshot().total_seconds, 1500);
    }

    #[test]
    fn test_remaining_stays_within_span() {
        let mut f = fixture();
        f.timer.set_active_project(Some(f.project));
        f.timer.set_time_manually("0:03").unwrap();
        f.timer.start(&f.projects).unwrap();

        for _ in 0..10 {
            advance_and_poll(&mut f, 1);
            let s = f.timer.snapshot();
            assert!(s.seconds_remaining <= s.total_seconds);
        }
    }

    #[test]
    fn test_parse_manual_time() {
        assert_eq!(parse_manual_time("5:30"), Ok(330));
        assert_eq!(parse_manual_time(" 99:59 "), Ok(5999));
        assert_eq!(parse_manual_time("0:00"), Ok(0));
        assert_eq!(parse_manual_time("100:00"), Err(TimerError::InvalidTimeFormat));
        assert_eq!(parse_manual_time("12"), Err(TimerError::InvalidTimeFormat));
        assert_eq!(parse_manual_time(":30"), Err(TimerError::InvalidTimeFormat));
        assert_eq!(parse_manual_time("1:+5"), Err(TimerError::InvalidTimeFormat));
        assert_eq!(parse_manual_time("10:75"), Err(TimerError::TimeOutOfRange));
    }

    #[test]
    fn test_focus_log_uses_current_project_name() {
        let mut f = running_focus();
        advance_and_poll(&mut f, 2);
        f.timer.pause().unwrap();

        let other = f.projects.add_project("Q", "").unwrap();
        f.timer.set_active_project(Some(other));
        f.timer.start(&f.projects).unwrap();
        advance_and_poll(&mut f, 3);

        let names: Vec<_> = f
            .timer
            .focus_log()
            .entries()
            .iter()
            .map(|e| e.project_name.as_str())
            .collect();
        assert_eq!(names, vec!["P", "P", "Q", "Q", "Q"]);
    }

    #[test]
    fn test_deleted_project_logs_without_name() {
        let mut f = running_focus();
        f.projects.delete_project(f.project).unwrap();
        advance_and_poll(&mut f, 1);

        let entry = &f.timer.focus_log().entries()[0];
        assert_eq!(entry.project_id, f.project);
        assert!(entry.project_name.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut f = fixture();
        f.timer.set_active_project(Some(f.project));

        f.timer.toggle(&f.projects).unwrap();
        assert!(f.timer.is_running());
        f.timer.toggle(&f.projects).unwrap();
        assert!(!f.timer.is_running());
    }

    #[test]
    fn test_reconfigure_is_full_reset() {
        let mut f = running_focus();
        f.timer.restore_completed_pomodoros(2);
        advance_and_poll(&mut f, 5);

        let config = Config {
            focus_minutes: 50,
            ..Config::default()
        };
        f.timer.reconfigure(&config);

        assert!(!f.timer.is_running());
        assert_eq!(f.timer.mode(), Mode::Focus);
        assert_eq!(f.timer.seconds_remaining(), 3000);
        assert_eq!(f.timer.completed_pomodoros(), 2);
        assert_eq!(f.timer.active_project(), Some(f.project));
        assert!(f.timer.sessions().is_empty());
    }

    #[test]
    fn test_tick_events() {
        let mut f = running_focus();
        f.timer.drain_events();
        advance_and_poll(&mut f, 2);

        let events = f.timer.drain_events();
        assert_eq!(events.len(), 2);
        let TimerEvent::Tick(snapshot) = events[1] else {
            panic!("expected a tick event");
        };
        assert_eq!(snapshot.format_remaining(), "24:58");
        assert!(snapshot.running);
        assert!(f.timer.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_progress() {
        let snapshot = TimerSnapshot {
            mode: Mode::Focus,
            seconds_remaining: 750,
            total_seconds: 1500,
            running: true,
            completed_pomodoros: 0,
        };
        assert!((snapshot.progress() - 0.5).abs() < f64::EPSILON);
        assert_eq!(snapshot.format_remaining(), "12:30");
    }
}
