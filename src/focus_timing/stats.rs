//! Statistics calculations for focus timing
//!
//! Everything here is computed fresh from the focus log, the session log and
//! the project store on every query. Only focus time and session counts are
//! windowed; completed task and project counts are lifetime totals.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::session::{SessionLog, SessionStatus};
use super::tracker::FocusLog;
use crate::project::ProjectStore;

/// Bucket for focus seconds whose project name is missing or blank
pub const NO_PROJECT_LABEL: &str = "No project selected";

/// Time window for statistics, always ending now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatsWindow {
    #[default]
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "last-7-days")]
    Last7Days,
    #[serde(rename = "last-28-days")]
    Last28Days,
}

impl StatsWindow {
    pub const ALL: [StatsWindow; 3] = [
        StatsWindow::Today,
        StatsWindow::Last7Days,
        StatsWindow::Last28Days,
    ];

    /// Calendar days covered, today included
    pub fn days(&self) -> u32 {
        match self {
            StatsWindow::Today => 1,
            StatsWindow::Last7Days => 7,
            StatsWindow::Last28Days => 28,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsWindow::Today => "Today",
            StatsWindow::Last7Days => "7 Days",
            StatsWindow::Last28Days => "28 Days",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            StatsWindow::Today => StatsWindow::Last7Days,
            StatsWindow::Last7Days => StatsWindow::Last28Days,
            StatsWindow::Last28Days => StatsWindow::Today,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            StatsWindow::Today => StatsWindow::Last28Days,
            StatsWindow::Last7Days => StatsWindow::Today,
            StatsWindow::Last28Days => StatsWindow::Last7Days,
        }
    }

    /// First calendar day in the window
    pub fn first_day(&self, now: DateTime<Local>) -> NaiveDate {
        now.date_naive() - chrono::Duration::days(i64::from(self.days()) - 1)
    }

    /// Local midnight that opens the window
    pub fn window_start(&self, now: DateTime<Local>) -> DateTime<Utc> {
        let midnight = self.first_day(now).and_time(NaiveTime::MIN);
        first_valid_instant(midnight, |local| {
            Local
                .from_local_datetime(local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        })
    }
}

/// Step used to walk past a gap in local time
const GAP_STEP_MINUTES: i64 = 15;

/// Widest daylight saving gap we walk across
const MAX_GAP_MINUTES: i64 = 180;

/// First instant at or after `local` that exists in the local time zone
///
/// Midnight can fall inside a daylight saving gap; the window then opens at
/// the first local time after the gap.
fn first_valid_instant<F>(local: NaiveDateTime, resolve: F) -> DateTime<Utc>
where
    F: Fn(&NaiveDateTime) -> Option<DateTime<Utc>>,
{
    (0..=MAX_GAP_MINUTES)
        .step_by(GAP_STEP_MINUTES as usize)
        .find_map(|minutes| resolve(&(local + chrono::Duration::minutes(minutes))))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

/// Focus seconds attributed to one project name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFocus {
    pub name: String,
    pub seconds: u64,
}

/// Aggregated statistics for one window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusStats {
    pub window: StatsWindow,
    /// Focus log entries in the window, one per second
    pub focus_seconds: u64,
    /// Lifetime count of completed tasks
    pub completed_tasks: usize,
    /// Lifetime count of completed projects
    pub completed_projects: usize,
    /// Focus time per recorded project name, most time first
    pub per_project: Vec<ProjectFocus>,
    /// Whole focus minutes per local calendar day, every day of the window
    pub daily_minutes: BTreeMap<NaiveDate, u64>,
    /// Completed focus sessions that ended in the window
    pub completed_sessions: usize,
    /// Interrupted focus sessions that ended in the window
    pub interrupted_sessions: usize,
}

impl FocusStats {
    /// Compute statistics for `window` ending at `now`
    pub fn compute(
        window: StatsWindow,
        now: DateTime<Local>,
        focus_log: &FocusLog,
        sessions: &SessionLog,
        projects: &ProjectStore,
    ) -> Self {
        let start = window.window_start(now);

        let mut focus_seconds = 0;
        let mut by_name: HashMap<&str, u64> = HashMap::new();
        let mut daily_seconds: BTreeMap<NaiveDate, u64> = BTreeMap::new();

        for entry in focus_log.entries_since(start) {
            focus_seconds += 1;

            let name = entry.project_name.trim();
            let name = if name.is_empty() { NO_PROJECT_LABEL } else { name };
            *by_name.entry(name).or_default() += 1;

            let day = entry.timestamp.with_timezone(&Local).date_naive();
            *daily_seconds.entry(day).or_default() += 1;
        }

        let mut per_project: Vec<ProjectFocus> = by_name
            .into_iter()
            .map(|(name, seconds)| ProjectFocus {
                name: name.to_string(),
                seconds,
            })
            .collect();
        per_project.sort_by(|a, b| b.seconds.cmp(&a.seconds).then_with(|| a.name.cmp(&b.name)));

        let daily_minutes = window
            .first_day(now)
            .iter_days()
            .take(window.days() as usize)
            .map(|day| (day, daily_seconds.get(&day).copied().unwrap_or(0) / 60))
            .collect();

        let (completed_sessions, interrupted_sessions) =
            sessions
                .ended_since(start)
                .fold((0, 0), |(done, interrupted), r| match r.status {
                    SessionStatus::Completed => (done + 1, interrupted),
                    SessionStatus::Interrupted => (done, interrupted + 1),
                });

        Self {
            window,
            focus_seconds,
            completed_tasks: projects.completed_task_count(),
            completed_projects: projects.completed_project_count(),
            per_project,
            daily_minutes,
            completed_sessions,
            interrupted_sessions,
        }
    }
}

/// Format focused seconds as "Xh Ym"
pub fn format_focus_time(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus_timing::Mode;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn local_noon(days_ago: i64) -> DateTime<Local> {
        let date = Local::now().date_naive() - chrono::Duration::days(days_ago);
        Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .earliest()
            .unwrap()
    }

    fn log_seconds(log: &mut FocusLog, name: &str, at: DateTime<Local>, count: u32) {
        let project = Uuid::new_v4();
        for i in 0..count {
            let ts = at.with_timezone(&Utc) + chrono::Duration::seconds(i64::from(i));
            log.log_focus_second(Mode::Focus, true, Some((project, name)), ts);
        }
    }

    fn empty_store() -> ProjectStore {
        ProjectStore::with_path(PathBuf::from("/nonexistent/projects.json"))
    }

    #[test]
    fn test_window_cycle() {
        let mut window = StatsWindow::Today;
        for _ in 0..3 {
            window = window.next();
        }
        assert_eq!(window, StatsWindow::Today);
        assert_eq!(StatsWindow::Today.prev(), StatsWindow::Last28Days);
        assert_eq!(StatsWindow::Last7Days.prev().next(), StatsWindow::Last7Days);
    }

    #[test]
    fn test_window_serialization() {
        assert_eq!(
            serde_json::to_string(&StatsWindow::Last7Days).unwrap(),
            "\"last-7-days\""
        );
        let parsed: StatsWindow = serde_json::from_str("\"last-28-days\"").unwrap();
        assert_eq!(parsed, StatsWindow::Last28Days);
    }

    #[test]
    fn test_window_start_is_local_midnight() {
        let now = local_noon(0);
        let start = StatsWindow::Today.window_start(now).with_timezone(&Local);
        assert_eq!(start.date_naive(), now.date_naive());
        assert_eq!(start.time(), NaiveTime::MIN);

        let week = StatsWindow::Last7Days.window_start(now).with_timezone(&Local);
        assert_eq!(
            week.date_naive(),
            now.date_naive() - chrono::Duration::days(6)
        );
    }

    #[test]
    fn test_window_start_skips_daylight_saving_gap() {
        // A UTC-3 zone whose clocks jump from 00:00 straight to 01:00
        let midnight = NaiveDate::from_ymd_opt(2024, 9, 8)
            .unwrap()
            .and_time(NaiveTime::MIN);
        let resolve = |local: &NaiveDateTime| {
            (local.time() >= NaiveTime::from_hms_opt(1, 0, 0).unwrap())
                .then(|| Utc.from_utc_datetime(&(*local + chrono::Duration::hours(3))))
        };

        let start = first_valid_instant(midnight, resolve);
        assert_eq!(
            start.naive_utc(),
            midnight + chrono::Duration::hours(4),
            "window opens at 01:00 local, not at midnight read as UTC"
        );

        let unresolvable = first_valid_instant(midnight, |_| None);
        assert_eq!(unresolvable.naive_utc(), midnight);
    }

    #[test]
    fn test_today_excludes_entries_before_midnight() {
        let now = local_noon(0);
        let mut log = FocusLog::in_memory();
        log_seconds(&mut log, "P", local_noon(1), 30);
        log_seconds(&mut log, "P", local_noon(0) - chrono::Duration::hours(1), 10);

        let store = empty_store();
        let sessions = SessionLog::in_memory();

        let today = FocusStats::compute(StatsWindow::Today, now, &log, &sessions, &store);
        assert_eq!(today.focus_seconds, 10);

        let week = FocusStats::compute(StatsWindow::Last7Days, now, &log, &sessions, &store);
        assert_eq!(week.focus_seconds, 40);
    }

    #[test]
    fn test_lifetime_counts_ignore_window() {
        let mut store = empty_store();
        let project = store.add_project("Done", "").unwrap();
        let checkpoint = store.add_checkpoint(project, "cp", "", None).unwrap();
        let task = store.add_task(project, checkpoint, "t").unwrap();
        store.toggle_task(project, task).unwrap();
        store.complete_project(project).unwrap();

        let log = FocusLog::in_memory();
        let sessions = SessionLog::in_memory();
        let now = local_noon(0);

        for window in StatsWindow::ALL {
            let stats = FocusStats::compute(window, now, &log, &sessions, &store);
            assert_eq!(stats.completed_tasks, 1);
            assert_eq!(stats.completed_projects, 1);
        }
    }

    #[test]
    fn test_per_project_breakdown_sorted() {
        let now = local_noon(0);
        let mut log = FocusLog::in_memory();
        log_seconds(&mut log, "Alpha", now - chrono::Duration::hours(2), 5);
        log_seconds(&mut log, "Beta", now - chrono::Duration::hours(1), 9);
        log_seconds(&mut log, "  ", now - chrono::Duration::minutes(30), 3);
        log_seconds(&mut log, "", now - chrono::Duration::minutes(10), 2);

        let stats = FocusStats::compute(
            StatsWindow::Today,
            now,
            &log,
            &SessionLog::in_memory(),
            &empty_store(),
        );

        let breakdown: Vec<_> = stats
            .per_project
            .iter()
            .map(|p| (p.name.as_str(), p.seconds))
            .collect();
        assert_eq!(
            breakdown,
            vec![("Beta", 9), ("Alpha", 5), (NO_PROJECT_LABEL, 5)]
        );
    }

    #[test]
    fn test_daily_minutes_floor() {
        let now = local_noon(0);
        let mut log = FocusLog::in_memory();
        log_seconds(&mut log, "P", local_noon(2), 150);
        log_seconds(&mut log, "P", now - chrono::Duration::hours(3), 59);

        let stats = FocusStats::compute(
            StatsWindow::Last7Days,
            now,
            &log,
            &SessionLog::in_memory(),
            &empty_store(),
        );

        assert_eq!(stats.daily_minutes.len(), 7);
        assert_eq!(stats.daily_minutes[&local_noon(2).date_naive()], 2);
        assert_eq!(stats.daily_minutes[&now.date_naive()], 0);
        assert_eq!(stats.daily_minutes.values().sum::<u64>(), 2);
    }

    #[test]
    fn test_session_counts_in_window() {
        let now = local_noon(0);
        let mut sessions = SessionLog::in_memory();
        let project = Some(Uuid::new_v4());
        let earlier = (now - chrono::Duration::hours(1)).with_timezone(&Utc);
        let yesterday = local_noon(1).with_timezone(&Utc);

        for (end, status) in [
            (earlier, SessionStatus::Completed),
            (earlier, SessionStatus::Interrupted),
            (earlier, SessionStatus::Interrupted),
            (yesterday, SessionStatus::Completed),
        ] {
            sessions.record(
                project,
                Mode::Focus,
                1500,
                end - chrono::Duration::minutes(25),
                end,
                status,
            );
        }

        let today = FocusStats::compute(
            StatsWindow::Today,
            now,
            &FocusLog::in_memory(),
            &sessions,
            &empty_store(),
        );
        assert_eq!(today.completed_sessions, 1);
        assert_eq!(today.interrupted_sessions, 2);
    }

    #[test]
    fn test_format_focus_time() {
        assert_eq!(format_focus_time(0), "0h 0m");
        assert_eq!(format_focus_time(59), "0h 0m");
        assert_eq!(format_focus_time(3660), "1h 1m");
        assert_eq!(format_focus_time(26 * 3600 + 120), "26h 2m");
    }
}
