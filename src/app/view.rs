//! View enum and navigation helpers

/// Current view being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Countdown, mode selection and active project
    #[default]
    Timer,
    /// Active projects with their checkpoints and tasks
    Projects,
    /// Focus statistics for the selected window
    Stats,
}

impl View {
    /// Views in tab order
    pub const ALL: [View; 3] = [View::Timer, View::Projects, View::Stats];

    /// Tab title
    pub fn title(&self) -> &'static str {
        match self {
            View::Timer => "Timer",
            View::Projects => "Projects",
            View::Stats => "Stats",
        }
    }

    /// Next view in tab order, wrapping around
    pub fn next(&self) -> View {
        match self {
            View::Timer => View::Projects,
            View::Projects => View::Stats,
            View::Stats => View::Timer,
        }
    }

    /// Previous view in tab order, wrapping around
    pub fn prev(&self) -> View {
        match self {
            View::Timer => View::Stats,
            View::Projects => View::Timer,
            View::Stats => View::Projects,
        }
    }

    /// Position in [`View::ALL`]
    pub fn index(&self) -> usize {
        match self {
            View::Timer => 0,
            View::Projects => 1,
            View::Stats => 2,
        }
    }
}
