//! Timer view
//!
//! Mode tabs, the countdown, a progress gauge, the pomodoro dots and the
//! active project.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Tabs};

use crate::focus_timing::timer::POMODOROS_PER_SET;
use crate::focus_timing::{Mode, TimerSnapshot};
use crate::project::Project;
use crate::tui::theme::theme;

/// Render the timer view
pub fn render_timer_view(
    frame: &mut Frame,
    area: Rect,
    snapshot: &TimerSnapshot,
    active_project: Option<&Project>,
) {
    let t = theme();
    let color = t.mode_color(snapshot.mode);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Mode tabs
            Constraint::Min(0),    // Spacer
            Constraint::Length(2), // Countdown
            Constraint::Length(1), // Progress
            Constraint::Length(2), // Status
            Constraint::Length(2), // Pomodoro dots
            Constraint::Length(1), // Active project
            Constraint::Min(0),    // Spacer
        ])
        .split(inner);

    let mode_titles: Vec<Line> = Mode::ALL.iter().map(|m| Line::from(m.label())).collect();
    let mode_index = Mode::ALL.iter().position(|m| *m == snapshot.mode).unwrap_or(0);
    let tabs = Tabs::new(mode_titles)
        .select(mode_index)
        .style(t.muted_style())
        .highlight_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .divider(" ");
    frame.render_widget(tabs, centered_row(chunks[0], 34));

    let countdown = Paragraph::new(snapshot.format_remaining())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(countdown, chunks[2]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(snapshot.progress().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, centered_row(chunks[3], 40));

    let status = if snapshot.running { "Running" } else { "Paused" };
    let status = Paragraph::new(status)
        .style(t.muted_style())
        .alignment(Alignment::Center);
    frame.render_widget(status, chunks[4]);

    let dots = Paragraph::new(pomodoro_dots(snapshot.completed_pomodoros))
        .style(Style::default().fg(t.mode_focus))
        .alignment(Alignment::Center);
    frame.render_widget(dots, chunks[5]);

    let project_line = match active_project {
        Some(project) => Line::from(vec![
            Span::styled("Project: ", t.muted_style()),
            Span::styled(project.label(), Style::default().fg(t.text).bold()),
            Span::styled(format!("  ({} tasks)", project.progress()), t.muted_style()),
        ]),
        None => Line::from(Span::styled(
            "No project selected (p to choose)",
            t.muted_style(),
        )),
    };
    frame.render_widget(
        Paragraph::new(project_line).alignment(Alignment::Center),
        chunks[6],
    );
}

/// Filled and empty dots for the current set
fn pomodoro_dots(completed: u8) -> String {
    (0..POMODOROS_PER_SET)
        .map(|i| if i < completed { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A horizontally centered slice of `area`
fn centered_row(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
