//! Focus statistics view
//!
//! Window tabs, totals, the per-project breakdown and a bar chart of focus
//! minutes per day.

use ratatui::prelude::*;
use ratatui::widgets::{BarChart, Block, Borders, List, ListItem, Paragraph, Tabs};

use crate::focus_timing::stats::{format_focus_time, FocusStats, StatsWindow};
use crate::tui::theme::theme;

/// Render the focus statistics view
pub fn render_stats_view(frame: &mut Frame, area: Rect, stats: &FocusStats) {
    let t = theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Window tabs
            Constraint::Length(6), // Summary
            Constraint::Min(0),    // Breakdown + chart
        ])
        .split(area);

    let titles: Vec<Line> = StatsWindow::ALL
        .iter()
        .map(|w| Line::from(w.label()))
        .collect();
    let selected = StatsWindow::ALL
        .iter()
        .position(|w| *w == stats.window)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(t.muted_style())
        .highlight_style(t.header_style())
        .divider("|");
    frame.render_widget(tabs, chunks[0]);

    render_summary(frame, chunks[1], stats);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    render_project_breakdown(frame, body[0], stats);
    render_daily_chart(frame, body[1], stats);
}

fn render_summary(frame: &mut Frame, area: Rect, stats: &FocusStats) {
    let t = theme();
    let value = |text: String| Span::styled(text, Style::default().fg(t.accent).bold());

    let lines = vec![
        Line::from(vec![
            Span::raw("Focus time: "),
            value(format_focus_time(stats.focus_seconds)),
        ]),
        Line::from(vec![
            Span::raw("Sessions: "),
            value(stats.completed_sessions.to_string()),
            Span::styled(" completed, ", t.muted_style()),
            value(stats.interrupted_sessions.to_string()),
            Span::styled(" interrupted", t.muted_style()),
        ]),
        Line::from(vec![
            Span::raw("Completed tasks: "),
            value(stats.completed_tasks.to_string()),
            Span::raw("   Completed projects: "),
            value(stats.completed_projects.to_string()),
        ]),
        Line::from(Span::styled(
            "Task and project counts are all-time totals",
            t.muted_style().italic(),
        )),
    ];

    let summary = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", stats.window.label())),
    );
    frame.render_widget(summary, area);
}

fn render_project_breakdown(frame: &mut Frame, area: Rect, stats: &FocusStats) {
    let t = theme();
    let block = Block::default().borders(Borders::ALL).title(" By Project ");

    if stats.per_project.is_empty() {
        let empty = Paragraph::new("No focus time in this window")
            .style(t.muted_style())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = stats
        .per_project
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}: ", entry.name)),
                Span::styled(
                    format_focus_time(entry.seconds),
                    Style::default().fg(t.accent),
                ),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn render_daily_chart(frame: &mut Frame, area: Rect, stats: &FocusStats) {
    let t = theme();
    let labels: Vec<(String, u64)> = stats
        .daily_minutes
        .iter()
        .map(|(day, minutes)| (day.format(day_label_format(stats.window)).to_string(), *minutes))
        .collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .map(|(label, minutes)| (label.as_str(), *minutes))
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Focus minutes per day "),
        )
        .data(data.as_slice())
        .bar_width(bar_width(inner_width, data.len()))
        .bar_gap(1)
        .bar_style(Style::default().fg(t.mode_focus))
        .value_style(Style::default().fg(t.text).bold());
    frame.render_widget(chart, area);
}

fn day_label_format(window: StatsWindow) -> &'static str {
    match window {
        StatsWindow::Today | StatsWindow::Last7Days => "%a",
        StatsWindow::Last28Days => "%d",
    }
}

/// Widest bar that fits `bars` bars with one-column gaps in `width`
fn bar_width(width: u16, bars: usize) -> u16 {
    let bars = bars.max(1) as u16;
    (width / bars).saturating_sub(1).clamp(1, 9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(70, 7), 9);
        assert_eq!(bar_width(56, 28), 1);
        assert_eq!(bar_width(10, 28), 1);
        assert_eq!(bar_width(40, 0), 9);
    }
}
