//! View rendering modules
//!
//! Each view in the application has its own module for rendering logic. The
//! frame is split into a header with the view tabs, the view itself, and a
//! footer with key hints.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::app::{InputMode, View};
use crate::focus_timing::TimerSnapshot;
use crate::tui::theme::theme;

mod confirm;
mod notifications;
mod projects;
mod stats;
mod timer;

pub use confirm::{render_confirm_dialog, render_input_dialog, ConfirmDialogConfig};
pub use notifications::render_notifications;
pub use projects::render_projects_view;
pub use stats::render_stats_view;
pub use timer::render_timer_view;

/// Split the frame into header, body and footer
pub fn frame_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // View
            Constraint::Length(3), // Footer
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Render the view tabs, with the countdown on the right while it runs
pub fn render_header(frame: &mut Frame, area: Rect, view: View, snapshot: &TimerSnapshot) {
    let t = theme();
    let block = Block::default().borders(Borders::BOTTOM);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(22)])
        .split(inner);

    let titles: Vec<Line> = View::ALL.iter().map(|v| Line::from(v.title())).collect();
    let tabs = Tabs::new(titles)
        .select(view.index())
        .style(t.muted_style())
        .highlight_style(t.header_style())
        .divider("|");
    frame.render_widget(tabs, chunks[0]);

    if snapshot.running {
        let status = Paragraph::new(format!(
            "{} {}",
            snapshot.mode.label(),
            snapshot.format_remaining()
        ))
        .style(
            Style::default()
                .fg(t.mode_color(snapshot.mode))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Right);
        frame.render_widget(status, chunks[1]);
    }
}

/// Render the key hints for the current view and input mode
pub fn render_footer(frame: &mut Frame, area: Rect, view: View, input_mode: InputMode) {
    let footer = Paragraph::new(key_hints(view, input_mode))
        .style(theme().muted_style())
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

/// Key hints shown in the footer
pub fn key_hints(view: View, input_mode: InputMode) -> &'static str {
    match input_mode {
        InputMode::ConfirmingProjectDelete => "y: confirm delete | n/Esc: cancel",
        mode if mode.is_text_input() => "Enter: save | Esc: cancel",
        _ => match view {
            View::Timer => {
                "Space: start/pause | r: reset | f/b/l: mode | e: edit time | p: project | s: settings | Tab: view | q: quit"
            }
            View::Projects => {
                "j/k: move | Enter: activate | n/c/t: new project/checkpoint/task | x: toggle | e: edit | C: complete | d: delete"
            }
            View::Stats => "h/l: change window | Tab: view | q: quit",
        },
    }
}

/// A rectangle of at most `width` x `height`, centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(5, 5, 20, 8);
        assert_eq!(centered_rect(50, 10, area), area);
    }

    #[test]
    fn test_key_hints_follow_input_mode() {
        assert_eq!(
            key_hints(View::Timer, InputMode::EditingTime),
            "Enter: save | Esc: cancel"
        );
        assert!(key_hints(View::Stats, InputMode::Normal).contains("h/l"));
        assert!(key_hints(View::Projects, InputMode::ConfirmingProjectDelete).starts_with("y:"));
    }
}
