//! Dialog overlays: confirmation and single-line text input

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered_rect;
use crate::tui::theme::theme;

/// Configuration for a confirmation dialog
pub struct ConfirmDialogConfig<'a> {
    /// Dialog title (e.g., "Confirm Delete")
    pub title: &'a str,
    /// Label for the item type (e.g., "project")
    pub item_label: &'a str,
    /// Name of the item being acted on
    pub item_name: &'a str,
    /// Warning lines (displayed in yellow with ⚠ prefix)
    pub warnings: Vec<String>,
}

/// Render a centered delete confirmation dialog
pub fn render_confirm_dialog(frame: &mut Frame, area: Rect, config: ConfirmDialogConfig) {
    let t = theme();
    let height = 7 + 2 * config.warnings.len() as u16;
    let dialog_area = centered_rect(60, height, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("Delete {}: ", config.item_label),
                Style::default().fg(t.text),
            ),
            Span::styled(
                config.item_name,
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(t.text)),
        ]),
        Line::from(""),
    ];

    for warning in &config.warnings {
        lines.push(Line::from(Span::styled(
            format!("⚠  {}", warning),
            Style::default()
                .fg(t.border_warning)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(t.text)),
        Span::styled("y", Style::default().fg(Color::Green).bold()),
        Span::styled(" to confirm, ", Style::default().fg(t.text)),
        Span::styled("n", Style::default().fg(Color::Red).bold()),
        Span::styled(" or ", Style::default().fg(t.text)),
        Span::styled("Esc", Style::default().fg(Color::Red).bold()),
        Span::styled(" to cancel", Style::default().fg(t.text)),
    ]));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border_warning))
            .title(config.title),
    );

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(paragraph, dialog_area);
}

/// Render a centered single-line input dialog
pub fn render_input_dialog(frame: &mut Frame, area: Rect, title: &str, input: &str, hint: &str) {
    let t = theme();
    let dialog_area = centered_rect(56, 7, area);

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  > "),
            Span::styled(format!("{}_", input), t.input_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", hint), t.muted_style())),
    ];

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border_focused))
            .title(title),
    );

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(dialog, dialog_area);
}
