//! Notification rendering for TUI
//!
//! Renders notifications in the top-right corner of the screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::notifications::{Notification, NotificationType};
use crate::tui::theme::theme;

/// Width of notification popups
const NOTIFICATION_WIDTH: u16 = 42;
/// Height of each notification
const NOTIFICATION_HEIGHT: u16 = 4;
/// Margin from screen edge
const NOTIFICATION_MARGIN: u16 = 1;

/// Render notifications stacked from the top-right corner
pub fn render_notifications(frame: &mut Frame, area: Rect, notifications: &[&Notification]) {
    let t = theme();

    for (i, notification) in notifications.iter().enumerate() {
        let y = area.y + NOTIFICATION_MARGIN + i as u16 * NOTIFICATION_HEIGHT;
        if y + NOTIFICATION_HEIGHT > area.bottom() {
            break;
        }

        let notif_area = Rect {
            x: area
                .right()
                .saturating_sub(NOTIFICATION_WIDTH + NOTIFICATION_MARGIN)
                .max(area.x),
            y,
            width: NOTIFICATION_WIDTH.min(area.width),
            height: NOTIFICATION_HEIGHT,
        };

        let color = match &notification.notification_type {
            NotificationType::CycleComplete { finished, .. } => t.mode_color(*finished),
            NotificationType::Info { .. } => t.accent,
            NotificationType::Warning { .. } => t.border_warning,
        };

        let title = format!(
            " {} ({}s) ",
            notification.notification_type.title(),
            notification.remaining_time().as_secs()
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(title, Style::default().fg(color).bold()));

        let paragraph = Paragraph::new(notification.notification_type.message())
            .style(Style::default().fg(t.text))
            .block(block)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, notif_area);
        frame.render_widget(paragraph, notif_area);
    }
}
