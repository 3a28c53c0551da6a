//! Projects view
//!
//! Active projects as a tree of checkpoints and tasks, with task progress
//! and the active-project marker.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::ProjectRow;
use crate::project::{Progress, ProjectId, ProjectStore};
use crate::tui::theme::{parse_hex_color, theme};

/// Render the projects view
pub fn render_projects_view(
    frame: &mut Frame,
    area: Rect,
    store: &ProjectStore,
    rows: &[ProjectRow],
    selected: usize,
    active_project: Option<ProjectId>,
) {
    let t = theme();
    let title = format!(
        " Projects ({} active, {} completed) ",
        store.active_projects().len(),
        store.completed_project_count()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border))
        .title(title);

    if rows.is_empty() {
        let empty = Paragraph::new("No projects yet.\n\nPress 'n' to create one.")
            .style(t.muted_style())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .filter_map(|row| row_line(store, row, active_project))
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(t.selected_style())
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default().with_selected(Some(selected.min(rows.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row_line(
    store: &ProjectStore,
    row: &ProjectRow,
    active_project: Option<ProjectId>,
) -> Option<Line<'static>> {
    let t = theme();
    let project = store.get_project(row.project_id())?;

    let line = match *row {
        ProjectRow::Project(id) => {
            let mut spans = vec![
                Span::styled(project.label(), Style::default().fg(t.text).bold()),
                Span::styled(progress_label(project.progress()), t.muted_style()),
            ];
            if active_project == Some(id) {
                spans.push(Span::styled("  ★ active", Style::default().fg(t.mode_focus)));
            }
            Line::from(spans)
        }
        ProjectRow::Checkpoint(_, checkpoint_id) => {
            let checkpoint = project.checkpoint(checkpoint_id)?;
            let color = parse_hex_color(&checkpoint.color).unwrap_or(t.accent);
            Line::from(vec![
                Span::raw("  ◆ "),
                Span::styled(checkpoint.label(), Style::default().fg(color)),
            ])
        }
        ProjectRow::Task(_, checkpoint_id, task_id) => {
            let task = project
                .checkpoint(checkpoint_id)?
                .tasks
                .iter()
                .find(|task| task.id == task_id)?;
            let (mark, style) = if task.completed {
                (
                    "[x]",
                    Style::default()
                        .fg(t.done)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ]", Style::default().fg(t.text))
            };
            Line::from(vec![
                Span::raw("      "),
                Span::styled(format!("{} {}", mark, task.text), style),
            ])
        }
    };
    Some(line)
}

/// "  [done/total, NN%]", or just the counts when there are no tasks
fn progress_label(progress: Progress) -> String {
    if progress.total == 0 {
        format!("  [{}]", progress)
    } else {
        format!("  [{}, {:.0}%]", progress, progress.ratio() * 100.0)
    }
}
