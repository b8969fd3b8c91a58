use crate::app::AppState;
use crate::domain::{format_clock, format_hm, Task, TaskStatus};
use crate::report::today_stats;
use crate::store::today;
use crate::ui::styles::{
    border_style, default_style, idle_style, overtime_style, running_style, selected_style,
    title_style,
};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the dashboard tiles: today's total time and completed count
pub fn render_stats(f: &mut Frame, app: &AppState, area: Rect) {
    let stats = today_stats(app.tasks.tasks(), today());

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let uptime = Paragraph::new(Line::from(vec![
        Span::styled("TOTAL UPTIME  ", idle_style()),
        Span::styled(format_hm(stats.total_seconds), title_style()),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(border_style()));
    f.render_widget(uptime, tiles[0]);

    let done = Paragraph::new(Line::from(vec![
        Span::styled("COMPLETED  ", idle_style()),
        Span::styled(stats.completed_count.to_string(), title_style()),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(border_style()));
    f.render_widget(done, tiles[1]);
}

/// Create a single line for a queued task
fn create_task_line(task: &Task) -> Line<'static> {
    let mut spans = Vec::new();

    let marker = if task.status == TaskStatus::Running {
        "▶ "
    } else {
        "  "
    };
    spans.push(Span::raw(marker.to_string()));
    spans.push(Span::raw(task.title.clone()));
    spans.push(Span::raw("  ".to_string()));

    let time_str = format!(
        "LIMIT {}m · ELAPSED {}  ",
        task.estimate_minutes,
        format_clock(task.actual_seconds)
    );
    spans.push(Span::raw(time_str));

    let badge_style = match task.status {
        TaskStatus::Running if task.is_over_estimate() => overtime_style(),
        TaskStatus::Running => running_style(),
        _ => idle_style(),
    };
    spans.push(Span::styled(task.status.badge().to_string(), badge_style));

    Line::from(spans)
}

/// Render the active task queue
pub fn render_queue_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let active = app.tasks.active();

    let items: Vec<ListItem> = if active.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "QUEUE EMPTY. AWAITING INPUT.",
            idle_style(),
        )))]
    } else {
        active
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let line = create_task_line(task);
                let style = if idx == app.selected_index {
                    selected_style()
                } else {
                    default_style()
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let date = Local::now().format("%a %b %d");
    let title = format!(" Mission Queue ({}) ", date);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
