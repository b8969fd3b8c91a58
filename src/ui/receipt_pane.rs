use crate::app::AppState;
use crate::domain::{format_hms, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, idle_style, selected_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn create_receipt_line(task: &Task) -> Line<'static> {
    Line::from(vec![
        Span::styled("✓ ".to_string(), done_style()),
        Span::styled(task.title.to_uppercase(), default_style()),
        Span::raw("  ".to_string()),
        Span::styled(format_hms(task.actual_seconds), done_style()),
    ])
}

/// Render the completed-task receipt page
pub fn render_receipt_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let completed = app.tasks.completed();

    let mut items: Vec<ListItem> = Vec::new();

    if completed.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "NO COMPLETED TASKS YET",
            idle_style(),
        ))));
    } else {
        for (idx, task) in completed.iter().enumerate() {
            let style = if idx == app.receipt_index {
                selected_style()
            } else {
                default_style()
            };
            items.push(ListItem::new(create_receipt_line(task)).style(style));
        }

        let total: u64 = completed.iter().map(|t| t.actual_seconds).sum();
        items.push(ListItem::new(Line::raw("")));
        items.push(ListItem::new(Line::from(vec![
            Span::styled("TOTAL QTY  ".to_string(), idle_style()),
            Span::raw(completed.len().to_string()),
        ])));
        items.push(ListItem::new(Line::from(vec![
            Span::styled("TOTAL TIME ".to_string(), idle_style()),
            Span::styled(format_hms(total), title_style()),
        ])));
    }

    let stamp = Local::now().format("%Y-%m-%d %H:%M");
    let title = format!(" Output Log ({}) ", stamp);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;

    #[test]
    fn test_create_receipt_line() {
        let mut task = Task::new("Write report".to_string(), 25);
        task.actual_seconds = 1500;
        task.status = TaskStatus::Completed;

        let line = create_receipt_line(&task);
        let line_str = format!("{:?}", line);
        assert!(line_str.contains("WRITE REPORT"));
        assert!(line_str.contains("00:25:00"));
    }
}
