use crate::app::AppState;
use crate::domain::format_clock;
use crate::ui::styles::{
    border_style, countdown_style, idle_style, muted_style, overtime_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the countdown / count-up page
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Current Operation ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Unknown target id degrades to a not-found state
    let Some(task) = app.timer_task() else {
        let message = if app.timer_target.is_some() {
            "TASK NOT FOUND"
        } else {
            "AWAITING MISSION INITIALIZATION"
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, idle_style())))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, centered_rows(inner, 1));
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Task title + estimate
            Constraint::Length(3), // Big countdown
            Constraint::Length(2), // Elapsed
            Constraint::Min(0),
        ])
        .split(inner);

    let header = vec![
        Line::from(Span::raw(task.title.clone())).alignment(Alignment::Center),
        Line::from(Span::styled(
            format!("LIMIT {}m", task.estimate_minutes),
            muted_style(),
        ))
        .alignment(Alignment::Center),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    // The cached view is only present while the task is actually running
    match app.timer_view {
        Some(view) if view.overtime => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("+{}", format_clock(view.overtime_seconds)),
                    overtime_style(),
                ))
                .alignment(Alignment::Center),
                Line::from(Span::styled("COUNT UP", overtime_style())).alignment(Alignment::Center),
            ];
            f.render_widget(Paragraph::new(lines), chunks[1]);

            render_elapsed(f, view.elapsed_seconds, chunks[2]);
        }
        Some(view) => {
            let lines = vec![
                Line::from(Span::styled(
                    format_clock(view.remaining_seconds.max(0) as u64),
                    countdown_style(),
                ))
                .alignment(Alignment::Center),
                Line::from(Span::styled("REMAINING", muted_style())).alignment(Alignment::Center),
            ];
            f.render_widget(Paragraph::new(lines), chunks[1]);

            render_elapsed(f, view.elapsed_seconds, chunks[2]);
        }
        None => {
            // Target exists but is paused or completed; show the frozen
            // countdown
            let remaining = task.remaining_seconds().max(0) as u64;
            let lines = vec![
                Line::from(Span::styled(format_clock(remaining), idle_style()))
                    .alignment(Alignment::Center),
                Line::from(Span::styled("PAUSED · Space to resume", muted_style()))
                    .alignment(Alignment::Center),
            ];
            f.render_widget(Paragraph::new(lines), chunks[1]);

            render_elapsed(f, task.actual_seconds, chunks[2]);
        }
    }
}

fn render_elapsed(f: &mut Frame, elapsed_seconds: u64, area: Rect) {
    let lines = vec![
        Line::from(Span::raw(format_clock(elapsed_seconds))).alignment(Alignment::Center),
        Line::from(Span::styled("ELAPSED", muted_style())).alignment(Alignment::Center),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Shrink an area to `height` rows, vertically centered
fn centered_rows(area: Rect, height: u16) -> Rect {
    let offset = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x,
        y: area.y + offset,
        width: area.width,
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rows() {
        let area = Rect::new(0, 10, 80, 9);
        let centered = centered_rows(area, 1);
        assert_eq!(centered.y, 14);
        assert_eq!(centered.height, 1);

        // Never taller than the parent
        let tiny = Rect::new(0, 0, 80, 0);
        assert_eq!(centered_rows(tiny, 3).height, 0);
    }
}
