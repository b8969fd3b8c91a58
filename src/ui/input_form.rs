use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.editing_id.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };

        let mut lines = Vec::new();
        lines.push(Line::raw(""));

        let title_label = if form.editing_field == 0 {
            "Title: (editing)"
        } else {
            "Title:"
        };
        lines.push(Line::raw(title_label));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.title.clone(), modal_title_style()),
            if form.editing_field == 0 {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]));
        lines.push(Line::raw(""));

        let estimate_label = if form.editing_field == 1 {
            "Time limit (minutes): (editing)"
        } else {
            "Time limit (minutes):"
        };
        lines.push(Line::raw(estimate_label));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.estimate.clone(), modal_title_style()),
            if form.editing_field == 1 {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]));
        lines.push(Line::raw(""));

        if form.is_valid() {
            lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));
        } else {
            // Submission is disabled until both fields are valid
            lines.push(Line::from(Span::styled(
                "Title and a positive time limit required",
                hint_style(),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
