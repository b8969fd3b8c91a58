use crate::domain::Page;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the current page
pub fn render_keybindings(f: &mut Frame, page: Page, area: Rect) {
    let hints = match page {
        Page::Queue => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Shift+↑/↓ reorder   "),
            Span::raw("Enter engage   "),
            Span::raw("c complete   "),
            Span::raw("r reset   "),
            Span::raw("x delete   "),
            Span::raw("a add   "),
            Span::raw("e edit   "),
            Span::raw("Tab page   "),
            Span::raw("q quit"),
        ]),
        Page::Timer => Line::from(vec![
            Span::raw(" Space pause/resume   "),
            Span::raw("c complete   "),
            Span::raw("Esc back   "),
            Span::raw("Tab page   "),
            Span::raw("q quit"),
        ]),
        Page::Receipt => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("x delete entry   "),
            Span::raw("Tab page   "),
            Span::raw("q quit"),
        ]),
        Page::Calendar => Line::from(vec![
            Span::raw(" ←/→ month   "),
            Span::raw("t today   "),
            Span::raw("Tab page   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
