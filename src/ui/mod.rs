pub mod calendar_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod queue_pane;
pub mod receipt_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::Page;
use calendar_pane::render_calendar_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::{create_page_layout, create_queue_layout};
use queue_pane::{render_queue_pane, render_stats};
use ratatui::Frame;
use receipt_pane::render_receipt_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();

    match app.page {
        Page::Queue => {
            let layout = create_queue_layout(size);
            render_keybindings(f, app.page, layout.keybindings_area);
            render_stats(f, app, layout.stats_area);
            render_queue_pane(f, app, layout.list_area);
        }
        Page::Timer => {
            let layout = create_page_layout(size);
            render_keybindings(f, app.page, layout.keybindings_area);
            render_timer_pane(f, app, layout.body_area);
        }
        Page::Receipt => {
            let layout = create_page_layout(size);
            render_keybindings(f, app.page, layout.keybindings_area);
            render_receipt_pane(f, app, layout.body_area);
        }
        Page::Calendar => {
            let layout = create_page_layout(size);
            render_keybindings(f, app.page, layout.keybindings_area);
            render_calendar_pane(f, app, layout.body_area);
        }
    }

    // Render input form if active
    if app.form.is_some() {
        render_input_form(f, app, size);
    }
}
