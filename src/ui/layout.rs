use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout for the queue page
pub struct QueueLayout {
    pub keybindings_area: Rect,
    pub stats_area: Rect,
    pub list_area: Rect,
}

/// Create the queue page layout
/// - Top bar: keybindings (1 row)
/// - Dashboard tiles (3 rows)
/// - Task list (rest)
pub fn create_queue_layout(area: Rect) -> QueueLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(3), // Dashboard tiles
            Constraint::Min(0),    // Task list
        ])
        .split(area);

    QueueLayout {
        keybindings_area: chunks[0],
        stats_area: chunks[1],
        list_area: chunks[2],
    }
}

/// Layout for the full-pane pages (timer, receipt, calendar)
pub struct PageLayout {
    pub keybindings_area: Rect,
    pub body_area: Rect,
}

pub fn create_page_layout(area: Rect) -> PageLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    PageLayout {
        keybindings_area: chunks[0],
        body_area: chunks[1],
    }
}

/// Centered modal area for the input form
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical[1]);

    horizontal[1]
}
