use crate::app::AppState;
use crate::domain::{Page, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handle a keyboard event. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::AddingTask | UiMode::EditingTask => {
            handle_form_mode(app, key);
            false
        }
    }
}

fn next_page(page: Page) -> Page {
    match page {
        Page::Queue => Page::Timer,
        Page::Timer => Page::Receipt,
        Page::Receipt => Page::Calendar,
        Page::Calendar => Page::Queue,
    }
}

fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    // Page-independent keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Tab => {
            if app.page == Page::Timer {
                // Leaving the timer view commits the live delta; the task
                // keeps running and a fresh session begins on return
                app.flush_session(now);
            }
            app.page = next_page(app.page);
            return false;
        }
        _ => {}
    }

    match app.page {
        Page::Queue => handle_queue_keys(app, key, now),
        Page::Timer => handle_timer_keys(app, key, now),
        Page::Receipt => handle_receipt_keys(app, key, now),
        Page::Calendar => handle_calendar_keys(app, key),
    }

    false
}

fn handle_queue_keys(app: &mut AppState, key: KeyEvent, now: Instant) {
    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_selected_up();
            } else {
                app.move_selection_up();
            }
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_selected_down();
            } else {
                app.move_selection_down();
            }
        }

        // Start the selected task and open the timer on it
        KeyCode::Enter => app.engage_selected(now),

        // Start/stop in place
        KeyCode::Char(' ') => {
            let selected = app.selected_task_id();
            let running = app.tasks.running().map(|t| t.id);
            match selected {
                Some(id) if running == Some(id) => app.stop_running(now),
                Some(id) => {
                    app.flush_session(now);
                    app.tasks.start_task(id);
                }
                None => {}
            }
        }

        // Complete
        KeyCode::Char('c') | KeyCode::Char('C') => {
            if let Some(id) = app.selected_task_id() {
                app.complete_task(id, now);
            }
        }

        // Reset accumulated time
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if let Some(id) = app.selected_task_id() {
                app.reset_task(id, now);
            }
        }

        // Delete
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            if let Some(id) = app.selected_task_id() {
                app.delete_task(id, now);
            }
        }

        // Add / edit
        KeyCode::Char('a') | KeyCode::Char('A') => app.open_add_form(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.open_edit_form(),

        _ => {}
    }
}

fn handle_timer_keys(app: &mut AppState, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char(' ') => app.toggle_timer_target(now),
        KeyCode::Char('c') | KeyCode::Char('C') => {
            if let Some(id) = app.timer_target {
                app.complete_task(id, now);
            }
        }
        KeyCode::Esc => app.leave_timer(now),
        _ => {}
    }
}

fn handle_receipt_keys(app: &mut AppState, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Up => {
            if app.receipt_index > 0 {
                app.receipt_index -= 1;
            }
        }
        KeyCode::Down => {
            let len = app.tasks.completed().len();
            if app.receipt_index + 1 < len {
                app.receipt_index += 1;
            }
        }
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            let id = app.tasks.completed().get(app.receipt_index).map(|t| t.id);
            if let Some(id) = id {
                app.delete_task(id, now);
            }
        }
        _ => {}
    }
}

fn handle_calendar_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.calendar_prev_month(),
        KeyCode::Right => app.calendar_next_month(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.calendar_today(),
        _ => {}
    }
}

fn handle_form_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            if let Some(form) = &mut app.form {
                form.editing_field = 1 - form.editing_field;
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = &mut app.form {
                match form.editing_field {
                    0 => {
                        form.title.pop();
                    }
                    _ => {
                        form.estimate.pop();
                    }
                }
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = &mut app.form {
                match form.editing_field {
                    0 => form.title.push(c),
                    // Digits only, so the estimate always parses
                    _ => {
                        if c.is_ascii_digit() {
                            form.estimate.push(c);
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryRepository;
    use crate::shell::NoopShell;
    use crate::store::{CheckInStore, TaskStore};

    fn app() -> AppState {
        AppState::new(
            TaskStore::open(Box::new(MemoryRepository::new())),
            CheckInStore::open(Box::new(MemoryRepository::new())),
            Box::new(NoopShell),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        assert!(handle_key(&mut app, press(KeyCode::Char('q')), Instant::now()));
        assert!(!handle_key(&mut app, press(KeyCode::Char('j')), Instant::now()));
    }

    #[test]
    fn test_tab_cycles_pages() {
        let mut app = app();
        let now = Instant::now();

        for expected in [Page::Timer, Page::Receipt, Page::Calendar, Page::Queue] {
            handle_key(&mut app, press(KeyCode::Tab), now);
            assert_eq!(app.page, expected);
        }
    }

    #[test]
    fn test_enter_engages_selected_task() {
        let mut app = app();
        let id = app.tasks.add_task("Focus", 10).unwrap();

        handle_key(&mut app, press(KeyCode::Enter), Instant::now());
        assert_eq!(app.page, Page::Timer);
        assert_eq!(app.tasks.running().map(|t| t.id), Some(id));
    }

    #[test]
    fn test_form_typing_filters_estimate_digits() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('a')), Instant::now());
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        for c in "Deep work".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)), Instant::now());
        }
        handle_key(&mut app, press(KeyCode::Tab), Instant::now());
        // Clear the default estimate, then type a mixed string
        handle_key(&mut app, press(KeyCode::Backspace), Instant::now());
        handle_key(&mut app, press(KeyCode::Backspace), Instant::now());
        for c in "4x5".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)), Instant::now());
        }

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.title, "Deep work");
        assert_eq!(form.estimate, "45");

        handle_key(&mut app, press(KeyCode::Enter), Instant::now());
        assert_eq!(app.tasks.tasks().len(), 1);
        assert_eq!(app.tasks.tasks()[0].title, "Deep work");
        assert_eq!(app.tasks.tasks()[0].estimate_minutes, 45);
    }

    #[test]
    fn test_escape_cancels_form() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('a')), Instant::now());
        handle_key(&mut app, press(KeyCode::Esc), Instant::now());

        assert!(app.form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.tasks.tasks().is_empty());
    }

    #[test]
    fn test_receipt_delete_removes_entry() {
        let mut app = app();
        let id = app.tasks.add_task("Done", 5).unwrap();
        app.tasks.complete_task(id);
        app.page = Page::Receipt;

        handle_key(&mut app, press(KeyCode::Char('x')), Instant::now());
        assert!(app.tasks.get(id).is_none());
    }
}
