use crate::domain::{Page, Task, UiMode};
use crate::shell::ShellSurface;
use crate::store::{today, CheckInStore, TaskStore};
use crate::timer::{TimerSession, TimerView};
use chrono::{Datelike, NaiveDate};
use std::time::Instant;
use uuid::Uuid;

/// Input form state for adding or editing a task
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub title: String,
    /// Digits-only estimate buffer, in minutes
    pub estimate: String,
    /// 0 = title, 1 = estimate
    pub editing_field: usize,
    /// Some when editing an existing task
    pub editing_id: Option<Uuid>,
}

impl InputFormState {
    /// Fresh form for adding a task
    pub fn for_add() -> Self {
        Self {
            title: String::new(),
            estimate: "15".to_string(),
            editing_field: 0,
            editing_id: None,
        }
    }

    /// Form prefilled from an existing task
    pub fn for_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            estimate: task.estimate_minutes.to_string(),
            editing_field: 0,
            editing_id: Some(task.id),
        }
    }

    pub fn estimate_minutes(&self) -> Option<u32> {
        self.estimate.parse::<u32>().ok().filter(|m| *m > 0)
    }

    /// Submission stays disabled until both fields are valid
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && self.estimate_minutes().is_some()
    }
}

/// Main application state.
///
/// Explicitly constructed container wiring the stores, the optional timer
/// session, and the shell surface together; passed by reference to the
/// render and input layers.
pub struct AppState {
    pub tasks: TaskStore,
    pub checkins: CheckInStore,
    pub shell: Box<dyn ShellSurface>,
    pub session: Option<TimerSession>,
    /// Display values cached by the last tick, None while no task runs
    pub timer_view: Option<TimerView>,
    pub page: Page,
    pub ui_mode: UiMode,
    pub form: Option<InputFormState>,
    /// Selection in the active queue
    pub selected_index: usize,
    /// Selection in the receipt list
    pub receipt_index: usize,
    /// Task targeted by the timer page; an unknown id renders not-found
    pub timer_target: Option<Uuid>,
    /// First day of the month the calendar pane displays
    pub calendar_month: NaiveDate,
}

impl AppState {
    pub fn new(tasks: TaskStore, checkins: CheckInStore, shell: Box<dyn ShellSurface>) -> Self {
        let month_start = today().with_day(1).unwrap_or_else(today);
        Self {
            tasks,
            checkins,
            shell,
            session: None,
            timer_view: None,
            page: Page::Queue,
            ui_mode: UiMode::Normal,
            form: None,
            selected_index: 0,
            receipt_index: 0,
            timer_target: None,
            calendar_month: month_start,
        }
    }

    /// Advance one tick: reconcile the timer session against the store,
    /// refresh the cached display values, and fire the shell hooks.
    pub fn tick(&mut self, now: Instant) {
        let running = self
            .tasks
            .running()
            .map(|t| (t.id, t.actual_seconds, t.estimate_minutes, t.title.clone()));

        // A session whose task is gone, stopped, or replaced is flushed
        // before anything else happens (flush-before-discard).
        let session_task = self.session.as_ref().map(TimerSession::task_id);
        let running_id = running.as_ref().map(|(id, ..)| *id);
        if session_task.is_some() && session_task != running_id {
            self.flush_session(now);
        }

        let Some((id, actual_seconds, estimate_minutes, title)) = running else {
            self.timer_view = None;
            return;
        };

        let session = self
            .session
            .get_or_insert_with(|| TimerSession::begin(id, actual_seconds, now));

        let effects = session.tick(estimate_minutes, now);
        self.timer_view = Some(session.view(estimate_minutes, now));

        self.shell.update_remaining(effects.display_remaining);
        if effects.notify_finished {
            self.shell.notify_finished(
                "TIME UP",
                &format!("Time limit reached for \"{}\".", title),
            );
        }
    }

    /// Commit the active session's unsaved delta into both stores,
    /// exactly once, and discard the session. Safe to call when no
    /// session is active. Must run on every teardown path: explicit
    /// stop, task switch, page change, process exit.
    pub fn flush_session(&mut self, now: Instant) {
        if let Some(mut session) = self.session.take() {
            if let Some(elapsed) = session.take_unsaved(now) {
                self.tasks.add_elapsed(session.task_id(), elapsed);
                self.checkins.add_work_time(today(), elapsed);
            }
        }
    }

    // --- queue selection -------------------------------------------------

    fn active_len(&self) -> usize {
        self.tasks.active().len()
    }

    /// Keep the selection inside the active list after mutations
    pub fn clamp_selection(&mut self) {
        let len = self.active_len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }

        let completed = self.tasks.completed().len();
        if completed == 0 {
            self.receipt_index = 0;
        } else if self.receipt_index >= completed {
            self.receipt_index = completed - 1;
        }
    }

    pub fn selected_task_id(&self) -> Option<Uuid> {
        self.tasks.active().get(self.selected_index).map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.active_len() {
            self.selected_index += 1;
        }
    }

    fn active_id_at(&self, index: usize) -> Option<Uuid> {
        self.tasks.active().get(index).map(|t| t.id)
    }

    /// Swap the selected task with its neighbour above
    pub fn move_selected_up(&mut self) {
        if self.selected_index == 0 {
            return;
        }
        let (Some(source), Some(target)) = (
            self.active_id_at(self.selected_index),
            self.active_id_at(self.selected_index - 1),
        ) else {
            return;
        };
        self.tasks.reorder(source, target);
        self.selected_index -= 1;
    }

    /// Swap the selected task with its neighbour below
    pub fn move_selected_down(&mut self) {
        let (Some(source), Some(target)) = (
            self.active_id_at(self.selected_index),
            self.active_id_at(self.selected_index + 1),
        ) else {
            return;
        };
        // Pulling the lower neighbour into the selected slot moves the
        // selection down one row
        self.tasks.reorder(target, source);
        self.selected_index += 1;
    }

    // --- task lifecycle from the UI --------------------------------------

    /// Start the selected task and open the timer page on it
    pub fn engage_selected(&mut self, now: Instant) {
        if let Some(id) = self.selected_task_id() {
            self.flush_session(now);
            self.tasks.start_task(id);
            self.timer_target = Some(id);
            self.page = Page::Timer;
        }
    }

    /// Stop the running task, committing its session first
    pub fn stop_running(&mut self, now: Instant) {
        let Some(id) = self.tasks.running().map(|t| t.id) else {
            return;
        };
        self.flush_session(now);
        self.tasks.stop_task(id);
        self.timer_view = None;
    }

    /// Toggle the running state of the timer page's target
    pub fn toggle_timer_target(&mut self, now: Instant) {
        let Some(id) = self.timer_target else { return };
        if self.tasks.running().map(|t| t.id) == Some(id) {
            self.stop_running(now);
        } else if self.tasks.get(id).is_some() {
            self.flush_session(now);
            self.tasks.start_task(id);
        }
    }

    /// Complete a task, committing the session first when it is the one
    /// being timed
    pub fn complete_task(&mut self, id: Uuid, now: Instant) {
        if self.session.as_ref().map(TimerSession::task_id) == Some(id) {
            self.flush_session(now);
        }
        self.tasks.complete_task(id);
        self.clamp_selection();
    }

    pub fn reset_task(&mut self, id: Uuid, now: Instant) {
        if self.session.as_ref().map(TimerSession::task_id) == Some(id) {
            self.flush_session(now);
        }
        self.tasks.reset_task(id);
    }

    pub fn delete_task(&mut self, id: Uuid, now: Instant) {
        if self.session.as_ref().map(TimerSession::task_id) == Some(id) {
            self.flush_session(now);
        }
        self.tasks.delete_task(id);
        if self.timer_target == Some(id) {
            self.timer_target = None;
        }
        self.clamp_selection();
    }

    // --- timer page -------------------------------------------------------

    /// Resolve the timer page's target; None covers both "no target" and
    /// "unknown id" (the pane distinguishes via `timer_target`)
    pub fn timer_task(&self) -> Option<&Task> {
        self.timer_target.and_then(|id| self.tasks.get(id))
    }

    /// Leave the timer page, committing any active session
    pub fn leave_timer(&mut self, now: Instant) {
        self.flush_session(now);
        self.timer_view = None;
        self.page = Page::Queue;
    }

    // --- input form -------------------------------------------------------

    pub fn open_add_form(&mut self) {
        self.form = Some(InputFormState::for_add());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        if let Some(task) = self.tasks.get(id) {
            self.form = Some(InputFormState::for_task(task));
            self.ui_mode = UiMode::EditingTask;
        }
    }

    /// Submit the form if valid; an invalid form stays open
    pub fn submit_form(&mut self) {
        let Some(form) = &self.form else { return };
        if !form.is_valid() {
            return;
        }

        let title = form.title.clone();
        let estimate = form.estimate_minutes().unwrap_or(15);
        match form.editing_id {
            Some(id) => self.tasks.update_meta(id, Some(&title), Some(estimate)),
            None => {
                self.tasks.add_task(&title, estimate);
            }
        }

        self.form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- calendar ---------------------------------------------------------

    pub fn calendar_prev_month(&mut self) {
        let (year, month) = (self.calendar_month.year(), self.calendar_month.month());
        let (year, month) = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
        if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
            self.calendar_month = first;
        }
    }

    pub fn calendar_next_month(&mut self) {
        let (year, month) = (self.calendar_month.year(), self.calendar_month.month());
        let (year, month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
            self.calendar_month = first;
        }
    }

    pub fn calendar_today(&mut self) {
        self.calendar_month = today().with_day(1).unwrap_or_else(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryRepository;
    use crate::shell::{NoopShell, ShellSurface};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn app() -> AppState {
        AppState::new(
            TaskStore::open(Box::new(MemoryRepository::new())),
            CheckInStore::open(Box::new(MemoryRepository::new())),
            Box::new(NoopShell),
        )
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    /// Shell surface that records every hook call
    #[derive(Default)]
    struct RecordingShell {
        remaining: Rc<RefCell<Vec<u64>>>,
        notifications: Rc<RefCell<Vec<String>>>,
    }

    impl ShellSurface for RecordingShell {
        fn update_remaining(&self, seconds: u64) {
            self.remaining.borrow_mut().push(seconds);
        }

        fn notify_finished(&self, title: &str, _body: &str) {
            self.notifications.borrow_mut().push(title.to_string());
        }
    }

    #[test]
    fn test_flush_on_teardown_reports_exactly_once() {
        let mut app = app();
        let id = app.tasks.add_task("Focus", 10).unwrap();
        app.tasks.start_task(id);

        let t0 = Instant::now();
        app.tick(t0);
        assert!(app.session.is_some());

        // Teardown without an explicit stop, 5 simulated seconds in
        app.flush_session(t0 + secs(5));

        assert_eq!(app.tasks.get(id).unwrap().actual_seconds, 5);
        assert_eq!(app.checkins.work_time(crate::store::today()), 5);

        // A second teardown must not double-report
        app.flush_session(t0 + secs(9));
        assert_eq!(app.tasks.get(id).unwrap().actual_seconds, 5);
        assert_eq!(app.checkins.work_time(crate::store::today()), 5);
    }

    #[test]
    fn test_tick_flushes_when_running_task_stops() {
        let mut app = app();
        let id = app.tasks.add_task("Focus", 10).unwrap();
        app.tasks.start_task(id);

        let t0 = Instant::now();
        app.tick(t0);

        // The store stops the task behind the timer's back; the next tick
        // reconciles and commits the delta
        app.tasks.stop_task(id);
        app.tick(t0 + secs(7));

        assert!(app.session.is_none());
        assert!(app.timer_view.is_none());
        assert_eq!(app.tasks.get(id).unwrap().actual_seconds, 7);
    }

    #[test]
    fn test_tick_rolls_session_over_to_new_running_task() {
        let mut app = app();
        let a = app.tasks.add_task("A", 10).unwrap();
        let b = app.tasks.add_task("B", 10).unwrap();

        let t0 = Instant::now();
        app.tasks.start_task(a);
        app.tick(t0);

        // Starting b idles a inside the store; the next tick flushes a's
        // session and begins b's
        app.tasks.start_task(b);
        app.tick(t0 + secs(10));

        assert_eq!(app.tasks.get(a).unwrap().actual_seconds, 10);
        assert_eq!(app.session.as_ref().unwrap().task_id(), b);

        app.flush_session(t0 + secs(25));
        assert_eq!(app.tasks.get(b).unwrap().actual_seconds, 15);
    }

    #[test]
    fn test_shell_hooks_fire_on_boundary() {
        let shell = RecordingShell::default();
        let remaining = Rc::clone(&shell.remaining);
        let notifications = Rc::clone(&shell.notifications);

        let mut app = AppState::new(
            TaskStore::open(Box::new(MemoryRepository::new())),
            CheckInStore::open(Box::new(MemoryRepository::new())),
            Box::new(shell),
        );
        let id = app.tasks.add_task("Sprint", 1).unwrap();
        app.tasks.start_task(id);

        let t0 = Instant::now();
        app.tick(t0 + secs(0));
        app.tick(t0 + secs(59));
        app.tick(t0 + secs(60));
        app.tick(t0 + secs(61));

        assert_eq!(*remaining.borrow(), vec![60, 1, 0, 0]);
        // One-shot, despite remaining staying at zero afterwards
        assert_eq!(notifications.borrow().len(), 1);
        assert_eq!(notifications.borrow()[0], "TIME UP");
    }

    #[test]
    fn test_write_report_scenario() {
        let mut app = app();
        let id = app.tasks.add_task("Write report", 25).unwrap();
        {
            let task = app.tasks.get(id).unwrap();
            assert_eq!(task.estimate_minutes, 25);
            assert_eq!(task.actual_seconds, 0);
            assert_eq!(task.status, crate::domain::TaskStatus::Idle);
        }

        app.tasks.start_task(id);
        assert_eq!(app.tasks.running().unwrap().id, id);

        app.tasks.add_elapsed(id, 1500);
        let t0 = Instant::now();
        app.complete_task(id, t0);

        // Excluded from the active queue, present on the receipt with 25m
        assert!(app.tasks.active().is_empty());
        let completed = app.tasks.completed();
        assert_eq!(completed.len(), 1);
        assert_eq!(crate::domain::format_hms(completed[0].actual_seconds), "00:25:00");
    }

    #[test]
    fn test_engage_selected_switches_to_timer_page() {
        let mut app = app();
        let id = app.tasks.add_task("Focus", 10).unwrap();

        app.engage_selected(Instant::now());
        assert_eq!(app.page, Page::Timer);
        assert_eq!(app.timer_target, Some(id));
        assert_eq!(app.tasks.running().unwrap().id, id);
    }

    #[test]
    fn test_timer_task_degrades_on_unknown_id() {
        let mut app = app();
        app.timer_target = Some(Uuid::new_v4());
        assert!(app.timer_task().is_none());
    }

    #[test]
    fn test_delete_clears_timer_target() {
        let mut app = app();
        let id = app.tasks.add_task("Doomed", 5).unwrap();
        app.timer_target = Some(id);

        app.delete_task(id, Instant::now());
        assert!(app.timer_target.is_none());
        assert!(app.tasks.get(id).is_none());
    }

    #[test]
    fn test_reset_after_flush_reads_zero() {
        let mut app = app();
        let id = app.tasks.add_task("Focus", 10).unwrap();
        app.tasks.start_task(id);

        let t0 = Instant::now();
        app.tick(t0);
        app.reset_task(id, t0 + secs(30));

        let task = app.tasks.get(id).unwrap();
        assert_eq!(task.actual_seconds, 0);
        assert_eq!(task.status, crate::domain::TaskStatus::Idle);
        // The worked time still reached the daily accumulator
        assert_eq!(app.checkins.work_time(crate::store::today()), 30);
    }

    #[test]
    fn test_move_selected_down_and_up() {
        let mut app = app();
        let a = app.tasks.add_task("A", 5).unwrap();
        let b = app.tasks.add_task("B", 5).unwrap();

        app.move_selected_down();
        let order: Vec<Uuid> = app.tasks.tasks().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![b, a]);
        assert_eq!(app.selected_index, 1);

        app.move_selected_up();
        let order: Vec<Uuid> = app.tasks.tasks().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_form_validation_gates_submission() {
        let mut app = app();
        app.open_add_form();

        // Empty title: submission refused, form stays open
        app.submit_form();
        assert!(app.form.is_some());
        assert!(app.tasks.tasks().is_empty());

        if let Some(form) = &mut app.form {
            form.title = "Valid task".to_string();
            form.estimate = "0".to_string();
        }
        app.submit_form();
        assert!(app.form.is_some());

        if let Some(form) = &mut app.form {
            form.estimate = "25".to_string();
        }
        app.submit_form();
        assert!(app.form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks.tasks().len(), 1);
        assert_eq!(app.tasks.tasks()[0].estimate_minutes, 25);
    }

    #[test]
    fn test_calendar_month_navigation() {
        let mut app = app();
        app.calendar_month = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        app.calendar_prev_month();
        assert_eq!(app.calendar_month, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());

        app.calendar_next_month();
        app.calendar_next_month();
        assert_eq!(app.calendar_month, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
