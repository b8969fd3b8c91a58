use crate::domain::{Task, TaskStatus};
use crate::persistence::Repository;
use uuid::Uuid;

/// Ordered task collection with lifecycle operations.
///
/// Every operation is synchronous and total: an unknown id is a silent
/// no-op, never an error. After each mutation the collection is saved
/// through the injected repository, fire-and-forget. Invariant: at most one
/// task is `Running` at any time.
pub struct TaskStore {
    tasks: Vec<Task>,
    repo: Box<dyn Repository<Vec<Task>>>,
}

impl TaskStore {
    /// Open the store, loading the saved snapshot if one exists.
    /// Any load failure falls back to an empty collection.
    pub fn open(repo: Box<dyn Repository<Vec<Task>>>) -> Self {
        let tasks = repo.load().ok().flatten().unwrap_or_default();
        Self { tasks, repo }
    }

    fn persist(&self) {
        // Best-effort: a failed save is not retried and not surfaced.
        let _ = self.repo.save(&self.tasks);
    }

    /// Append a new idle task. Returns the new id, or None when the title
    /// is empty after trimming or the estimate is zero (no mutation).
    pub fn add_task(&mut self, title: &str, estimate_minutes: u32) -> Option<Uuid> {
        let title = title.trim();
        if title.is_empty() || estimate_minutes == 0 {
            return None;
        }

        let task = Task::new(title.to_string(), estimate_minutes);
        let id = task.id;
        self.tasks.push(task);
        self.persist();
        Some(id)
    }

    /// Set the target task running, idling every other running task in the
    /// same pass
    pub fn start_task(&mut self, id: Uuid) {
        if !self.contains(id) {
            return;
        }

        for task in &mut self.tasks {
            if task.id == id {
                task.status = TaskStatus::Running;
            } else if task.status == TaskStatus::Running {
                task.status = TaskStatus::Idle;
            }
        }
        self.persist();
    }

    /// Set the target task idle from any non-completed state.
    /// Does not alter accumulated time.
    pub fn stop_task(&mut self, id: Uuid) {
        if let Some(task) = self.get_mut(id) {
            if task.status != TaskStatus::Completed {
                task.status = TaskStatus::Idle;
                self.persist();
            }
        }
    }

    /// Add elapsed seconds to the task's accumulated time, regardless of
    /// status
    pub fn add_elapsed(&mut self, id: Uuid, seconds: u64) {
        if let Some(task) = self.get_mut(id) {
            task.actual_seconds += seconds;
            self.persist();
        }
    }

    /// Mark the task completed. Completed tasks leave the active queue but
    /// are retained for the receipt.
    pub fn complete_task(&mut self, id: Uuid) {
        if let Some(task) = self.get_mut(id) {
            task.status = TaskStatus::Completed;
            self.persist();
        }
    }

    /// Zero the accumulated time and return the task to idle
    pub fn reset_task(&mut self, id: Uuid) {
        if let Some(task) = self.get_mut(id) {
            task.actual_seconds = 0;
            task.status = TaskStatus::Idle;
            self.persist();
        }
    }

    /// Remove the task permanently
    pub fn delete_task(&mut self, id: Uuid) {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() != before {
            self.persist();
        }
    }

    /// Move the source task to the index the target occupied before the
    /// move. No-op if either id is missing or they are equal.
    pub fn reorder(&mut self, source_id: Uuid, target_id: Uuid) {
        let from = self.tasks.iter().position(|t| t.id == source_id);
        let to = self.tasks.iter().position(|t| t.id == target_id);

        let (Some(from), Some(to)) = (from, to) else {
            return;
        };
        if from == to {
            return;
        }

        let moved = self.tasks.remove(from);
        self.tasks.insert(to, moved);
        self.persist();
    }

    /// In-place edit of display metadata; status and timing untouched.
    /// Empty titles and zero estimates are ignored.
    pub fn update_meta(&mut self, id: Uuid, title: Option<&str>, estimate_minutes: Option<u32>) {
        if let Some(task) = self.get_mut(id) {
            let mut changed = false;

            if let Some(title) = title {
                let title = title.trim();
                if !title.is_empty() {
                    task.title = title.to_string();
                    changed = true;
                }
            }
            if let Some(estimate) = estimate_minutes {
                if estimate > 0 {
                    task.estimate_minutes = estimate;
                    changed = true;
                }
            }

            if changed {
                self.persist();
            }
        }
    }

    fn contains(&self, id: Uuid) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// All tasks in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// The single running task, if any
    pub fn running(&self) -> Option<&Task> {
        self.tasks.iter().find(|task| task.status == TaskStatus::Running)
    }

    /// Non-completed tasks in display order
    pub fn active(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.status.is_active()).collect()
    }

    /// Completed tasks in display order
    pub fn completed(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .collect()
    }
}
