use serde::{Deserialize, Serialize};

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Idle,
    Running,
    Completed,
}

impl TaskStatus {
    /// Check if the task still belongs in the active queue
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Idle | Self::Running)
    }

    /// Status badge text for the queue pane
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Completed => "DONE",
        }
    }
}

/// Top-level page being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Task queue with dashboard tiles
    Queue,
    /// Countdown / count-up view for a single task
    Timer,
    /// Completed-task receipt
    Receipt,
    /// Daily check-in calendar
    Calendar,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
}
