use super::enums::TaskStatus;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of work with a time estimate and accumulated actual time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID, generated at creation, immutable
    pub id: Uuid,
    /// Task title
    pub title: String,
    /// Estimated duration in minutes (always positive)
    pub estimate_minutes: u32,
    /// Accumulated elapsed time in seconds
    pub actual_seconds: u64,
    /// Current lifecycle status
    pub status: TaskStatus,
    /// When the task was created (groups tasks into "today" stats)
    pub created_at: DateTime<Local>,
}

impl Task {
    pub fn new(title: String, estimate_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            estimate_minutes,
            actual_seconds: 0,
            status: TaskStatus::Idle,
            created_at: Local::now(),
        }
    }

    /// Estimate expressed in seconds
    pub fn estimate_seconds(&self) -> u64 {
        u64::from(self.estimate_minutes) * 60
    }

    /// Signed seconds left against the estimate (negative in overtime)
    pub fn remaining_seconds(&self) -> i64 {
        self.estimate_seconds() as i64 - self.actual_seconds as i64
    }

    /// Check if accumulated time has reached or exceeded the estimate
    pub fn is_over_estimate(&self) -> bool {
        self.actual_seconds >= self.estimate_seconds()
    }

    /// Local calendar date the task was created on
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Format seconds as "MM:SS" (minutes are not wrapped at the hour)
pub fn format_clock(total_seconds: u64) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Format seconds as "HH:MM:SS"
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

/// Format seconds as "Xh Ym" (omits zero components, "0m" when empty)
pub fn format_hm(total_seconds: u64) -> String {
    let total_minutes = total_seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new() {
        let task = Task::new("Write report".to_string(), 25);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.estimate_minutes, 25);
        assert_eq!(task.actual_seconds, 0);
        assert_eq!(task.status, TaskStatus::Idle);
    }

    #[test]
    fn test_estimate_seconds() {
        let task = Task::new("Test".to_string(), 25);
        assert_eq!(task.estimate_seconds(), 1500);
    }

    #[test]
    fn test_remaining_goes_negative_in_overtime() {
        let mut task = Task::new("Test".to_string(), 1);
        task.actual_seconds = 61;
        assert_eq!(task.remaining_seconds(), -1);
        assert!(task.is_over_estimate());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1500), "25:00");
        // Minutes keep counting past the hour
        assert_eq!(format_clock(3661), "61:01");
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(1500), "00:25:00");
        assert_eq!(format_hms(3661), "01:01:01");
    }

    #[test]
    fn test_format_hm() {
        assert_eq!(format_hm(0), "0m");
        assert_eq!(format_hm(45 * 60), "45m");
        assert_eq!(format_hm(3600), "1h");
        assert_eq!(format_hm(90 * 60), "1h 30m");
    }

    #[test]
    fn test_task_round_trips_through_json() {
        let task = Task::new("Serialize me".to_string(), 15);
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, task.id);
        assert_eq!(back.title, task.title);
        assert_eq!(back.status, TaskStatus::Idle);
    }
}
