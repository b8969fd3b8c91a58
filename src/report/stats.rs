use crate::domain::{Task, TaskStatus};
use crate::store::CheckInStore;
use chrono::NaiveDate;

/// Dashboard numbers for tasks created today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodayStats {
    pub completed_count: usize,
    pub total_seconds: u64,
}

/// Read-side summary of a check-in month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub total_seconds: u64,
    pub work_days: usize,
}

/// Aggregate today's tasks: completed count and total accumulated time
/// across every task created on `today`, whatever its status
pub fn today_stats(tasks: &[Task], today: NaiveDate) -> TodayStats {
    let today_tasks = tasks.iter().filter(|task| task.created_on() == today);

    let mut completed_count = 0;
    let mut total_seconds = 0;
    for task in today_tasks {
        if task.status == TaskStatus::Completed {
            completed_count += 1;
        }
        total_seconds += task.actual_seconds;
    }

    TodayStats {
        completed_count,
        total_seconds,
    }
}

/// Aggregate a check-in month
pub fn month_summary(checkins: &CheckInStore, year: i32, month: u32) -> MonthSummary {
    MonthSummary {
        total_seconds: checkins.monthly_total(year, month),
        work_days: checkins.work_days(year, month),
    }
}
