use crate::domain::{format_hms, Task, TaskStatus};
use crate::persistence::{atomic_write, receipt_file};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;

const DIVIDER: &str = "--------------------------------";
const WIDTH: usize = 32;

/// Format a per-task line value as "25M 00S"
fn format_line_time(seconds: u64) -> String {
    format!("{:02}M {:02}S", seconds / 60, seconds % 60)
}

/// One receipt line: uppercased title on the left, time on the right
fn receipt_line(title: &str, seconds: u64) -> String {
    let time = format_line_time(seconds);
    let title = title.to_uppercase();

    // Truncate long titles so the time column stays aligned
    let max_title = WIDTH.saturating_sub(time.len() + 1);
    let title: String = title.chars().take(max_title).collect();

    let padding = WIDTH.saturating_sub(title.chars().count() + time.len());
    format!("{}{}{}", title, " ".repeat(padding), time)
}

/// Render the completed-task receipt as text
pub fn render_receipt(tasks: &[Task], now: DateTime<Local>) -> String {
    let completed: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Completed)
        .collect();

    if completed.is_empty() {
        return "NO COMPLETED TASKS YET\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("{:^width$}\n", "OUTPUT LOG", width = WIDTH));
    out.push_str(&format!(
        "{:^width$}\n",
        now.format("%Y-%m-%d %H:%M"),
        width = WIDTH
    ));
    out.push_str(DIVIDER);
    out.push('\n');

    for task in &completed {
        out.push_str(&receipt_line(&task.title, task.actual_seconds));
        out.push('\n');
    }

    out.push_str(DIVIDER);
    out.push('\n');

    let total_seconds: u64 = completed.iter().map(|task| task.actual_seconds).sum();
    out.push_str(&format!(
        "TOTAL QTY:{:>width$}\n",
        completed.len(),
        width = WIDTH - 10
    ));
    out.push_str(&format!(
        "TOTAL TIME:{:>width$}\n",
        format_hms(total_seconds),
        width = WIDTH - 11
    ));

    out
}

/// Write today's receipt into the data directory (or an explicit path)
/// and return where it landed
pub fn write_receipt(tasks: &[Task], output: Option<PathBuf>) -> Result<PathBuf> {
    let now = Local::now();
    let path = match output {
        Some(path) => path,
        None => receipt_file(now.date_naive())?,
    };

    let content = render_receipt(tasks, now);
    atomic_write(&path, &content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn completed(title: &str, estimate: u32, actual: u64) -> Task {
        let mut task = Task::new(title.to_string(), estimate);
        task.actual_seconds = actual;
        task.status = TaskStatus::Completed;
        task
    }

    #[test]
    fn test_empty_receipt() {
        let receipt = render_receipt(&[], Local::now());
        assert_eq!(receipt, "NO COMPLETED TASKS YET\n");
    }

    #[test]
    fn test_receipt_line_alignment() {
        let line = receipt_line("Write report", 1500);
        assert_eq!(line.chars().count(), WIDTH);
        assert!(line.starts_with("WRITE REPORT"));
        assert!(line.ends_with("25M 00S"));
    }

    #[test]
    fn test_receipt_line_truncates_long_titles() {
        let line = receipt_line("A very long mission title that overflows", 65);
        assert_eq!(line.chars().count(), WIDTH);
        assert!(line.ends_with("01M 05S"));
    }

    #[test]
    fn test_receipt_totals() {
        let tasks = vec![
            completed("Write report", 25, 1500),
            completed("Review notes", 10, 600),
            // Active tasks never appear on the receipt
            Task::new("Still open".to_string(), 15),
        ];

        let receipt = render_receipt(&tasks, Local::now());
        assert!(receipt.contains("WRITE REPORT"));
        assert!(receipt.contains("REVIEW NOTES"));
        assert!(!receipt.contains("STILL OPEN"));
        assert!(receipt.contains("TOTAL QTY:"));
        assert!(receipt.lines().any(|l| l.starts_with("TOTAL QTY:") && l.ends_with('2')));
        assert!(receipt.contains("00:35:00"));
    }

    #[test]
    fn test_single_completed_task_total() {
        // 25 minutes of accumulated work reads as 00:25:00
        let tasks = vec![completed("Write report", 25, 1500)];
        let receipt = render_receipt(&tasks, Local::now());
        assert!(receipt.contains("00:25:00"));
    }

    #[test]
    fn test_write_receipt_to_explicit_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("receipt.txt");
        let tasks = vec![completed("Write report", 25, 1500)];

        let path = write_receipt(&tasks, Some(out.clone())).unwrap();
        assert_eq!(path, out);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("WRITE REPORT"));
    }
}
