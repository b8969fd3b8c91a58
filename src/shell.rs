use crate::domain::format_clock;

/// Desktop-integration boundary for the timer.
///
/// The timer core only sees this trait; absence of a real surface is the
/// no-op implementation, not an error. Both hooks are fire-and-forget with
/// no retry semantics.
pub trait ShellSurface {
    /// Report the clamped non-negative remaining seconds; called on every
    /// tick while a task is running
    fn update_remaining(&self, seconds: u64);

    /// One-shot "time's up" notification, fired when remaining crosses
    /// zero
    fn notify_finished(&self, title: &str, body: &str);
}

/// Surface for plain-terminal contexts and tests
pub struct NoopShell;

impl ShellSurface for NoopShell {
    fn update_remaining(&self, _seconds: u64) {}
    fn notify_finished(&self, _title: &str, _body: &str) {}
}

/// Surface that mirrors the countdown into the terminal title and posts a
/// system notification on finish
pub struct DesktopShell;

impl ShellSurface for DesktopShell {
    fn update_remaining(&self, seconds: u64) {
        use crossterm::{execute, terminal::SetTitle};
        let _ = execute!(
            std::io::stdout(),
            SetTitle(format!("stint {}", format_clock(seconds)))
        );
    }

    fn notify_finished(&self, title: &str, body: &str) {
        send_notification(title, body);
    }
}

/// Send a system notification, discarding all failures
#[cfg(target_os = "macos")]
fn send_notification(title: &str, body: &str) {
    use std::process::Command;

    let script = format!(
        r#"display notification "{}" with title "{}""#,
        body.replace('"', "\\\""),
        title.replace('"', "\\\"")
    );

    let _ = Command::new("osascript").arg("-e").arg(&script).output();
}

#[cfg(target_os = "linux")]
fn send_notification(title: &str, body: &str) {
    use std::process::Command;

    let _ = Command::new("notify-send").arg(title).arg(body).output();
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn send_notification(_title: &str, _body: &str) {
    // No-op on other platforms
}
