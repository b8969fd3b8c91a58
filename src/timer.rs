use std::time::Instant;
use uuid::Uuid;

/// One continuous timed stretch of a running task.
///
/// Elapsed time is always recomputed from the absolute start instant,
/// never accumulated by per-tick increments, so the displayed value stays
/// correct across dropped frames, suspension, or slow ticks. All methods
/// take `now` explicitly; tests drive the clock with constructed instants.
#[derive(Debug)]
pub struct TimerSession {
    task_id: Uuid,
    /// The task's accumulated seconds when the session began
    initial_seconds: u64,
    /// Wall-clock reference captured once at session start
    started_at: Instant,
    /// Latch: the elapsed delta has been reported
    saved: bool,
    /// Latch: the time-up notification has fired
    notified: bool,
    /// Remaining seconds observed on the previous tick, for boundary
    /// crossing detection
    last_remaining: Option<i64>,
}

/// Display values derived on every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    /// Task's accumulated seconds plus the live session delta
    pub elapsed_seconds: u64,
    /// Signed seconds left against the estimate
    pub remaining_seconds: i64,
    /// Elapsed time has exceeded the estimate (count-up mode)
    pub overtime: bool,
    /// abs(remaining) while in overtime, 0 otherwise
    pub overtime_seconds: u64,
}

/// Shell hook decisions for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEffects {
    /// Clamped non-negative remaining seconds for the external display
    pub display_remaining: u64,
    /// The remaining value just crossed zero; fire the one-shot
    /// notification
    pub notify_finished: bool,
}

impl TimerSession {
    /// Begin a session for a task observed running. `initial_seconds` is
    /// the task's accumulated time at this moment.
    pub fn begin(task_id: Uuid, initial_seconds: u64, now: Instant) -> Self {
        Self {
            task_id,
            initial_seconds,
            started_at: now,
            saved: false,
            notified: false,
            last_remaining: None,
        }
    }

    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    /// Whole seconds since the session began
    pub fn elapsed_since_start(&self, now: Instant) -> u64 {
        now.duration_since(self.started_at).as_secs()
    }

    /// Baseline plus the live delta: the elapsed value to display
    pub fn displayed_seconds(&self, now: Instant) -> u64 {
        self.initial_seconds + self.elapsed_since_start(now)
    }

    /// Derive the display values for a tick
    pub fn view(&self, estimate_minutes: u32, now: Instant) -> TimerView {
        let elapsed = self.displayed_seconds(now);
        let estimate_seconds = u64::from(estimate_minutes) * 60;
        let remaining = estimate_seconds as i64 - elapsed as i64;
        let overtime = remaining < 0;

        TimerView {
            elapsed_seconds: elapsed,
            remaining_seconds: remaining,
            overtime,
            overtime_seconds: if overtime { remaining.unsigned_abs() } else { 0 },
        }
    }

    /// Advance one tick: record the remaining value and decide the shell
    /// hook effects. The notification fires once, on the tick where
    /// remaining crosses from positive to non-positive.
    pub fn tick(&mut self, estimate_minutes: u32, now: Instant) -> TickEffects {
        let view = self.view(estimate_minutes, now);

        let crossed = match self.last_remaining {
            Some(prev) => prev > 0 && view.remaining_seconds <= 0,
            // A session that begins already at or past the boundary does
            // not notify
            None => false,
        };
        self.last_remaining = Some(view.remaining_seconds);

        let notify_finished = crossed && !self.notified;
        if notify_finished {
            self.notified = true;
        }

        TickEffects {
            display_remaining: view.remaining_seconds.max(0) as u64,
            notify_finished,
        }
    }

    /// Take the unsaved elapsed delta, exactly once.
    ///
    /// Returns the whole seconds since the session began if they are
    /// positive and have not been reported yet; every later call returns
    /// None. Callers commit the delta into the task and check-in stores
    /// before discarding the session.
    pub fn take_unsaved(&mut self, now: Instant) -> Option<u64> {
        if self.saved {
            return None;
        }
        self.saved = true;

        let elapsed = self.elapsed_since_start(now);
        if elapsed > 0 {
            Some(elapsed)
        } else {
            None
        }
    }
}
