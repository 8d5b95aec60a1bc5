use std::time::Duration;

use tracing::debug;
use web_time::Instant;

/// The widget's periodic repaint timer.
///
/// Hosts poll it with a monotonic instant; it does not own a thread or a
/// platform timer, so halting is just forgetting the next deadline.
#[derive(Debug, Clone)]
pub struct RepaintSchedule {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepaintSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start ticking. Calling it while running keeps the current deadline.
    pub fn proceed(&mut self, now: Instant) {
        if self.next_due.is_none() {
            debug!(interval_ms = self.interval.as_millis() as u64, "repaint started");
            self.next_due = Some(now + self.interval);
        }
    }

    /// Stop ticking. No-op when already halted.
    pub fn halt(&mut self) {
        if self.next_due.take().is_some() {
            debug!("repaint halted");
        }
    }

    /// Deadline of the next tick, if running.
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Whether a tick is due at `now`. Consumes the deadline and schedules
    /// the next one; missed ticks are dropped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }
}
