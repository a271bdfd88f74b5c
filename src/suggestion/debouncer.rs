//! Quiet-interval debouncer
//!
//! Holds at most one deadline. Every keystroke re-arms it; the event loop
//! polls [`Debouncer::take_due`] and fires the completion fetch once typing
//! has paused for the full interval.

use std::time::{Duration, Instant};

/// Default quiet interval before a suggestion is requested
pub const DEFAULT_QUIET_INTERVAL_MS: u64 = 2000;

#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancel any pending deadline and arm a new one from now
    pub fn schedule(&mut self) {
        self.schedule_at(Instant::now());
    }

    pub fn schedule_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Clear the pending deadline, if any
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the armed deadline has passed
    pub fn take_due(&mut self) -> bool {
        self.take_due_at(Instant::now())
    }

    pub fn take_due_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_INTERVAL_MS)
    }
}
