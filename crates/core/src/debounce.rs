//! Debounce state machine — single-slot, restart-on-schedule
//!
//! Coalesces bursts of change notifications into one aggregation cycle. The
//! slot holds at most one pending deadline; scheduling while a deadline is
//! pending restarts the window rather than queueing a second run. The caller
//! drives time explicitly, which keeps the machine free of threads and timers
//! and lets tests use synthetic instants.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            deadline: None,
        }
    }

    /// Arm the debounce window, restarting it if one is already pending.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Whether a cycle is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time remaining until the pending deadline; zero when overdue, `None`
    /// when idle. Lets an event loop size its receive timeout.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// True exactly once when the pending window has elapsed; clears the slot
    /// so the machine returns to idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
