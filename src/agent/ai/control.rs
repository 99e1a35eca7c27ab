// Cooperative cancellation for the search.
//
// The host sets a deadline and may also raise a shared stop flag. The engine
// checks both at the top of every recursive call and unwinds with
// `SearchInterrupted` as soon as either trips; nothing needs cleaning up on
// the way out because every search state is a plain value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

/// The search was cut off before the current iteration completed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search interrupted before completion")]
pub struct SearchInterrupted;

/// Deadline plus shared stop flag. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    deadline: Option<Instant>,
    stop: Arc<AtomicBool>,
}

impl SearchControl {
    /// No deadline; stops only when `stop()` is called
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            stop: Arc::default(),
        }
    }

    pub fn with_time_limit(limit: Duration) -> Self {
        Self::with_deadline(Instant::now() + limit)
    }

    /// Same stop flag, deadline moved earlier if `limit` from now ends sooner
    pub fn tightened(&self, limit: Option<Duration>) -> Self {
        let deadline = match (self.deadline, limit.map(|l| Instant::now() + l)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        Self {
            deadline,
            stop: Arc::clone(&self.stop),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Raise the stop flag for every clone of this control
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    #[inline]
    pub fn check(&self) -> Result<(), SearchInterrupted> {
        if self.should_stop() {
            Err(SearchInterrupted)
        } else {
            Ok(())
        }
    }
}
