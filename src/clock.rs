// src/clock.rs

// clock module definition and implementations

// dependencies
use std::time::{Duration, Instant};

/// Clock trait to abstract time retrieval and waiting.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns a monotonic reading in nanoseconds as a u64.
/// Readings are only ever compared with readings from the same clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;

    /// Block the calling thread for `duration`.
    /// Used by the gate between auto-retry attempts.
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Monotonic clock backed by `Instant`.
/// Returns nanoseconds elapsed since the clock was created, so readings
/// never go backwards even if the wall clock is adjusted.
/// This is the default clock used by the gate.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> u64 {
        // saturates after ~584 years of uptime
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}
