//! Platform abstraction for the runtime clock.
//!
//! The runtime never reads wall time on its own: hosts advance it explicitly,
//! either with synthetic timestamps (tests) or from a [`Clock`] reading.

use web_time::Instant;

/// Provides monotonic timing information for the runtime.
pub trait Clock {
    /// Milliseconds elapsed since the clock's epoch.
    fn now_millis(&self) -> u64;
}

/// Monotonic wall clock measured from its construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
