use crate::runtime::{RuntimeHandle, TimerId};
use std::fmt;

/// Owned handle to a pending timeout.
///
/// The timer is cancelled when the handle is cancelled or dropped. Cancelling
/// a timer that already fired is a no-op.
pub struct TimerHandle {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl TimerHandle {
    pub(crate) fn new(runtime: RuntimeHandle, id: TimerId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    /// Returns `true` until the timer fires or is cancelled.
    pub fn is_pending(&self) -> bool {
        self.id
            .map(|id| self.runtime.is_timer_pending(id))
            .unwrap_or(false)
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}
