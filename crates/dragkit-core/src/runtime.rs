//! Single-threaded event loop: virtual clock, timer queue and frame callbacks.
//!
//! All gesture and animation work runs on one loop. The host moves the clock
//! forward with [`Runtime::advance_to`]; due timers fire in
//! `(deadline, schedule order)` order, then pending frame callbacks run with
//! the current frame time.

use crate::frame_clock::FrameClock;
use crate::platform::Clock;
use crate::timer::TimerHandle;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub type TimerId = u64;
pub type FrameCallbackId = u64;

/// Spacing of frames produced while the clock is advanced.
pub const FRAME_INTERVAL_MS: u64 = 16;

type TimerCallback = Box<dyn FnOnce()>;
type FrameCallback = Box<dyn FnOnce(u64)>;

struct RuntimeInner {
    now_millis: u64,
    next_timer_id: TimerId,
    next_frame_callback_id: FrameCallbackId,
    timers: BTreeMap<(u64, TimerId), TimerCallback>,
    timer_deadlines: FxHashMap<TimerId, u64>,
    frame_callbacks: SmallVec<[(FrameCallbackId, FrameCallback); 4]>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            now_millis: 0,
            next_timer_id: 1,
            next_frame_callback_id: 1,
            timers: BTreeMap::new(),
            timer_deadlines: FxHashMap::default(),
            frame_callbacks: SmallVec::new(),
        }
    }

    fn take_due_timer(&mut self, now: u64) -> Option<TimerCallback> {
        let (&(deadline, id), _) = self.timers.first_key_value()?;
        if deadline > now {
            return None;
        }
        self.timer_deadlines.remove(&id);
        self.timers.remove(&(deadline, id))
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timers.keys().next().map(|(deadline, _)| *deadline)
    }
}

/// Cloneable handle used by components to schedule work on the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl RuntimeHandle {
    /// Current clock reading in milliseconds.
    pub fn now_millis(&self) -> u64 {
        self.inner.borrow().now_millis
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Schedules `callback` to run once `delay_millis` have elapsed.
    ///
    /// Dropping the returned handle cancels the timer.
    pub fn schedule_timeout(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> TimerHandle {
        let id = self.insert_timer(delay_millis, Box::new(callback));
        TimerHandle::new(self.clone(), id)
    }

    /// Posts a detached task that runs on the next turn of the loop.
    pub fn post_ui(&self, task: impl FnOnce() + 'static) {
        self.insert_timer(0, Box::new(task));
    }

    fn insert_timer(&self, delay_millis: u64, callback: TimerCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_timer_id;
        inner.next_timer_id += 1;
        let deadline = inner.now_millis.saturating_add(delay_millis);
        inner.timers.insert((deadline, id), callback);
        inner.timer_deadlines.insert(id, deadline);
        log::trace!("timer {id} scheduled for t={deadline}");
        id
    }

    pub fn cancel_timer(&self, id: TimerId) {
        let mut inner = self.inner.borrow_mut();
        if let Some(deadline) = inner.timer_deadlines.remove(&id) {
            inner.timers.remove(&(deadline, id));
            log::trace!("timer {id} cancelled");
        }
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().timer_deadlines.contains_key(&id)
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_frame_callback_id;
        inner.next_frame_callback_id += 1;
        inner.frame_callbacks.push((id, Box::new(callback)));
        id
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.inner
            .borrow_mut()
            .frame_callbacks
            .retain(|(entry, _)| *entry != id);
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.inner.borrow().timers.is_empty()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.borrow().frame_callbacks.is_empty()
    }

    fn fire_due_timers(&self, now: u64) {
        loop {
            let callback = {
                let mut inner = self.inner.borrow_mut();
                inner.now_millis = now;
                inner.take_due_timer(now)
            };
            match callback {
                Some(callback) => callback(),
                None => break,
            }
        }
    }

    /// Runs every frame callback registered before this call.
    ///
    /// Callbacks registered while draining wait for the next frame.
    pub fn drain_frame_callbacks(&self, frame_time_millis: u64) {
        let callbacks = std::mem::take(&mut self.inner.borrow_mut().frame_callbacks);
        for (_, callback) in callbacks {
            callback(frame_time_millis);
        }
    }
}

/// Owner of the event loop.
pub struct Runtime {
    handle: RuntimeHandle,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            handle: RuntimeHandle {
                inner: Rc::new(RefCell::new(RuntimeInner::new())),
            },
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn now_millis(&self) -> u64 {
        self.handle.now_millis()
    }

    /// Moves the clock forward to `target_millis`.
    ///
    /// The clock stops at every timer deadline and at least every
    /// [`FRAME_INTERVAL_MS`]; at each stop due timers fire first, then frame
    /// callbacks. Targets in the past are ignored.
    pub fn advance_to(&self, target_millis: u64) {
        let mut now = self.handle.now_millis();
        if target_millis < now {
            log::warn!("ignoring clock rewind from t={now} to t={target_millis}");
            return;
        }
        loop {
            self.handle.fire_due_timers(now);
            self.handle.drain_frame_callbacks(now);
            if now >= target_millis {
                break;
            }
            let mut next = now.saturating_add(FRAME_INTERVAL_MS).min(target_millis);
            if let Some(deadline) = self.handle.inner.borrow().next_deadline() {
                next = next.min(deadline.max(now + 1));
            }
            now = next;
        }
    }

    pub fn advance_by(&self, millis: u64) {
        let target = self.handle.now_millis().saturating_add(millis);
        self.advance_to(target);
    }

    /// Advances to the reading of a host clock.
    pub fn pump_clock(&self, clock: &dyn Clock) {
        self.advance_to(clock.now_millis());
    }

    pub fn has_pending_work(&self) -> bool {
        self.handle.has_pending_timers() || self.handle.has_frame_callbacks()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
