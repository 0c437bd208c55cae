//! Test rule driving a runtime clock and pointer input for draggables.

use std::cell::Cell;

use dragkit_core::{Point, Runtime, RuntimeHandle, FRAME_INTERVAL_MS};
use dragkit_draggable::{Draggable, PointerEvent};

/// Owns a [`Runtime`] and synthesises pointer gestures.
///
/// Moves and releases carry the displacement from the last press, the way a
/// pan recogniser reports `dx`/`dy`.
pub struct DragTestRule {
    runtime: Runtime,
    origin: Cell<Option<Point>>,
}

impl DragTestRule {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(),
            origin: Cell::new(None),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn now(&self) -> u64 {
        self.runtime.now_millis()
    }

    pub fn advance_by(&self, millis: u64) {
        self.runtime.advance_by(millis);
    }

    pub fn advance_to(&self, millis: u64) {
        self.runtime.advance_to(millis);
    }

    /// Runs frames until no timer or animation is pending, up to `limit_millis`.
    ///
    /// Returns `true` if the runtime went idle.
    pub fn pump_until_idle(&self, limit_millis: u64) -> bool {
        let deadline = self.now().saturating_add(limit_millis);
        while self.runtime.has_pending_work() {
            if self.now() >= deadline {
                return false;
            }
            self.runtime.advance_by(FRAME_INTERVAL_MS);
        }
        true
    }

    pub fn press<P: Clone + PartialEq + 'static>(&self, draggable: &Draggable<P>, x: f32, y: f32) {
        let position = Point::new(x, y);
        self.origin.set(Some(position));
        draggable.handle_pointer(PointerEvent::down(position));
    }

    /// Presses and holds until just past the long-press delay.
    pub fn long_press<P: Clone + PartialEq + 'static>(
        &self,
        draggable: &Draggable<P>,
        x: f32,
        y: f32,
    ) {
        self.press(draggable, x, y);
        let hold = draggable.controller().config().long_press_delay_millis;
        self.advance_by(hold + 1);
    }

    pub fn drag_to<P: Clone + PartialEq + 'static>(
        &self,
        draggable: &Draggable<P>,
        x: f32,
        y: f32,
    ) {
        draggable.handle_pointer(self.with_translation(PointerEvent::moved(Point::new(x, y))));
    }

    pub fn release<P: Clone + PartialEq + 'static>(
        &self,
        draggable: &Draggable<P>,
        x: f32,
        y: f32,
    ) {
        draggable.handle_pointer(self.with_translation(PointerEvent::up(Point::new(x, y))));
        self.origin.set(None);
    }

    pub fn cancel<P: Clone + PartialEq + 'static>(
        &self,
        draggable: &Draggable<P>,
        x: f32,
        y: f32,
    ) {
        draggable.handle_pointer(self.with_translation(PointerEvent::cancel(Point::new(x, y))));
        self.origin.set(None);
    }

    fn with_translation(&self, event: PointerEvent) -> PointerEvent {
        match self.origin.get() {
            Some(origin) => event.with_translation(event.position - origin),
            None => event,
        }
    }
}

impl Default for DragTestRule {
    fn default() -> Self {
        Self::new()
    }
}
