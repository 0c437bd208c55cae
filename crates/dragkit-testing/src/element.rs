//! Scriptable stand-in for a mounted element.

use std::cell::Cell;

use dragkit_core::{Rect, RuntimeHandle};
use dragkit_draggable::{MeasureElement, MeasureReply, Measurement};

/// Element that reports fixed bounds, or none.
///
/// With a runtime attached the reply is posted to the next loop turn, like a
/// host measuring asynchronously; otherwise it replies immediately.
pub struct FakeElement {
    bounds: Cell<Option<Rect>>,
    runtime: Option<RuntimeHandle>,
    measure_count: Cell<usize>,
}

impl FakeElement {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Cell::new(Some(bounds)),
            runtime: None,
            measure_count: Cell::new(0),
        }
    }

    /// An element the host cannot measure.
    pub fn detached() -> Self {
        Self {
            bounds: Cell::new(None),
            runtime: None,
            measure_count: Cell::new(0),
        }
    }

    pub fn replying_on(mut self, runtime: RuntimeHandle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn set_bounds(&self, bounds: Option<Rect>) {
        self.bounds.set(bounds);
    }

    pub fn measure_count(&self) -> usize {
        self.measure_count.get()
    }
}

impl MeasureElement for FakeElement {
    fn measure_in_window(&self, reply: MeasureReply) {
        self.measure_count.set(self.measure_count.get() + 1);
        let measurement = match self.bounds.get() {
            Some(bounds) => Measurement::Bounds(bounds),
            None => Measurement::Unavailable,
        };
        match &self.runtime {
            Some(runtime) => runtime.post_ui(move || reply(measurement)),
            None => reply(measurement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    use dragkit_core::Runtime;

    fn capture(element: &FakeElement) -> Rc<Cell<Option<Measurement>>> {
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        element.measure_in_window(Box::new(move |measurement| sink.set(Some(measurement))));
        seen
    }

    #[test]
    fn replies_synchronously_without_runtime() {
        let bounds = Rect::new(0.0, 0.0, 4.0, 4.0);
        let element = FakeElement::new(bounds);

        let seen = capture(&element);

        assert_eq!(seen.get(), Some(Measurement::Bounds(bounds)));
        assert_eq!(element.measure_count(), 1);
    }

    #[test]
    fn replies_on_next_turn_with_runtime() {
        let runtime = Runtime::new();
        let element = FakeElement::detached().replying_on(runtime.handle());

        let seen = capture(&element);
        assert_eq!(seen.get(), None);

        runtime.advance_by(0);
        assert_eq!(seen.get(), Some(Measurement::Unavailable));
    }
}
