//! A [`DragContext`] that records every call it receives.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use dragkit_core::{Point, Rect};
use dragkit_draggable::{DragContext, DraggableId, DraggableRegistration, DraggableUpdate};

/// Which fields an `update_draggable` call carried.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateRecord<P> {
    pub on_drag_start: bool,
    pub on_drag_end: bool,
    pub payload: Option<Option<P>>,
    pub layout: Option<Rect>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragContextCall<P> {
    Register {
        id: DraggableId,
        has_on_drag_start: bool,
        has_on_drag_end: bool,
        payload: Option<P>,
    },
    Update {
        id: DraggableId,
        update: UpdateRecord<P>,
    },
    Unregister {
        id: DraggableId,
    },
    DragStart {
        id: DraggableId,
        point: Point,
    },
    DragMove {
        id: DraggableId,
        point: Point,
    },
    DragEnd {
        id: DraggableId,
        point: Point,
    },
}

impl<P> DragContextCall<P> {
    /// Short name of the contract operation, handy for order assertions.
    pub fn name(&self) -> &'static str {
        match self {
            DragContextCall::Register { .. } => "register",
            DragContextCall::Update { .. } => "update",
            DragContextCall::Unregister { .. } => "unregister",
            DragContextCall::DragStart { .. } => "drag_start",
            DragContextCall::DragMove { .. } => "drag_move",
            DragContextCall::DragEnd { .. } => "drag_end",
        }
    }
}

/// Records calls and optionally forwards them to another context.
pub struct RecordingDragContext<P> {
    calls: RefCell<Vec<DragContextCall<P>>>,
    delegate: Option<Rc<dyn DragContext<P>>>,
}

impl<P: Clone> RecordingDragContext<P> {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            delegate: None,
        }
    }

    /// Records, then forwards every call to `delegate`.
    pub fn wrapping(delegate: Rc<dyn DragContext<P>>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            delegate: Some(delegate),
        }
    }

    pub fn calls(&self) -> Vec<DragContextCall<P>> {
        self.calls.borrow().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(DragContextCall::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.name() == name)
            .count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: DragContextCall<P>) {
        self.calls.borrow_mut().push(call);
    }
}

impl<P: Clone> Default for RecordingDragContext<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> DragContext<P> for RecordingDragContext<P> {
    fn register_draggable(&self, id: &DraggableId, registration: DraggableRegistration<P>) {
        self.record(DragContextCall::Register {
            id: id.clone(),
            has_on_drag_start: registration.on_drag_start.is_some(),
            has_on_drag_end: registration.on_drag_end.is_some(),
            payload: registration.payload.clone(),
        });
        if let Some(delegate) = &self.delegate {
            delegate.register_draggable(id, registration);
        }
    }

    fn update_draggable(&self, id: &DraggableId, update: DraggableUpdate<P>) {
        self.record(DragContextCall::Update {
            id: id.clone(),
            update: UpdateRecord {
                on_drag_start: update.on_drag_start.is_some(),
                on_drag_end: update.on_drag_end.is_some(),
                payload: update.payload.clone(),
                layout: update.layout,
            },
        });
        if let Some(delegate) = &self.delegate {
            delegate.update_draggable(id, update);
        }
    }

    fn unregister_draggable(&self, id: &DraggableId) {
        self.record(DragContextCall::Unregister { id: id.clone() });
        if let Some(delegate) = &self.delegate {
            delegate.unregister_draggable(id);
        }
    }

    fn handle_drag_start(&self, id: &DraggableId, point: Point) {
        self.record(DragContextCall::DragStart {
            id: id.clone(),
            point,
        });
        if let Some(delegate) = &self.delegate {
            delegate.handle_drag_start(id, point);
        }
    }

    fn handle_drag_move(&self, id: &DraggableId, point: Point) {
        self.record(DragContextCall::DragMove {
            id: id.clone(),
            point,
        });
        if let Some(delegate) = &self.delegate {
            delegate.handle_drag_move(id, point);
        }
    }

    fn handle_drag_end(&self, id: &DraggableId, point: Point) {
        self.record(DragContextCall::DragEnd {
            id: id.clone(),
            point,
        });
        if let Some(delegate) = &self.delegate {
            delegate.handle_drag_end(id, point);
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for RecordingDragContext<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingDragContext")
            .field("calls", &self.calls.borrow())
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use dragkit_draggable::{DragRegistry, DraggableProps};

    #[test]
    fn forwards_to_delegate_after_recording() {
        let registry: Rc<DragRegistry<u8>> = Rc::new(DragRegistry::new());
        let delegate: Rc<dyn DragContext<u8>> = registry.clone();
        let recorder = RecordingDragContext::wrapping(delegate);
        let id = DraggableId::custom("tile");

        recorder.register_draggable(
            &id,
            DraggableRegistration::from_props(&DraggableProps::new().with_payload(3)),
        );
        recorder.handle_drag_start(&id, Point::new(1.0, 1.0));

        assert_eq!(recorder.call_names(), vec!["register", "drag_start"]);
        assert_eq!(registry.payload(&id), Some(3));
        assert!(registry.active_drag().is_some());
    }

    #[test]
    fn clear_forgets_history() {
        let recorder: RecordingDragContext<u8> = RecordingDragContext::new();
        recorder.unregister_draggable(&DraggableId::custom("gone"));
        assert_eq!(recorder.count("unregister"), 1);

        recorder.clear();
        assert!(recorder.calls().is_empty());
    }
}
