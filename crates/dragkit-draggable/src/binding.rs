//! Registration of one draggable with the shared drag context.
//!
//! The binding owns the draggable's side of the context contract: it
//! registers on mount, sends minimal updates when props change, forwards
//! layout measurements, relays drag reports while mounted, and deregisters
//! exactly once on unmount. It talks to the context purely by [`DraggableId`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dragkit_core::{Point, Rect};

use crate::context::{diff_props, DragContext, DraggableRegistration, DraggableUpdate};
use crate::controller::DragReportSink;
use crate::error::DraggableError;
use crate::identity::DraggableId;
use crate::layout::{MeasureElement, Measurement};
use crate::props::DraggableProps;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

pub struct DragContextBinding<P: Clone + PartialEq + 'static> {
    context: Rc<dyn DragContext<P>>,
    id: DraggableId,
    props: RefCell<DraggableProps<P>>,
    // Shared with in-flight measurement replies so replies that arrive while
    // not mounted are dropped.
    lifecycle: Rc<Cell<Lifecycle>>,
    element: RefCell<Option<Rc<dyn MeasureElement>>>,
}

impl<P: Clone + PartialEq + 'static> DragContextBinding<P> {
    /// Binds `id` to `context`. Fails if no context is available.
    pub fn new(
        context: Option<Rc<dyn DragContext<P>>>,
        id: DraggableId,
        props: DraggableProps<P>,
    ) -> Result<Self, DraggableError> {
        let context = context.ok_or(DraggableError::MissingContext)?;
        Ok(Self {
            context,
            id,
            props: RefCell::new(props),
            lifecycle: Rc::new(Cell::new(Lifecycle::Created)),
            element: RefCell::new(None),
        })
    }

    pub fn id(&self) -> &DraggableId {
        &self.id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.get() == Lifecycle::Mounted
    }

    /// Registers callbacks and payload with the context, then measures the
    /// attached element, if any.
    pub fn mount(&self) -> Result<(), DraggableError> {
        match self.lifecycle.get() {
            Lifecycle::Created => {}
            Lifecycle::Mounted => {
                return Err(DraggableError::AlreadyMounted {
                    id: self.id.clone(),
                })
            }
            Lifecycle::Unmounted => {
                return Err(DraggableError::Unmounted {
                    id: self.id.clone(),
                })
            }
        }
        let registration = DraggableRegistration::from_props(&self.props.borrow());
        self.context.register_draggable(&self.id, registration);
        self.lifecycle.set(Lifecycle::Mounted);
        self.measure();
        Ok(())
    }

    /// Replaces the props, sending only the fields that changed.
    pub fn props_changed(&self, next: DraggableProps<P>) {
        if self.lifecycle.get() == Lifecycle::Unmounted {
            log::debug!("props change for unmounted {} ignored", self.id);
            return;
        }
        let update = diff_props(&self.props.borrow(), &next);
        *self.props.borrow_mut() = next;
        if update.is_empty() || !self.is_mounted() {
            return;
        }
        self.context.update_draggable(&self.id, update);
    }

    pub fn props(&self) -> std::cell::Ref<'_, DraggableProps<P>> {
        self.props.borrow()
    }

    /// Deregisters from the context. Safe to call more than once.
    pub fn unmount(&self) {
        let previous = self.lifecycle.replace(Lifecycle::Unmounted);
        self.element.borrow_mut().take();
        if previous == Lifecycle::Mounted {
            self.context.unregister_draggable(&self.id);
        }
    }

    /// Hands the binding the element capability used for measurement.
    pub fn attach_element(&self, element: Rc<dyn MeasureElement>) {
        if self.lifecycle.get() == Lifecycle::Unmounted {
            return;
        }
        *self.element.borrow_mut() = Some(element);
    }

    pub fn detach_element(&self) {
        self.element.borrow_mut().take();
    }

    /// Host signal that the element's layout may have changed.
    ///
    /// Calls the `on_layout` prop, then measures the element and forwards the
    /// bounds. Before mount only `on_layout` runs; mounting measures.
    pub fn layout_changed(&self) {
        if self.lifecycle.get() == Lifecycle::Unmounted {
            return;
        }
        let on_layout = self.props.borrow().on_layout.clone();
        if let Some(on_layout) = on_layout {
            on_layout();
        }
        if !self.is_mounted() {
            log::trace!("{} not mounted yet; measurement deferred", self.id);
            return;
        }
        self.measure();
    }

    fn measure(&self) {
        let Some(element) = self.element.borrow().clone() else {
            log::trace!("{} has no element to measure", self.id);
            return;
        };
        let lifecycle = Rc::clone(&self.lifecycle);
        let context = Rc::clone(&self.context);
        let id = self.id.clone();
        element.measure_in_window(Box::new(move |measurement| {
            if lifecycle.get() != Lifecycle::Mounted {
                log::trace!("measurement for unmounted {id} dropped");
                return;
            }
            match measurement {
                Measurement::Bounds(bounds) => {
                    context.update_draggable(&id, DraggableUpdate::layout(bounds))
                }
                Measurement::Unavailable => log::trace!("measurement unavailable for {id}"),
            }
        }));
    }

    /// Forwards already-measured bounds to the context.
    pub fn apply_layout(&self, bounds: Rect) {
        if !self.is_mounted() {
            return;
        }
        self.context
            .update_draggable(&self.id, DraggableUpdate::layout(bounds));
    }

    fn forwarding(&self, report: &str) -> bool {
        if !self.is_mounted() {
            log::trace!("{report} from {} dropped: not mounted", self.id);
            return false;
        }
        true
    }
}

impl<P: Clone + PartialEq + 'static> DragReportSink for DragContextBinding<P> {
    fn drag_start(&self, id: &DraggableId, point: Point) {
        if self.forwarding("drag start") {
            self.context.handle_drag_start(id, point);
        }
    }

    fn drag_move(&self, id: &DraggableId, point: Point) {
        if self.forwarding("drag move") {
            self.context.handle_drag_move(id, point);
        }
    }

    fn drag_end(&self, id: &DraggableId, point: Point) {
        if self.forwarding("drag end") {
            self.context.handle_drag_end(id, point);
        }
    }
}

#[cfg(test)]
#[path = "tests/binding_tests.rs"]
mod tests;
