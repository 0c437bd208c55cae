use std::rc::Rc;

use dragkit_core::{Offset, Rect, RuntimeHandle};

use crate::binding::{DragContextBinding, Lifecycle};
use crate::config::DraggableConfig;
use crate::context::DragContext;
use crate::controller::{DragReportSink, GestureController, GesturePhase};
use crate::error::DraggableError;
use crate::identity::DraggableId;
use crate::layout::MeasureElement;
use crate::pointer::PointerEvent;
use crate::props::DraggableProps;

/// A long-press draggable element connected to a shared drag context.
///
/// Pairs a [`GestureController`] with a [`DragContextBinding`] under one
/// identity. Dropping a `Draggable` unmounts it.
pub struct Draggable<P: Clone + PartialEq + 'static> {
    binding: Rc<DragContextBinding<P>>,
    controller: GestureController,
}

impl<P: Clone + PartialEq + 'static> Draggable<P> {
    pub fn new(
        context: Option<Rc<dyn DragContext<P>>>,
        runtime: RuntimeHandle,
        config: DraggableConfig,
        props: DraggableProps<P>,
    ) -> Result<Self, DraggableError> {
        let id = config
            .custom_id
            .clone()
            .unwrap_or_else(DraggableId::generate);
        let on_press = props.on_press.clone();
        let binding = Rc::new(DragContextBinding::new(context, id.clone(), props)?);
        let sink: Rc<dyn DragReportSink> = binding.clone();
        let controller = GestureController::new(id, config, runtime, sink);
        controller.set_on_press(on_press);
        Ok(Self {
            binding,
            controller,
        })
    }

    pub fn id(&self) -> &DraggableId {
        self.binding.id()
    }

    pub fn mount(&self) -> Result<(), DraggableError> {
        self.binding.mount()
    }

    pub fn handle_pointer(&self, event: PointerEvent) {
        self.controller.handle_pointer(event);
    }

    pub fn set_props(&self, props: DraggableProps<P>) {
        self.controller.set_on_press(props.on_press.clone());
        self.binding.props_changed(props);
    }

    pub fn attach_element(&self, element: Rc<dyn MeasureElement>) {
        self.binding.attach_element(element);
    }

    pub fn layout_changed(&self) {
        self.binding.layout_changed();
    }

    pub fn apply_layout(&self, bounds: Rect) {
        self.binding.apply_layout(bounds);
    }

    /// Stops the gesture and deregisters. Later calls do nothing.
    pub fn unmount(&self) {
        if self.binding.lifecycle() == Lifecycle::Unmounted {
            return;
        }
        self.controller.dispose();
        self.binding.unmount();
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.binding.lifecycle()
    }

    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    pub fn phase(&self) -> GesturePhase {
        self.controller.phase()
    }

    pub fn scale(&self) -> f32 {
        self.controller.scale()
    }

    pub fn pan_offset(&self) -> Offset {
        self.controller.pan_offset()
    }
}

impl<P: Clone + PartialEq + 'static> Drop for Draggable<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}
