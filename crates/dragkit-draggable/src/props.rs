use std::fmt;
use std::rc::Rc;

use dragkit_core::Point;

/// Called by the shared context when a drag of this element starts or ends.
pub type DragCallback = Rc<dyn Fn(Point)>;
/// Called after a recognised tap.
pub type PressCallback = Rc<dyn Fn()>;
/// Called whenever the host signals a layout change of the element.
pub type LayoutCallback = Rc<dyn Fn()>;

/// Callbacks and data supplied by the host on every render.
pub struct DraggableProps<P> {
    pub on_press: Option<PressCallback>,
    pub on_drag_start: Option<DragCallback>,
    pub on_drag_end: Option<DragCallback>,
    pub payload: Option<P>,
    pub on_layout: Option<LayoutCallback>,
}

impl<P> DraggableProps<P> {
    pub fn new() -> Self {
        Self {
            on_press: None,
            on_drag_start: None,
            on_drag_end: None,
            payload: None,
            on_layout: None,
        }
    }

    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_on_press(mut self, on_press: impl Fn() + 'static) -> Self {
        self.on_press = Some(Rc::new(on_press));
        self
    }

    pub fn with_on_drag_start(mut self, callback: DragCallback) -> Self {
        self.on_drag_start = Some(callback);
        self
    }

    pub fn with_on_drag_end(mut self, callback: DragCallback) -> Self {
        self.on_drag_end = Some(callback);
        self
    }

    pub fn with_on_layout(mut self, on_layout: impl Fn() + 'static) -> Self {
        self.on_layout = Some(Rc::new(on_layout));
        self
    }
}

impl<P> Default for DraggableProps<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> Clone for DraggableProps<P> {
    fn clone(&self) -> Self {
        Self {
            on_press: self.on_press.clone(),
            on_drag_start: self.on_drag_start.clone(),
            on_drag_end: self.on_drag_end.clone(),
            payload: self.payload.clone(),
            on_layout: self.on_layout.clone(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for DraggableProps<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableProps")
            .field("on_press", &self.on_press.is_some())
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field("payload", &self.payload)
            .field("on_layout", &self.on_layout.is_some())
            .finish()
    }
}

/// Callback identity: two callbacks are the same only if they share an allocation.
pub(crate) fn same_callback<F: ?Sized>(a: &Option<Rc<F>>, b: &Option<Rc<F>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
        _ => false,
    }
}
