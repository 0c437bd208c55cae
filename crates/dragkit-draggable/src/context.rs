//! Contract of the shared drag-and-drop coordination context.
//!
//! A context is one registry shared by every draggable on screen, keyed by
//! [`DraggableId`]. Draggables write only their own entry and report drag
//! progress by identity; they never hold on to the entry itself.

use std::fmt;

use dragkit_core::{Point, Rect};

use crate::identity::DraggableId;
use crate::props::{same_callback, DragCallback, DraggableProps};

pub trait DragContext<P> {
    fn register_draggable(&self, id: &DraggableId, registration: DraggableRegistration<P>);
    fn update_draggable(&self, id: &DraggableId, update: DraggableUpdate<P>);
    fn unregister_draggable(&self, id: &DraggableId);
    fn handle_drag_start(&self, id: &DraggableId, point: Point);
    fn handle_drag_move(&self, id: &DraggableId, point: Point);
    fn handle_drag_end(&self, id: &DraggableId, point: Point);
}

/// Fields sent when a draggable mounts.
pub struct DraggableRegistration<P> {
    pub on_drag_start: Option<DragCallback>,
    pub on_drag_end: Option<DragCallback>,
    pub payload: Option<P>,
}

impl<P: Clone> DraggableRegistration<P> {
    pub fn from_props(props: &DraggableProps<P>) -> Self {
        Self {
            on_drag_start: props.on_drag_start.clone(),
            on_drag_end: props.on_drag_end.clone(),
            payload: props.payload.clone(),
        }
    }
}

/// Partial update of a registered draggable.
///
/// `None` leaves a field untouched; `Some(None)` clears it.
pub struct DraggableUpdate<P> {
    pub on_drag_start: Option<Option<DragCallback>>,
    pub on_drag_end: Option<Option<DragCallback>>,
    pub payload: Option<Option<P>>,
    pub layout: Option<Rect>,
}

impl<P> DraggableUpdate<P> {
    pub fn new() -> Self {
        Self {
            on_drag_start: None,
            on_drag_end: None,
            payload: None,
            layout: None,
        }
    }

    pub fn layout(bounds: Rect) -> Self {
        Self {
            layout: Some(bounds),
            ..Self::new()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.on_drag_start.is_none()
            && self.on_drag_end.is_none()
            && self.payload.is_none()
            && self.layout.is_none()
    }
}

impl<P> Default for DraggableUpdate<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug> fmt::Debug for DraggableUpdate<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableUpdate")
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field("payload", &self.payload)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Minimal update turning `prev` into `next`.
///
/// Callbacks compare by allocation, payloads by value. Layout is never part
/// of a props diff.
pub fn diff_props<P: Clone + PartialEq>(
    prev: &DraggableProps<P>,
    next: &DraggableProps<P>,
) -> DraggableUpdate<P> {
    let mut update = DraggableUpdate::new();
    if !same_callback(&prev.on_drag_end, &next.on_drag_end) {
        update.on_drag_end = Some(next.on_drag_end.clone());
    }
    if !same_callback(&prev.on_drag_start, &next.on_drag_start) {
        update.on_drag_start = Some(next.on_drag_start.clone());
    }
    if prev.payload != next.payload {
        update.payload = Some(next.payload.clone());
    }
    update
}
