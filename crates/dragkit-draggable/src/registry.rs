//! In-process shared drag context.
//!
//! [`DragRegistry`] keeps one entry per mounted draggable and correlates the
//! start/move/end reports of the single drag in progress. It does not match
//! drop targets; hosts that need that wrap or replace it.

use std::cell::RefCell;

use dragkit_core::{Point, Rect};
use rustc_hash::FxHashMap;

use crate::context::{DragContext, DraggableRegistration, DraggableUpdate};
use crate::identity::DraggableId;
use crate::props::DragCallback;

/// Entry held by the registry for one draggable.
pub struct RegisteredDraggable<P> {
    pub id: DraggableId,
    pub on_drag_start: Option<DragCallback>,
    pub on_drag_end: Option<DragCallback>,
    pub payload: Option<P>,
    pub layout: Option<Rect>,
}

/// The drag currently being reported.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveDrag {
    pub id: DraggableId,
    pub origin: Point,
    pub last: Point,
}

pub struct DragRegistry<P> {
    entries: RefCell<FxHashMap<DraggableId, RegisteredDraggable<P>>>,
    active: RefCell<Option<ActiveDrag>>,
}

impl<P: Clone> DragRegistry<P> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(FxHashMap::default()),
            active: RefCell::new(None),
        }
    }

    pub fn is_registered(&self, id: &DraggableId) -> bool {
        self.entries.borrow().contains_key(id)
    }

    pub fn payload(&self, id: &DraggableId) -> Option<P> {
        self.entries
            .borrow()
            .get(id)
            .and_then(|entry| entry.payload.clone())
    }

    pub fn layout(&self, id: &DraggableId) -> Option<Rect> {
        self.entries.borrow().get(id).and_then(|entry| entry.layout)
    }

    pub fn active_drag(&self) -> Option<ActiveDrag> {
        self.active.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn callback(
        &self,
        id: &DraggableId,
        select: impl FnOnce(&RegisteredDraggable<P>) -> Option<DragCallback>,
    ) -> Option<DragCallback> {
        self.entries.borrow().get(id).and_then(select)
    }
}

impl<P: Clone> Default for DragRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> DragContext<P> for DragRegistry<P> {
    fn register_draggable(&self, id: &DraggableId, registration: DraggableRegistration<P>) {
        let entry = RegisteredDraggable {
            id: id.clone(),
            on_drag_start: registration.on_drag_start,
            on_drag_end: registration.on_drag_end,
            payload: registration.payload,
            layout: None,
        };
        if self
            .entries
            .borrow_mut()
            .insert(id.clone(), entry)
            .is_some()
        {
            log::warn!("{id} registered twice; previous entry replaced");
        } else {
            log::debug!("{id} registered");
        }
    }

    fn update_draggable(&self, id: &DraggableId, update: DraggableUpdate<P>) {
        let mut entries = self.entries.borrow_mut();
        let Some(entry) = entries.get_mut(id) else {
            log::debug!("ignoring update for unregistered {id}");
            return;
        };
        if let Some(on_drag_start) = update.on_drag_start {
            entry.on_drag_start = on_drag_start;
        }
        if let Some(on_drag_end) = update.on_drag_end {
            entry.on_drag_end = on_drag_end;
        }
        if let Some(payload) = update.payload {
            entry.payload = payload;
        }
        if let Some(layout) = update.layout {
            entry.layout = Some(layout);
        }
    }

    fn unregister_draggable(&self, id: &DraggableId) {
        if self.entries.borrow_mut().remove(id).is_none() {
            log::debug!("ignoring unregister for unknown {id}");
            return;
        }
        let mut active = self.active.borrow_mut();
        if active.as_ref().is_some_and(|drag| &drag.id == id) {
            log::debug!("{id} unregistered mid-drag; drag dropped");
            *active = None;
        }
        log::debug!("{id} unregistered");
    }

    fn handle_drag_start(&self, id: &DraggableId, point: Point) {
        if !self.is_registered(id) {
            log::debug!("ignoring drag start from unregistered {id}");
            return;
        }
        {
            let mut active = self.active.borrow_mut();
            if let Some(previous) = active.as_ref() {
                if &previous.id == id {
                    log::debug!("ignoring duplicate drag start from {id}");
                    return;
                }
                log::warn!("{id} started dragging while {} was active", previous.id);
            }
            *active = Some(ActiveDrag {
                id: id.clone(),
                origin: point,
                last: point,
            });
        }
        if let Some(on_drag_start) = self.callback(id, |entry| entry.on_drag_start.clone()) {
            on_drag_start(point);
        }
    }

    fn handle_drag_move(&self, id: &DraggableId, point: Point) {
        let mut active = self.active.borrow_mut();
        match active.as_mut() {
            Some(drag) if &drag.id == id => drag.last = point,
            _ => log::trace!("ignoring drag move from inactive {id}"),
        }
    }

    fn handle_drag_end(&self, id: &DraggableId, point: Point) {
        {
            let mut active = self.active.borrow_mut();
            if !active.as_ref().is_some_and(|drag| &drag.id == id) {
                log::trace!("ignoring drag end without start from {id}");
                return;
            }
            *active = None;
        }
        if let Some(on_drag_end) = self.callback(id, |entry| entry.on_drag_end.clone()) {
            on_drag_end(point);
        }
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
