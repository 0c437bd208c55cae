//! Long-press drag gesture state machine.
//!
//! ```text
//! Idle --down--> Pressed --long press--> Armed --move--> Dragging
//!   ^                |                     |                |
//!   +------------- up / cancel ------------+----------------+
//! ```
//!
//! Movement only becomes a drag once the long-press timer has armed the
//! gesture. The first armed move reports `drag_start` at that move's
//! position; every armed move reports `drag_move`. Release and cancel always
//! report `drag_end`, even for gestures that never started dragging. Only a
//! release within the move slop restores the scale, and only an up within the
//! slop counts as a tap.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use dragkit_animation::{Animatable, AnimationSequence, AnimationStage, AnimationType, Easing};
use dragkit_core::{Offset, Point, RuntimeHandle, TimerHandle};

use crate::config::DraggableConfig;
use crate::gesture_constants::{FEEDBACK_DIP_SCALE, FEEDBACK_HELD_SCALE, REST_SCALE};
use crate::identity::DraggableId;
use crate::pointer::{PointerEvent, PointerEventKind};
use crate::props::PressCallback;

/// Receiver of identity-tagged drag reports.
pub trait DragReportSink {
    fn drag_start(&self, id: &DraggableId, point: Point);
    fn drag_move(&self, id: &DraggableId, point: Point);
    fn drag_end(&self, id: &DraggableId, point: Point);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Pressed,
    Armed,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReleaseKind {
    Up,
    Cancel,
}

/// Scale restore scheduled after a release.
struct PendingSettle {
    timer: TimerHandle,
    tap: bool,
}

#[derive(Default)]
struct GestureState {
    pressed: bool,
    drag_armed: bool,
    drag_started: bool,
    origin: Option<Point>,
    generation: u64,
    long_press: Option<TimerHandle>,
    settle: Option<PendingSettle>,
    disposed: bool,
}

impl GestureState {
    fn phase(&self) -> GesturePhase {
        if !self.pressed {
            GesturePhase::Idle
        } else if self.drag_started {
            GesturePhase::Dragging
        } else if self.drag_armed {
            GesturePhase::Armed
        } else {
            GesturePhase::Pressed
        }
    }

    fn reset_gesture(&mut self) {
        self.pressed = false;
        self.drag_armed = false;
        self.drag_started = false;
        self.origin = None;
        if let Some(timer) = self.long_press.take() {
            timer.cancel();
        }
    }
}

struct ControllerInner {
    id: DraggableId,
    config: DraggableConfig,
    runtime: RuntimeHandle,
    sink: Rc<dyn DragReportSink>,
    scale: Animatable<f32>,
    pan: Animatable<Offset>,
    feedback: AnimationSequence<f32>,
    on_press: RefCell<Option<PressCallback>>,
    state: RefCell<GestureState>,
}

impl ControllerInner {
    fn arm(&self, generation: u64) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed || !state.pressed || state.generation != generation {
                log::trace!("stale long-press timer for {} ignored", self.id);
                return;
            }
            state.long_press = None;
            state.drag_armed = true;
        }
        log::debug!("{} armed for drag", self.id);
        self.feedback.start();
    }

    fn settle(&self, tap: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.settle = None;
        }
        self.scale.animate_to(REST_SCALE, AnimationType::spring());
        if tap {
            let on_press = self.on_press.borrow().clone();
            if let Some(on_press) = on_press {
                on_press();
            }
        }
    }
}

pub struct GestureController {
    inner: Rc<ControllerInner>,
}

impl GestureController {
    pub fn new(
        id: DraggableId,
        config: DraggableConfig,
        runtime: RuntimeHandle,
        sink: Rc<dyn DragReportSink>,
    ) -> Self {
        let scale = Animatable::new(REST_SCALE, runtime.clone());
        let pan = Animatable::new(Offset::ZERO, runtime.clone());
        let stage = config.stage_duration_millis;
        let feedback = AnimationSequence::new(
            scale.clone(),
            vec![
                AnimationStage::tween(config.scale, stage, Easing::EaseInOut),
                AnimationStage::tween(FEEDBACK_DIP_SCALE, stage, Easing::EaseInOut),
                AnimationStage::tween(FEEDBACK_HELD_SCALE, stage, Easing::EaseInOut),
            ],
        );
        Self {
            inner: Rc::new(ControllerInner {
                id,
                config,
                runtime,
                sink,
                scale,
                pan,
                feedback,
                on_press: RefCell::new(None),
                state: RefCell::new(GestureState::default()),
            }),
        }
    }

    pub fn id(&self) -> &DraggableId {
        &self.inner.id
    }

    pub fn config(&self) -> &DraggableConfig {
        &self.inner.config
    }

    pub fn set_on_press(&self, on_press: Option<PressCallback>) {
        *self.inner.on_press.borrow_mut() = on_press;
    }

    pub fn handle_pointer(&self, event: PointerEvent) {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up => self.release(event, ReleaseKind::Up),
            PointerEventKind::Cancel => self.release(event, ReleaseKind::Cancel),
        }
    }

    pub fn pointer_down(&self, event: PointerEvent) {
        let inner = &self.inner;
        let pending = {
            let mut state = inner.state.borrow_mut();
            if state.disposed {
                log::trace!("pointer down on disposed {} ignored", inner.id);
                return;
            }
            if state.pressed {
                log::debug!("pointer down on {} ignored: gesture in progress", inner.id);
                return;
            }
            state.settle.take()
        };
        // A settle still pending from the previous release completes now so it
        // never lands inside the new gesture.
        if let Some(pending) = pending {
            pending.timer.cancel();
            log::trace!("{} settled early by a new press", inner.id);
            inner.settle(pending.tap);
        }

        let mut state = inner.state.borrow_mut();
        if state.disposed || state.pressed {
            return;
        }
        state.pressed = true;
        state.drag_armed = false;
        state.drag_started = false;
        state.origin = Some(event.position);
        state.generation += 1;

        let generation = state.generation;
        let weak: Weak<ControllerInner> = Rc::downgrade(inner);
        let timer = inner
            .runtime
            .schedule_timeout(inner.config.long_press_delay_millis, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.arm(generation);
                }
            });
        state.long_press = Some(timer);
        log::trace!("{} pressed at {:?}", inner.id, event.position);
    }

    pub fn pointer_move(&self, event: PointerEvent) {
        let inner = &self.inner;
        let (translation, armed, first) = {
            let mut state = inner.state.borrow_mut();
            if state.disposed || !state.pressed {
                return;
            }
            let origin = state.origin.unwrap_or(event.position);
            let translation = event.translation.unwrap_or(event.position - origin);
            if state.drag_armed {
                let first = !state.drag_started;
                state.drag_started = true;
                (translation, true, first)
            } else {
                (translation, false, false)
            }
        };

        if first {
            log::debug!("{} drag started at {:?}", inner.id, event.position);
            inner.sink.drag_start(&inner.id, event.position);
        }
        inner.pan.snap_to(translation);
        if armed {
            inner.sink.drag_move(&inner.id, event.position);
        }
    }

    pub fn pointer_up(&self, event: PointerEvent) {
        self.release(event, ReleaseKind::Up);
    }

    pub fn pointer_cancel(&self, event: PointerEvent) {
        self.release(event, ReleaseKind::Cancel);
    }

    fn release(&self, event: PointerEvent, kind: ReleaseKind) {
        let inner = &self.inner;
        let translation = {
            let mut state = inner.state.borrow_mut();
            if state.disposed || !state.pressed {
                log::trace!("{kind:?} on idle {} ignored", inner.id);
                return;
            }
            let translation = event
                .translation
                .or_else(|| state.origin.map(|origin| event.position - origin))
                .unwrap_or(Offset::ZERO);
            state.reset_gesture();
            translation
        };
        inner.feedback.cancel();

        log::debug!("{} released ({kind:?}) at {:?}", inner.id, event.position);
        inner.sink.drag_end(&inner.id, event.position);

        if inner.config.bounce_back {
            inner.pan.animate_to(Offset::ZERO, AnimationType::spring());
        }

        if translation.within(inner.config.move_slop) {
            self.schedule_settle(kind == ReleaseKind::Up);
        } else {
            log::trace!("{} released outside slop {:?}", inner.id, translation);
        }
    }

    fn schedule_settle(&self, tap: bool) {
        let inner = &self.inner;
        let weak: Weak<ControllerInner> = Rc::downgrade(inner);
        let timer = inner
            .runtime
            .schedule_timeout(inner.config.delay_millis, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.settle(tap);
                }
            });
        // Replacing an older settle cancels it.
        inner.state.borrow_mut().settle = Some(PendingSettle { timer, tap });
    }

    /// Cancels every pending timer and stops the animations. Further input is ignored.
    pub fn dispose(&self) {
        let inner = &self.inner;
        {
            let mut state = inner.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.reset_gesture();
            if let Some(settle) = state.settle.take() {
                settle.timer.cancel();
            }
        }
        inner.feedback.cancel();
        inner.scale.stop();
        inner.pan.stop();
        log::trace!("{} disposed", inner.id);
    }

    pub fn phase(&self) -> GesturePhase {
        self.inner.state.borrow().phase()
    }

    pub fn is_pressed(&self) -> bool {
        self.inner.state.borrow().pressed
    }

    pub fn is_drag_armed(&self) -> bool {
        self.inner.state.borrow().drag_armed
    }

    pub fn is_drag_started(&self) -> bool {
        self.inner.state.borrow().drag_started
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.borrow().disposed
    }

    pub fn has_pending_long_press(&self) -> bool {
        self.inner
            .state
            .borrow()
            .long_press
            .as_ref()
            .is_some_and(TimerHandle::is_pending)
    }

    /// `true` between a tap release and its completion.
    pub fn is_tap_pending(&self) -> bool {
        self.inner
            .state
            .borrow()
            .settle
            .as_ref()
            .is_some_and(|settle| settle.tap && settle.timer.is_pending())
    }

    /// `true` while the armed feedback sequence may still schedule stages.
    pub fn is_feedback_active(&self) -> bool {
        self.inner.feedback.is_active()
    }

    pub fn feedback_stage(&self) -> Option<usize> {
        self.inner.feedback.current_stage()
    }

    pub fn scale(&self) -> f32 {
        self.inner.scale.value()
    }

    pub fn pan_offset(&self) -> Offset {
        self.inner.pan.value()
    }
}

impl Drop for GestureController {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
