use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use dragkit_core::{FrameCallbackRegistration, Offset, RuntimeHandle};

use crate::spec::AnimationType;

/// Fixed integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 0.016;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Offset {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Offset::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

/// How a single animation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The value reached its target.
    Finished,
    /// Another animation, a snap, or a stop took over before the target was reached.
    Interrupted,
}

type EndCallback = Box<dyn FnOnce(AnimationEnd)>;

/// Value holder animated by runtime frame callbacks.
///
/// Clones share the same underlying value.
pub struct Animatable<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + 'static> {
    runtime: RuntimeHandle,
    current: T,
    start: T,
    target: T,
    animation_type: AnimationType,
    running: bool,
    start_time_millis: u64,
    last_frame_millis: Option<u64>,
    // Spring state lives in progress space: 0.0 at `start`, 1.0 at `target`.
    progress: f32,
    velocity: f32,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndCallback>,
}

impl<T: Lerp + Clone + 'static> AnimatableInner<T> {
    /// Stops the current run, returning its completion callback if one was pending.
    fn halt(&mut self) -> Option<EndCallback> {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        let was_running = std::mem::replace(&mut self.running, false);
        let on_end = self.on_end.take();
        if was_running {
            on_end
        } else {
            None
        }
    }

    fn settle(&mut self) -> Option<EndCallback> {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.progress = 1.0;
        self.velocity = 0.0;
        self.running = false;
        self.last_frame_millis = None;
        self.on_end.take()
    }
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            start_time_millis: runtime.now_millis(),
            runtime,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            running: false,
            last_frame_millis: None,
            progress: 1.0,
            velocity: 0.0,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Current (possibly mid-flight) value.
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Animate from the current value to `target`.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.start_run(target, animation, None);
    }

    /// Animate to `target` and call `on_end` once the run finishes or is interrupted.
    pub fn animate_to_then(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.start_run(target, animation, Some(Box::new(on_end)));
    }

    /// Jump to `value` without animating, interrupting any running animation.
    pub fn snap_to(&self, value: T) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            inner.current = value.clone();
            inner.start = value.clone();
            inner.target = value;
            inner.progress = 1.0;
            inner.velocity = 0.0;
            interrupted
        };
        if let Some(on_end) = interrupted {
            on_end(AnimationEnd::Interrupted);
        }
    }

    /// Freeze at the current value.
    pub fn stop(&self) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            inner.target = inner.current.clone();
            interrupted
        };
        if let Some(on_end) = interrupted {
            on_end(AnimationEnd::Interrupted);
        }
    }

    fn start_run(&self, target: T, animation: AnimationType, on_end: Option<EndCallback>) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.start_time_millis = inner.runtime.now_millis();
            inner.last_frame_millis = None;
            inner.progress = 0.0;
            inner.velocity = 0.0;
            inner.running = true;
            inner.on_end = on_end;
            interrupted
        };
        if let Some(on_end) = interrupted {
            on_end(AnimationEnd::Interrupted);
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || !inner.running {
                return;
            }
            inner.runtime.frame_clock()
        };
        let weak: Weak<RefCell<AnimatableInner<T>>> = Rc::downgrade(this);
        let registration = clock.with_frame_millis(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_millis: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut inner = this.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.complete();
            }
            if !inner.running {
                return;
            }

            let elapsed = frame_time_millis.saturating_sub(inner.start_time_millis);
            match inner.animation_type {
                AnimationType::Tween(spec) => {
                    if elapsed < spec.delay_millis {
                        schedule_next = true;
                    } else {
                        let animation_elapsed = elapsed - spec.delay_millis;
                        let linear_progress = if spec.duration_millis == 0 {
                            1.0
                        } else {
                            (animation_elapsed as f32 / spec.duration_millis as f32)
                                .clamp(0.0, 1.0)
                        };
                        let eased = spec.easing.transform(linear_progress);
                        inner.progress = eased;
                        inner.current = inner.start.lerp(&inner.target, eased);

                        if linear_progress >= 1.0 {
                            finished = Some(inner.settle());
                        } else {
                            schedule_next = true;
                        }
                    }
                }
                AnimationType::Spring(spec) => {
                    let last = inner.last_frame_millis.unwrap_or(inner.start_time_millis);
                    let dt = frame_time_millis.saturating_sub(last) as f32 / 1000.0;
                    inner.last_frame_millis = Some(frame_time_millis);

                    if dt == 0.0 {
                        schedule_next = true;
                    } else {
                        // Damped harmonic oscillator pulling progress towards 1.0,
                        // semi-implicit Euler for stability.
                        let stiffness = spec.stiffness;
                        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
                        let mut simulated = 0.0f32;
                        while simulated < dt {
                            let step = SPRING_TIMESTEP.min(dt - simulated);
                            let displacement = inner.progress - 1.0;
                            let force = -stiffness * displacement - damping * inner.velocity;
                            inner.velocity += force * step;
                            inner.progress += inner.velocity * step;
                            simulated += step;
                        }
                        let progress = inner.progress.clamp(-1.0, 2.0);
                        inner.current = inner.start.lerp(&inner.target, progress);

                        let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                        let near_target =
                            (inner.progress - 1.0).abs() < spec.position_threshold;
                        if at_rest && near_target {
                            finished = Some(inner.settle());
                        } else {
                            schedule_next = true;
                        }
                    }
                }
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some(Some(on_end)) = finished {
            on_end(AnimationEnd::Finished);
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Lerp + Clone + fmt::Debug + 'static> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("current", &inner.current)
            .field("target", &inner.target)
            .field("running", &inner.running)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animatable_tests.rs"]
mod tests;
