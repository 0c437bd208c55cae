//! Ordered multi-stage animations.
//!
//! An [`AnimationSequence`] drives one [`Animatable`] through a fixed list of
//! stages. Each stage starts only when the previous one finishes. Cancelling
//! the sequence never touches the stage in flight; it only prevents the next
//! stage from being scheduled.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animatable::{Animatable, AnimationEnd, Lerp};
use crate::easing::Easing;
use crate::spec::AnimationType;

/// One `(target, animation)` step of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStage<T> {
    pub target: T,
    pub animation: AnimationType,
}

impl<T> AnimationStage<T> {
    pub fn new(target: T, animation: AnimationType) -> Self {
        Self { target, animation }
    }

    pub fn tween(target: T, duration_millis: u64, easing: Easing) -> Self {
        Self::new(target, AnimationType::tween(duration_millis, easing))
    }
}

pub struct AnimationSequence<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<SequenceInner<T>>>,
}

struct SequenceInner<T: Lerp + Clone + 'static> {
    animatable: Animatable<T>,
    stages: Vec<AnimationStage<T>>,
    next_stage: usize,
    current_stage: Option<usize>,
    active: bool,
    // Bumped on every start so callbacks from an older run are ignored.
    run: u64,
}

impl<T: Lerp + Clone + 'static> AnimationSequence<T> {
    pub fn new(animatable: Animatable<T>, stages: Vec<AnimationStage<T>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SequenceInner {
                animatable,
                stages,
                next_stage: 0,
                current_stage: None,
                active: false,
                run: 0,
            })),
        }
    }

    /// Starts from the first stage, abandoning any previous run.
    pub fn start(&self) {
        let run = {
            let mut inner = self.inner.borrow_mut();
            inner.run += 1;
            inner.next_stage = 0;
            inner.current_stage = None;
            inner.active = true;
            inner.run
        };
        Self::run_next(&self.inner, run);
    }

    /// Prevents any further stage from starting. The stage in flight keeps animating.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.active {
            log::trace!(
                "animation sequence cancelled after stage {:?}",
                inner.current_stage
            );
        }
        inner.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().active
    }

    /// Index of the most recently started stage of the current or last run.
    pub fn current_stage(&self) -> Option<usize> {
        self.inner.borrow().current_stage
    }

    fn run_next(this: &Rc<RefCell<SequenceInner<T>>>, run: u64) {
        let (animatable, stage) = {
            let mut inner = this.borrow_mut();
            if !inner.active || inner.run != run {
                return;
            }
            let index = inner.next_stage;
            let Some(stage) = inner.stages.get(index).cloned() else {
                inner.active = false;
                return;
            };
            inner.next_stage += 1;
            inner.current_stage = Some(index);
            (inner.animatable.clone(), stage)
        };

        let weak: Weak<RefCell<SequenceInner<T>>> = Rc::downgrade(this);
        animatable.animate_to_then(stage.target, stage.animation, move |end| {
            let Some(strong) = weak.upgrade() else {
                return;
            };
            match end {
                AnimationEnd::Finished => Self::run_next(&strong, run),
                AnimationEnd::Interrupted => {
                    let mut inner = strong.borrow_mut();
                    if inner.run == run {
                        inner.active = false;
                    }
                }
            }
        });
    }
}

impl<T: Lerp + Clone + 'static> Clone for AnimationSequence<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod tests;
