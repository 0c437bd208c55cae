//! Animation system for dragkit
//!
//! Provides time-based tweens with easing curves, spring physics, and ordered
//! stage sequences, all driven by the frame callbacks of a
//! [`dragkit_core::Runtime`].

mod animatable;
mod easing;
mod sequence;
mod spec;

pub use animatable::{Animatable, AnimationEnd, Lerp};
pub use easing::Easing;
pub use sequence::{AnimationSequence, AnimationStage};
pub use spec::{AnimationSpec, AnimationType, SpringSpec};
