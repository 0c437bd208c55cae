//! Default thresholds and timings for long-press drag gestures.
//!
//! Distances are in logical pixels, durations in milliseconds.

/// How long a pointer must stay down before movement turns into a drag.
pub const LONG_PRESS_DELAY_MS: u64 = 1200;

/// Maximum displacement on either axis at release for the gesture to count as a tap.
pub const MOVE_SLOP: f32 = 15.0;

/// Wait between a tap release and the scale returning to rest.
pub const TAP_SETTLE_DELAY_MS: u64 = 40;

/// Duration of each stage of the armed feedback animation.
pub const FEEDBACK_STAGE_DURATION_MS: u64 = 300;

/// Peak scale reached by the first feedback stage.
pub const FEEDBACK_PEAK_SCALE: f32 = 1.1;

/// Scale of the second feedback stage (the "pick up" dip).
pub const FEEDBACK_DIP_SCALE: f32 = 0.7;

/// Scale held while the element is being dragged.
pub const FEEDBACK_HELD_SCALE: f32 = 0.9;

/// Scale of an element at rest.
pub const REST_SCALE: f32 = 1.0;
