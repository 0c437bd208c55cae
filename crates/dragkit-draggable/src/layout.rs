//! Element measurement seam.
//!
//! The host hands the binding a [`MeasureElement`] capability when the
//! element is mounted; the binding drops it on unmount. Measurement may
//! complete later than the call that requested it.

use dragkit_core::Rect;

/// Result of measuring an element in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measurement {
    Bounds(Rect),
    /// The element is not attached to a window, or the host cannot measure it.
    Unavailable,
}

pub type MeasureReply = Box<dyn FnOnce(Measurement)>;

pub trait MeasureElement {
    /// Measures the element and calls `reply` exactly once, possibly later.
    fn measure_in_window(&self, reply: MeasureReply);
}
