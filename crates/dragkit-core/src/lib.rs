//! Core runtime for dragkit: a single-threaded event loop with an explicit
//! clock, cancellable timers and one-shot frame callbacks, plus the geometry
//! types shared by the gesture and animation crates.

mod frame_clock;
mod geometry;
mod platform;
mod runtime;
mod timer;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use geometry::{Offset, Point, Rect};
pub use platform::{Clock, SystemClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle, TimerId, FRAME_INTERVAL_MS};
pub use timer::TimerHandle;
