//! Testing utilities and harness for dragkit

pub mod element;
pub mod recording;
pub mod rule;

pub use element::FakeElement;
pub use recording::{DragContextCall, RecordingDragContext, UpdateRecord};
pub use rule::DragTestRule;

pub mod prelude {
    pub use crate::element::FakeElement;
    pub use crate::recording::{DragContextCall, RecordingDragContext, UpdateRecord};
    pub use crate::rule::DragTestRule;
}
