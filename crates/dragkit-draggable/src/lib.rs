//! Long-press draggable for dragkit.
//!
//! A draggable tells a tap apart from a long-press-to-drag gesture, plays a
//! short scale animation once the press is held long enough, and reports
//! pointer positions to a shared [`DragContext`] while dragging:
//!
//! - [`GestureController`] interprets pointer input (press, long-press arm,
//!   drag, release) and emits identity-tagged drag reports.
//! - [`DragContextBinding`] registers the draggable with the context, keeps
//!   its entry up to date, and forwards reports and layout.
//! - [`Draggable`] wires both together under one [`DraggableId`].
//! - [`DragRegistry`] is an in-process context implementation.

mod binding;
mod config;
mod context;
mod controller;
mod draggable;
mod error;
pub mod gesture_constants;
mod identity;
mod layout;
mod pointer;
mod props;
mod registry;

pub use binding::{DragContextBinding, Lifecycle};
pub use config::DraggableConfig;
pub use context::{diff_props, DragContext, DraggableRegistration, DraggableUpdate};
pub use controller::{DragReportSink, GestureController, GesturePhase};
pub use draggable::Draggable;
pub use error::DraggableError;
pub use identity::DraggableId;
pub use layout::{MeasureElement, MeasureReply, Measurement};
pub use pointer::{PointerEvent, PointerEventKind};
pub use props::{DragCallback, DraggableProps, LayoutCallback, PressCallback};
pub use registry::{ActiveDrag, DragRegistry, RegisteredDraggable};
