use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATED_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one draggable instance.
///
/// Used as the correlation key for drag reports and as the registration key in
/// the shared drag context. Compared by value; generated ids are never reused
/// and never equal a custom id.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DraggableId(IdRepr);

#[derive(Clone, PartialEq, Eq, Hash)]
enum IdRepr {
    Generated(u64),
    Custom(Rc<str>),
}

impl DraggableId {
    /// Allocates a fresh process-unique id.
    pub fn generate() -> Self {
        DraggableId(IdRepr::Generated(
            NEXT_GENERATED_ID.fetch_add(1, Ordering::Relaxed),
        ))
    }

    /// Wraps a caller-supplied key.
    pub fn custom(key: impl Into<Rc<str>>) -> Self {
        DraggableId(IdRepr::Custom(key.into()))
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.0, IdRepr::Generated(_))
    }
}

impl fmt::Display for DraggableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            IdRepr::Generated(value) => write!(f, "draggable#{value}"),
            IdRepr::Custom(key) => write!(f, "draggable:{key}"),
        }
    }
}

impl fmt::Debug for DraggableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
