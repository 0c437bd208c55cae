use dragkit_core::{Offset, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer sample delivered by the host's gesture capture layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Absolute page coordinates.
    pub position: Point,
    /// Gesture-relative displacement (`dx`, `dy`) since pointer-down, when the
    /// capture layer tracks it.
    pub translation: Option<Offset>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            translation: None,
        }
    }

    pub fn down(position: Point) -> Self {
        Self::new(PointerEventKind::Down, position)
    }

    pub fn moved(position: Point) -> Self {
        Self::new(PointerEventKind::Move, position)
    }

    pub fn up(position: Point) -> Self {
        Self::new(PointerEventKind::Up, position)
    }

    pub fn cancel(position: Point) -> Self {
        Self::new(PointerEventKind::Cancel, position)
    }

    pub fn with_translation(mut self, translation: Offset) -> Self {
        self.translation = Some(translation);
        self
    }
}
