use crate::identity::DraggableId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraggableError {
    /// No shared drag context was supplied at construction.
    MissingContext,
    AlreadyMounted { id: DraggableId },
    Unmounted { id: DraggableId },
}

impl std::fmt::Display for DraggableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraggableError::MissingContext => {
                write!(f, "draggable requires a shared drag context")
            }
            DraggableError::AlreadyMounted { id } => write!(f, "{id} is already mounted"),
            DraggableError::Unmounted { id } => {
                write!(f, "{id} was unmounted and cannot be mounted again")
            }
        }
    }
}

impl std::error::Error for DraggableError {}
