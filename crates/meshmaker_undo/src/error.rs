//! Error types for the undo engine

use thiserror::Error;

use crate::ReplayState;

/// Which history an operation addressed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum History {
    Undo,
    Redo,
}

impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            History::Undo => write!(f, "undo"),
            History::Redo => write!(f, "redo"),
        }
    }
}

/// Contract violations reported by [`crate::UndoManager`] and [`crate::Invocation`].
///
/// None of these are transient; they all point at a bug in the calling code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UndoError {
    #[error("Invocation was already executed")]
    InvocationReused,

    #[error("The {0} stack is empty")]
    EmptyHistory(History),

    #[error("Undo/redo requested while already {0}")]
    Reentrancy(ReplayState),

    #[error("Undo group '{0}' is still open")]
    GroupOpen(String),

    #[error("No undo group is open")]
    NoOpenGroup,
}

pub type Result<T> = std::result::Result<T, UndoError>;
