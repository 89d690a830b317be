//! Undo/redo engine for MeshMaker documents
//!
//! Actions register a deferred [`Invocation`] that reverses them. Replaying it
//! from [`UndoManager::undo`] registers the opposite invocation, which becomes
//! the redo step.

mod error;
pub use error::{History, Result, UndoError};

mod invocation;
pub use invocation::Invocation;

mod undo_manager;
pub use undo_manager::{ReplayState, UndoEntry, UndoManager};

mod settings;
pub use settings::UndoSettings;

pub mod swap;
pub use swap::{Snapshot, swap_state};

mod shared;
pub use shared::SharedHistory;
