//! Scene model and document layer of MeshMaker
//!
//! The mesh geometry itself lives in the rendering engine. This crate keeps
//! the item list that geometry hangs off, and routes every edit through the
//! undo history.

mod error;
pub use error::{Result, SceneError};

mod item;
pub use item::{Item, Mesh, MeshType, Transform};

mod scene;
pub use scene::Scene;

mod snapshots;
pub use snapshots::{AllItems, Manipulations};

mod file;
pub use file::{SCENE_FILE_EXTENSION, SCENE_FILE_VERSION, read_scene, scene_from_str, scene_to_string, write_scene};

mod document;
pub use document::{Document, UNTITLED};

// Re-export the engine types callers need alongside a document
pub use meshmaker_undo::{UndoError, UndoManager, UndoSettings};
