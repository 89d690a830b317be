//! Error types for scene documents

use std::path::PathBuf;

use meshmaker_undo::UndoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read scene file '{path}': {message}")]
    ReadFile { path: PathBuf, message: String },

    #[error("Invalid scene file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize scene: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unsupported scene file version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Undo error: {0}")]
    Undo(#[from] UndoError),
}

pub type Result<T> = std::result::Result<T, SceneError>;
