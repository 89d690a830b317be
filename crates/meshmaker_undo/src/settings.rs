use serde::{Deserialize, Serialize};

/// Tunables for an [`crate::UndoManager`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoSettings {
    /// Maximum number of undo entries kept. The oldest entries are evicted
    /// first. `None` keeps the whole history.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl UndoSettings {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth: Some(max_depth) }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
