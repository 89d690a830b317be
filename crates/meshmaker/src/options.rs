use std::{fs, path::PathBuf};

use meshmaker_undo::UndoSettings;
use serde::{Deserialize, Serialize};

/// Persisted options, stored in `options.toml` in the configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub undo: UndoSettings,

    /// Directory `save`/`open` resolve relative paths against
    #[serde(default)]
    pub scene_dir: Option<PathBuf>,
}

impl Options {
    pub const FILE_NAME: &'static str = "options.toml";

    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "GitHub", "meshmaker").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn load() -> Self {
        let Some(dir) = Self::config_dir() else {
            return Self::default();
        };
        let options_file = dir.join(Self::FILE_NAME);
        if !options_file.exists() {
            return Self::default();
        }
        match fs::read_to_string(&options_file) {
            Ok(txt) => Self::parse(&txt),
            Err(err) => {
                log::error!("Error reading options file: {}", err);
                Self::default()
            }
        }
    }

    pub fn parse(txt: &str) -> Self {
        match toml::from_str(txt) {
            Ok(options) => options,
            Err(err) => {
                log::error!("Error parsing options file: {}", err);
                Self::default()
            }
        }
    }

    pub fn store(&self) {
        let Some(dir) = Self::config_dir() else {
            return;
        };
        if !dir.exists() && fs::create_dir_all(&dir).is_err() {
            log::error!("Can't create configuration directory {:?}", dir);
            return;
        }
        match toml::to_string_pretty(self) {
            Ok(text) => {
                if let Err(err) = fs::write(dir.join(Self::FILE_NAME), text) {
                    log::error!("Error writing options file: {}", err);
                }
            }
            Err(err) => log::error!("Error serializing options file: {}", err),
        }
    }

    pub fn resolve(&self, path: PathBuf) -> PathBuf {
        match &self.scene_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    }
}
