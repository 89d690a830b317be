//! Scene file format
//!
//! Scenes are stored as TOML: a `version` key followed by one `[[items]]` table
//! per item.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Item, Result, Scene, SceneError};

pub const SCENE_FILE_VERSION: u32 = 1;
pub const SCENE_FILE_EXTENSION: &str = "mmscene";

#[derive(Debug, Serialize, Deserialize)]
struct SceneFile {
    version: u32,
    #[serde(default)]
    items: Vec<Item>,
}

pub fn scene_to_string(scene: &Scene) -> Result<String> {
    let file = SceneFile {
        version: SCENE_FILE_VERSION,
        items: scene.items().to_vec(),
    };
    Ok(toml::to_string_pretty(&file)?)
}

pub fn scene_from_str(text: &str) -> Result<Scene> {
    let file: SceneFile = toml::from_str(text)?;
    if file.version > SCENE_FILE_VERSION {
        return Err(SceneError::UnsupportedVersion { version: file.version });
    }
    let mut scene = Scene::new();
    scene.set_items(file.items);
    Ok(scene)
}

pub fn write_scene(path: &Path, scene: &Scene) -> Result<()> {
    let text = scene_to_string(scene)?;
    fs::write(path, text)?;
    Ok(())
}

pub fn read_scene(path: &Path) -> Result<Scene> {
    let text = fs::read_to_string(path).map_err(|err| SceneError::ReadFile {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    scene_from_str(&text)
}
