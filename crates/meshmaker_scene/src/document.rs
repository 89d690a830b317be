//! Scene document
//!
//! All undoable edits go through here:
//! - Snapshot-based edits capture [`AllItems`] or [`Manipulations`] around the
//!   mutation and register a swap
//! - Item creation registers a paired add/remove invocation instead
//! - Selection changes are not recorded

use std::path::{Path, PathBuf};

use meshmaker_undo::{Invocation, Snapshot, UndoManager, UndoSettings};

use crate::{AllItems, Item, Manipulations, MeshType, Result, Scene, read_scene, write_scene};

pub const UNTITLED: &str = "Untitled";

/// One open document: the scene plus its history.
pub struct Document {
    name: String,
    path: Option<PathBuf>,
    scene: Scene,
    undo: UndoManager<Scene>,
    /// Transforms captured when the current manipulation started
    manipulation: Option<Manipulations>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&UndoSettings::default())
    }
}

impl Document {
    pub fn new(settings: &UndoSettings) -> Self {
        Self {
            name: UNTITLED.to_string(),
            path: None,
            scene: Scene::new(),
            undo: UndoManager::with_settings(settings),
            manipulation: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &UndoManager<Scene> {
        &self.undo
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn needs_save(&self) -> bool {
        self.undo.needs_save()
    }

    /// Window title, with a marker for unsaved changes
    pub fn title(&self) -> String {
        if self.undo.needs_save() { format!("{} *", self.name) } else { self.name.clone() }
    }

    pub fn on_needs_save_changed(&mut self, observer: impl FnMut(bool) + Send + 'static) {
        self.undo.on_needs_save_changed(observer);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Undoable edits
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_item(&mut self, kind: MeshType, steps: u32) {
        self.with_manipulation_suspended(|doc| add_primitive(&mut doc.scene, &mut doc.undo, (kind, steps)));
    }

    /// Returns false if nothing is selected.
    pub fn delete_selected(&mut self) -> bool {
        if self.scene.selected_count() == 0 {
            return false;
        }
        self.with_manipulation_suspended(|doc| {
            doc.undo.record::<AllItems, _>(&mut doc.scene, "Delete", |scene| scene.remove_selected());
        });
        true
    }

    /// Returns false if nothing is selected.
    pub fn clone_selected(&mut self) -> bool {
        if self.scene.selected_count() == 0 {
            return false;
        }
        self.with_manipulation_suspended(|doc| {
            doc.undo.record::<AllItems, _>(&mut doc.scene, "Clone", |scene| scene.clone_selected());
        });
        true
    }

    /// Returns false unless at least two items are selected.
    pub fn merge_selected(&mut self) -> bool {
        if self.scene.selected_count() < 2 {
            return false;
        }
        let mut merged = false;
        self.with_manipulation_suspended(|doc| {
            merged = doc.undo.record::<AllItems, _>(&mut doc.scene, "Merge", |scene| scene.merge_selected());
        });
        merged
    }

    /// Clone the selection and move the clones, undone as one step.
    pub fn duplicate_selected(&mut self, offset: [f32; 3]) -> Result<bool> {
        if self.scene.selected_count() == 0 {
            return Ok(false);
        }
        self.undo.begin_group("Duplicate")?;
        self.clone_selected();
        self.translate_selected(offset);
        self.undo.end_group()?;
        Ok(true)
    }

    pub fn manipulation_started(&mut self) {
        if self.manipulation.is_some() {
            log::warn!("Manipulation started twice, keeping the first state");
            return;
        }
        self.manipulation = Some(Manipulations::capture(&self.scene));
    }

    pub fn manipulation_ended(&mut self) {
        let Some(old) = self.manipulation.take() else {
            log::warn!("Manipulation ended without being started");
            return;
        };
        let current = Manipulations::capture(&self.scene);
        if old == current {
            log::debug!("Manipulation changed nothing");
            return;
        }
        self.undo.record_swap("Manipulations", old, current);
    }

    pub fn is_manipulating(&self) -> bool {
        self.manipulation.is_some()
    }

    /// Live update during a manipulation; recorded when the manipulation ends.
    pub fn manipulate(&mut self, f: impl FnOnce(&mut Scene)) {
        if self.manipulation.is_none() {
            log::warn!("Manipulating without manipulation_started, change is not undoable");
        }
        f(&mut self.scene);
    }

    pub fn translate_selected(&mut self, delta: [f32; 3]) -> bool {
        self.manipulate_selected(|scene| scene.translate_selected(delta))
    }

    pub fn rotate_selected(&mut self, delta: [f32; 3]) -> bool {
        self.manipulate_selected(|scene| scene.rotate_selected(delta))
    }

    pub fn scale_selected(&mut self, factor: [f32; 3]) -> bool {
        self.manipulate_selected(|scene| scene.scale_selected(factor))
    }

    fn manipulate_selected(&mut self, f: impl FnOnce(&mut Scene)) -> bool {
        if self.scene.selected_count() == 0 {
            return false;
        }
        let restart = self.manipulation.is_some();
        if restart {
            self.manipulation_ended();
        }
        self.manipulation_started();
        f(&mut self.scene);
        self.manipulation_ended();
        if restart {
            self.manipulation_started();
        }
        true
    }

    /// Record a pending manipulation before running an action that changes the
    /// item count, then resume it on the new item list.
    fn with_manipulation_suspended(&mut self, action: impl FnOnce(&mut Self)) {
        let restart = self.manipulation.is_some();
        if restart {
            self.manipulation_ended();
        }
        action(self);
        if restart {
            self.manipulation_started();
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Selection (not undoable)
    // ═══════════════════════════════════════════════════════════════════════

    pub fn select_all(&mut self) {
        self.scene.change_selection(true);
    }

    pub fn deselect_all(&mut self) {
        self.scene.change_selection(false);
    }

    pub fn invert_selection(&mut self) {
        self.scene.invert_selection();
    }

    pub fn select(&mut self, index: usize, selected: bool) -> bool {
        self.scene.set_selected(index, selected)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // History
    // ═══════════════════════════════════════════════════════════════════════

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// # Errors
    ///
    /// Fails if there is nothing to undo.
    pub fn undo(&mut self) -> Result<()> {
        self.finish_manipulation();
        self.undo.undo(&mut self.scene)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails if there is nothing to redo.
    pub fn redo(&mut self) -> Result<()> {
        self.finish_manipulation();
        self.undo.redo(&mut self.scene)?;
        Ok(())
    }

    fn finish_manipulation(&mut self) {
        if self.manipulation.is_some() {
            log::debug!("Finishing manipulation before replaying history");
            self.manipulation_ended();
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Document lifecycle
    // ═══════════════════════════════════════════════════════════════════════

    pub fn new_document(&mut self) {
        self.reset(Scene::new(), None);
    }

    /// # Errors
    ///
    /// Fails if the file can't be read or parsed. The current document is kept
    /// in that case.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let scene = read_scene(path)?;
        log::info!("Opened {} with {} items", path.display(), scene.len());
        self.reset(scene, Some(path.to_path_buf()));
        Ok(())
    }

    /// # Errors
    ///
    /// Fails if the file can't be written. The dirty flag is kept in that case.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.finish_manipulation();
        write_scene(path, &self.scene)?;
        log::info!("Saved {}", path.display());
        self.set_path(Some(path.to_path_buf()));
        self.undo.document_saved();
        Ok(())
    }

    fn reset(&mut self, scene: Scene, path: Option<PathBuf>) {
        self.scene = scene;
        self.manipulation = None;
        self.set_path(path);
        self.undo.clear();
        self.undo.document_saved();
    }

    fn set_path(&mut self, path: Option<PathBuf>) {
        self.name = path
            .as_deref()
            .and_then(|p| p.file_stem())
            .map_or_else(|| UNTITLED.to_string(), |stem| stem.to_string_lossy().into_owned());
        self.path = path;
    }
}

/// Append a primitive and register its removal.
fn add_primitive(scene: &mut Scene, undo: &mut UndoManager<Scene>, (kind, steps): (MeshType, u32)) {
    scene.change_selection(false);
    let mut item = Item::primitive(kind, steps);
    item.selected = true;
    scene.add_item(item);
    undo.prepare_undo(format!("Add {kind}"), Invocation::new(remove_primitive, (kind, steps)));
}

/// Remove the primitive appended last and register adding it back.
fn remove_primitive(scene: &mut Scene, undo: &mut UndoManager<Scene>, (kind, steps): (MeshType, u32)) {
    scene.change_selection(false);
    if scene.remove_last().is_none() {
        log::warn!("Undoing 'Add {}' on an empty scene", kind);
    }
    undo.prepare_undo(format!("Add {kind}"), Invocation::new(add_primitive, (kind, steps)));
}
