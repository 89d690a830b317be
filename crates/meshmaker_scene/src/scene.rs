use serde::{Deserialize, Serialize};

use crate::{Item, Transform};

/// The edited model: an ordered list of items.
///
/// Nothing in here knows about undo. The document wraps every mutation that
/// should be undoable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    items: Vec<Item>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove_last(&mut self) -> Option<Item> {
        self.items.pop()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|item| item.selected).count()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.items.iter().enumerate().filter(|(_, item)| item.selected).map(|(i, _)| i).collect()
    }

    pub fn change_selection(&mut self, selected: bool) {
        for item in &mut self.items {
            item.selected = selected;
        }
    }

    pub fn invert_selection(&mut self) {
        for item in &mut self.items {
            item.selected = !item.selected;
        }
    }

    /// Returns false if `index` is out of range.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Remove all selected items, returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.selected);
        before - self.items.len()
    }

    /// Append copies of the selected items. The copies become the selection.
    pub fn clone_selected(&mut self) -> usize {
        let clones: Vec<Item> = self.items.iter().filter(|item| item.selected).cloned().collect();
        let count = clones.len();
        self.change_selection(false);
        self.items.extend(clones.into_iter().map(|mut item| {
            item.selected = true;
            item
        }));
        count
    }

    /// Replace the selected items with one merged item at the end of the list.
    /// Needs at least two selected items.
    pub fn merge_selected(&mut self) -> bool {
        if self.selected_count() < 2 {
            return false;
        }
        let (mut parts, rest): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.items).into_iter().partition(|item| item.selected);
        for part in &mut parts {
            part.selected = false;
        }
        self.items = rest;
        let mut merged = Item::merged(parts);
        merged.selected = true;
        self.items.push(merged);
        true
    }

    pub fn transforms(&self) -> Vec<Transform> {
        self.items.iter().map(|item| item.transform).collect()
    }

    /// Apply per-item transforms. Extra entries on either side are ignored.
    pub fn set_transforms(&mut self, transforms: &[Transform]) {
        if transforms.len() != self.items.len() {
            log::warn!("Applying {} transforms to {} items", transforms.len(), self.items.len());
        }
        for (item, transform) in self.items.iter_mut().zip(transforms) {
            item.transform = *transform;
        }
    }

    pub fn translate_selected(&mut self, delta: [f32; 3]) {
        self.selected_mut().for_each(|item| item.transform.translate(delta));
    }

    pub fn rotate_selected(&mut self, delta: [f32; 3]) {
        self.selected_mut().for_each(|item| item.transform.rotate(delta));
    }

    pub fn scale_selected(&mut self, factor: [f32; 3]) {
        self.selected_mut().for_each(|item| item.transform.scale_by(factor));
    }

    fn selected_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut().filter(|item| item.selected)
    }
}
