//! Scene snapshots used with the undo swap convention

use meshmaker_undo::Snapshot;

use crate::{Item, Scene, Transform};

/// The complete item list, selection included.
#[derive(Clone, Debug, PartialEq)]
pub struct AllItems(pub Vec<Item>);

impl Snapshot<Scene> for AllItems {
    fn capture(scene: &Scene) -> Self {
        AllItems(scene.items().to_vec())
    }

    fn restore(&self, scene: &mut Scene) {
        scene.set_items(self.0.clone());
    }
}

/// Per-item transforms, captured around an interactive manipulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Manipulations(pub Vec<Transform>);

impl Snapshot<Scene> for Manipulations {
    fn capture(scene: &Scene) -> Self {
        Manipulations(scene.transforms())
    }

    fn restore(&self, scene: &mut Scene) {
        scene.set_transforms(&self.0);
    }
}
