//! Undoable document edits

use meshmaker_scene::{Document, MeshType, SceneError, UndoError};

use crate::helpers::{create_test_document, item_names, positions};

#[test]
fn test_add_cube_scenario() {
    let mut doc = Document::default();

    doc.add_item(MeshType::Cube, 1);
    assert!(doc.can_undo());
    assert!(!doc.can_redo());
    assert_eq!(doc.history().undo_name(), Some("Add Cube"));
    assert_eq!(doc.scene().selected_indices(), vec![0]);

    doc.undo().unwrap();
    assert!(doc.scene().is_empty());
    assert!(!doc.can_undo());
    assert!(doc.can_redo());
    assert_eq!(doc.history().redo_name(), Some("Add Cube"));

    doc.redo().unwrap();
    assert_eq!(item_names(&doc), vec!["Cube"]);
    assert!(doc.can_undo());
    assert!(!doc.can_redo());
}

#[test]
fn test_add_deselects_previous_items() {
    let doc = create_test_document();
    assert_eq!(doc.scene().selected_indices(), vec![2]);
}

#[test]
fn test_delete_and_undo() {
    let mut doc = create_test_document();
    doc.select_all();
    doc.select(1, false);
    let before = doc.scene().clone();

    assert!(doc.delete_selected());
    assert_eq!(item_names(&doc), vec!["Sphere"]);
    assert_eq!(doc.history().undo_name(), Some("Delete"));

    doc.undo().unwrap();
    assert_eq!(doc.scene(), &before);

    doc.redo().unwrap();
    assert_eq!(item_names(&doc), vec!["Sphere"]);
}

#[test]
fn test_edits_without_selection_are_ignored() {
    let mut doc = create_test_document();
    doc.deselect_all();
    let undo_len = doc.history().undo_len();

    assert!(!doc.delete_selected());
    assert!(!doc.clone_selected());
    assert!(!doc.merge_selected());
    assert!(!doc.translate_selected([1.0, 0.0, 0.0]));
    assert!(!doc.duplicate_selected([1.0, 0.0, 0.0]).unwrap());

    assert_eq!(doc.history().undo_len(), undo_len);
}

#[test]
fn test_clone_and_undo() {
    let mut doc = create_test_document();

    assert!(doc.clone_selected());
    assert_eq!(item_names(&doc), vec!["Cube", "Sphere", "Plane", "Plane"]);
    assert_eq!(doc.scene().selected_indices(), vec![3]);

    doc.undo().unwrap();
    assert_eq!(item_names(&doc), vec!["Cube", "Sphere", "Plane"]);
    assert_eq!(doc.scene().selected_indices(), vec![2]);
}

#[test]
fn test_merge_and_undo() {
    let mut doc = create_test_document();
    doc.select_all();

    assert!(doc.merge_selected());
    assert_eq!(item_names(&doc), vec!["Merged"]);
    assert_eq!(doc.history().undo_name(), Some("Merge"));

    doc.undo().unwrap();
    assert_eq!(item_names(&doc), vec!["Cube", "Sphere", "Plane"]);
}

#[test]
fn test_translate_records_manipulation() {
    let mut doc = create_test_document();

    assert!(doc.translate_selected([0.0, 1.0, 0.0]));
    assert_eq!(doc.history().undo_name(), Some("Manipulations"));
    assert_eq!(positions(&doc)[2], [0.0, 1.0, 0.0]);

    doc.undo().unwrap();
    assert_eq!(positions(&doc)[2], [0.0, 0.0, 0.0]);
    doc.redo().unwrap();
    assert_eq!(positions(&doc)[2], [0.0, 1.0, 0.0]);
}

#[test]
fn test_interactive_manipulation_is_one_step() {
    let mut doc = create_test_document();
    let undo_len = doc.history().undo_len();

    doc.manipulation_started();
    assert!(doc.is_manipulating());
    for _ in 0..10 {
        doc.manipulate(|scene| scene.translate_selected([0.5, 0.0, 0.0]));
    }
    doc.manipulation_ended();

    assert!(!doc.is_manipulating());
    assert_eq!(doc.history().undo_len(), undo_len + 1);
    assert_eq!(positions(&doc)[2], [5.0, 0.0, 0.0]);

    doc.undo().unwrap();
    assert_eq!(positions(&doc)[2], [0.0, 0.0, 0.0]);
}

#[test]
fn test_manipulation_without_change_records_nothing() {
    let mut doc = create_test_document();
    let undo_len = doc.history().undo_len();

    doc.manipulation_started();
    doc.manipulation_ended();

    assert_eq!(doc.history().undo_len(), undo_len);
}

#[test]
fn test_clone_during_manipulation_splits_steps() {
    let mut doc = create_test_document();

    doc.manipulation_started();
    doc.manipulate(|scene| scene.translate_selected([1.0, 0.0, 0.0]));
    assert!(doc.clone_selected());
    assert!(doc.is_manipulating());
    doc.manipulate(|scene| scene.translate_selected([1.0, 0.0, 0.0]));
    doc.manipulation_ended();

    let names: Vec<&str> = doc.history().undo_entries().map(|e| e.name()).collect();
    assert_eq!(&names[3..], &["Manipulations", "Clone", "Manipulations"]);
    assert_eq!(positions(&doc)[2], [1.0, 0.0, 0.0]);
    assert_eq!(positions(&doc)[3], [2.0, 0.0, 0.0]);
}

#[test]
fn test_add_during_manipulation_splits_steps() {
    let mut doc = create_test_document();

    doc.manipulation_started();
    doc.add_item(MeshType::Sphere, 8);
    assert!(doc.is_manipulating());
    doc.manipulate(|scene| scene.translate_selected([5.0, 0.0, 0.0]));
    doc.manipulation_ended();

    let names: Vec<&str> = doc.history().undo_entries().map(|e| e.name()).collect();
    assert_eq!(&names[3..], &["Add Sphere", "Manipulations"]);
    assert_eq!(positions(&doc)[3], [5.0, 0.0, 0.0]);

    doc.undo().unwrap();
    assert_eq!(positions(&doc)[3], [0.0, 0.0, 0.0]);
    doc.undo().unwrap();
    assert_eq!(item_names(&doc), vec!["Cube", "Sphere", "Plane"]);
}

#[test]
fn test_merge_during_manipulation_splits_steps() {
    let mut doc = Document::default();
    doc.add_item(MeshType::Cube, 1);
    doc.add_item(MeshType::Plane, 1);
    doc.select_all();

    doc.manipulation_started();
    doc.manipulate(|scene| scene.translate_selected([1.0, 0.0, 0.0]));
    assert!(doc.merge_selected());
    doc.manipulate(|scene| scene.translate_selected([0.0, 2.0, 0.0]));
    doc.manipulation_ended();

    let names: Vec<&str> = doc.history().undo_entries().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Add Cube", "Add Plane", "Manipulations", "Merge", "Manipulations"]);
    assert_eq!(positions(&doc), vec![[0.0, 2.0, 0.0]]);

    doc.undo().unwrap();
    assert_eq!(positions(&doc), vec![[0.0, 0.0, 0.0]]);
    doc.undo().unwrap();
    assert_eq!(positions(&doc), vec![[1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    doc.undo().unwrap();
    assert_eq!(positions(&doc), vec![[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
}

#[test]
fn test_undo_finishes_pending_manipulation() {
    let mut doc = create_test_document();

    doc.manipulation_started();
    doc.manipulate(|scene| scene.translate_selected([3.0, 0.0, 0.0]));
    doc.undo().unwrap();

    assert!(!doc.is_manipulating());
    assert_eq!(positions(&doc)[2], [0.0, 0.0, 0.0]);
    assert_eq!(doc.history().redo_name(), Some("Manipulations"));
}

#[test]
fn test_duplicate_is_one_step() {
    let mut doc = create_test_document();

    assert!(doc.duplicate_selected([0.0, 0.0, 2.0]).unwrap());
    assert_eq!(doc.history().undo_name(), Some("Duplicate"));
    assert_eq!(item_names(&doc).len(), 4);
    assert_eq!(positions(&doc)[3], [0.0, 0.0, 2.0]);

    doc.undo().unwrap();
    assert_eq!(item_names(&doc), vec!["Cube", "Sphere", "Plane"]);

    doc.redo().unwrap();
    assert_eq!(item_names(&doc).len(), 4);
    assert_eq!(positions(&doc)[3], [0.0, 0.0, 2.0]);
}

#[test]
fn test_full_undo_redo_restores_scene() {
    let mut doc = Document::default();
    doc.add_item(MeshType::Cube, 1);
    doc.add_item(MeshType::Cylinder, 8);
    doc.translate_selected([1.0, 1.0, 1.0]);
    doc.select_all();
    doc.clone_selected();
    doc.rotate_selected([0.0, 90.0, 0.0]);
    doc.merge_selected();
    doc.scale_selected([2.0, 1.0, 1.0]);
    let final_scene = doc.scene().clone();
    let actions = doc.history().undo_len();
    assert_eq!(actions, 7);

    for _ in 0..actions {
        doc.undo().unwrap();
    }
    assert!(doc.scene().is_empty());

    for _ in 0..actions {
        doc.redo().unwrap();
    }
    assert_eq!(doc.scene(), &final_scene);
}

#[test]
fn test_new_action_after_undo_discards_redo() {
    let mut doc = Document::default();
    doc.add_item(MeshType::Cube, 1);
    doc.add_item(MeshType::Sphere, 8);
    doc.add_item(MeshType::Plane, 1);

    doc.undo().unwrap();
    doc.undo().unwrap();
    assert!(doc.can_redo());

    doc.add_item(MeshType::Icosahedron, 1);

    assert!(!doc.can_redo());
    assert_eq!(item_names(&doc), vec!["Cube", "Icosahedron"]);
}

#[test]
fn test_undo_on_fresh_document_fails() {
    let mut doc = Document::default();
    let err = doc.undo().unwrap_err();
    assert!(matches!(err, SceneError::Undo(UndoError::EmptyHistory(_))));
}
