//! Grouped (composite) action tests

use meshmaker_undo::{UndoError, UndoManager};

use crate::helpers::{AllItems, Model, add, add_paired, items};

#[test]
fn test_group_undoes_as_one_step() {
    let mut model = Model::new();
    let mut undo = UndoManager::new();

    undo.begin_group("Build").unwrap();
    add(&mut model, &mut undo, "A");
    add_paired(&mut model, &mut undo, "B".to_string());
    add(&mut model, &mut undo, "C");
    undo.end_group().unwrap();

    assert_eq!(undo.undo_len(), 1);
    assert_eq!(undo.undo_name(), Some("Build"));

    undo.undo(&mut model).unwrap();
    assert!(model.is_empty());
    assert_eq!(undo.redo_len(), 1);
    assert_eq!(undo.redo_name(), Some("Build"));

    undo.redo(&mut model).unwrap();
    assert_eq!(model, items(&["A", "B", "C"]));
    assert_eq!(undo.undo_name(), Some("Build"));
}

#[test]
fn test_group_order_survives_several_cycles() {
    let mut model = Model::new();
    let mut undo = UndoManager::new();

    undo.begin_group("Rename all").unwrap();
    undo.record::<AllItems, _>(&mut model, "First", |m| m.push("1".to_string()));
    undo.record::<AllItems, _>(&mut model, "Second", |m| m[0].push('a'));
    undo.end_group().unwrap();

    for _ in 0..3 {
        undo.undo(&mut model).unwrap();
        assert!(model.is_empty());
        undo.redo(&mut model).unwrap();
        assert_eq!(model, items(&["1a"]));
    }
}

#[test]
fn test_nested_groups_keep_outer_name() {
    let mut model = Model::new();
    let mut undo = UndoManager::new();

    undo.begin_group("Outer").unwrap();
    add(&mut model, &mut undo, "A");
    undo.begin_group("Inner").unwrap();
    assert_eq!(undo.grouping_depth(), 2);
    add(&mut model, &mut undo, "B");
    undo.end_group().unwrap();
    assert_eq!(undo.grouping_depth(), 1);
    add(&mut model, &mut undo, "C");
    undo.end_group().unwrap();

    assert_eq!(undo.grouping_depth(), 0);
    assert_eq!(undo.undo_len(), 1);
    assert_eq!(undo.undo_name(), Some("Outer"));
}

#[test]
fn test_single_entry_group_takes_group_name() {
    let mut model = Model::new();
    let mut undo = UndoManager::new();
    add(&mut model, &mut undo, "A");

    undo.begin_group("Wrapped").unwrap();
    add(&mut model, &mut undo, "B");
    undo.end_group().unwrap();

    assert_eq!(undo.undo_len(), 2);
    assert_eq!(undo.undo_name(), Some("Wrapped"));
}

#[test]
fn test_empty_group_records_nothing() {
    let mut undo: UndoManager<Model> = UndoManager::new();

    undo.begin_group("Nothing").unwrap();
    undo.end_group().unwrap();

    assert!(!undo.can_undo());
    assert!(!undo.needs_save());
}

#[test]
fn test_end_without_begin() {
    let mut undo: UndoManager<Model> = UndoManager::new();
    assert_eq!(undo.end_group(), Err(UndoError::NoOpenGroup));
}

#[test]
fn test_undo_with_open_group_is_rejected() {
    let mut model = Model::new();
    let mut undo = UndoManager::new();
    add(&mut model, &mut undo, "A");
    undo.begin_group("Pending").unwrap();
    add(&mut model, &mut undo, "B");

    assert_eq!(undo.undo(&mut model), Err(UndoError::GroupOpen("Pending".to_string())));
    assert_eq!(undo.redo(&mut model), Err(UndoError::GroupOpen("Pending".to_string())));

    undo.end_group().unwrap();
    undo.undo(&mut model).unwrap();
    assert_eq!(model, items(&["A"]));
}

#[test]
fn test_group_clears_redo() {
    let mut model = Model::new();
    let mut undo = UndoManager::new();
    add(&mut model, &mut undo, "A");
    undo.undo(&mut model).unwrap();
    assert!(undo.can_redo());

    undo.begin_group("New branch").unwrap();
    add(&mut model, &mut undo, "B");
    undo.end_group().unwrap();

    assert!(!undo.can_redo());
}

#[test]
fn test_clear_drops_open_group() {
    let mut model = Model::new();
    let mut undo = UndoManager::new();
    undo.begin_group("Abandoned").unwrap();
    add(&mut model, &mut undo, "A");

    undo.clear();

    assert_eq!(undo.grouping_depth(), 0);
    assert_eq!(undo.end_group(), Err(UndoError::NoOpenGroup));
}
