//! Snapshot swapping
//!
//! Every undoable action follows the same protocol: capture the relevant state,
//! mutate, capture again, and register `swap_state(old, current)`. Replaying the
//! swap restores `old` and registers `swap_state(current, old)`, so the same
//! function serves as both undo and redo step.

use crate::{Invocation, UndoManager};

/// A piece of model state that can be captured and put back.
///
/// `capture` must return an owned deep copy. A snapshot lives in the history
/// until it is replayed and must not see later model changes.
///
/// `restore` borrows the snapshot: after applying it, the same value becomes the
/// target of the inverse swap.
pub trait Snapshot<M>: Send + 'static {
    fn capture(model: &M) -> Self;

    fn restore(&self, model: &mut M);
}

/// Apply `old` and register the inverse swap under the same name.
pub fn swap_state<M, S>(model: &mut M, undo: &mut UndoManager<M>, (name, old, current): (String, S, S))
where
    M: 'static,
    S: Snapshot<M>,
{
    old.restore(model);
    undo.prepare_undo(name.clone(), Invocation::new(swap_state::<M, S>, (name, current, old)));
}

impl<M: 'static> UndoManager<M> {
    /// Run `action` on `model` and register a swap between the states captured
    /// before and after it.
    pub fn record<S, R>(&mut self, model: &mut M, name: impl Into<String>, action: impl FnOnce(&mut M) -> R) -> R
    where
        S: Snapshot<M>,
    {
        let old = S::capture(model);
        let result = action(model);
        let current = S::capture(model);
        self.record_swap(name, old, current);
        result
    }

    /// Register a swap for states captured by the caller, e.g. when the "before"
    /// state was taken at the start of an interactive manipulation.
    pub fn record_swap<S>(&mut self, name: impl Into<String>, old: S, current: S)
    where
        S: Snapshot<M>,
    {
        let name = name.into();
        self.prepare_undo(name.clone(), Invocation::new(swap_state::<M, S>, (name, old, current)));
    }
}
