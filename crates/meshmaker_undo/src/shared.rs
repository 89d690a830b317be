//! Thread-safe wrapper around a model and its history
//!
//! `undo()`/`redo()` pop, replay and relocate in one go, so the model, both
//! stacks and the dirty flag sit behind a single lock.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Result, UndoManager, UndoSettings};

struct HistoryCell<M> {
    model: M,
    undo: UndoManager<M>,
}

/// A model plus its [`UndoManager`], shared between threads.
pub struct SharedHistory<M> {
    inner: Arc<Mutex<HistoryCell<M>>>,
}

impl<M> Clone for SharedHistory<M> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<M> SharedHistory<M> {
    pub fn new(model: M) -> Self {
        Self::from_parts(model, UndoManager::new())
    }

    pub fn with_settings(model: M, settings: &UndoSettings) -> Self {
        Self::from_parts(model, UndoManager::with_settings(settings))
    }

    pub fn from_parts(model: M, undo: UndoManager<M>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HistoryCell { model, undo })),
        }
    }

    /// Run an undoable action. The closure is expected to call `prepare_undo`
    /// (or `record`) exactly once.
    pub fn perform<R>(&self, action: impl FnOnce(&mut M, &mut UndoManager<M>) -> R) -> R {
        let mut cell = self.inner.lock();
        let HistoryCell { model, undo } = &mut *cell;
        action(model, undo)
    }

    /// Read-only access to the model and history.
    pub fn with<R>(&self, f: impl FnOnce(&M, &UndoManager<M>) -> R) -> R {
        let cell = self.inner.lock();
        f(&cell.model, &cell.undo)
    }

    /// # Errors
    ///
    /// See [`UndoManager::undo`].
    pub fn undo(&self) -> Result<()> {
        let mut cell = self.inner.lock();
        let HistoryCell { model, undo } = &mut *cell;
        undo.undo(model)
    }

    /// # Errors
    ///
    /// See [`UndoManager::redo`].
    pub fn redo(&self) -> Result<()> {
        let mut cell = self.inner.lock();
        let HistoryCell { model, undo } = &mut *cell;
        undo.redo(model)
    }

    pub fn document_saved(&self) {
        self.inner.lock().undo.document_saved();
    }

    pub fn clear(&self) {
        self.inner.lock().undo.clear();
    }

    pub fn needs_save(&self) -> bool {
        self.inner.lock().undo.needs_save()
    }
}
