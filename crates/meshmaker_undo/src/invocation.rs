//! Deferred, single-shot calls
//!
//! An [`Invocation`] binds a target function to its arguments so the undo manager
//! can keep a homogeneous list of future actions. The target receives the model
//! and the manager itself, which lets it register its own inverse.

use crate::{Result, UndoError, UndoManager};

type Target<M> = Box<dyn FnOnce(&mut M, &mut UndoManager<M>) + Send>;

/// A type-erased bound call that runs at most once.
pub struct Invocation<M> {
    target: Option<Target<M>>,
}

impl<M: 'static> Invocation<M> {
    /// Bind `target` to `args`. Use a tuple to bind more than one value.
    ///
    /// The arguments are owned by the invocation until it runs, so they must be
    /// snapshots, never views into live model state.
    pub fn new<A, F>(target: F, args: A) -> Self
    where
        A: Send + 'static,
        F: FnOnce(&mut M, &mut UndoManager<M>, A) + Send + 'static,
    {
        Self {
            target: Some(Box::new(move |model: &mut M, undo: &mut UndoManager<M>| target(model, undo, args))),
        }
    }

    /// Bind a closure that already owns everything it needs.
    pub fn from_fn<F>(target: F) -> Self
    where
        F: FnOnce(&mut M, &mut UndoManager<M>) + Send + 'static,
    {
        Self { target: Some(Box::new(target)) }
    }
}

impl<M> Invocation<M> {
    /// Run the bound call.
    ///
    /// # Errors
    ///
    /// Returns [`UndoError::InvocationReused`] if the invocation already ran.
    /// The target is not called again in that case.
    pub fn invoke(&mut self, model: &mut M, undo: &mut UndoManager<M>) -> Result<()> {
        let Some(target) = self.target.take() else {
            log::error!("Invocation executed a second time, ignoring");
            return Err(UndoError::InvocationReused);
        };
        target(model, undo);
        Ok(())
    }

    pub fn is_consumed(&self) -> bool {
        self.target.is_none()
    }
}

impl<M> std::fmt::Debug for Invocation<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation").field("consumed", &self.is_consumed()).finish()
    }
}
