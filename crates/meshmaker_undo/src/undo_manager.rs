//! Undo/redo history
//!
//! All modifications of a document register their inverse here:
//! - A new action pushes one entry onto the undo stack and discards redo history
//! - `undo()`/`redo()` replay the top entry; whatever the replayed invocation
//!   registers through `prepare_undo()` ends up on the opposite stack
//! - `begin_group()`/`end_group()` fold several actions into one entry

use std::collections::VecDeque;

use crate::{History, Invocation, Result, UndoError, UndoSettings};

/// Replay state of an [`UndoManager`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayState {
    #[default]
    Idle,
    ReplayingUndo,
    ReplayingRedo,
}

impl std::fmt::Display for ReplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayState::Idle => write!(f, "idle"),
            ReplayState::ReplayingUndo => write!(f, "replaying undo"),
            ReplayState::ReplayingRedo => write!(f, "replaying redo"),
        }
    }
}

/// One named history step.
///
/// Most entries hold a single invocation, grouped actions hold one per
/// registration in the order they were registered.
pub struct UndoEntry<M> {
    name: String,
    steps: Vec<Invocation<M>>,
}

impl<M> UndoEntry<M> {
    fn new(name: String, steps: Vec<Invocation<M>>) -> Self {
        Self { name, steps }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<M> std::fmt::Debug for UndoEntry<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoEntry").field("name", &self.name).field("steps", &self.steps.len()).finish()
    }
}

#[derive(Debug)]
struct OpenGroup {
    name: String,
    base_count: usize,
    depth: usize,
}

type NeedsSaveObserver = Box<dyn FnMut(bool) + Send>;

/// Owns the undo and redo histories of one document.
pub struct UndoManager<M> {
    undo_stack: VecDeque<UndoEntry<M>>,
    redo_stack: Vec<UndoEntry<M>>,
    /// Registrations made while replaying, relocated once the replay returns
    pending: Vec<(String, Invocation<M>)>,
    state: ReplayState,
    group: Option<OpenGroup>,
    needs_save: bool,
    max_depth: Option<usize>,
    observers: Vec<NeedsSaveObserver>,
}

impl<M> Default for UndoManager<M> {
    fn default() -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            pending: Vec::new(),
            state: ReplayState::Idle,
            group: None,
            needs_save: false,
            max_depth: None,
            observers: Vec::new(),
        }
    }
}

impl<M> UndoManager<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &UndoSettings) -> Self {
        Self {
            max_depth: settings.max_depth,
            ..Self::default()
        }
    }

    /// Register the inverse of an action that was just performed.
    ///
    /// Outside of a replay this is a new user action: the redo history is
    /// discarded. During `undo()`/`redo()` the entry is parked and moved to the
    /// opposite stack when the replay finishes.
    pub fn prepare_undo(&mut self, name: impl Into<String>, invocation: Invocation<M>) {
        let name = name.into();
        if name.is_empty() {
            log::warn!("Undo action registered without a name");
        }

        match self.state {
            ReplayState::Idle => {
                if !self.redo_stack.is_empty() {
                    log::debug!("'{}' discards {} redo entries", name, self.redo_stack.len());
                    self.redo_stack.clear();
                }
                log::debug!("Prepared undo '{}'", name);
                self.undo_stack.push_back(UndoEntry::new(name, vec![invocation]));
                self.trim_undo_stack();
            }
            ReplayState::ReplayingUndo | ReplayState::ReplayingRedo => {
                self.pending.push((name, invocation));
            }
        }

        self.set_needs_save(true);
    }

    /// Revert the most recent action.
    ///
    /// # Errors
    ///
    /// Fails if the undo stack is empty, a group is open, or this is called
    /// from inside another replay.
    pub fn undo(&mut self, model: &mut M) -> Result<()> {
        self.check_can_replay()?;
        let Some(entry) = self.undo_stack.pop_back() else {
            return Err(UndoError::EmptyHistory(History::Undo));
        };
        log::debug!("Undo '{}'", entry.name);
        self.replay(model, entry, History::Undo)
    }

    /// Re-apply the most recently undone action.
    ///
    /// # Errors
    ///
    /// Fails if the redo stack is empty, a group is open, or this is called
    /// from inside another replay.
    pub fn redo(&mut self, model: &mut M) -> Result<()> {
        self.check_can_replay()?;
        let Some(entry) = self.redo_stack.pop() else {
            return Err(UndoError::EmptyHistory(History::Redo));
        };
        log::debug!("Redo '{}'", entry.name);
        self.replay(model, entry, History::Redo)
    }

    fn check_can_replay(&self) -> Result<()> {
        if self.state != ReplayState::Idle {
            log::error!("Undo/redo called while {}", self.state);
            return Err(UndoError::Reentrancy(self.state));
        }
        if let Some(group) = &self.group {
            return Err(UndoError::GroupOpen(group.name.clone()));
        }
        Ok(())
    }

    /// Run the steps of `entry` in reverse order. `source` is the stack the
    /// entry was popped from; the inverse goes to the other one.
    fn replay(&mut self, model: &mut M, entry: UndoEntry<M>, source: History) -> Result<()> {
        let UndoEntry { name, steps } = entry;
        self.state = match source {
            History::Undo => ReplayState::ReplayingUndo,
            History::Redo => ReplayState::ReplayingRedo,
        };

        let mut result = Ok(());
        for mut step in steps.into_iter().rev() {
            if let Err(err) = step.invoke(model, self) {
                result = Err(err);
                break;
            }
        }

        self.state = ReplayState::Idle;
        let registered = std::mem::take(&mut self.pending);
        if registered.is_empty() {
            log::warn!("Replaying '{}' registered no inverse, history entry dropped", name);
            return result;
        }

        let name = if registered.len() == 1 { registered[0].0.clone() } else { name };
        let entry = UndoEntry::new(name, registered.into_iter().map(|(_, inv)| inv).collect());
        match source {
            History::Undo => self.redo_stack.push(entry),
            History::Redo => {
                self.undo_stack.push_back(entry);
                self.trim_undo_stack();
            }
        }
        result
    }

    /// Start a composite action. Groups nest; only the outermost name is kept.
    ///
    /// # Errors
    ///
    /// Fails when called during a replay.
    pub fn begin_group(&mut self, name: impl Into<String>) -> Result<()> {
        if self.state != ReplayState::Idle {
            return Err(UndoError::Reentrancy(self.state));
        }
        match &mut self.group {
            Some(group) => group.depth += 1,
            None => {
                self.group = Some(OpenGroup {
                    name: name.into(),
                    base_count: self.undo_stack.len(),
                    depth: 1,
                });
            }
        }
        Ok(())
    }

    /// Close the innermost group. Closing the outermost group folds every entry
    /// registered since `begin_group()` into a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`UndoError::NoOpenGroup`] without a matching `begin_group()`.
    pub fn end_group(&mut self) -> Result<()> {
        let Some(group) = &mut self.group else {
            return Err(UndoError::NoOpenGroup);
        };
        group.depth -= 1;
        if group.depth > 0 {
            return Ok(());
        }

        let Some(OpenGroup { name, base_count, .. }) = self.group.take() else {
            return Err(UndoError::NoOpenGroup);
        };
        if base_count >= self.undo_stack.len() {
            log::debug!("Undo group '{}' recorded nothing", name);
            return Ok(());
        }

        let steps: Vec<Invocation<M>> = self.undo_stack.drain(base_count..).flat_map(|entry| entry.steps).collect();
        log::debug!("Undo group '{}' holds {} steps", name, steps.len());
        self.undo_stack.push_back(UndoEntry::new(name, steps));
        self.trim_undo_stack();
        Ok(())
    }

    /// Drop both histories. The dirty flag is left alone.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        if let Some(group) = self.group.take() {
            log::warn!("Clearing history with open undo group '{}'", group.name);
        }
    }

    pub fn document_saved(&mut self) {
        self.set_needs_save(false);
    }

    /// Register an observer that is called whenever `needs_save` flips.
    pub fn on_needs_save_changed(&mut self, observer: impl FnMut(bool) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn set_needs_save(&mut self, needs_save: bool) {
        if self.needs_save == needs_save {
            return;
        }
        self.needs_save = needs_save;
        for observer in &mut self.observers {
            observer(needs_save);
        }
    }

    pub fn set_max_depth(&mut self, max_depth: Option<usize>) {
        self.max_depth = max_depth;
        self.trim_undo_stack();
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    fn trim_undo_stack(&mut self) {
        let Some(max_depth) = self.max_depth else {
            return;
        };
        // indices recorded by an open group must stay valid
        if self.group.is_some() {
            return;
        }
        while self.undo_stack.len() > max_depth {
            if let Some(evicted) = self.undo_stack.pop_front() {
                log::debug!("Evicted oldest undo entry '{}'", evicted.name);
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Name of the action `undo()` would revert
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.back().map(|entry| entry.name.as_str())
    }

    /// Name of the action `redo()` would re-apply
    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|entry| entry.name.as_str())
    }

    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn replay_state(&self) -> ReplayState {
        self.state
    }

    pub fn is_replaying(&self) -> bool {
        self.state != ReplayState::Idle
    }

    pub fn grouping_depth(&self) -> usize {
        self.group.as_ref().map_or(0, |group| group.depth)
    }

    /// Undo history, oldest first
    pub fn undo_entries(&self) -> impl Iterator<Item = &UndoEntry<M>> {
        self.undo_stack.iter()
    }

    /// Redo history, oldest first
    pub fn redo_entries(&self) -> impl Iterator<Item = &UndoEntry<M>> {
        self.redo_stack.iter()
    }
}

impl<M> std::fmt::Debug for UndoManager<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoManager")
            .field("undo_stack", &self.undo_stack)
            .field("redo_stack", &self.redo_stack)
            .field("state", &self.state)
            .field("group", &self.group)
            .field("needs_save", &self.needs_save)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
