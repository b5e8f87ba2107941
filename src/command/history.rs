//! In-session undo and redo.
//!
//! Every structural edit records the document and selection it replaced.
//! Consecutive typing collapses into one step, so undo removes a whole
//! word run rather than one character at a time.

use super::{Change, EditState, Selection};
use crate::model::Document;

/// Undo steps kept before the oldest is dropped.
pub const HISTORY_LIMIT: usize = 100;

/// A document and selection as they stood before an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub document: Document,
    pub selection: Option<Selection>,
}

impl Snapshot {
    pub(crate) fn of(state: &EditState) -> Self {
        Self {
            document: state.document.clone(),
            selection: state.selection.clone(),
        }
    }
}

/// Undo and redo stacks of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    undos: Vec<Snapshot>,
    redos: Vec<Snapshot>,
    /// The newest undo step is a typing run that further typing extends.
    typing: bool,
}

impl History {
    pub fn can_undo(&self) -> bool {
        !self.undos.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record the state a structural edit replaced.
    pub(crate) fn record(&mut self, before: Snapshot, typing: bool) {
        self.redos.clear();
        if !(typing && self.typing && self.can_undo()) {
            self.undos.push(before);
            if self.undos.len() > HISTORY_LIMIT {
                self.undos.remove(0);
            }
        }
        self.typing = typing;
    }

    /// End the current typing run.
    pub(crate) fn seal(&mut self) {
        self.typing = false;
    }
}

/// Restore the state before the newest structural edit.
pub fn undo(state: &mut EditState) -> Change {
    let Some(snapshot) = state.history.undos.pop() else {
        return Change::None;
    };
    let current = restore(state, snapshot);
    state.history.redos.push(current);
    state.history.seal();
    Change::Document
}

/// Reapply the newest undone edit.
pub fn redo(state: &mut EditState) -> Change {
    let Some(snapshot) = state.history.redos.pop() else {
        return Change::None;
    };
    let current = restore(state, snapshot);
    state.history.undos.push(current);
    state.history.seal();
    Change::Document
}

/// Swap a snapshot into the state and return what it replaced.
fn restore(state: &mut EditState, snapshot: Snapshot) -> Snapshot {
    let current = Snapshot::of(state);
    state.document = snapshot.document;
    state.selection = snapshot.selection;
    state.pending_marks = None;
    current
}
