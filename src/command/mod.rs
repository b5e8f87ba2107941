//! Selection-scoped mutations of a [`Document`].
//!
//! Every command runs against an [`EditState`] (document, selection and
//! pending marks) and reports what it touched as a [`Change`]:
//!
//! | Change | Meaning |
//! |--------|---------|
//! | `Document` | the tree changed; re-encode and notify the host |
//! | `Selection` | only the selection or pending marks moved |
//! | `None` | nothing to do (empty or out-of-range selection) |
//! | `Rejected` | the call broke a caller contract (missing media URL) |
//!
//! Commands never fail. Invalid input leaves the state untouched.
//! Structural edits are recorded in the state's [`History`] and can be
//! reverted with [`Command::Undo`].
//!
//! ```
//! use quire::command::{BlockFormat, Change, Command, EditState, Point, Selection};
//! use quire::model::{Mark, Path};
//! use quire::codec::{decode, encode};
//!
//! let mut state = EditState::new(decode("<p>Item</p>"));
//! let all = Selection::new(Point::new(Path::top(0), 0), Point::new(Path::top(0), 4));
//! state.apply(Command::SetSelection(Some(all)));
//!
//! assert_eq!(state.apply(Command::ToggleMark(Mark::Bold)), Change::Document);
//! assert_eq!(state.apply(Command::ToggleBlock(BlockFormat::NUMBERED_LIST)), Change::Document);
//! assert_eq!(encode(&state.document), "<ol><li><strong>Item</strong></li></ol>");
//! ```

mod blocks;
mod format;
mod history;
mod marks;
mod media;
mod selection;
mod text;

pub use blocks::{is_block_active, toggle_block};
pub use format::BlockFormat;
pub use history::{HISTORY_LIMIT, History, Snapshot, redo, undo};
pub use marks::{is_mark_active, marks_at_cursor, toggle_mark};
pub use media::{insert_media, normalize_url, remove_media};
pub use selection::{Point, Selection};
pub use text::{delete_backward, delete_fragment, insert_break, insert_text};

use crate::model::{Document, Mark, Marks, Path};

/// A named mutation exposed to toolbars and keyboard handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleMark(Mark),
    ToggleBlock(BlockFormat),
    InsertMedia {
        url: String,
        link: Option<String>,
        alt: Option<String>,
    },
    RemoveMedia(Path),
    SetSelection(Option<Selection>),
    InsertText(String),
    DeleteBackward,
    DeleteFragment,
    InsertBreak,
    Undo,
    Redo,
}

impl Command {
    /// Whether the command may modify the document or the pending marks.
    ///
    /// A read-only editor rejects every mutating command.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::SetSelection(_))
    }

    /// Short name used in log records.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ToggleMark(_) => "toggle-mark",
            Command::ToggleBlock(_) => "toggle-block",
            Command::InsertMedia { .. } => "insert-media",
            Command::RemoveMedia(_) => "remove-media",
            Command::SetSelection(_) => "set-selection",
            Command::InsertText(_) => "insert-text",
            Command::DeleteBackward => "delete-backward",
            Command::DeleteFragment => "delete-fragment",
            Command::InsertBreak => "insert-break",
            Command::Undo => "undo",
            Command::Redo => "redo",
        }
    }
}

/// What a command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    None,
    Selection,
    Document,
    Rejected,
}

impl Change {
    /// True when the document tree changed and must be re-encoded.
    pub fn is_structural(self) -> bool {
        self == Change::Document
    }
}

/// The mutable state of one editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    pub document: Document,
    pub selection: Option<Selection>,
    /// Marks for the next inserted text, set by toggling a mark on a
    /// collapsed cursor. Cleared whenever the selection moves.
    pub pending_marks: Option<Marks>,
    pub history: History,
}

impl EditState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
            pending_marks: None,
            history: History::default(),
        }
    }

    /// Apply a command and report what changed.
    pub fn apply(&mut self, command: Command) -> Change {
        let name = command.name();
        let typing = matches!(command, Command::InsertText(_));
        let before = match command {
            Command::SetSelection(_) | Command::Undo | Command::Redo => None,
            _ => Some(Snapshot::of(self)),
        };
        let change = match command {
            Command::ToggleMark(mark) => toggle_mark(self, mark),
            Command::ToggleBlock(format) => toggle_block(self, format),
            Command::InsertMedia { url, link, alt } => insert_media(self, &url, link, alt),
            Command::RemoveMedia(path) => remove_media(self, &path),
            Command::SetSelection(selection) => self.set_selection(selection),
            Command::InsertText(text) => insert_text(self, &text),
            Command::DeleteBackward => delete_backward(self),
            Command::DeleteFragment => delete_fragment(self),
            Command::InsertBreak => insert_break(self),
            Command::Undo => undo(self),
            Command::Redo => redo(self),
        };
        // Normalization can shorten a block under the cursor.
        if let Some(sel) = self.selection.as_mut() {
            Point::clamp(&mut sel.anchor, &self.document);
            Point::clamp(&mut sel.focus, &self.document);
        }
        match (before, change) {
            (Some(before), Change::Document) => self.history.record(before, typing),
            (_, Change::None) => {}
            _ => self.history.seal(),
        }
        log::trace!(target: "quire::command", "{name}: {change:?}");
        change
    }

    /// Replace the selection. Invalid selections are ignored.
    pub fn set_selection(&mut self, selection: Option<Selection>) -> Change {
        if let Some(sel) = selection.as_ref().filter(|s| !s.is_valid(&self.document)) {
            log::debug!(target: "quire::command", "ignoring out-of-range selection {sel:?}");
            return Change::None;
        }
        if self.selection == selection {
            return Change::None;
        }
        self.selection = selection;
        self.pending_marks = None;
        Change::Selection
    }

    /// The selection's points in document order, if it is valid.
    pub(crate) fn range(&self) -> Option<(Point, Point)> {
        let sel = self.selection.as_ref()?;
        if !sel.is_valid(&self.document) {
            return None;
        }
        let (start, end) = sel.ordered();
        Some((start.clone(), end.clone()))
    }

    /// Collapse the selection onto a point.
    pub(crate) fn collapse_to(&mut self, point: Point) {
        self.selection = Some(Selection::caret(point));
    }
}

/// Normalize the document and compare it against a snapshot.
pub(crate) fn settle(state: &mut EditState, before: &Document) -> Change {
    state.document.normalize();
    if state.document != *before {
        Change::Document
    } else {
        Change::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, Element, Text};

    fn state() -> EditState {
        EditState::new(Document::from_blocks(vec![Element::text_block(
            BlockKind::Paragraph,
            vec![Text::new("Hello")],
        )]))
    }

    #[test]
    fn test_set_selection() {
        let mut s = state();
        let caret = Selection::caret(Point::new(Path::top(0), 2));
        assert_eq!(s.set_selection(Some(caret.clone())), Change::Selection);
        assert_eq!(s.set_selection(Some(caret)), Change::None);
        assert_eq!(s.set_selection(None), Change::Selection);
    }

    #[test]
    fn test_out_of_range_selection_ignored() {
        let mut s = state();
        let bad = Selection::caret(Point::new(Path::top(3), 0));
        assert_eq!(s.set_selection(Some(bad)), Change::None);
        assert_eq!(s.selection, None);

        let bad = Selection::caret(Point::new(Path::top(0), 99));
        assert_eq!(s.apply(Command::SetSelection(Some(bad))), Change::None);
    }

    #[test]
    fn test_commands_without_selection_are_noops() {
        let mut s = state();
        let before = s.clone();
        for command in [
            Command::ToggleMark(Mark::Bold),
            Command::ToggleBlock(BlockFormat::HEADING_ONE),
            Command::InsertText("x".into()),
            Command::DeleteBackward,
            Command::DeleteFragment,
            Command::InsertBreak,
            Command::Undo,
            Command::Redo,
        ] {
            assert_eq!(s.apply(command), Change::None);
        }
        assert_eq!(s, before);
    }

    #[test]
    fn test_is_mutating() {
        assert!(!Command::SetSelection(None).is_mutating());
        assert!(Command::ToggleMark(Mark::Code).is_mutating());
        assert!(Command::RemoveMedia(Path::top(0)).is_mutating());
        assert!(Command::Undo.is_mutating());
        assert!(Command::Redo.is_mutating());
    }

    #[test]
    fn test_change_is_structural() {
        assert!(Change::Document.is_structural());
        assert!(!Change::Selection.is_structural());
        assert!(!Change::Rejected.is_structural());
    }
}
