//! Editing session: the bridge between a host and the document tree.
//!
//! The host hands in stored content as `{ html }` and a change callback.
//! The editor decodes once, routes every input through the command layer,
//! and re-encodes only after structural changes. Selection moves never
//! reach the callback.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use quire::command::{Command, Point, Selection};
//! use quire::editor::{Content, Editor};
//! use quire::model::Path;
//!
//! let saved = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&saved);
//! let mut editor = Editor::new(&Content::new("<p>Hi</p>"), Default::default())
//!     .on_change(move |content| sink.borrow_mut().push(content.html.clone()));
//!
//! editor.apply(Command::SetSelection(Some(Selection::caret(Point::new(Path::top(0), 2)))));
//! assert!(saved.borrow().is_empty());
//!
//! editor.apply(Command::InsertText("!".into()));
//! assert_eq!(saved.borrow().as_slice(), ["<p>Hi!</p>"]);
//! ```

use crate::codec::{decode, encode};
use crate::command::{BlockFormat, Change, Command, EditState, Selection};
use crate::config::EditorConfig;
use crate::hotkey::KeyEvent;
use crate::model::{Document, Mark};
use crate::toolbar::{ButtonState, ToolbarAction, button_states};

/// Stored content exchanged with the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Content {
    pub html: String,
}

impl Content {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Result of routing a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The chord was bound; the host must suppress its default action.
    pub prevent_default: bool,
    pub change: Change,
}

type ChangeHandler = Box<dyn FnMut(&Content)>;

/// One editing session over a document.
pub struct Editor {
    state: EditState,
    config: EditorConfig,
    html: String,
    on_change: Option<ChangeHandler>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("html", &self.html)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Start a session over stored content. Blank content starts from the
    /// empty document.
    pub fn new(content: &Content, config: EditorConfig) -> Self {
        let document = decode(&content.html);
        let html = encode(&document);
        Self {
            state: EditState::new(document),
            config,
            html,
            on_change: None,
        }
    }

    /// Register the structural-change callback.
    pub fn on_change(mut self, handler: impl FnMut(&Content) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn set_on_change(&mut self, handler: impl FnMut(&Content) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection.as_ref()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The current encoding of the document.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn content(&self) -> Content {
        Content::new(self.html.clone())
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// The placeholder to show, while the document is empty.
    pub fn placeholder(&self) -> Option<&str> {
        self.state
            .document
            .is_empty()
            .then_some(self.config.placeholder.as_str())
    }

    /// Apply a command. Structural changes are re-encoded and reported to
    /// the change callback.
    pub fn apply(&mut self, command: Command) -> Change {
        if self.config.disabled && command.is_mutating() {
            log::debug!(target: "quire::editor", "read-only editor rejected {}", command.name());
            return Change::Rejected;
        }
        let change = self.state.apply(command);
        if change.is_structural() {
            self.html = encode(&self.state.document);
            if let Some(handler) = self.on_change.as_mut() {
                handler(&Content::new(self.html.clone()));
            }
        }
        change
    }

    /// Route a key press through the hotkey table.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        match self.config.hotkeys.lookup(event, self.config.platform) {
            Some(binding) => KeyOutcome {
                prevent_default: true,
                change: self.apply(binding.command()),
            },
            None => KeyOutcome {
                prevent_default: false,
                change: Change::None,
            },
        }
    }

    /// Accept content pushed by the host.
    ///
    /// The document is rebuilt only when the HTML differs from the current
    /// encoding; the selection is dropped when it is. The change callback is
    /// not invoked. Returns whether the document was replaced.
    pub fn set_content(&mut self, content: &Content) -> bool {
        if content.html == self.html {
            return false;
        }
        let document = decode(&content.html);
        log::debug!(target: "quire::editor", "external content replaced the document");
        self.html = encode(&document);
        self.state = EditState::new(document);
        true
    }

    pub fn is_mark_active(&self, mark: Mark) -> bool {
        crate::command::is_mark_active(&self.state, mark)
    }

    pub fn is_block_active(&self, format: BlockFormat) -> bool {
        crate::command::is_block_active(&self.state, format)
    }

    /// A toolbar button was pressed.
    pub fn press(&mut self, action: ToolbarAction) -> Change {
        self.apply(action.command())
    }

    /// Toolbar button states for the current selection.
    pub fn toolbar(&self) -> Vec<ButtonState> {
        button_states(&self.state, self.config.disabled)
    }
}
