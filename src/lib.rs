//! # quire
//!
//! A structured rich-text document model with a lossless HTML codec and a
//! selection-scoped command layer.
//!
//! ## Features
//!
//! - Tree-shaped documents: paragraphs, headings, quotes, lists and void
//!   media nodes holding text runs with bold, italic, underline and code marks
//! - Decode stored HTML into the tree, never failing on malformed input
//! - Encode the tree back to HTML with a fixed, round-trip stable vocabulary
//! - Toggle marks, block types, lists and alignment; insert and remove media
//! - An editing session that reports only structural changes to its host
//!
//! ## Quick Start
//!
//! ```
//! use quire::{Command, Content, Editor, Point, Selection};
//! use quire::command::BlockFormat;
//! use quire::model::Path;
//!
//! let mut editor = Editor::new(&Content::new("<p>Item</p>"), Default::default());
//! editor.apply(Command::SetSelection(Some(Selection::caret(Point::new(Path::top(0), 0)))));
//! editor.apply(Command::ToggleBlock(BlockFormat::NUMBERED_LIST));
//! assert_eq!(editor.html(), "<ol><li>Item</li></ol>");
//! ```
//!
//! ## Working with Documents
//!
//! The [`Document`] tree can be built and serialized without an editor:
//!
//! ```
//! use quire::{Document, decode, encode};
//! use quire::model::{BlockKind, Element, Mark, Marks, Text};
//!
//! let doc = Document::from_blocks(vec![Element::text_block(
//!     BlockKind::Paragraph,
//!     vec![Text::new("Hello "), Text::marked("world", Marks::default().with(Mark::Bold))],
//! )]);
//! let html = encode(&doc);
//! assert_eq!(html, "<p>Hello <strong>world</strong></p>");
//! assert_eq!(decode(&html), doc);
//! ```

pub mod codec;
pub mod command;
pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod hotkey;
pub mod model;
pub mod toolbar;
pub mod util;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

pub use codec::{decode, encode};
pub use command::{Change, Command, EditState, Point, Selection};
pub use config::EditorConfig;
pub use editor::{Content, Editor, KeyOutcome};
pub use error::{Error, Result};
pub use model::{Document, Element, Mark, Marks, Node, Text};
