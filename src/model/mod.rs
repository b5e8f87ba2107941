//! Structured document model.
//!
//! This module contains:
//! - Text runs and their character marks
//! - Block elements (paragraphs, headings, quotes, lists, media)
//! - The document tree and path addressing
//! - Normalization passes that keep the tree canonical

mod document;
mod node;
pub mod normalize;

pub use document::{Document, Path};
pub use node::{Align, BlockKind, Element, Mark, Marks, MediaAttrs, Node, Text};
