//! Selection points and ranges.
//!
//! A point addresses a leaf block (a text block or a media node) by path and
//! a byte offset into the block's concatenated text. Media points always sit
//! at offset 0.

use crate::model::{Document, Element, Path, Text};

/// A position inside a leaf block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: Path, offset: usize) -> Self {
        Self { path, offset }
    }

    /// Whether the point addresses a leaf block and a char boundary in it.
    pub fn is_valid(&self, doc: &Document) -> bool {
        let Some(el) = doc.get(&self.path) else {
            return false;
        };
        if el.kind.is_void() {
            return self.offset == 0;
        }
        if el.kind.is_list() {
            return false;
        }
        let text = el.plain_text();
        self.offset <= text.len() && text.is_char_boundary(self.offset)
    }

    /// Pull the offset back inside the block it addresses.
    pub(crate) fn clamp(&mut self, doc: &Document) {
        if let Some(el) = doc.get(&self.path) {
            self.offset = self.offset.min(el.text_len());
        }
    }
}

/// An anchor/focus pair. Collapsed when both are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection (a cursor).
    pub fn caret(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The points in document order.
    pub fn ordered(&self) -> (&Point, &Point) {
        if self.anchor <= self.focus {
            (&self.anchor, &self.focus)
        } else {
            (&self.focus, &self.anchor)
        }
    }

    pub fn is_valid(&self, doc: &Document) -> bool {
        self.anchor.is_valid(doc) && self.focus.is_valid(doc)
    }
}

/// A point expressed as (leaf ordinal, offset).
///
/// Ordinals index [`Document::leaf_blocks`]; they survive wrapping and
/// unwrapping because those never reorder leaves.
pub(crate) type Anchor = (usize, usize);

pub(crate) fn to_anchor(leaves: &[Path], point: &Point) -> Option<Anchor> {
    let ordinal = leaves.iter().position(|p| *p == point.path)?;
    Some((ordinal, point.offset))
}

pub(crate) fn from_anchor(doc: &Document, anchor: Anchor) -> Point {
    let leaves = doc.leaf_blocks();
    let ordinal = anchor.0.min(leaves.len().saturating_sub(1));
    let path = leaves.get(ordinal).cloned().unwrap_or_else(|| Path::top(0));
    let len = doc.get(&path).map(Element::text_len).unwrap_or(0);
    Point::new(path, anchor.1.min(len))
}

/// Split a run list at a byte offset into the concatenated text.
pub(crate) fn split_runs(runs: Vec<Text>, offset: usize) -> (Vec<Text>, Vec<Text>) {
    let mut before = Vec::new();
    let mut after = Vec::new();
    let mut pos = 0;
    for run in runs {
        let len = run.text.len();
        if pos + len <= offset {
            before.push(run);
        } else if pos >= offset {
            after.push(run);
        } else {
            let cut = offset - pos;
            before.push(Text::marked(&run.text[..cut], run.marks));
            after.push(Text::marked(&run.text[cut..], run.marks));
        }
        pos += len;
    }
    (before, after)
}

/// Clone the text runs of a text block.
pub(crate) fn runs_of(el: &Element) -> Vec<Text> {
    el.texts().cloned().collect()
}
