//! The document tree and path addressing.

use std::fmt;

use super::node::{BlockKind, Element, Node};
use super::normalize;

/// Location of an element: child indices from the document root.
///
/// `[i]` is the i-th top-level block, `[i, j]` the j-th item of a list.
/// Lexicographic order is document order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path(pub Vec<usize>);

impl Path {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Path(indices.into())
    }

    /// Path of a top-level block.
    pub fn top(index: usize) -> Self {
        Path(vec![index])
    }

    /// Index of the top-level block this path lies in.
    pub fn root_index(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Parent path, or `None` for top-level blocks.
    pub fn parent(&self) -> Option<Path> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(Path(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Last index in the path.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Extend with a child index.
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// An ordered sequence of top-level blocks.
///
/// A document is never empty: the empty document is a single paragraph with
/// one empty text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Document {
    blocks: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// The canonical empty document.
    pub fn new() -> Self {
        Self {
            blocks: vec![Element::paragraph()],
        }
    }

    /// Build a document from blocks, normalizing them.
    pub fn from_blocks(blocks: Vec<Element>) -> Self {
        let mut doc = Self { blocks };
        doc.normalize();
        doc
    }

    pub fn blocks(&self) -> &[Element] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Element> {
        &mut self.blocks
    }

    /// Re-establish the tree invariants after a mutation.
    pub fn normalize(&mut self) {
        normalize::normalize_document(&mut self.blocks);
    }

    /// True for the canonical empty document.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1
            && self.blocks[0].kind == BlockKind::Paragraph
            && self.blocks[0].align.is_none()
            && self.blocks[0].is_blank()
    }

    /// Get an element by path.
    pub fn get(&self, path: &Path) -> Option<&Element> {
        let (first, rest) = path.0.split_first()?;
        let mut current = self.blocks.get(*first)?;
        for index in rest {
            current = current.children.get(*index)?.as_element()?;
        }
        Some(current)
    }

    /// Get a mutable element by path.
    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Element> {
        let (first, rest) = path.0.split_first()?;
        let mut current = self.blocks.get_mut(*first)?;
        for index in rest {
            current = current.children.get_mut(*index)?.as_element_mut()?;
        }
        Some(current)
    }

    /// Paths of all leaf blocks (text blocks and media) in document order.
    ///
    /// Leaf blocks are the elements a selection point can rest in.
    pub fn leaf_blocks(&self) -> Vec<Path> {
        let mut out = Vec::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if block.kind.is_list() {
                for (j, child) in block.children.iter().enumerate() {
                    if matches!(child, Node::Element(_)) {
                        out.push(Path::new([i, j]));
                    }
                }
            } else {
                out.push(Path::top(i));
            }
        }
        out
    }

    /// Concatenated text of the whole document.
    pub fn plain_text(&self) -> String {
        self.blocks.iter().map(Element::plain_text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MediaAttrs, Text};

    fn sample() -> Document {
        Document::from_blocks(vec![
            Element::text_block(BlockKind::HeadingOne, vec![Text::new("Title")]),
            Element::list(
                BlockKind::BulletedList,
                vec![
                    Element::text_block(BlockKind::ListItem, vec![Text::new("one")]),
                    Element::text_block(BlockKind::ListItem, vec![Text::new("two")]),
                ],
            ),
            Element::media(MediaAttrs::new("a.png", None, None)),
            Element::paragraph(),
        ])
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.blocks(), &[Element::paragraph()]);
    }

    #[test]
    fn test_get_by_path() {
        let doc = sample();
        assert_eq!(doc.get(&Path::top(0)).unwrap().kind, BlockKind::HeadingOne);
        assert_eq!(doc.get(&Path::new([1, 1])).unwrap().plain_text(), "two");
        assert!(doc.get(&Path::new([1, 2])).is_none());
        assert!(doc.get(&Path::new([0, 0])).is_none());
        assert!(doc.get(&Path::default()).is_none());
    }

    #[test]
    fn test_leaf_blocks_in_order() {
        let doc = sample();
        let leaves = doc.leaf_blocks();
        assert_eq!(
            leaves,
            vec![
                Path::top(0),
                Path::new([1, 0]),
                Path::new([1, 1]),
                Path::top(2),
                Path::top(3),
            ]
        );
    }

    #[test]
    fn test_path_order_is_document_order() {
        assert!(Path::top(0) < Path::new([0, 0]));
        assert!(Path::new([0, 5]) < Path::top(1));
        assert_eq!(Path::new([2, 3]).parent(), Some(Path::top(2)));
        assert_eq!(Path::new([2, 3]).to_string(), "2.3");
    }
}
