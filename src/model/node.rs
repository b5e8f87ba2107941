//! Node types: text runs, marks, and block elements.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ============================================================================
// Marks
// ============================================================================

/// A character-level style attribute on a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
}

impl Mark {
    /// All marks in serialization order (innermost first).
    pub const ALL: [Mark; 4] = [Mark::Code, Mark::Italic, Mark::Underline, Mark::Bold];

    /// The kebab-case format name used by toolbars and hotkey tables.
    pub fn name(self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Code => "code",
        }
    }

    /// The HTML tag this mark serializes to.
    pub fn tag(self) -> &'static str {
        match self {
            Mark::Bold => "strong",
            Mark::Italic => "em",
            Mark::Underline => "u",
            Mark::Code => "code",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" => Ok(Mark::Bold),
            "italic" => Ok(Mark::Italic),
            "underline" => Ok(Mark::Underline),
            "code" => Ok(Mark::Code),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
fn is_false(value: &bool) -> bool {
    !*value
}

/// The independent boolean marks carried by a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marks {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub bold: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub italic: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub underline: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub code: bool,
}

impl Marks {
    /// Check whether a mark is set.
    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Code => self.code,
        }
    }

    /// Set or clear a mark.
    pub fn set(&mut self, mark: Mark, value: bool) {
        match mark {
            Mark::Bold => self.bold = value,
            Mark::Italic => self.italic = value,
            Mark::Underline => self.underline = value,
            Mark::Code => self.code = value,
        }
    }

    /// Return a copy with `mark` set.
    pub fn with(mut self, mark: Mark) -> Self {
        self.set(mark, true);
        self
    }

    /// True when no mark is set.
    pub fn is_empty(&self) -> bool {
        *self == Marks::default()
    }
}

// ============================================================================
// Text runs
// ============================================================================

/// A leaf: a string payload plus its marks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub marks: Marks,
}

impl Text {
    /// Create an unmarked run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::default(),
        }
    }

    /// Create a run with the given marks.
    pub fn marked(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// The empty placeholder leaf carried by empty and void blocks.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ============================================================================
// Blocks
// ============================================================================

/// Text alignment for paragraphs, headings and quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub const ALL: [Align; 4] = [Align::Left, Align::Center, Align::Right, Align::Justify];

    /// The CSS keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }

    /// Parse a CSS `text-align` keyword (ASCII case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Align::ALL
            .into_iter()
            .find(|align| keyword.eq_ignore_ascii_case(align.as_str()))
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block type of an element.
///
/// Text blocks (paragraph, headings, quote, list item) hold inline text runs.
/// List containers hold list items only. Media is void.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BlockKind {
    #[default]
    Paragraph,
    HeadingOne,
    HeadingTwo,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
    Media,
}

impl BlockKind {
    /// The kebab-case format name.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::HeadingOne => "heading-one",
            BlockKind::HeadingTwo => "heading-two",
            BlockKind::BlockQuote => "block-quote",
            BlockKind::BulletedList => "bulleted-list",
            BlockKind::NumberedList => "numbered-list",
            BlockKind::ListItem => "list-item",
            BlockKind::Media => "media",
        }
    }

    /// Map a block kind to its HTML tag.
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "p",
            BlockKind::HeadingOne => "h1",
            BlockKind::HeadingTwo => "h2",
            BlockKind::BlockQuote => "blockquote",
            BlockKind::BulletedList => "ul",
            BlockKind::NumberedList => "ol",
            BlockKind::ListItem => "li",
            BlockKind::Media => "img",
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, BlockKind::BulletedList | BlockKind::NumberedList)
    }

    pub fn is_void(self) -> bool {
        self == BlockKind::Media
    }

    /// Whether the block's children are text runs.
    pub fn holds_text(self) -> bool {
        !self.is_list() && !self.is_void()
    }

    /// Whether the `align` attribute is meaningful for this kind.
    pub fn is_alignable(self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph
                | BlockKind::HeadingOne
                | BlockKind::HeadingTwo
                | BlockKind::BlockQuote
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attributes of a void media node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaAttrs {
    /// Image source.
    pub url: String,
    /// Optional link destination; the image renders inside an anchor.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub link: Option<String>,
    /// Optional alternative text.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alt: Option<String>,
}

impl MediaAttrs {
    /// Build media attributes, dropping blank optional values.
    pub fn new(url: impl Into<String>, link: Option<String>, alt: Option<String>) -> Self {
        let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        Self {
            url: url.into(),
            link: non_blank(link),
            alt: non_blank(alt),
        }
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: BlockKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub align: Option<Align>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub media: Option<MediaAttrs>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create a text block with the given runs.
    ///
    /// An empty run list becomes a single empty leaf.
    pub fn text_block(kind: BlockKind, runs: Vec<Text>) -> Self {
        let mut children: Vec<Node> = runs.into_iter().map(Node::Text).collect();
        if children.is_empty() {
            children.push(Node::Text(Text::empty()));
        }
        Self {
            kind,
            align: None,
            media: None,
            children,
        }
    }

    /// An empty paragraph.
    pub fn paragraph() -> Self {
        Self::text_block(BlockKind::Paragraph, Vec::new())
    }

    /// A list container holding the given items.
    pub fn list(kind: BlockKind, items: Vec<Element>) -> Self {
        debug_assert!(kind.is_list());
        Self {
            kind,
            align: None,
            media: None,
            children: items.into_iter().map(Node::Element).collect(),
        }
    }

    /// A void media node with its placeholder leaf.
    pub fn media(attrs: MediaAttrs) -> Self {
        Self {
            kind: BlockKind::Media,
            align: None,
            media: Some(attrs),
            children: vec![Node::Text(Text::empty())],
        }
    }

    pub fn with_align(mut self, align: Option<Align>) -> Self {
        self.align = align.filter(|_| self.kind.is_alignable());
        self
    }

    /// Iterate over the text runs of a text block.
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.children.iter().filter_map(Node::as_text)
    }

    /// Iterate over nested elements (list items of a list container).
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of this block and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Byte length of the block's inline text.
    pub fn text_len(&self) -> usize {
        self.texts().map(|t| t.text.len()).sum()
    }

    /// True when every leaf carries empty text.
    pub fn is_blank(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Text(t) => t.is_empty(),
            Node::Element(e) => e.is_blank(),
        })
    }
}

fn collect_text(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Text(t) => out.push_str(&t.text),
            Node::Element(e) => collect_text(&e.children, out),
        }
    }
}

/// Either a leaf text run or a block element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }
}
