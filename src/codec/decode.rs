//! HTML → Document decoding.
//!
//! Decoding never fails. Content without any element is treated as legacy
//! plain text, unrecognized tags become paragraphs, and anything that cannot
//! be represented is flattened to its text.

use std::mem;

use crate::dom::{DomNodeId, HtmlDom, parse_fragment};
use crate::model::{Align, BlockKind, Document, Element, Marks, MediaAttrs, Text};

use super::css;
use super::tag_map::{TagClass, classify, is_media_container};

/// The non-breaking space the encoder writes into empty blocks.
const PLACEHOLDER: &str = "\u{a0}";

/// Decode stored HTML into a document.
///
/// Blank input yields the canonical empty document. Input with no elements
/// yields a single paragraph holding the input verbatim.
///
/// # Example
///
/// ```
/// use quire::codec::decode;
/// use quire::model::{BlockKind, Text};
///
/// let doc = decode("just text, no tags");
/// assert_eq!(doc.blocks().len(), 1);
/// assert_eq!(doc.blocks()[0].kind, BlockKind::Paragraph);
/// assert_eq!(doc.blocks()[0].texts().next(), Some(&Text::new("just text, no tags")));
/// ```
pub fn decode(html: &str) -> Document {
    if html.trim().is_empty() {
        return Document::new();
    }

    let fragment = parse_fragment(html);
    if fragment.element_count() == 0 {
        log::warn!(target: "quire::codec", "content has no elements, decoding as plain text");
        return plain_text_document(html);
    }

    let mut decoder = Decoder::new(&fragment.dom);
    decoder.top_level(fragment.root);
    Document::from_blocks(decoder.blocks)
}

/// A single paragraph wrapping `text` verbatim.
pub fn plain_text_document(text: &str) -> Document {
    Document::from_blocks(vec![Element::text_block(
        BlockKind::Paragraph,
        vec![Text::new(text)],
    )])
}

/// Inline content in document order, with images kept in place so the
/// caller can hoist them out of the enclosing block.
enum Segment {
    Run(Text),
    Media(MediaAttrs),
}

struct Decoder<'a> {
    dom: &'a HtmlDom,
    blocks: Vec<Element>,
    /// Inline content found directly under the root, waiting for a paragraph.
    loose: Vec<Text>,
}

impl<'a> Decoder<'a> {
    fn new(dom: &'a HtmlDom) -> Self {
        Self {
            dom,
            blocks: Vec::new(),
            loose: Vec::new(),
        }
    }

    fn top_level(&mut self, root: DomNodeId) {
        let dom = self.dom;
        for child in dom.children(root) {
            if let Some(text) = dom.text_content(child) {
                if !(self.loose.is_empty() && text.trim().is_empty()) {
                    self.loose.push(Text::new(text));
                }
                continue;
            }
            let Some(name) = dom.element_name(child) else {
                continue;
            };

            if let Some(media) = self.container_media(child) {
                self.flush_loose();
                self.blocks.push(Element::media(media));
                continue;
            }

            match classify(name) {
                TagClass::TextBlock(kind) => {
                    if kind == BlockKind::Paragraph && !matches!(&**name, "p" | "div") {
                        log::debug!(target: "quire::codec", "<{name}> decoded as paragraph");
                    }
                    self.flush_loose();
                    self.text_block(child, kind);
                }
                TagClass::List(kind) => {
                    self.flush_loose();
                    let mut items = Vec::new();
                    self.collect_items(child, &mut items);
                    if !items.is_empty() {
                        self.blocks.push(Element::list(kind, items));
                    }
                }
                TagClass::ListItem => {
                    self.flush_loose();
                    let mut items = Vec::new();
                    self.list_item(child, &mut items);
                    self.blocks.push(Element::list(BlockKind::BulletedList, items));
                }
                TagClass::Skip => {
                    log::debug!(target: "quire::codec", "skipping <{name}>");
                }
                TagClass::Image | TagClass::Mark(_) | TagClass::Inline | TagClass::Break => {
                    let mut segments = Vec::new();
                    self.inline(child, Marks::default(), &mut segments);
                    for segment in segments {
                        match segment {
                            Segment::Run(text) => self.loose.push(text),
                            Segment::Media(media) => {
                                self.flush_loose();
                                self.blocks.push(Element::media(media));
                            }
                        }
                    }
                }
            }
        }
        self.flush_loose();
    }

    /// Turn pending top-level inline content into a paragraph.
    fn flush_loose(&mut self) {
        let mut runs = mem::take(&mut self.loose);
        while runs.last().is_some_and(|t| t.text.trim().is_empty()) {
            runs.pop();
        }
        if !runs.is_empty() {
            self.blocks.push(Element::text_block(
                BlockKind::Paragraph,
                strip_placeholder(runs),
            ));
        }
    }

    /// Decode a text block, hoisting any images into sibling media blocks.
    fn text_block(&mut self, el: DomNodeId, kind: BlockKind) {
        let align = self.dom.get_attr(el, "style").and_then(css::text_align);

        let children: Vec<_> = self.dom.children(el).collect();
        let mut segments = Vec::new();
        self.inline_children(&children, Marks::default(), &mut segments);

        let has_media = segments.iter().any(|s| matches!(s, Segment::Media(_)));
        let mut runs = Vec::new();
        for segment in segments {
            match segment {
                Segment::Run(text) => runs.push(text),
                Segment::Media(media) => {
                    self.push_text_piece(kind, align, mem::take(&mut runs), true);
                    self.blocks.push(Element::media(media));
                }
            }
        }
        self.push_text_piece(kind, align, runs, has_media);
    }

    fn push_text_piece(
        &mut self,
        kind: BlockKind,
        align: Option<Align>,
        runs: Vec<Text>,
        drop_blank: bool,
    ) {
        if drop_blank && runs.iter().all(|t| t.text.trim().is_empty()) {
            return;
        }
        self.blocks
            .push(Element::text_block(kind, strip_placeholder(runs)).with_align(align));
    }

    /// Collect the items of a list container. Nested lists are flattened
    /// into the outer list.
    fn collect_items(&self, list: DomNodeId, items: &mut Vec<Element>) {
        for child in self.dom.children(list) {
            if let Some(text) = self.dom.text_content(child) {
                if !text.trim().is_empty() {
                    items.push(Element::text_block(
                        BlockKind::ListItem,
                        vec![Text::new(text)],
                    ));
                }
                continue;
            }
            let Some(name) = self.dom.element_name(child) else {
                continue;
            };
            match classify(name) {
                TagClass::ListItem => self.list_item(child, items),
                TagClass::List(_) => self.collect_items(child, items),
                TagClass::Skip => {}
                _ => {
                    let mut segments = Vec::new();
                    self.inline(child, Marks::default(), &mut segments);
                    items.push(Element::text_block(
                        BlockKind::ListItem,
                        strip_placeholder(self.runs_only(segments)),
                    ));
                }
            }
        }
    }

    fn list_item(&self, li: DomNodeId, items: &mut Vec<Element>) {
        let mut inline = Vec::new();
        let mut nested = Vec::new();
        for child in self.dom.children(li) {
            if let Some(name) = self.dom.element_name(child)
                && matches!(classify(name), TagClass::List(_))
            {
                self.collect_items(child, &mut nested);
                continue;
            }
            inline.push(child);
        }
        let mut segments = Vec::new();
        self.inline_children(&inline, Marks::default(), &mut segments);
        items.push(Element::text_block(
            BlockKind::ListItem,
            strip_placeholder(self.runs_only(segments)),
        ));
        items.extend(nested);
    }

    /// Keep the text runs; media cannot live inside a list item.
    fn runs_only(&self, segments: Vec<Segment>) -> Vec<Text> {
        segments
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Run(text) => Some(text),
                Segment::Media(media) => {
                    log::debug!(target: "quire::codec", "dropping image {} inside list item", media.url);
                    None
                }
            })
            .collect()
    }

    /// Collect inline content below `id`, accumulating marks.
    fn inline(&self, id: DomNodeId, marks: Marks, out: &mut Vec<Segment>) {
        if let Some(text) = self.dom.text_content(id) {
            if !text.is_empty() {
                out.push(Segment::Run(Text::marked(text, marks)));
            }
            return;
        }
        let Some(name) = self.dom.element_name(id) else {
            return;
        };

        let marks = match classify(name) {
            TagClass::Mark(mark) => marks.with(mark),
            TagClass::Image => {
                if let Some(media) = self.image(id) {
                    out.push(Segment::Media(media));
                }
                return;
            }
            TagClass::Break => {
                out.push(Segment::Run(Text::marked("\n", marks)));
                return;
            }
            TagClass::Skip => return,
            TagClass::Inline if &**name == "a" => {
                if let Some(media) = self.linked_image(id) {
                    out.push(Segment::Media(media));
                    return;
                }
                marks
            }
            // Nested blocks and plain inline wrappers contribute their text.
            _ => marks,
        };

        let children: Vec<_> = self.dom.children(id).collect();
        self.inline_children(&children, marks, out);
    }

    /// Collect the inline content of sibling nodes. Block-level siblings
    /// keep their own lines; whitespace between them is layout.
    fn inline_children(&self, children: &[DomNodeId], marks: Marks, out: &mut Vec<Segment>) {
        let is_block = |id: DomNodeId| {
            self.dom.element_name(id).is_some_and(|name| {
                matches!(
                    classify(name),
                    TagClass::TextBlock(_) | TagClass::List(_) | TagClass::ListItem
                )
            })
        };
        let has_blocks = children.iter().any(|&child| is_block(child));
        let mut after_block = false;
        for &child in children {
            if has_blocks
                && self
                    .dom
                    .text_content(child)
                    .is_some_and(|text| text.trim().is_empty())
            {
                continue;
            }
            let block = is_block(child);
            if (block || after_block) && ends_mid_line(out) {
                out.push(Segment::Run(Text::marked("\n", marks)));
            }
            self.inline(child, marks, out);
            after_block = block;
        }
    }

    /// Media attributes of an `<img>`; images without a source are dropped.
    fn image(&self, img: DomNodeId) -> Option<MediaAttrs> {
        let src = self.dom.get_attr(img, "src")?.trim();
        if src.is_empty() {
            return None;
        }
        let alt = self.dom.get_attr(img, "alt").map(str::to_string);
        Some(MediaAttrs::new(src, None, alt))
    }

    /// An `<a>` whose only content is a single image becomes linked media.
    fn linked_image(&self, anchor: DomNodeId) -> Option<MediaAttrs> {
        let mut img = None;
        for child in self.dom.children(anchor) {
            if let Some(text) = self.dom.text_content(child) {
                if !text.trim().is_empty() {
                    return None;
                }
            } else if self.dom.is_element(child) {
                if img.is_some() || &**self.dom.element_name(child)? != "img" {
                    return None;
                }
                img = Some(child);
            }
        }

        let mut media = self.image(img?)?;
        media.link = self
            .dom
            .get_attr(anchor, "href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string);
        Some(media)
    }

    /// The linked-media wrapper: a container whose first element is an
    /// image (optionally anchored) followed only by caption elements.
    fn container_media(&self, el: DomNodeId) -> Option<MediaAttrs> {
        if !is_media_container(self.dom.element_name(el)?) {
            return None;
        }

        let mut media = None;
        for child in self.dom.children(el) {
            if let Some(text) = self.dom.text_content(child) {
                if !text.trim().is_empty() {
                    return None;
                }
                continue;
            }
            let Some(name) = self.dom.element_name(child) else {
                continue;
            };
            match (&**name, &media) {
                ("a", None) => media = Some(self.linked_image(child)?),
                ("img", None) => media = Some(self.image(child)?),
                ("small" | "figcaption", Some(_)) => {}
                _ => return None,
            }
        }
        media
    }
}

/// True when the last inline run leaves a line open.
fn ends_mid_line(out: &[Segment]) -> bool {
    match out.last() {
        Some(Segment::Run(text)) => !text.text.ends_with('\n'),
        _ => false,
    }
}

/// A block holding only the encoder's placeholder is empty.
fn strip_placeholder(runs: Vec<Text>) -> Vec<Text> {
    let only_placeholder = runs.iter().all(|t| t.marks.is_empty())
        && runs.iter().map(|t| t.text.as_str()).collect::<String>() == PLACEHOLDER;
    if only_placeholder { Vec::new() } else { runs }
}
