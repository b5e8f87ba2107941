//! Tree normalization passes.
//!
//! Run after decoding and after every command so that structurally equal
//! content always has the same tree:
//!
//! 1. **Span merge**: adjacent runs with identical marks coalesce, and empty
//!    runs next to non-empty ones vanish. `\r\n` and `\r` become `\n`, as
//!    they do when HTML is parsed.
//! 2. **Placeholder**: a text block with no visible text holds exactly one
//!    unmarked empty leaf. A lone unmarked no-break space counts as no text.
//! 3. **List shape**: list containers hold only list items; empty lists are
//!    pruned.
//! 4. **Void shape**: media nodes carry the single placeholder leaf and no
//!    alignment.
//! 5. **Trailing block**: the document never ends with a media node and is
//!    never empty.

use std::borrow::Cow;

use super::node::{BlockKind, Element, Node, Text};

/// Fold carriage returns into line feeds.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Normalize a top-level block list in place.
pub fn normalize_document(blocks: &mut Vec<Element>) {
    let mut out = Vec::with_capacity(blocks.len());
    for mut block in blocks.drain(..) {
        if normalize_block(&mut block) {
            out.push(block);
        }
    }

    if out.last().is_none_or(|b| b.kind.is_void()) {
        out.push(Element::paragraph());
    }
    *blocks = out;
}

/// Normalize one top-level block. Returns `false` if it should be dropped.
fn normalize_block(block: &mut Element) -> bool {
    match block.kind {
        BlockKind::BulletedList | BlockKind::NumberedList => {
            block.align = None;
            block.media = None;
            let mut items = Vec::with_capacity(block.children.len());
            for child in block.children.drain(..) {
                match child {
                    Node::Element(mut item) if item.kind == BlockKind::ListItem => {
                        normalize_text_block(&mut item);
                        items.push(Node::Element(item));
                    }
                    Node::Element(other) => {
                        // Any other element inside a list is demoted to an item.
                        let mut item = Element::text_block(
                            BlockKind::ListItem,
                            vec![Text::new(other.plain_text())],
                        );
                        normalize_text_block(&mut item);
                        items.push(Node::Element(item));
                    }
                    Node::Text(t) if t.text.trim().is_empty() => {}
                    Node::Text(t) => {
                        let mut item = Element::text_block(BlockKind::ListItem, vec![t]);
                        normalize_text_block(&mut item);
                        items.push(Node::Element(item));
                    }
                }
            }
            block.children = items;
            !block.children.is_empty()
        }
        BlockKind::Media => {
            if block.media.is_none() {
                block.kind = BlockKind::Paragraph;
                normalize_text_block(block);
                return true;
            }
            block.align = None;
            block.children = vec![Node::Text(Text::empty())];
            true
        }
        _ => {
            normalize_text_block(block);
            true
        }
    }
}

/// Normalize the inline content of a text block.
pub fn normalize_text_block(block: &mut Element) {
    block.media = None;
    if !block.kind.is_alignable() {
        block.align = None;
    }

    let mut runs: Vec<Text> = Vec::with_capacity(block.children.len());
    for child in block.children.drain(..) {
        let text = match child {
            Node::Text(t) => t,
            // Nested blocks inside a text block flatten to their text.
            Node::Element(e) => Text::new(e.plain_text()),
        };
        if text.is_empty() {
            continue;
        }
        match runs.last_mut() {
            Some(last) if last.marks == text.marks => last.text.push_str(&text.text),
            _ => runs.push(text),
        }
    }

    for run in &mut runs {
        if run.text.contains('\r') {
            run.text = normalize_newlines(&run.text).into_owned();
        }
    }

    // A lone unmarked no-break space is the stored form of a blank block.
    if matches!(runs.as_slice(), [only] if only.marks.is_empty() && only.text == "\u{a0}") {
        runs.clear();
    }
    if runs.is_empty() {
        runs.push(Text::empty());
    }
    block.children = runs.into_iter().map(Node::Text).collect();
}
