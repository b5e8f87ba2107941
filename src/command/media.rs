//! Media insertion and removal.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::model::{Element, MediaAttrs, Node, Path, Text};

use super::selection::{Anchor, from_anchor, runs_of, split_runs, to_anchor};
use super::{Change, EditState, Point, Selection, settle};

/// Characters that would break out of an HTML attribute or a URL.
const URL_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Trim a URL and percent-encode characters unsafe inside an attribute.
///
/// ```
/// use quire::command::normalize_url;
///
/// assert_eq!(normalize_url("  /a b.png "), "/a%20b.png");
/// ```
pub fn normalize_url(url: &str) -> String {
    utf8_percent_encode(url.trim(), URL_UNSAFE).to_string()
}

/// Insert a media node at the end of the selection.
///
/// A text block under the cursor is split around the media; empty halves
/// are dropped. A list is split after the item under the cursor. The media
/// is always followed by a fresh empty paragraph, which receives the cursor.
pub fn insert_media(
    state: &mut EditState,
    url: &str,
    link: Option<String>,
    alt: Option<String>,
) -> Change {
    let url = normalize_url(url);
    if url.is_empty() {
        log::debug!(target: "quire::command", "rejecting media insertion without a URL");
        return Change::Rejected;
    }
    let Some((_, end)) = state.range() else {
        return Change::None;
    };
    let Some(root) = end.path.root_index() else {
        return Change::None;
    };

    let link = link.map(|l| normalize_url(&l));
    let media = Element::media(MediaAttrs::new(url, link, alt));
    let before = state.document.clone();
    let blocks = state.document.blocks_mut();
    let block = blocks.remove(root);

    let mut head = Vec::new();
    let mut tail = Vec::new();
    if block.kind.is_void() {
        head.push(block);
    } else if block.kind.is_list() {
        let list = block.kind;
        let index = end.path.last().unwrap_or(0);
        let mut items: Vec<Element> = block
            .children
            .into_iter()
            .filter_map(|child| match child {
                Node::Element(item) => Some(item),
                Node::Text(_) => None,
            })
            .collect();
        let mut after = items.split_off((index + 1).min(items.len()));
        if let Some(item) = items.pop() {
            let (first, second) = split_block(&item, end.offset);
            items.extend(first);
            if let Some(second) = second {
                after.insert(0, second);
            }
        }
        if !items.is_empty() {
            head.push(Element::list(list, items));
        }
        if !after.is_empty() {
            tail.push(Element::list(list, after));
        }
    } else {
        let (first, second) = split_block(&block, end.offset);
        head.extend(first);
        tail.extend(second);
    }

    let cursor = root + head.len() + 1;
    let replacement: Vec<Element> = head
        .into_iter()
        .chain([media, Element::paragraph()])
        .chain(tail)
        .collect();
    blocks.splice(root..root, replacement);

    let change = settle(state, &before);
    state.collapse_to(Point::new(Path::top(cursor), 0));
    state.pending_marks = None;
    change
}

/// Split a text block at a byte offset, keeping only halves with text.
fn split_block(block: &Element, offset: usize) -> (Option<Element>, Option<Element>) {
    let (head, tail) = split_runs(runs_of(block), offset);
    let piece = |runs: Vec<Text>| {
        runs.iter()
            .any(|t| !t.is_empty())
            .then(|| Element::text_block(block.kind, runs).with_align(block.align))
    };
    (piece(head), piece(tail))
}

/// Remove the top-level media node at `path`.
///
/// A selection resting on the media moves to the start of the block that
/// takes its place.
pub fn remove_media(state: &mut EditState, path: &Path) -> Change {
    let is_media = path.depth() == 1
        && state
            .document
            .get(path)
            .is_some_and(|el| el.kind.is_void());
    if !is_media {
        log::debug!(target: "quire::command", "no media node at {path}");
        return Change::None;
    }
    let Some(root) = path.root_index() else {
        return Change::None;
    };

    let leaves = state.document.leaf_blocks();
    let Some(removed) = leaves.iter().position(|p| p == path) else {
        return Change::None;
    };
    let anchors = state.selection.as_ref().and_then(|sel| {
        Some((
            to_anchor(&leaves, &sel.anchor)?,
            to_anchor(&leaves, &sel.focus)?,
        ))
    });

    let before = state.document.clone();
    state.document.blocks_mut().remove(root);
    let change = settle(state, &before);

    let shift = |(ordinal, offset): Anchor| -> Anchor {
        match ordinal.cmp(&removed) {
            std::cmp::Ordering::Less => (ordinal, offset),
            std::cmp::Ordering::Equal => (removed, 0),
            std::cmp::Ordering::Greater => (ordinal - 1, offset),
        }
    };
    if let Some((anchor, focus)) = anchors {
        state.selection = Some(Selection::new(
            from_anchor(&state.document, shift(anchor)),
            from_anchor(&state.document, shift(focus)),
        ));
    }
    change
}
