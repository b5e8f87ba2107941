//! Block retyping, list wrapping and alignment.

use crate::model::{BlockKind, Document, Element, Node, Path};

use super::selection::{from_anchor, to_anchor};
use super::{BlockFormat, Change, EditState, Selection, settle};

/// Leaf paths between two selection paths, inclusive.
fn selected_leaves(doc: &Document, start: &Path, end: &Path) -> Vec<Path> {
    doc.leaf_blocks()
        .into_iter()
        .filter(|path| path >= start && path <= end)
        .collect()
}

/// Whether `format` is active anywhere in the selection.
///
/// Kinds match the selected leaf blocks and the lists around them; an
/// alignment matches when any alignable selected block carries it.
pub fn is_block_active(state: &EditState, format: BlockFormat) -> bool {
    let Some((start, end)) = state.range() else {
        return false;
    };
    let doc = &state.document;
    selected_leaves(doc, &start.path, &end.path)
        .iter()
        .any(|path| match format {
            BlockFormat::Align(align) => doc
                .get(path)
                .is_some_and(|el| el.kind.is_alignable() && el.align == Some(align)),
            BlockFormat::Kind(kind) | BlockFormat::List(kind) => {
                doc.get(path).is_some_and(|el| el.kind == kind)
                    || path
                        .parent()
                        .and_then(|parent| doc.get(&parent))
                        .is_some_and(|el| el.kind == kind)
            }
        })
}

/// Toggle a block format over the selected blocks.
///
/// Alignment is set on, or cleared from, every alignable selected block.
/// Any other format first lifts the selected items out of their lists, then
/// retypes the selected blocks: to `Paragraph` when the format was already
/// active, into a fresh list container for list formats, or in place.
pub fn toggle_block(state: &mut EditState, format: BlockFormat) -> Change {
    let Some((start, end)) = state.range() else {
        return Change::None;
    };
    let active = is_block_active(state, format);
    let before = state.document.clone();

    let kind = match format {
        BlockFormat::Align(align) => {
            let value = if active { None } else { Some(align) };
            for path in selected_leaves(&state.document, &start.path, &end.path) {
                if let Some(el) = state.document.get_mut(&path).filter(|el| el.kind.is_alignable()) {
                    el.align = value;
                }
            }
            return settle(state, &before);
        }
        BlockFormat::Kind(kind) | BlockFormat::List(kind) => kind,
    };

    let leaves = state.document.leaf_blocks();
    let (Some(from), Some(to)) = (to_anchor(&leaves, &start), to_anchor(&leaves, &end)) else {
        return Change::None;
    };
    let target = if active {
        BlockKind::Paragraph
    } else if format.is_list() {
        BlockKind::ListItem
    } else {
        kind
    };

    let lifted = lift_and_retype(state.document.blocks_mut(), from.0..=to.0, target);
    let blocks = if format.is_list() && !active {
        wrap_items(lifted, kind)
    } else {
        lifted.into_iter().map(|(block, _)| block).collect()
    };
    *state.document.blocks_mut() = blocks;

    let change = settle(state, &before);
    let anchor = from_anchor(&state.document, from);
    let focus = from_anchor(&state.document, to);
    state.selection = Some(match &state.selection {
        Some(sel) if sel.anchor > sel.focus => Selection::new(focus, anchor),
        _ => Selection::new(anchor, focus),
    });
    change
}

/// Lift selected list items to the top level and retype selected blocks.
///
/// Lists are split around the lifted items. Each output block is flagged
/// with whether it was selected. Leaf order is preserved.
fn lift_and_retype(
    blocks: &mut Vec<Element>,
    selected: std::ops::RangeInclusive<usize>,
    target: BlockKind,
) -> Vec<(Element, bool)> {
    let mut out = Vec::with_capacity(blocks.len());
    let mut ordinal = 0;

    for block in blocks.drain(..) {
        if !block.kind.is_list() {
            let hit = selected.contains(&ordinal);
            ordinal += 1;
            out.push(if hit {
                (retype(block, target), true)
            } else {
                (block, false)
            });
            continue;
        }

        let list = block.kind;
        let mut kept = Vec::new();
        for child in block.children {
            let Node::Element(item) = child else {
                continue;
            };
            let hit = selected.contains(&ordinal);
            ordinal += 1;
            if hit {
                if !kept.is_empty() {
                    out.push((Element::list(list, std::mem::take(&mut kept)), false));
                }
                out.push((retype(item, target), true));
            } else {
                kept.push(item);
            }
        }
        if !kept.is_empty() {
            out.push((Element::list(list, kept), false));
        }
    }
    out
}

fn retype(mut block: Element, target: BlockKind) -> Element {
    if block.kind.is_void() {
        return block;
    }
    block.kind = target;
    if !target.is_alignable() {
        block.align = None;
    }
    block
}

/// Group each run of selected list items into one list container.
fn wrap_items(blocks: Vec<(Element, bool)>, list: BlockKind) -> Vec<Element> {
    let mut out = Vec::with_capacity(blocks.len());
    let mut items = Vec::new();
    for (block, selected) in blocks {
        if selected && block.kind == BlockKind::ListItem {
            items.push(block);
            continue;
        }
        if !items.is_empty() {
            out.push(Element::list(list, std::mem::take(&mut items)));
        }
        out.push(block);
    }
    if !items.is_empty() {
        out.push(Element::list(list, items));
    }
    out
}
