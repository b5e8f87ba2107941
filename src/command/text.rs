//! Text input: typing, deletion and paragraph breaks.

use crate::model::{BlockKind, Document, Element, Node, Path, Text};
use crate::model::normalize::normalize_newlines;

use super::marks::marks_at_cursor;
use super::selection::{from_anchor, runs_of, split_runs, to_anchor};
use super::{Change, EditState, Point, remove_media, settle};

fn set_runs(block: &mut Element, runs: impl IntoIterator<Item = Text>) {
    block.children = runs.into_iter().map(Node::Text).collect();
}

/// Drop the leaf blocks whose ordinal is flagged.
fn remove_leaves(doc: &mut Document, removed: &[bool]) {
    let mut ordinal = 0;
    let mut take = || {
        let hit = removed.get(ordinal).copied().unwrap_or(false);
        ordinal += 1;
        !hit
    };
    doc.blocks_mut().retain_mut(|block| {
        if block.kind.is_list() {
            block
                .children
                .retain(|child| !matches!(child, Node::Element(_)) || take());
            block.children.iter().any(|c| matches!(c, Node::Element(_)))
        } else {
            take()
        }
    });
}

/// Delete everything between two ordered points and return the point where
/// the range collapsed.
///
/// Text blocks at either end keep their outer halves and merge; media at
/// either end and every block strictly inside the range are removed.
fn delete_range(doc: &mut Document, start: &Point, end: &Point) -> Point {
    let leaves = doc.leaf_blocks();
    let (Some((first, from)), Some((last, to))) =
        (to_anchor(&leaves, start), to_anchor(&leaves, end))
    else {
        return start.clone();
    };

    if first == last {
        if let Some(block) = doc.get_mut(&start.path).filter(|el| el.kind.holds_text()) {
            let (head, rest) = split_runs(runs_of(block), from);
            let (_, tail) = split_runs(rest, to - from);
            set_runs(block, head.into_iter().chain(tail));
        }
        return start.clone();
    }

    let holds_text = |path: &Path| doc.get(path).is_some_and(|el| el.kind.holds_text());
    let start_text = holds_text(&start.path);
    let end_text = holds_text(&end.path);

    let mut removed = vec![false; leaves.len()];
    for flag in &mut removed[first + 1..last] {
        *flag = true;
    }
    let tail = match doc.get(&end.path).filter(|_| end_text) {
        Some(block) => split_runs(runs_of(block), to).1,
        None => Vec::new(),
    };

    let offset = if start_text {
        if let Some(block) = doc.get_mut(&start.path) {
            let (head, _) = split_runs(runs_of(block), from);
            set_runs(block, head.into_iter().chain(tail));
        }
        removed[last] = true;
        from
    } else {
        removed[first] = true;
        match doc.get_mut(&end.path).filter(|_| end_text) {
            Some(block) => set_runs(block, tail),
            None => removed[last] = true,
        }
        0
    };

    remove_leaves(doc, &removed);
    doc.normalize();
    // Nothing before `first` was removed, so its ordinal still addresses the
    // block that absorbed the range.
    from_anchor(doc, (first, offset))
}

/// Insert a fresh paragraph after the top-level block at `root`.
fn paragraph_after(doc: &mut Document, root: usize, runs: Vec<Text>) -> Point {
    let index = (root + 1).min(doc.blocks().len());
    doc.blocks_mut()
        .insert(index, Element::text_block(BlockKind::Paragraph, runs));
    Point::new(Path::top(index), 0)
}

/// Type `text` at the cursor, replacing any selected content.
///
/// The new text takes the pending marks if a mark was toggled on the
/// collapsed cursor, else the marks of the run it extends. Carriage returns
/// are stored as line feeds.
pub fn insert_text(state: &mut EditState, text: &str) -> Change {
    let text = normalize_newlines(text);
    let text = text.as_ref();
    if text.is_empty() {
        return Change::None;
    }
    let Some((start, end)) = state.range() else {
        return Change::None;
    };
    let before = state.document.clone();
    let pending = state.pending_marks.take();
    let marks = pending.unwrap_or_else(|| marks_at_cursor(&state.document, &start));

    let point = if start != end {
        delete_range(&mut state.document, &start, &end)
    } else {
        start
    };

    let cursor = match state.document.get_mut(&point.path) {
        Some(block) if block.kind.holds_text() => {
            let (head, tail) = split_runs(runs_of(block), point.offset);
            let runs = head
                .into_iter()
                .chain([Text::marked(text, marks)])
                .chain(tail);
            set_runs(block, runs);
            Point::new(point.path, point.offset + text.len())
        }
        Some(_) => {
            let root = point.path.root_index().unwrap_or(0);
            let at = paragraph_after(&mut state.document, root, vec![Text::marked(text, marks)]);
            Point::new(at.path, text.len())
        }
        None => return Change::None,
    };

    let change = settle(state, &before);
    state.collapse_to(cursor);
    change
}

/// Remove the selected content.
pub fn delete_fragment(state: &mut EditState) -> Change {
    let Some((start, end)) = state.range() else {
        return Change::None;
    };
    if start == end {
        return Change::None;
    }
    let before = state.document.clone();
    let point = delete_range(&mut state.document, &start, &end);
    let change = settle(state, &before);
    state.collapse_to(point);
    state.pending_marks = None;
    change
}

/// Backspace.
///
/// Deletes the selection, or the character before the cursor. At the start
/// of a block the block merges into the previous one; a media node before
/// the cursor, or under it, is removed instead.
pub fn delete_backward(state: &mut EditState) -> Change {
    let Some((start, end)) = state.range() else {
        return Change::None;
    };
    if start != end {
        return delete_fragment(state);
    }

    let leaves = state.document.leaf_blocks();
    let Some((ordinal, offset)) = to_anchor(&leaves, &start) else {
        return Change::None;
    };
    let Some(current) = state.document.get(&start.path) else {
        return Change::None;
    };
    if current.kind.is_void() {
        return remove_media(state, &start.path);
    }

    let before = state.document.clone();
    let cursor = if offset > 0 {
        let text = current.plain_text();
        let prev = text[..offset]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        let range_start = Point::new(start.path.clone(), prev);
        delete_range(&mut state.document, &range_start, &start)
    } else {
        let Some(prev_path) = ordinal.checked_sub(1).and_then(|i| leaves.get(i)) else {
            return Change::None;
        };
        let prev_path = prev_path.clone();
        let Some(prev) = state.document.get(&prev_path) else {
            return Change::None;
        };
        if prev.kind.is_void() {
            return remove_media(state, &prev_path);
        }
        let joined = Point::new(prev_path, prev.text_len());
        delete_range(&mut state.document, &joined, &start)
    };

    let change = settle(state, &before);
    state.collapse_to(cursor);
    state.pending_marks = None;
    change
}

/// Enter: split the block at the cursor.
///
/// The second half keeps the block's type and alignment, so a break inside
/// a list item starts a new item. On a media node an empty paragraph is
/// opened after it.
pub fn insert_break(state: &mut EditState) -> Change {
    let Some((start, end)) = state.range() else {
        return Change::None;
    };
    let before = state.document.clone();
    let point = if start != end {
        delete_range(&mut state.document, &start, &end)
    } else {
        start
    };

    let Some(block) = state.document.get_mut(&point.path) else {
        return Change::None;
    };
    let cursor = if block.kind.is_void() {
        let root = point.path.root_index().unwrap_or(0);
        paragraph_after(&mut state.document, root, Vec::new())
    } else {
        let (head, tail) = split_runs(runs_of(block), point.offset);
        let second = Element::text_block(block.kind, tail).with_align(block.align);
        set_runs(block, head);
        if block.is_blank() {
            set_runs(block, [Text::empty()]);
        }
        insert_after(&mut state.document, &point.path, second)
    };

    let change = settle(state, &before);
    state.collapse_to(cursor);
    state.pending_marks = None;
    change
}

/// Insert a sibling after the element at `path` and return a point at its
/// start.
fn insert_after(doc: &mut Document, path: &Path, element: Element) -> Point {
    match (path.parent(), path.last()) {
        (Some(parent), Some(index)) => {
            if let Some(list) = doc.get_mut(&parent) {
                list.children.insert(index + 1, Node::Element(element));
            }
            Point::new(parent.child(index + 1), 0)
        }
        _ => {
            let index = path.root_index().unwrap_or(0) + 1;
            doc.blocks_mut().insert(index, element);
            Point::new(Path::top(index), 0)
        }
    }
}
