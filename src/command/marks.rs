//! Character mark toggling.

use crate::model::{Document, Mark, Marks, Node, Path};

use super::selection::{runs_of, split_runs};
use super::{Change, EditState, Point, settle};

/// A text block and the byte range of it the selection covers.
pub(crate) struct Covered {
    pub path: Path,
    pub start: usize,
    pub end: usize,
}

/// Text blocks between two ordered points, with their covered ranges.
pub(crate) fn covered_blocks(doc: &Document, start: &Point, end: &Point) -> Vec<Covered> {
    doc.leaf_blocks()
        .into_iter()
        .filter(|path| *path >= start.path && *path <= end.path)
        .filter_map(|path| {
            let el = doc.get(&path)?;
            if !el.kind.holds_text() {
                return None;
            }
            let from = if path == start.path { start.offset } else { 0 };
            let to = if path == end.path {
                end.offset
            } else {
                el.text_len()
            };
            Some(Covered {
                path,
                start: from,
                end: to,
            })
        })
        .collect()
}

/// Marks of every run that overlaps a covered range by at least one byte.
fn covered_marks(doc: &Document, covered: &[Covered]) -> Vec<Marks> {
    let mut out = Vec::new();
    for c in covered {
        let Some(el) = doc.get(&c.path) else {
            continue;
        };
        let mut pos = 0;
        for run in el.texts() {
            let run_end = pos + run.text.len();
            if pos.max(c.start) < run_end.min(c.end) {
                out.push(run.marks);
            }
            pos = run_end;
        }
    }
    out
}

/// The marks a character typed at `point` would inherit.
///
/// The run ending at the cursor wins over the run starting there, so typing
/// at the end of a bold word stays bold.
pub fn marks_at_cursor(doc: &Document, point: &Point) -> Marks {
    let Some(el) = doc.get(&point.path).filter(|el| el.kind.holds_text()) else {
        return Marks::default();
    };
    let mut pos = 0;
    let mut first = None;
    for run in el.texts() {
        first.get_or_insert(run.marks);
        let run_end = pos + run.text.len();
        if pos < point.offset && point.offset <= run_end {
            return run.marks;
        }
        pos = run_end;
    }
    first.unwrap_or_default()
}

/// Whether `mark` is active for the current selection.
///
/// A collapsed selection reports the pending marks, or the marks at the
/// cursor. An expanded one requires every selected character to carry the
/// mark.
pub fn is_mark_active(state: &EditState, mark: Mark) -> bool {
    let Some((start, end)) = state.range() else {
        return false;
    };
    if start == end {
        let marks = state
            .pending_marks
            .unwrap_or_else(|| marks_at_cursor(&state.document, &start));
        return marks.has(mark);
    }
    let covered = covered_blocks(&state.document, &start, &end);
    let marks = covered_marks(&state.document, &covered);
    !marks.is_empty() && marks.iter().all(|m| m.has(mark))
}

/// Toggle a mark over the selection.
///
/// On a collapsed cursor only the pending marks change. On an expanded
/// selection the mark is cleared if uniformly active, set otherwise.
pub fn toggle_mark(state: &mut EditState, mark: Mark) -> Change {
    let Some((start, end)) = state.range() else {
        return Change::None;
    };

    if start == end {
        if state
            .document
            .get(&start.path)
            .is_none_or(|el| el.kind.is_void())
        {
            return Change::None;
        }
        let mut marks = state
            .pending_marks
            .unwrap_or_else(|| marks_at_cursor(&state.document, &start));
        marks.set(mark, !marks.has(mark));
        state.pending_marks = Some(marks);
        return Change::Selection;
    }

    let covered = covered_blocks(&state.document, &start, &end);
    if covered_marks(&state.document, &covered).is_empty() {
        return Change::None;
    }
    let value = !is_mark_active(state, mark);

    let before = state.document.clone();
    for c in covered {
        let Some(block) = state.document.get_mut(&c.path) else {
            continue;
        };
        let (head, rest) = split_runs(runs_of(block), c.start);
        let (mut middle, tail) = split_runs(rest, c.end - c.start);
        for run in &mut middle {
            run.marks.set(mark, value);
        }
        block.children = head
            .into_iter()
            .chain(middle)
            .chain(tail)
            .map(Node::Text)
            .collect();
    }
    settle(state, &before)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Selection;
    use crate::model::{BlockKind, Element, MediaAttrs, Text};

    fn bold() -> Marks {
        Marks::default().with(Mark::Bold)
    }

    fn select(state: &mut EditState, anchor: (Path, usize), focus: (Path, usize)) {
        state.selection = Some(Selection::new(
            Point::new(anchor.0, anchor.1),
            Point::new(focus.0, focus.1),
        ));
    }

    fn hello_world() -> EditState {
        EditState::new(Document::from_blocks(vec![Element::text_block(
            BlockKind::Paragraph,
            vec![Text::new("Hello "), Text::marked("world", bold())],
        )]))
    }

    fn runs(state: &EditState, path: Path) -> Vec<Text> {
        state.document.get(&path).unwrap().texts().cloned().collect()
    }

    #[test]
    fn test_marks_at_cursor_prefers_left_run() {
        let s = hello_world();
        let doc = &s.document;
        assert_eq!(marks_at_cursor(doc, &Point::new(Path::top(0), 0)), Marks::default());
        assert_eq!(marks_at_cursor(doc, &Point::new(Path::top(0), 6)), Marks::default());
        assert_eq!(marks_at_cursor(doc, &Point::new(Path::top(0), 7)), bold());
        assert_eq!(marks_at_cursor(doc, &Point::new(Path::top(0), 11)), bold());
    }

    #[test]
    fn test_toggle_on_partial_run_splits() {
        let mut s = hello_world();
        select(&mut s, (Path::top(0), 0), (Path::top(0), 5));
        assert!(!is_mark_active(&s, Mark::Italic));
        assert_eq!(toggle_mark(&mut s, Mark::Italic), Change::Document);
        let italic = Marks::default().with(Mark::Italic);
        assert_eq!(
            runs(&s, Path::top(0)),
            vec![
                Text::marked("Hello", italic),
                Text::new(" "),
                Text::marked("world", bold()),
            ]
        );
        assert!(is_mark_active(&s, Mark::Italic));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut s = hello_world();
        let original = s.document.clone();
        select(&mut s, (Path::top(0), 11), (Path::top(0), 3));
        assert_eq!(toggle_mark(&mut s, Mark::Underline), Change::Document);
        assert_eq!(toggle_mark(&mut s, Mark::Underline), Change::Document);
        assert_eq!(s.document, original);
    }

    #[test]
    fn test_mixed_selection_sets_mark() {
        let mut s = hello_world();
        select(&mut s, (Path::top(0), 0), (Path::top(0), 11));
        assert!(!is_mark_active(&s, Mark::Bold));
        toggle_mark(&mut s, Mark::Bold);
        assert_eq!(runs(&s, Path::top(0)), vec![Text::marked("Hello world", bold())]);
        assert!(is_mark_active(&s, Mark::Bold));
        toggle_mark(&mut s, Mark::Bold);
        assert_eq!(runs(&s, Path::top(0)), vec![Text::new("Hello world")]);
    }

    #[test]
    fn test_across_blocks() {
        let mut s = EditState::new(Document::from_blocks(vec![
            Element::text_block(BlockKind::HeadingOne, vec![Text::new("Title")]),
            Element::list(
                BlockKind::BulletedList,
                vec![Element::text_block(BlockKind::ListItem, vec![Text::new("item")])],
            ),
        ]));
        select(&mut s, (Path::top(0), 2), (Path::new([1, 0]), 2));
        toggle_mark(&mut s, Mark::Code);
        let code = Marks::default().with(Mark::Code);
        assert_eq!(
            runs(&s, Path::top(0)),
            vec![Text::new("Ti"), Text::marked("tle", code)]
        );
        assert_eq!(
            runs(&s, Path::new([1, 0])),
            vec![Text::marked("it", code), Text::new("em")]
        );
    }

    #[test]
    fn test_collapsed_toggles_pending_marks() {
        let mut s = hello_world();
        select(&mut s, (Path::top(0), 8), (Path::top(0), 8));
        assert!(is_mark_active(&s, Mark::Bold));
        assert_eq!(toggle_mark(&mut s, Mark::Bold), Change::Selection);
        assert!(!is_mark_active(&s, Mark::Bold));
        assert_eq!(s.pending_marks, Some(Marks::default()));
        assert_eq!(s.document, hello_world().document);
    }

    #[test]
    fn test_media_only_selection_is_noop() {
        let mut s = EditState::new(Document::from_blocks(vec![Element::media(
            MediaAttrs::new("a.png", None, None),
        )]));
        select(&mut s, (Path::top(0), 0), (Path::top(0), 0));
        assert_eq!(toggle_mark(&mut s, Mark::Bold), Change::None);
        select(&mut s, (Path::top(0), 0), (Path::top(1), 0));
        assert_eq!(toggle_mark(&mut s, Mark::Bold), Change::None);
        assert!(!is_mark_active(&s, Mark::Bold));
    }
}
