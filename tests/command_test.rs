//! End-to-end command tests.
//!
//! Each test decodes stored HTML, runs commands against an edit state and
//! checks the re-encoded result.

use quire::command::BlockFormat;
use quire::model::{BlockKind, Path};
use quire::{Change, Command, EditState, Mark, Point, Selection, decode, encode};

fn state(html: &str) -> EditState {
    EditState::new(decode(html))
}

fn caret(state: &mut EditState, path: Path, offset: usize) {
    let change = state.apply(Command::SetSelection(Some(Selection::caret(Point::new(
        path, offset,
    )))));
    assert_ne!(change, Change::Rejected);
}

fn select(state: &mut EditState, from: (Path, usize), to: (Path, usize)) {
    state.apply(Command::SetSelection(Some(Selection::new(
        Point::new(from.0, from.1),
        Point::new(to.0, to.1),
    ))));
}

fn html(state: &EditState) -> String {
    encode(&state.document)
}

// ============================================================================
// Block Formats
// ============================================================================

#[test]
fn test_numbered_list_toggle() {
    let mut s = state("<p>Item</p>");
    caret(&mut s, Path::top(0), 2);

    assert_eq!(
        s.apply(Command::ToggleBlock(BlockFormat::NUMBERED_LIST)),
        Change::Document
    );
    assert_eq!(html(&s), "<ol><li>Item</li></ol>");
    assert_eq!(s.selection, Some(Selection::caret(Point::new(Path::new([0, 0]), 2))));

    s.apply(Command::ToggleBlock(BlockFormat::NUMBERED_LIST));
    assert_eq!(html(&s), "<p>Item</p>");
}

#[test]
fn test_switch_list_type() {
    let mut s = state("<ul><li>a</li><li>b</li></ul>");
    select(&mut s, (Path::new([0, 0]), 0), (Path::new([0, 1]), 1));
    s.apply(Command::ToggleBlock(BlockFormat::NUMBERED_LIST));
    assert_eq!(html(&s), "<ol><li>a</li><li>b</li></ol>");
}

#[test]
fn test_heading_toggle_is_an_involution() {
    let mut s = state("<p>Title</p>");
    caret(&mut s, Path::top(0), 0);
    s.apply(Command::ToggleBlock(BlockFormat::HEADING_ONE));
    assert_eq!(html(&s), "<h1>Title</h1>");
    s.apply(Command::ToggleBlock(BlockFormat::HEADING_TWO));
    assert_eq!(html(&s), "<h2>Title</h2>");
    s.apply(Command::ToggleBlock(BlockFormat::HEADING_TWO));
    assert_eq!(html(&s), "<p>Title</p>");
}

#[test]
fn test_alignment_toggle() {
    let mut s = state("<p>a</p><p>b</p>");
    select(&mut s, (Path::top(0), 0), (Path::top(1), 1));
    let center: BlockFormat = "center".parse().unwrap();
    s.apply(Command::ToggleBlock(center));
    assert_eq!(
        html(&s),
        "<p style=\"text-align: center\">a</p><p style=\"text-align: center\">b</p>"
    );
    s.apply(Command::ToggleBlock(center));
    assert_eq!(html(&s), "<p>a</p><p>b</p>");
}

// ============================================================================
// Marks
// ============================================================================

#[test]
fn test_marks_are_orthogonal() {
    let mut s = state("<p><em>Hello</em> world</p>");
    select(&mut s, (Path::top(0), 0), (Path::top(0), 5));

    s.apply(Command::ToggleMark(Mark::Bold));
    assert_eq!(html(&s), "<p><strong><em>Hello</em></strong> world</p>");

    s.apply(Command::ToggleMark(Mark::Bold));
    assert_eq!(html(&s), "<p><em>Hello</em> world</p>");
}

#[test]
fn test_mark_across_blocks() {
    let mut s = state("<p>ab</p><h2>cd</h2>");
    select(&mut s, (Path::top(0), 1), (Path::top(1), 1));
    s.apply(Command::ToggleMark(Mark::Code));
    assert_eq!(html(&s), "<p>a<code>b</code></p><h2><code>c</code>d</h2>");
}

#[test]
fn test_pending_mark_applies_to_typed_text() {
    let mut s = state("<p>Hi</p>");
    caret(&mut s, Path::top(0), 2);

    assert_eq!(s.apply(Command::ToggleMark(Mark::Bold)), Change::Selection);
    assert_eq!(html(&s), "<p>Hi</p>");

    s.apply(Command::InsertText("!".into()));
    assert_eq!(html(&s), "<p>Hi<strong>!</strong></p>");
}

#[test]
fn test_moving_the_cursor_drops_pending_marks() {
    let mut s = state("<p>Hi</p>");
    caret(&mut s, Path::top(0), 2);
    s.apply(Command::ToggleMark(Mark::Italic));
    caret(&mut s, Path::top(0), 1);
    s.apply(Command::InsertText("o".into()));
    assert_eq!(html(&s), "<p>Hoi</p>");
}

// ============================================================================
// Media
// ============================================================================

#[test]
fn test_media_insert_keeps_cursor_editable() {
    let mut s = state("<p>Hello</p>");
    caret(&mut s, Path::top(0), 5);

    let change = s.apply(Command::InsertMedia {
        url: "https://cdn.example.com/a.png".into(),
        link: None,
        alt: None,
    });
    assert_eq!(change, Change::Document);
    assert_eq!(s.document.blocks()[1].kind, BlockKind::Media);
    assert_eq!(s.selection, Some(Selection::caret(Point::new(Path::top(2), 0))));

    s.apply(Command::InsertText("after".into()));
    assert_eq!(
        html(&s),
        "<p>Hello</p><img src=\"https://cdn.example.com/a.png\" alt=\"\"><p>after</p>"
    );
}

#[test]
fn test_media_insert_splits_paragraph() {
    let mut s = state("<p>HeadTail</p>");
    caret(&mut s, Path::top(0), 4);
    s.apply(Command::InsertMedia {
        url: "x.png".into(),
        link: Some("https://example.com".into()),
        alt: Some("x".into()),
    });
    let kinds: Vec<_> = s.document.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        [
            BlockKind::Paragraph,
            BlockKind::Media,
            BlockKind::Paragraph,
            BlockKind::Paragraph,
        ]
    );
    assert_eq!(s.document.blocks()[3].plain_text(), "Tail");
    assert_eq!(s.selection, Some(Selection::caret(Point::new(Path::top(2), 0))));
}

#[test]
fn test_media_insert_rejects_empty_url() {
    let mut s = state("<p>Hello</p>");
    caret(&mut s, Path::top(0), 0);
    let change = s.apply(Command::InsertMedia {
        url: "   ".into(),
        link: None,
        alt: None,
    });
    assert_eq!(change, Change::Rejected);
    assert_eq!(html(&s), "<p>Hello</p>");
}

#[test]
fn test_media_insert_without_selection_is_ignored() {
    let mut s = state("<p>Hello</p>");
    let change = s.apply(Command::InsertMedia {
        url: "a.png".into(),
        link: None,
        alt: None,
    });
    assert_eq!(change, Change::None);
}

#[test]
fn test_remove_media() {
    let mut s = state("<p>a</p><img src=\"x.png\"><p>b</p>");
    assert_eq!(
        s.apply(Command::RemoveMedia(Path::top(1))),
        Change::Document
    );
    assert_eq!(html(&s), "<p>a</p><p>b</p>");
    assert_eq!(s.apply(Command::RemoveMedia(Path::top(0))), Change::None);
}

// ============================================================================
// Typing
// ============================================================================

#[test]
fn test_break_keeps_block_type() {
    let mut s = state("<h1>Title</h1>");
    caret(&mut s, Path::top(0), 2);
    s.apply(Command::InsertBreak);
    assert_eq!(html(&s), "<h1>Ti</h1><h1>tle</h1>");
    assert_eq!(s.selection, Some(Selection::caret(Point::new(Path::top(1), 0))));
}

#[test]
fn test_break_in_list_adds_item() {
    let mut s = state("<ul><li>ab</li></ul>");
    caret(&mut s, Path::new([0, 0]), 1);
    s.apply(Command::InsertBreak);
    assert_eq!(html(&s), "<ul><li>a</li><li>b</li></ul>");
}

#[test]
fn test_backspace_merges_blocks() {
    let mut s = state("<p>ab</p><h2>cd</h2>");
    caret(&mut s, Path::top(1), 0);
    s.apply(Command::DeleteBackward);
    assert_eq!(html(&s), "<p>abcd</p>");
    assert_eq!(s.selection, Some(Selection::caret(Point::new(Path::top(0), 2))));
}

#[test]
fn test_backspace_respects_char_boundaries() {
    let mut s = state("<p>naïve</p>");
    caret(&mut s, Path::top(0), "naï".len());
    s.apply(Command::DeleteBackward);
    assert_eq!(html(&s), "<p>nave</p>");
}

#[test]
fn test_backspace_at_document_start_does_nothing() {
    let mut s = state("<p>ab</p>");
    caret(&mut s, Path::top(0), 0);
    assert_eq!(s.apply(Command::DeleteBackward), Change::None);
}

#[test]
fn test_delete_fragment_across_blocks() {
    let mut s = state("<p>Hello</p><img src=\"x.png\"><p>World</p>");
    select(&mut s, (Path::top(0), 2), (Path::top(2), 3));
    assert_eq!(s.apply(Command::DeleteFragment), Change::Document);
    assert_eq!(html(&s), "<p>Held</p>");
    assert_eq!(s.selection, Some(Selection::caret(Point::new(Path::top(0), 2))));
}

#[test]
fn test_typing_replaces_selection() {
    let mut s = state("<p>Hello world</p>");
    select(&mut s, (Path::top(0), 6), (Path::top(0), 11));
    s.apply(Command::InsertText("there".into()));
    assert_eq!(html(&s), "<p>Hello there</p>");
}

#[test]
fn test_typed_no_break_space_alone_reads_as_blank() {
    let mut s = state("");
    caret(&mut s, Path::top(0), 0);
    assert_eq!(s.apply(Command::InsertText("\u{a0}".into())), Change::None);
    assert_eq!(html(&s), "<p>&nbsp;</p>");
    assert_eq!(decode(&html(&s)), s.document);
    assert!(s.selection.as_ref().is_some_and(|sel| sel.is_valid(&s.document)));

    s.apply(Command::InsertText("x".into()));
    assert_eq!(decode(&html(&s)), s.document);
}

#[test]
fn test_deleting_down_to_a_no_break_space() {
    let mut s = state("<p>x</p>");
    caret(&mut s, Path::top(0), 0);
    s.apply(Command::InsertText("\u{a0}".into()));
    caret(&mut s, Path::top(0), 3);
    assert_eq!(s.apply(Command::DeleteBackward), Change::Document);
    assert_eq!(decode(&html(&s)), s.document);
    assert_eq!(s.selection, Some(Selection::caret(Point::new(Path::top(0), 0))));
}

#[test]
fn test_pasted_carriage_returns_survive_storage() {
    let mut s = state("<p>ab</p>");
    caret(&mut s, Path::top(0), 1);
    s.apply(Command::InsertText("1\r2\r\n3".into()));
    assert_eq!(html(&s), "<p>a1\n2\n3b</p>");
    assert_eq!(decode(&html(&s)), s.document);
}
