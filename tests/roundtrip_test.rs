//! Property tests for the storage round trip and command invariants.

use proptest::prelude::*;

use quire::command::BlockFormat;
use quire::model::{Align, BlockKind, Element, Marks, MediaAttrs, Path};
use quire::{Command, Document, EditState, Mark, Point, Selection, Text, decode, encode};

// ============================================================================
// Strategies
// ============================================================================

fn marks() -> impl Strategy<Value = Marks> {
    any::<(bool, bool, bool, bool)>().prop_map(|(bold, italic, underline, code)| Marks {
        bold,
        italic,
        underline,
        code,
    })
}

/// Text with markup characters, line breaks, no-break spaces and
/// multi-byte characters.
fn text(max: usize) -> impl Strategy<Value = String> {
    let chars = prop::sample::select(vec![
        'a', 'Z', '7', ' ', ',', '&', '<', '>', '\'', '"', '\t', '\r', '\n', '\u{a0}', 'é', '✓',
    ]);
    prop::collection::vec(chars, 1..=max).prop_map(|chars| chars.into_iter().collect::<String>())
}

fn run() -> impl Strategy<Value = Text> {
    (text(10), marks()).prop_map(|(text, marks)| Text::marked(text, marks))
}

fn runs() -> impl Strategy<Value = Vec<Text>> {
    prop::collection::vec(run(), 0..4)
}

fn align() -> impl Strategy<Value = Option<Align>> {
    prop::option::of(prop::sample::select(Align::ALL.to_vec()))
}

fn text_block() -> impl Strategy<Value = Element> {
    let kinds = vec![
        BlockKind::Paragraph,
        BlockKind::HeadingOne,
        BlockKind::HeadingTwo,
        BlockKind::BlockQuote,
    ];
    (prop::sample::select(kinds), runs(), align())
        .prop_map(|(kind, runs, align)| Element::text_block(kind, runs).with_align(align))
}

fn list() -> impl Strategy<Value = Element> {
    let kinds = vec![BlockKind::BulletedList, BlockKind::NumberedList];
    (
        prop::sample::select(kinds),
        prop::collection::vec(runs(), 1..4),
    )
        .prop_map(|(kind, items)| {
            let items = items
                .into_iter()
                .map(|runs| Element::text_block(BlockKind::ListItem, runs))
                .collect();
            Element::list(kind, items)
        })
}

fn media() -> impl Strategy<Value = Element> {
    (
        "[a-z]{1,8}\\.png",
        prop::option::of("https://[a-z]{1,8}\\.com/[a-z]{0,6}"),
        prop::option::of("[A-Za-z][A-Za-z ]{0,8}"),
    )
        .prop_map(|(url, link, alt)| Element::media(MediaAttrs::new(url, link, alt)))
}

fn block() -> impl Strategy<Value = Element> {
    prop_oneof![4 => text_block(), 2 => list(), 1 => media()]
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(block(), 0..6).prop_map(Document::from_blocks)
}

fn mark() -> impl Strategy<Value = Mark> {
    prop::sample::select(Mark::ALL.to_vec())
}

fn block_format() -> impl Strategy<Value = BlockFormat> {
    let mut formats = vec![
        BlockFormat::PARAGRAPH,
        BlockFormat::HEADING_ONE,
        BlockFormat::HEADING_TWO,
        BlockFormat::BLOCK_QUOTE,
        BlockFormat::BULLETED_LIST,
        BlockFormat::NUMBERED_LIST,
    ];
    formats.extend(Align::ALL.map(BlockFormat::Align));
    prop::sample::select(formats)
}

/// A selection described by leaf ordinals and offsets, resolved against
/// whatever document it is applied to.
#[derive(Debug, Clone)]
struct Spot {
    anchor: (usize, usize),
    focus: (usize, usize),
}

impl Spot {
    fn resolve(&self, doc: &Document) -> Selection {
        let leaves = doc.leaf_blocks();
        let point = |(ordinal, offset): (usize, usize)| {
            let path = leaves[ordinal % leaves.len()].clone();
            let len = doc.get(&path).map_or(0, Element::text_len);
            Point::new(path, offset % (len + 1))
        };
        Selection::new(point(self.anchor), point(self.focus))
    }
}

fn spot() -> impl Strategy<Value = Spot> {
    (any::<(u8, u8)>(), any::<(u8, u8)>()).prop_map(|(a, f)| Spot {
        anchor: (a.0 as usize, a.1 as usize),
        focus: (f.0 as usize, f.1 as usize),
    })
}

#[derive(Debug, Clone)]
enum Step {
    Select(Spot),
    Mark(Mark),
    Block(BlockFormat),
    Type(String),
    Backspace,
    Break,
    Media(String),
    RemoveMedia(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => spot().prop_map(Step::Select),
        2 => mark().prop_map(Step::Mark),
        2 => block_format().prop_map(Step::Block),
        2 => text(5).prop_map(Step::Type),
        1 => Just(Step::Backspace),
        1 => Just(Step::Break),
        1 => "[a-z]{1,6}\\.png".prop_map(Step::Media),
        1 => (0usize..8).prop_map(Step::RemoveMedia),
    ]
}

fn command(step: &Step, doc: &Document) -> Command {
    match step {
        Step::Select(spot) => Command::SetSelection(Some(spot.resolve(doc))),
        Step::Mark(mark) => Command::ToggleMark(*mark),
        Step::Block(format) => Command::ToggleBlock(*format),
        Step::Type(text) => Command::InsertText(text.clone()),
        Step::Backspace => Command::DeleteBackward,
        Step::Break => Command::InsertBreak,
        Step::Media(url) => Command::InsertMedia {
            url: url.clone(),
            link: None,
            alt: None,
        },
        Step::RemoveMedia(index) => Command::RemoveMedia(Path::top(*index)),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_decode_inverts_encode(doc in document()) {
        let html = encode(&doc);
        prop_assert_eq!(decode(&html), doc, "html: {}", html);
    }

    #[test]
    fn prop_stored_text_is_the_typed_text(typed in text(12)) {
        let mut state = EditState::new(Document::new());
        state.apply(Command::SetSelection(Some(Selection::caret(Point::new(Path::top(0), 0)))));
        state.apply(Command::InsertText(typed));
        let html = encode(&state.document);
        prop_assert_eq!(decode(&html), state.document.clone(), "html: {}", html);
        if let Some(selection) = &state.selection {
            prop_assert!(selection.is_valid(&state.document));
        }
    }

    #[test]
    fn prop_encoding_is_stable(
        parts in prop::collection::vec(
            prop::sample::select(vec![
                "<p>para</p>",
                "<h1>Title</h1>",
                "<h3>minor</h3>",
                "<blockquote>quote</blockquote>",
                "<ul><li>one</li><li>two</li></ul>",
                "<ol><li>first</li></ol>",
                "<b>bold</b>",
                "<em>em</em>",
                "loose",
                "<br>",
                "<img src=\"pic.png\">",
                "<div>block</div>",
                "<div><p>x</p><p>y</p></div>",
                "<p>&nbsp;</p>",
                "<p>a\r\nb</p>",
                "<p style=\"text-align: center\">mid</p>",
            ]),
            0..8,
        )
    ) {
        let once = encode(&decode(&parts.concat()));
        let twice = encode(&decode(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_mark_toggle_is_an_involution(
        runs in prop::collection::vec(run(), 1..4),
        mark in mark(),
        from in any::<u8>(),
        to in any::<u8>(),
    ) {
        // Start with the mark absent so the first toggle sets it everywhere.
        let runs = runs
            .into_iter()
            .map(|mut t| {
                t.marks.set(mark, false);
                t
            })
            .collect();
        let doc = Document::from_blocks(vec![Element::text_block(BlockKind::Paragraph, runs)]);
        let len = doc.blocks()[0].text_len();
        let point = |offset: u8| Point::new(Path::top(0), offset as usize % (len + 1));

        let mut state = EditState::new(doc.clone());
        state.apply(Command::SetSelection(Some(Selection::new(point(from), point(to)))));
        state.apply(Command::ToggleMark(mark));
        state.apply(Command::ToggleMark(mark));
        prop_assert_eq!(state.document, doc);
    }

    #[test]
    fn prop_commands_keep_documents_canonical(
        doc in document(),
        steps in prop::collection::vec(step(), 1..16),
    ) {
        let mut state = EditState::new(doc);
        for step in &steps {
            let command = command(step, &state.document);
            state.apply(command);

            prop_assert!(!state.document.blocks().is_empty());
            if let Some(selection) = &state.selection {
                prop_assert!(selection.is_valid(&state.document), "{:?}", selection);
            }
        }
        let html = encode(&state.document);
        prop_assert_eq!(decode(&html), state.document, "html: {}", html);
    }
}
