//! Benchmarks for the HTML codec and the command layer.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use quire::command::BlockFormat;
use quire::model::Path;
use quire::{Command, EditState, Mark, Point, Selection, decode, encode};

/// A long article touching every block type and mark.
fn sample_article() -> String {
    let mut html = String::from("<h1 style=\"text-align: center\">A Long Article</h1>");
    for i in 0..200 {
        html.push_str(&format!(
            "<h2>Section {i}</h2>\
             <p>Plain text with <strong>bold</strong>, <em>italic</em>, <u>underlined</u> \
             and <code>code</code> runs &amp; escaped characters.</p>\
             <blockquote>A quotation in section {i}.</blockquote>\
             <ul><li>first point</li><li><strong><em>second</em></strong> point</li></ul>\
             <ol><li>step one</li><li>step two</li></ol>"
        ));
        if i % 10 == 0 {
            html.push_str(&format!(
                "<div class=\"media\"><a href=\"https://example.com/{i}\">\
                 <img src=\"https://cdn.example.com/{i}.png\" alt=\"figure {i}\"></a>\
                 <small class=\"media-link\">https://example.com/{i}</small></div>"
            ));
        }
    }
    html
}

// ============================================================================
// Codec Benchmarks
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let html = sample_article();
    c.bench_function("decode_article", |b| {
        b.iter(|| decode(&html));
    });
}

fn bench_encode(c: &mut Criterion) {
    let doc = decode(&sample_article());
    c.bench_function("encode_article", |b| {
        b.iter(|| encode(&doc));
    });
}

fn bench_legacy_text(c: &mut Criterion) {
    let text = "Legacy plain text content without any markup. ".repeat(500);
    c.bench_function("decode_legacy_text", |b| {
        b.iter(|| decode(&text));
    });
}

// ============================================================================
// Command Benchmarks
// ============================================================================

fn bench_toggle_mark_all(c: &mut Criterion) {
    let doc = decode(&sample_article());
    let leaves = doc.leaf_blocks();
    let last = leaves[leaves.len() - 1].clone();
    let len = doc.get(&last).map_or(0, |el| el.text_len());
    let selection = Selection::new(Point::new(Path::top(0), 0), Point::new(last, len));

    c.bench_function("toggle_mark_whole_article", |b| {
        b.iter(|| {
            let mut state = EditState::new(doc.clone());
            state.apply(Command::SetSelection(Some(selection.clone())));
            state.apply(Command::ToggleMark(Mark::Bold))
        });
    });
}

fn bench_toggle_list(c: &mut Criterion) {
    let doc = decode(&sample_article());
    let selection = Selection::new(
        Point::new(Path::top(1), 0),
        Point::new(Path::top(19), 0),
    );

    c.bench_function("toggle_list_across_sections", |b| {
        b.iter(|| {
            let mut state = EditState::new(doc.clone());
            state.apply(Command::SetSelection(Some(selection.clone())));
            state.apply(Command::ToggleBlock(BlockFormat::BULLETED_LIST))
        });
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_encode,
    bench_legacy_text,
    bench_toggle_mark_all,
    bench_toggle_list,
);
criterion_main!(benches);
