//! Document → HTML serialization.
//!
//! The output uses only the tag vocabulary the decoder understands, so
//! encoding a decoded document settles after one cycle.

use std::fmt::Write;

use crate::model::{BlockKind, Document, Element, Mark, MediaAttrs, Node, Text};

use super::escape::escape_html;

/// Placeholder emitted inside blocks with no visible text.
pub const EMPTY_BLOCK_PLACEHOLDER: &str = "&nbsp;";

/// Serialize a document to its HTML storage form.
///
/// # Example
///
/// ```
/// use quire::codec::{decode, encode};
///
/// let doc = decode("<p>Hello <strong>world</strong></p>");
/// assert_eq!(encode(&doc), "<p>Hello <strong>world</strong></p>");
/// ```
pub fn encode(doc: &Document) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        encode_block(block, &mut out);
    }
    out
}

/// Serialize a single block element.
pub fn encode_block(el: &Element, out: &mut String) {
    match el.kind {
        BlockKind::Media => {
            if let Some(media) = &el.media {
                encode_media(media, out);
            }
        }
        BlockKind::BulletedList | BlockKind::NumberedList => {
            let tag = el.kind.tag();
            write!(out, "<{tag}>").unwrap();
            for item in el.elements() {
                encode_block(item, out);
            }
            write!(out, "</{tag}>").unwrap();
        }
        _ => {
            let tag = el.kind.tag();
            out.push('<');
            out.push_str(tag);
            if let Some(align) = el.align.filter(|_| el.kind.is_alignable()) {
                write!(out, " style=\"text-align: {align}\"").unwrap();
            }
            out.push('>');

            if el.is_blank() {
                out.push_str(EMPTY_BLOCK_PLACEHOLDER);
            } else {
                for child in &el.children {
                    match child {
                        Node::Text(text) => encode_text(text, out),
                        Node::Element(nested) => encode_block(nested, out),
                    }
                }
            }

            write!(out, "</{tag}>").unwrap();
        }
    }
}

/// Serialize a text run.
///
/// Marks nest in a fixed order regardless of how they were applied: `code`
/// innermost, then `em`, then `u`, with `strong` outermost.
pub fn encode_text(text: &Text, out: &mut String) {
    // Mark::ALL is innermost-first; open tags outermost-first.
    for mark in Mark::ALL.iter().rev() {
        if text.marks.has(*mark) {
            write!(out, "<{}>", mark.tag()).unwrap();
        }
    }
    out.push_str(&escape_html(&text.text));
    for mark in Mark::ALL {
        if text.marks.has(mark) {
            write!(out, "</{}>", mark.tag()).unwrap();
        }
    }
}

/// Serialize a media node.
///
/// Unlinked media is a bare `<img>`. Linked media is wrapped in a container
/// holding the anchored image and a caption showing the link target.
pub fn encode_media(media: &MediaAttrs, out: &mut String) {
    let url = escape_html(&media.url);
    let alt = escape_html(media.alt.as_deref().unwrap_or(""));
    match &media.link {
        None => {
            write!(out, "<img src=\"{url}\" alt=\"{alt}\">").unwrap();
        }
        Some(link) => {
            let link = escape_html(link);
            write!(
                out,
                "<div class=\"media\"><a href=\"{link}\" target=\"_blank\" rel=\"noopener noreferrer\">\
                 <img src=\"{url}\" alt=\"{alt}\"></a>\
                 <small class=\"media-link\">{link}</small></div>"
            )
            .unwrap();
        }
    }
}
