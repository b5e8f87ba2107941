//! Maps HTML element names to their meaning in the document model.

use crate::model::{BlockKind, Mark};

/// What an HTML element contributes when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// A text-bearing block (`p`, `h1`, `h2`, `blockquote`, unknown tags).
    TextBlock(BlockKind),
    /// A list container (`ul`, `ol`).
    List(BlockKind),
    /// A list item (`li`).
    ListItem,
    /// An inline element that adds a mark to its text.
    Mark(Mark),
    /// An inline element that contributes only its text (`span`, `a`, ...).
    Inline,
    /// An image.
    Image,
    /// A line break inside inline content.
    Break,
    /// Elements whose content is never document text.
    Skip,
}

/// Classify an HTML element by its local name.
pub fn classify(local_name: &str) -> TagClass {
    match local_name {
        "h1" => TagClass::TextBlock(BlockKind::HeadingOne),
        "h2" => TagClass::TextBlock(BlockKind::HeadingTwo),
        "blockquote" => TagClass::TextBlock(BlockKind::BlockQuote),

        "ul" => TagClass::List(BlockKind::BulletedList),
        "ol" => TagClass::List(BlockKind::NumberedList),
        "li" => TagClass::ListItem,

        "strong" | "b" => TagClass::Mark(Mark::Bold),
        "em" | "i" => TagClass::Mark(Mark::Italic),
        "u" | "ins" => TagClass::Mark(Mark::Underline),
        "code" | "kbd" | "samp" | "tt" => TagClass::Mark(Mark::Code),

        "span" | "a" | "small" | "sub" | "sup" | "mark" | "abbr" | "cite" | "q" | "s"
        | "strike" | "del" | "time" | "label" | "font" | "var" | "dfn" | "bdi" | "bdo" => {
            TagClass::Inline
        }

        "img" => TagClass::Image,
        "br" => TagClass::Break,

        "script" | "style" | "template" | "noscript" | "head" | "title" | "meta" | "link"
        | "iframe" | "object" | "embed" | "svg" | "math" => TagClass::Skip,

        // Everything else, including unrecognized tags, is a paragraph.
        _ => TagClass::TextBlock(BlockKind::Paragraph),
    }
}

/// Whether an element may wrap a linked image as a media container.
pub fn is_media_container(local_name: &str) -> bool {
    matches!(local_name, "div" | "figure" | "p")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_dispatch() {
        assert_eq!(classify("h1"), TagClass::TextBlock(BlockKind::HeadingOne));
        assert_eq!(classify("h2"), TagClass::TextBlock(BlockKind::HeadingTwo));
        assert_eq!(classify("blockquote"), TagClass::TextBlock(BlockKind::BlockQuote));
        assert_eq!(classify("ul"), TagClass::List(BlockKind::BulletedList));
        assert_eq!(classify("ol"), TagClass::List(BlockKind::NumberedList));
        assert_eq!(classify("li"), TagClass::ListItem);
    }

    #[test]
    fn test_unknown_tags_are_paragraphs() {
        for tag in ["p", "div", "h3", "section", "custom-element", "table"] {
            assert_eq!(classify(tag), TagClass::TextBlock(BlockKind::Paragraph), "{tag}");
        }
    }

    #[test]
    fn test_mark_tags() {
        assert_eq!(classify("b"), TagClass::Mark(Mark::Bold));
        assert_eq!(classify("i"), TagClass::Mark(Mark::Italic));
        assert_eq!(classify("u"), TagClass::Mark(Mark::Underline));
        assert_eq!(classify("kbd"), TagClass::Mark(Mark::Code));
    }
}
