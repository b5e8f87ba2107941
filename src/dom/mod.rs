//! HTML parsing into an arena tree.
//!
//! Stored content is a body fragment, not a full document. It is wrapped in
//! a minimal document, parsed with html5ever, and the `<body>` element is
//! returned as the fragment root.

mod arena;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, DomData, DomNode, DomNodeId, HtmlDom};
pub use tree_sink::{DomSink, NodeHandle};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// A parsed body fragment.
pub struct Fragment {
    pub dom: HtmlDom,
    /// The `<body>` element holding the fragment's top-level nodes.
    pub root: DomNodeId,
}

impl Fragment {
    /// Number of element children directly under the fragment root.
    pub fn element_count(&self) -> usize {
        self.dom.element_children(self.root).count()
    }
}

/// Parse an HTML body fragment.
pub fn parse_fragment(html: &str) -> Fragment {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    let sink = parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes());
    let errors = sink.error_count();
    let dom = sink.into_dom();
    log::trace!(target: "quire::codec", "parsed {} html nodes", dom.node_count());
    if errors > 0 {
        log::debug!(target: "quire::codec", "recovered from {errors} html parse errors");
    }
    let root = dom.find_by_tag("body").unwrap_or_else(|| dom.document());
    Fragment { dom, root }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_root_is_body() {
        let fragment = parse_fragment("<h1>Title</h1><p>Body</p>");
        assert_eq!(
            fragment.dom.element_name(fragment.root).map(|n| n.as_ref()),
            Some("body")
        );
        assert_eq!(fragment.element_count(), 2);
    }

    #[test]
    fn test_plain_text_has_no_elements() {
        let fragment = parse_fragment("just text, no tags");
        assert_eq!(fragment.element_count(), 0);
        assert_eq!(fragment.dom.deep_text(fragment.root), "just text, no tags");
    }

    #[test]
    fn test_head_only_tags_stay_out_of_body() {
        let fragment = parse_fragment("<p>a</p>");
        let names: Vec<_> = fragment
            .dom
            .element_children(fragment.root)
            .filter_map(|id| fragment.dom.element_name(id).map(|n| n.to_string()))
            .collect();
        assert_eq!(names, vec!["p"]);
    }

    #[test]
    fn test_node_count_tracks_parsed_content() {
        let one = parse_fragment("<p>a</p>").dom.node_count();
        let two = parse_fragment("<p>a</p><p>b</p>").dom.node_count();
        assert_eq!(two, one + 2);
    }
}
