//! Arena-allocated HTML tree.
//!
//! html5ever parses stored content into this tree; the decoder then walks it
//! once to build the document model. All nodes live in one vector and link
//! to each other by index.

use html5ever::{LocalName, QualName};

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomNodeId(pub u32);

impl DomNodeId {
    /// Sentinel value for no node.
    pub const NONE: DomNodeId = DomNodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Payload of a DOM node.
#[derive(Debug, Clone)]
pub enum DomData {
    Document,
    Element { name: QualName, attrs: Vec<Attribute> },
    Text(String),
    /// Comments and processing instructions; kept only so the tree builder
    /// has something to link.
    Comment,
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node with its tree links.
#[derive(Debug)]
pub struct DomNode {
    pub data: DomData,
    pub parent: DomNodeId,
    pub first_child: DomNodeId,
    pub last_child: DomNodeId,
    pub prev_sibling: DomNodeId,
    pub next_sibling: DomNodeId,
}

impl DomNode {
    fn new(data: DomData) -> Self {
        Self {
            data,
            parent: DomNodeId::NONE,
            first_child: DomNodeId::NONE,
            last_child: DomNodeId::NONE,
            prev_sibling: DomNodeId::NONE,
            next_sibling: DomNodeId::NONE,
        }
    }
}

/// Arena-based HTML tree.
pub struct HtmlDom {
    nodes: Vec<DomNode>,
    document: DomNodeId,
}

impl Default for HtmlDom {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDom {
    /// Create a tree holding only the document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: DomNodeId::NONE,
        };
        dom.document = dom.alloc(DomNode::new(DomData::Document));
        dom
    }

    fn alloc(&mut self, node: DomNode) -> DomNodeId {
        let id = DomNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn document(&self) -> DomNodeId {
        self.document
    }

    pub fn get(&self, id: DomNodeId) -> Option<&DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: DomNodeId) -> Option<&mut DomNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes, the document root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> DomNodeId {
        self.alloc(DomNode::new(DomData::Element { name, attrs }))
    }

    pub fn create_text(&mut self, text: String) -> DomNodeId {
        self.alloc(DomNode::new(DomData::Text(text)))
    }

    pub fn create_comment(&mut self) -> DomNodeId {
        self.alloc(DomNode::new(DomData::Comment))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: DomNodeId, child: DomNodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomNodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = DomNodeId::NONE;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: DomNodeId, new_node: DomNodeId) {
        let Some((parent, prev)) = self.get(sibling).map(|n| (n.parent, n.prev_sibling)) else {
            return;
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Unlink a node from its parent and siblings.
    pub fn detach(&mut self, target: DomNodeId) {
        let Some((parent, prev, next)) = self
            .get(target)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(target) {
            node.parent = DomNodeId::NONE;
            node.prev_sibling = DomNodeId::NONE;
            node.next_sibling = DomNodeId::NONE;
        }
    }

    /// Append text, extending the last child if it is already a text node.
    pub fn append_text(&mut self, parent: DomNodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(DomNodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let DomData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Iterate over the children of a node.
    pub fn children(&self, parent: DomNodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(DomNodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Iterate over the element children of a node.
    pub fn element_children(&self, parent: DomNodeId) -> impl Iterator<Item = DomNodeId> + '_ {
        self.children(parent).filter(|&id| self.is_element(id))
    }

    /// Find the first element with the given tag (depth-first).
    pub fn find_by_tag(&self, tag: &str) -> Option<DomNodeId> {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if self.element_name(id).is_some_and(|n| n.as_ref() == tag) {
                return Some(id);
            }
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        None
    }

    /// Element's local name (tag).
    pub fn element_name(&self, id: DomNodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            DomData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Attribute value by local name.
    pub fn get_attr(&self, id: DomNodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            DomData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    pub fn is_element(&self, id: DomNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, DomData::Element { .. }))
    }

    /// Text of a text node.
    pub fn text_content(&self, id: DomNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            DomData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of a node and its descendants.
    pub fn deep_text(&self, id: DomNodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(text) = self.text_content(current) {
                out.push_str(text);
            }
            let mut children: Vec<_> = self.children(current).collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }
}

/// Iterator over the children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a HtmlDom,
    current: DomNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = DomNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(DomNodeId::NONE);
        Some(id)
    }
}
