//! Arena-backed XML tree.
//!
//! Nodes live in one contiguous vector; parent/child/sibling links are
//! indices into it. The tree is built once by the parser and only read
//! afterwards.

use crate::util::local_name;

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Synthetic root holding the document element.
    Document,
    /// Element with its qualified name as written (e.g. `tei:div`).
    Element { name: String, attrs: Vec<Attribute> },
    /// Character data, entity references already resolved.
    Text(String),
}

/// Attribute with its qualified name as written (e.g. `xml:lang`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// A fully materialized XML document.
#[derive(Debug)]
pub struct XmlDocument {
    nodes: Vec<Node>,
    document: NodeId,
}

impl XmlDocument {
    /// Create a new empty tree with a document root.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        doc.document = doc.alloc(Node::new(NodeData::Document));
        doc
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> NodeId {
        self.document
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn create_element(&mut self, name: impl Into<String>, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(Node::new(NodeData::Element {
            name: name.into(),
            attrs,
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text.into())))
    }

    /// Append a child as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
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

    /// Append text to the last child if it is a text node, or create a new one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text);
        self.append(parent, text_node);
    }

    /// The document element (first element child of the root).
    pub fn root_element(&self) -> Option<NodeId> {
        self.child_elements(self.document).next()
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Children {
            doc: self,
            current: first,
        }
    }

    /// Iterate over element children of a node.
    pub fn child_elements(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(parent).filter(move |&id| self.is_element(id))
    }

    /// Iterate over all descendants of a node in document order, excluding the node itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Child elements matching a predicate, in document order.
    pub fn select_children<'a, F>(
        &'a self,
        parent: NodeId,
        predicate: F,
    ) -> impl Iterator<Item = NodeId> + 'a
    where
        F: Fn(&XmlDocument, NodeId) -> bool + 'a,
    {
        self.child_elements(parent).filter(move |&id| predicate(self, id))
    }

    /// First descendant element matching a predicate, in document order.
    pub fn find_descendant<F>(&self, id: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&XmlDocument, NodeId) -> bool,
    {
        self.descendants(id)
            .find(|&child| self.is_element(child) && predicate(self, child))
    }
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct Children<'a> {
    doc: &'a XmlDocument,
    current: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .doc
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a XmlDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(self.doc.children(id));
        self.stack[start..].reverse();
        Some(id)
    }
}

/// Convenience methods for element nodes.
impl XmlDocument {
    /// Qualified element name as written in the source.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Element name without its namespace prefix.
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element_name(id).map(local_name)
    }

    /// Attribute value by qualified name (`type`, `xml:lang`).
    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// True when the node is an element with the given local name and
    /// every `(attribute, value)` pair matches exactly.
    pub fn matches(&self, id: NodeId, local: &str, attrs: &[(&str, &str)]) -> bool {
        self.local_name(id) == Some(local)
            && attrs
                .iter()
                .all(|(name, value)| self.attr(id, name) == Some(*value))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|child| self.text(child))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_children() {
        let mut doc = XmlDocument::new();

        let parent = doc.create_element("div", vec![]);
        let child1 = doc.create_element("l", vec![]);
        let child2 = doc.create_element("l", vec![]);

        doc.append(doc.document(), parent);
        doc.append(parent, child1);
        doc.append(parent, child2);

        let children: Vec<_> = doc.children(parent).collect();
        assert_eq!(children, vec![child1, child2]);
        assert_eq!(doc.root_element(), Some(parent));
        assert_eq!(doc.descendants(doc.document()).count(), 3);
    }

    #[test]
    fn test_text_merging() {
        let mut doc = XmlDocument::new();

        let l = doc.create_element("l", vec![]);
        doc.append(doc.document(), l);

        doc.append_text(l, "agním ");
        doc.append_text(l, "īḷe");

        let children: Vec<_> = doc.children(l).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.text(children[0]), Some("agním īḷe"));
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let mut doc = XmlDocument::new();
        let a = doc.create_element("a", vec![]);
        let b = doc.create_element("b", vec![]);
        let c = doc.create_element("c", vec![]);
        let d = doc.create_element("d", vec![]);
        doc.append(doc.document(), a);
        doc.append(a, b);
        doc.append(b, c);
        doc.append(a, d);

        let names: Vec<_> = doc
            .descendants(a)
            .filter_map(|id| doc.element_name(id))
            .collect();
        assert_eq!(names, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_matches_local_name_and_attributes() {
        let mut doc = XmlDocument::new();
        let div = doc.create_element(
            "tei:div",
            vec![
                Attribute::new("type", "hymn"),
                Attribute::new("xml:id", "b01_h001"),
            ],
        );
        doc.append(doc.document(), div);

        assert!(doc.matches(div, "div", &[("type", "hymn")]));
        assert!(doc.matches(div, "div", &[("type", "hymn"), ("xml:id", "b01_h001")]));
        assert!(!doc.matches(div, "div", &[("type", "stanza")]));
        assert!(!doc.matches(div, "lg", &[]));
        assert_eq!(doc.attr(div, "id"), None);
    }

    #[test]
    fn test_text_content_spans_descendants() {
        let mut doc = XmlDocument::new();
        let p = doc.create_element("p", vec![]);
        let hi = doc.create_element("hi", vec![]);
        doc.append(doc.document(), p);
        doc.append_text(p, "Hymns ");
        doc.append(p, hi);
        doc.append_text(hi, "of");
        doc.append_text(p, " Bhrigu");

        assert_eq!(doc.text_content(p), "Hymns of Bhrigu");
        assert_eq!(doc.text_content(NodeId::NONE), "");
    }
}
