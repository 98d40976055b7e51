//! Element tree produced by the parser.
//!
//! The tree uses an index-based arena: every element lives in the
//! document's node vector and is addressed by a [`NodeId`]. Children are
//! ordered id lists owned by their parent, and the parent link is a plain
//! id, so upward navigation needs no reference cycles.
//!
//! # Example
//!
//! ```
//! use tagtree_core::parse_bytes;
//!
//! let doc = parse_bytes(br#"<article author="joseph"><p>Hello</p><p>World</p></article>"#).unwrap();
//! let root = doc.root();
//! assert_eq!(root.tag(), "article");
//! assert_eq!(root.attr("author"), Some("joseph"));
//!
//! let texts: Vec<&str> = root.children().map(|p| p.content()).collect();
//! assert_eq!(texts, ["Hello", "World"]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Core Types
// ============================================================================

/// Index into the document's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Storage for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) tag: String,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) content: String,
}

impl NodeData {
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        NodeData {
            parent,
            ..NodeData::default()
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A parsed document: the root element and everything below it.
///
/// Equality is structural; two parses of the same bytes compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Document {
    pub(crate) fn from_parts(nodes: Vec<NodeData>, root: NodeId) -> Self {
        Document { nodes, root }
    }

    /// Get the root element.
    pub fn root(&self) -> Node<'_> {
        Node { doc: self, id: self.root }
    }

    /// Get an element by ID.
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        if id.index() < self.nodes.len() {
            Some(Node { doc: self, id })
        } else {
            None
        }
    }

    /// Number of elements in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a document has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all elements in document (pre-)order, root first.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![self.root],
        }
    }

    fn node_data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

// ============================================================================
// Node (navigation handle)
// ============================================================================

/// A handle for navigating the element tree.
///
/// This is a lightweight copyable reference that borrows from the document.
#[derive(Clone, Copy)]
pub struct Node<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> Node<'doc> {
    /// Get the element's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the tag name.
    pub fn tag(&self) -> &'doc str {
        &self.data().tag
    }

    /// Get all attributes, ordered by key.
    pub fn attributes(&self) -> &'doc BTreeMap<String, String> {
        &self.data().attributes
    }

    /// Get an attribute value by key.
    pub fn attr(&self, key: &str) -> Option<&'doc str> {
        self.data().attributes.get(key).map(String::as_str)
    }

    /// Direct text of this element, with text around children joined.
    pub fn content(&self) -> &'doc str {
        &self.data().content
    }

    /// Get the parent element, if any.
    pub fn parent(&self) -> Option<Node<'doc>> {
        self.data().parent.map(|id| Node { doc: self.doc, id })
    }

    /// Check if this is the root element.
    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.data().parent;
        while let Some(id) = current {
            depth += 1;
            current = self.doc.node_data(id).parent;
        }
        depth
    }

    /// Iterate over child elements in document order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Node<'doc>> + 'doc {
        let doc = self.doc;
        self.data().children.iter().map(move |&id| Node { doc, id })
    }

    /// Get the first child element.
    pub fn first_child(&self) -> Option<Node<'doc>> {
        self.data().children.first().map(|&id| Node { doc: self.doc, id })
    }

    /// Get the last child element.
    pub fn last_child(&self) -> Option<Node<'doc>> {
        self.data().children.last().map(|&id| Node { doc: self.doc, id })
    }

    /// Get the next sibling element.
    pub fn next_sibling(&self) -> Option<Node<'doc>> {
        let siblings = self.siblings()?;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(pos + 1).map(|&id| Node { doc: self.doc, id })
    }

    /// Get the previous sibling element.
    pub fn prev_sibling(&self) -> Option<Node<'doc>> {
        let siblings = self.siblings()?;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        if pos > 0 {
            Some(Node { doc: self.doc, id: siblings[pos - 1] })
        } else {
            None
        }
    }

    /// Iterate over this element and everything below it, pre-order.
    pub fn descendants(&self) -> Descendants<'doc> {
        Descendants {
            doc: self.doc,
            stack: vec![self.id],
        }
    }

    /// Recursively collect the content of this element and its descendants.
    pub fn all_content(&self) -> String {
        self.descendants().map(|n| n.content()).collect()
    }

    fn siblings(&self) -> Option<&'doc [NodeId]> {
        let parent = self.data().parent?;
        Some(&self.doc.node_data(parent).children)
    }

    fn data(&self) -> &'doc NodeData {
        self.doc.node_data(self.id)
    }
}

impl<'doc> fmt::Debug for Node<'doc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("attributes", self.attributes())
            .field("content", &self.content())
            .field("children", &self.data().children.len())
            .finish()
    }
}

impl<'doc> PartialEq for Node<'doc> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

/// Pre-order iterator over elements.
pub struct Descendants<'doc> {
    doc: &'doc Document,
    stack: Vec<NodeId>,
}

impl<'doc> Iterator for Descendants<'doc> {
    type Item = Node<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.node_data(id).children.iter().rev().copied());
        Some(Node { doc: self.doc, id })
    }
}

// ============================================================================
// Tests
// ============================================================================
