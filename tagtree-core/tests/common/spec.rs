//! Owned element description used as the expected side of comparisons.

use std::collections::BTreeMap;

use serde::Deserialize;
use tagtree_core::{Document, Node};

/// An element written out by hand (fixtures) or by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            content: String::new(),
            children: Vec::new(),
        }
    }

    /// Snapshot a parsed element and everything below it.
    pub fn from_node(node: Node<'_>) -> Self {
        Self {
            tag: node.tag().to_string(),
            attributes: node.attributes().clone(),
            content: node.content().to_string(),
            children: node.children().map(ElementSpec::from_node).collect(),
        }
    }

    pub fn from_document(doc: &Document) -> Self {
        Self::from_node(doc.root())
    }

    /// Serialize with all content placed before the first child.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", key, value));
        }
        out.push('>');
        out.push_str(&self.content);
        for child in &self.children {
            child.write_markup(out);
        }
        out.push_str(&format!("</{}>", self.tag));
    }

    /// Total number of elements.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ElementSpec::count).sum::<usize>()
    }
}
