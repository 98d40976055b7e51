//! Output formats for parsed documents.

use std::fmt::Write as _;

use serde_json::{json, Map, Value};
use tagtree_core::{Document, Node};

/// Longest content preview shown by the tree format, in characters.
const PREVIEW_CHARS: usize = 40;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Tree,
    Json,
}

impl Format {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tree" => Some(Format::Tree),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

pub fn render(doc: &Document, format: Format) -> serde_json::Result<String> {
    match format {
        Format::Tree => Ok(render_tree(doc)),
        Format::Json => render_json(doc),
    }
}

/// Indented outline, one element per line.
pub fn render_tree(doc: &Document) -> String {
    let mut out = String::new();
    write_node(&mut out, &doc.root(), 0);
    out
}

fn write_node(out: &mut String, node: &Node<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut line = format!("{}{}", indent, node.tag());
    for (key, value) in node.attributes() {
        let _ = write!(line, " {}=\"{}\"", key, value);
    }

    let text = node.content().trim();
    if !text.is_empty() {
        let _ = write!(line, " \"{}\"", preview(text));
    }
    out.push_str(&line);
    out.push('\n');

    for child in node.children() {
        write_node(out, &child, depth + 1);
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Pretty-printed JSON with nested `children` arrays.
pub fn render_json(doc: &Document) -> serde_json::Result<String> {
    let value = node_value(&doc.root());
    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

fn node_value(node: &Node<'_>) -> Value {
    let attributes: Map<String, Value> = node
        .attributes()
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    let children: Vec<Value> = node.children().map(|child| node_value(&child)).collect();

    json!({
        "tag": node.tag(),
        "attributes": attributes,
        "content": node.content(),
        "children": children,
    })
}
