//! Example: Parse a document to a tree and navigate it.
//!
//! Run with: cargo run --example tree_parse

use tagtree_core::{parse_bytes, Node};

fn main() {
    let input = br#"<library city="lisbon">
  <shelf genre="scifi">
    <book id="1" year="1965">Dune</book>
    <book id="2" year="1969">The Left Hand of Darkness</book>
  </shelf>
  <shelf genre="classics">
    <book id="3" year="1815">Emma</book>
  </shelf>
</library>"#;

    let doc = match parse_bytes(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("parse failed: {}", e);
            return;
        }
    };

    println!("=== Document Tree ===\n");
    print_node(&doc.root(), 0);

    println!("\n=== Books ===\n");
    for node in doc.iter().filter(|n| n.tag() == "book") {
        let shelf = node.parent().and_then(|p| p.attr("genre")).unwrap_or("?");
        println!(
            "#{} {} ({}, shelf {})",
            node.attr("id").unwrap_or("-"),
            node.content(),
            node.attr("year").unwrap_or("n.d."),
            shelf
        );
    }

    println!("\n{} elements", doc.len());
}

fn print_node(node: &Node<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut desc = node.tag().to_string();
    for (key, value) in node.attributes() {
        desc.push_str(&format!(" {}={:?}", key, value));
    }
    println!("{}<{}>", indent, desc);

    let text = node.content().trim();
    if !text.is_empty() {
        println!("{}  \"{}\"", indent, text);
    }

    for child in node.children() {
        print_node(&child, depth + 1);
    }
}
