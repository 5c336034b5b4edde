//! Cleaned tree to HTML string.
//!
//! Hand-rolled serializer over the [`Node`] model: standard escaping for
//! text and attribute values, void elements left unclosed, raw-text elements
//! (script/style, present only inside preserved embeddings) written
//! verbatim. Output is compact; serialization is a pure function of the
//! tree, so serialize → reparse → serialize is stable.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::tree::{Node, NodeKind};

/// Elements serialized without a closing tag.
static VOID_ELEMENTS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
        "param", "source", "track", "wbr",
    ]
    .into_iter()
    .collect()
});

/// Elements whose text children are written without escaping.
static RAW_TEXT_ELEMENTS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["script", "style"].into_iter().collect());

/// Serialize a tree (outer HTML of `node`).
#[must_use]
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, false, &mut out);
    out
}

fn write_node(node: &Node, raw_text: bool, out: &mut String) {
    match node.kind() {
        NodeKind::Text(text) => {
            if raw_text {
                out.push_str(&text);
            } else {
                push_escaped_text(&text, out);
            }
        }
        NodeKind::Element { tag, attrs } => {
            out.push('<');
            out.push_str(&tag);
            for (name, value) in &attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                push_escaped_attr(value, out);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(tag.as_str()) {
                return;
            }
            let raw_children = RAW_TEXT_ELEMENTS.contains(tag.as_str());
            for child in node.children() {
                write_node(&child, raw_children, out);
            }
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
    }
}

fn push_escaped_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn push_escaped_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
