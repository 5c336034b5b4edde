//! Cleaned tree to plain text.
//!
//! The default extractor walks the tree accumulating text fragments with
//! layout-aware separators: block-level elements insert paragraph breaks,
//! list items and line breaks insert newlines, everything else joins with a
//! single space. A caller-supplied [`TextExtractor`] replaces the whole
//! strategy when custom handling (image alt text formatting, say) is needed.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::Result;
use crate::tree::{Node, NodeKind};

/// Pluggable text-extraction strategy.
///
/// Implemented for any `Fn(&Node) -> Result<String>`, so plain closures
/// work. Failures are propagated to the caller unmodified.
pub trait TextExtractor {
    /// Produce the plain-text rendition of `node`.
    fn extract(&self, node: &Node) -> Result<String>;
}

impl<F> TextExtractor for F
where
    F: Fn(&Node) -> Result<String>,
{
    fn extract(&self, node: &Node) -> Result<String> {
        self(node)
    }
}

/// Elements that separate paragraphs of text.
static PARAGRAPH_BREAK_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "article", "p", "h1", "h2", "h3", "h4", "h5", "h6", "figure", "blockquote",
        "ul", "ol", "dl", "table", "pre", "aside",
    ]
    .into_iter()
    .collect()
});

/// Elements that separate lines of text.
static LINE_BREAK_TAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["li", "tr", "dt", "dd", "figcaption"].into_iter().collect());

/// The built-in layout-aware extraction strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTextExtractor;

impl TextExtractor for DefaultTextExtractor {
    fn extract(&self, node: &Node) -> Result<String> {
        Ok(default_extract_text(node))
    }
}

/// Convert a cleaned tree to plain text with layout-aware separators.
///
/// This is what [`DefaultTextExtractor`] runs; it never fails.
#[must_use]
pub fn default_extract_text(node: &Node) -> String {
    let mut out = String::new();
    walk(node, false, &mut out);
    finalize(&out)
}

/// Plain-text rendition of a cleaned tree with figcaptions excluded, using
/// the default extraction strategy.
pub fn cleaned_to_text(node: &Node) -> Result<String> {
    cleaned_to_text_with(node, &DefaultTextExtractor)
}

/// Like [`cleaned_to_text`], but with a caller-supplied extractor.
///
/// Text-only exclusions (figcaptions) are applied to a deep copy first, so
/// the input tree is never modified; the extractor then runs on the copy.
pub fn cleaned_to_text_with(node: &Node, extractor: &dyn TextExtractor) -> Result<String> {
    let copy = node.deep_clone();
    apply_text_exclusions(&copy);
    extractor.extract(&copy)
}

/// Remove subtrees that belong in HTML output but not in plain text.
/// Never removes the root itself.
fn apply_text_exclusions(root: &Node) {
    let captions: Vec<Node> = root
        .descendants()
        .into_iter()
        .filter(|n| n.has_tag("figcaption"))
        .collect();
    for caption in captions {
        caption.detach();
    }
}

fn walk(node: &Node, in_pre: bool, out: &mut String) {
    match node.kind() {
        NodeKind::Text(text) => {
            if in_pre {
                out.push_str(&text);
            } else {
                push_fragment(out, &text);
            }
        }
        NodeKind::Element { tag, .. } => {
            let paragraph = PARAGRAPH_BREAK_TAGS.contains(tag.as_str());
            let line = LINE_BREAK_TAGS.contains(tag.as_str());
            if tag == "br" {
                push_line_break(out);
                return;
            }
            if paragraph {
                push_paragraph_break(out);
            } else if line {
                push_line_break(out);
            }
            let inner_pre = in_pre || tag == "pre";
            for child in node.children() {
                walk(&child, inner_pre, out);
            }
            if paragraph {
                push_paragraph_break(out);
            } else if line {
                push_line_break(out);
            }
        }
    }
}

fn push_fragment(out: &mut String, text: &str) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    if !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    let mut last_was_ws = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !last_was_ws {
                out.push(' ');
            }
            last_was_ws = true;
        } else {
            out.push(ch);
            last_was_ws = false;
        }
    }
}

fn push_line_break(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn push_paragraph_break(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    if out.ends_with('\n') {
        out.push('\n');
    } else {
        out.push_str("\n\n");
    }
}

/// Collapse runaway newlines and trim the result.
fn finalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push('\n');
            }
        } else {
            newlines = 0;
            out.push(ch);
        }
    }
    out.trim().to_string()
}
