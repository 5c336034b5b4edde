//! Parse adapter.
//!
//! The cleaner consumes an already-parsed tree; this module is the boundary
//! where raw markup becomes one. Parsing is delegated to `dom_query`
//! (html5ever underneath) and the resulting DOM is converted into the crate's
//! own [`Node`] model: elements plus first-class text fragments. Comments,
//! doctypes and processing instructions are not carried over (they are
//! hard-dropped by cleaning anyway).

use dom_query::{Document, NodeRef};
use tendril::StrTendril;

use crate::encoding;
use crate::tree::Node;

/// Parse an HTML string into a [`Node`] tree.
///
/// Follows the fragment convention of lxml's `fromstring`: if the document
/// body holds exactly one element and no significant text, that element is
/// returned as the root; otherwise the body content is wrapped in a `div`.
///
/// # Example
///
/// ```rust
/// use rs_clearhtml::parse;
///
/// let root = parse("<p>hello</p>");
/// assert_eq!(root.tag().as_deref(), Some("p"));
/// assert_eq!(root.text_content(), "hello");
/// ```
#[must_use]
pub fn parse(html: &str) -> Node {
    let doc = Document::from(html);
    let body_sel = doc.select("body");
    let Some(body_ref) = body_sel.nodes().first() else {
        return Node::element("div");
    };
    let body = convert_element(body_ref);

    let children = body.children();
    let element_children: Vec<Node> = children.iter().filter(|c| c.is_element()).cloned().collect();
    let has_significant_text = children
        .iter()
        .any(|c| c.is_text() && !c.is_whitespace_text());

    if element_children.len() == 1 && !has_significant_text {
        let root = element_children.into_iter().next();
        if let Some(root) = root {
            root.detach();
            return root;
        }
    }
    body.set_tag("div");
    body.clear_attrs();
    body
}

/// Parse HTML bytes into a [`Node`] tree, transcoding to UTF-8 first.
///
/// Charset is sniffed from a byte-order mark or `<meta charset>` declaration
/// and defaults to UTF-8; invalid sequences become replacement characters.
#[must_use]
pub fn parse_bytes(html: &[u8]) -> Node {
    parse(&encoding::decode_to_utf8(html))
}

/// Convert one `dom_query` element and its subtree into the [`Node`] model.
fn convert_element(node: &NodeRef) -> Node {
    let tag = node
        .node_name()
        .map_or_else(|| "div".to_string(), |t| t.to_string());
    let attrs = node
        .attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect();
    let element = Node::element_with_attrs(&tag, attrs);

    for child in node.children() {
        if child.is_element() {
            element.append(&convert_element(&child));
        } else if child.is_text() {
            // StrTendril clones are O(1); only materialize at the boundary
            let text: StrTendril = child.text();
            if !text.is_empty() {
                element.append(&Node::text(text.to_string()));
            }
        }
        // comments, doctypes, PIs: dropped
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_element_becomes_root() {
        let root = parse(r#"<div id="main"><p>one</p></div>"#);
        assert_eq!(root.tag().as_deref(), Some("div"));
        assert_eq!(root.attr("id").as_deref(), Some("main"));
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn multiple_top_elements_wrap_in_div() {
        let root = parse("<p>one</p><p>two</p>");
        assert_eq!(root.tag().as_deref(), Some("div"));
        let tags: Vec<_> = root
            .children()
            .iter()
            .filter_map(Node::tag)
            .collect();
        assert_eq!(tags, vec!["p", "p"]);
    }

    #[test]
    fn bare_text_wraps_in_div() {
        let root = parse("just text");
        assert_eq!(root.tag().as_deref(), Some("div"));
        assert_eq!(root.text_content(), "just text");
    }

    #[test]
    fn text_and_elements_interleave_in_order() {
        let root = parse("<div>a<em>b</em>c</div>");
        let kinds: Vec<_> = root
            .children()
            .iter()
            .map(|c| c.tag().unwrap_or_else(|| "#text".to_string()))
            .collect();
        assert_eq!(kinds, vec!["#text", "em", "#text"]);
        assert_eq!(root.text_content(), "abc");
    }

    #[test]
    fn attributes_keep_document_order() {
        let root = parse(r#"<a href="/x" title="t" data-y="1">link</a>"#);
        let names: Vec<_> = root.attrs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["href", "title", "data-y"]);
    }

    #[test]
    fn script_content_survives_as_text_child() {
        let root = parse(r#"<div class="w"><script>var a = 1 < 2;</script></div>"#);
        let script = &root.children()[0];
        assert_eq!(script.tag().as_deref(), Some("script"));
        assert_eq!(script.text_content(), "var a = 1 < 2;");
    }

    #[test]
    fn comments_are_not_carried_over() {
        let root = parse("<div><!-- secret -->visible</div>");
        assert_eq!(root.text_content(), "visible");
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn parse_bytes_decodes_charset() {
        let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9</p></body></html>";
        let root = parse_bytes(html);
        assert!(root.text_content().contains("Caf\u{e9}"));
    }
}
