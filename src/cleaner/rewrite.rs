//! The tree rewriter.
//!
//! Single depth-first pass over the input tree. Every level produces a list
//! of [`Piece`]s: finished output nodes interleaved with block boundaries.
//! A boundary is what an unwrapped *block* wrapper leaves behind — the
//! information that content on either side belonged to different blocks.
//! At the root, boundaries split paragraphs; inside other containers they
//! re-materialize as a double line break.
//!
//! Sibling merging, whitespace policy, the empty-element drop and attribute
//! sanitization all happen here, at assembly time, so the output tree is
//! fully normalized the moment it exists.

use crate::cleaner::classify::{classify, Decision};
use crate::cleaner::state::CleanState;
use crate::cleaner::tags::{is_phrasing_tag, CAN_BE_EMPTY, KILL_CONTENT_TAGS, URL_ATTRIBUTES};
use crate::error::Result;
use crate::links;
use crate::tree::Node;

/// One unit in a cleaned child list.
#[derive(Debug, Clone)]
pub enum Piece {
    /// A finished output node (element or text fragment).
    Node(Node),
    /// Marker left by an unwrapped block wrapper.
    Boundary,
}

/// Clean `input` and assemble the output tree under a fresh `article` root.
pub fn clean_root(input: &Node, state: &mut CleanState<'_>) -> Result<Node> {
    let mut pieces = Vec::new();
    collect(input, state, &mut pieces)?;
    let pieces = merge_siblings(pieces, state);
    Ok(assemble_root(pieces))
}

/// Produce the output pieces for one input node.
fn collect(node: &Node, state: &mut CleanState<'_>, out: &mut Vec<Piece>) -> Result<()> {
    if node.is_text() {
        out.push(Piece::Node(Node::text(node.text_value().unwrap_or_default())));
        return Ok(());
    }

    match classify(node, state) {
        Decision::Drop => {}
        Decision::PreserveEmbedding => {
            // Moved by handle, not copied: the subtree stays byte-identical.
            state.register_preserved(node);
            out.push(Piece::Node(node.clone()));
        }
        Decision::Unwrap { block } => {
            let inner = clean_children(node, state)?;
            if block {
                out.push(Piece::Boundary);
                out.extend(inner);
                out.push(Piece::Boundary);
            } else {
                out.extend(inner);
            }
        }
        Decision::MapTo(tag) => {
            let inner = if KILL_CONTENT_TAGS.contains(tag) {
                Vec::new()
            } else {
                state.push_ancestor(tag);
                let result = clean_children(node, state);
                state.pop_ancestor();
                result?
            };
            if let Some(element) = assemble_element(tag, node, inner, state) {
                out.push(Piece::Node(element));
            }
        }
    }
    Ok(())
}

/// Clean all children of `node` and merge the resulting sibling list.
fn clean_children(node: &Node, state: &mut CleanState<'_>) -> Result<Vec<Piece>> {
    state.enter()?;
    let mut pieces = Vec::new();
    for child in node.children() {
        collect(&child, state, &mut pieces)?;
    }
    state.leave();
    Ok(merge_siblings(pieces, state))
}

/// Local look-back merging: adjacent text fragments coalesce, adjacent
/// same-tag mergeable elements fuse into one node.
fn merge_siblings(pieces: Vec<Piece>, state: &CleanState<'_>) -> Vec<Piece> {
    // Adjacent text fragments concatenate directly; any separation they had
    // in the source is still inside the fragments themselves.
    let mut coalesced: Vec<Piece> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if let (Some(Piece::Node(prev)), Piece::Node(cur)) = (coalesced.last(), &piece) {
            if prev.is_text() && cur.is_text() {
                let joined = format!(
                    "{}{}",
                    prev.text_value().unwrap_or_default(),
                    cur.text_value().unwrap_or_default()
                );
                prev.set_text_value(&joined);
                continue;
            }
        }
        coalesced.push(piece);
    }

    // Same-tag merge across at most whitespace (no intervening structure).
    let mut merged: Vec<Piece> = Vec::with_capacity(coalesced.len());
    for piece in coalesced {
        if let Piece::Node(cur) = &piece {
            if let Some(tag) = cur.tag() {
                if state.options().is_mergeable(&tag) {
                    let mut back = merged.len();
                    while back > 0 {
                        match &merged[back - 1] {
                            Piece::Node(n) if n.is_whitespace_text() => back -= 1,
                            _ => break,
                        }
                    }
                    let target = if back > 0 {
                        match &merged[back - 1] {
                            Piece::Node(n) if n.tag().as_deref() == Some(tag.as_str()) => {
                                Some(n.clone())
                            }
                            _ => None,
                        }
                    } else {
                        None
                    };
                    if let Some(target) = target {
                        merged.truncate(back);
                        target.append(&Node::text(" "));
                        for child in cur.children() {
                            target.append(&child);
                        }
                        continue;
                    }
                }
            }
        }
        merged.push(piece);
    }
    merged
}

/// Build one output element from its cleaned pieces, or drop it as empty.
fn assemble_element(
    tag: &'static str,
    original: &Node,
    pieces: Vec<Piece>,
    state: &CleanState<'_>,
) -> Option<Node> {
    let preserve_ws = tag == "pre" || state.in_pre();
    let children = layout_children(pieces, preserve_ws);

    let has_content = children
        .iter()
        .any(|c| c.is_element() || !c.is_whitespace_text());
    if !has_content && !CAN_BE_EMPTY.contains(tag) {
        return None;
    }

    let element = Node::element(tag);
    apply_attributes(&element, tag, original, state);
    if has_content {
        for child in children {
            element.append(&child);
        }
    }
    Some(element)
}

/// Turn a piece list into final child nodes: whitespace policy applied,
/// boundaries rendered as a double line break between content.
fn layout_children(pieces: Vec<Piece>, preserve_ws: bool) -> Vec<Node> {
    let pieces = if preserve_ws {
        pieces
    } else {
        normalize_whitespace(pieces)
    };

    let mut out: Vec<Node> = Vec::new();
    let mut pending_boundary = false;
    for piece in pieces {
        match piece {
            Piece::Boundary => {
                if !out.is_empty() {
                    pending_boundary = true;
                }
            }
            Piece::Node(node) => {
                if pending_boundary {
                    out.push(Node::element("br"));
                    out.push(Node::element("br"));
                    pending_boundary = false;
                }
                out.push(node);
            }
        }
    }
    out
}

/// Collapse whitespace runs inside text pieces, trim text against block
/// neighbors and list edges, drop what nothing remains of.
fn normalize_whitespace(pieces: Vec<Piece>) -> Vec<Piece> {
    for piece in &pieces {
        if let Piece::Node(n) = piece {
            if n.is_text() {
                n.set_text_value(&collapse_ws(&n.text_value().unwrap_or_default()));
            }
        }
    }

    fn blockish(piece: Option<&Piece>) -> bool {
        match piece {
            None | Some(Piece::Boundary) => true,
            Some(Piece::Node(n)) => {
                n.is_element() && n.tag().is_some_and(|t| !is_phrasing_tag(&t))
            }
        }
    }

    let mut result: Vec<Piece> = Vec::with_capacity(pieces.len());
    for idx in 0..pieces.len() {
        if let Piece::Node(n) = &pieces[idx] {
            if n.is_text() {
                let mut value = n.text_value().unwrap_or_default();
                if blockish(if idx == 0 { None } else { pieces.get(idx - 1) }) {
                    value = value.trim_start().to_string();
                }
                if blockish(pieces.get(idx + 1)) {
                    value = value.trim_end().to_string();
                }
                if value.is_empty() {
                    continue;
                }
                n.set_text_value(&value);
            }
        }
        result.push(pieces[idx].clone());
    }
    result
}

fn collapse_ws(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_ws = false;
    for ch in text.chars() {
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
    out
}

/// Keep only allowed attributes, resolving URL values against the base URL.
/// Lazy-loaded images get their `src` inferred from `data-src`.
fn apply_attributes(element: &Node, tag: &'static str, original: &Node, state: &CleanState<'_>) {
    let opts = state.options();
    for (name, value) in original.attrs() {
        if !opts.attr_allowed(tag, &name) {
            continue;
        }
        element.set_attr(&name, &resolve_url_value(&name, &value, state));
    }
    if tag == "img" && element.attr("src").is_none_or(|s| s.trim().is_empty()) {
        if let Some(data_src) = original.attr("data-src") {
            if !data_src.trim().is_empty() {
                element.set_attr("src", &resolve_url_value("src", &data_src, state));
            }
        }
    }
}

fn resolve_url_value(name: &str, value: &str, state: &CleanState<'_>) -> String {
    if URL_ATTRIBUTES.contains(name) {
        if let Some(base) = state.base_url() {
            if let Some(resolved) = links::absolutize(base, value) {
                return resolved;
            }
        }
    }
    value.to_string()
}

/// Wrap the root piece list in `article`, grouping phrasing runs into
/// paragraphs. Literal double line breaks split paragraphs exactly like the
/// boundaries left by unwrapped blocks.
fn assemble_root(pieces: Vec<Piece>) -> Node {
    let pieces = normalize_whitespace(pieces);
    let pieces = br_runs_to_boundaries(pieces);

    let article = Node::element("article");
    let mut run: Vec<Node> = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Boundary => flush_paragraph(&article, &mut run),
            Piece::Node(node) => {
                let block = node.is_element()
                    && node.tag().is_some_and(|t| !is_phrasing_tag(&t));
                if block {
                    flush_paragraph(&article, &mut run);
                    article.append(&node);
                } else {
                    run.push(node);
                }
            }
        }
    }
    flush_paragraph(&article, &mut run);
    article
}

/// Replace runs of two or more `br` elements (whitespace between them
/// ignored) with a block boundary.
fn br_runs_to_boundaries(pieces: Vec<Piece>) -> Vec<Piece> {
    fn is_br(piece: &Piece) -> bool {
        matches!(piece, Piece::Node(n) if n.has_tag("br"))
    }

    let mut out: Vec<Piece> = Vec::new();
    let mut idx = 0;
    while idx < pieces.len() {
        if is_br(&pieces[idx]) {
            let mut count = 1;
            let mut cursor = idx + 1;
            let mut run_end = idx + 1;
            while cursor < pieces.len() {
                match &pieces[cursor] {
                    p if is_br(p) => {
                        count += 1;
                        cursor += 1;
                        run_end = cursor;
                    }
                    Piece::Node(n) if n.is_whitespace_text() => cursor += 1,
                    _ => break,
                }
            }
            if count >= 2 {
                out.push(Piece::Boundary);
                idx = run_end;
                continue;
            }
        }
        out.push(pieces[idx].clone());
        idx += 1;
    }
    out
}

/// Emit the accumulated phrasing run as a paragraph, if it has content.
fn flush_paragraph(article: &Node, run: &mut Vec<Node>) {
    if run.is_empty() {
        return;
    }
    let pieces: Vec<Piece> = run.drain(..).map(Piece::Node).collect();
    let children: Vec<Node> = normalize_whitespace(pieces)
        .into_iter()
        .filter_map(|p| match p {
            Piece::Node(n) => Some(n),
            Piece::Boundary => None,
        })
        .collect();

    let has_content = children
        .iter()
        .any(|c| c.is_element() || !c.is_whitespace_text());
    if !has_content {
        return;
    }
    let paragraph = Node::element("p");
    for child in children {
        paragraph.append(&child);
    }
    article.append(&paragraph);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_ws_behaviour() {
        assert_eq!(collapse_ws("a  b\n\tc"), "a b c");
        assert_eq!(collapse_ws("  a  "), " a ");
        assert_eq!(collapse_ws("\n \t"), " ");
        assert_eq!(collapse_ws(""), "");
    }

    #[test]
    fn normalize_trims_against_edges_and_blocks() {
        let p = Node::element("p");
        p.append(&Node::text("x"));
        let pieces = vec![
            Piece::Node(Node::text("  lead ")),
            Piece::Node(p),
            Piece::Node(Node::text(" tail  ")),
        ];
        let result = normalize_whitespace(pieces);
        assert_eq!(result.len(), 3);
        match &result[0] {
            Piece::Node(n) => assert_eq!(n.text_value().as_deref(), Some("lead")),
            Piece::Boundary => panic!("expected text"),
        }
        match &result[2] {
            Piece::Node(n) => assert_eq!(n.text_value().as_deref(), Some("tail")),
            Piece::Boundary => panic!("expected text"),
        }
    }

    #[test]
    fn normalize_keeps_space_between_inline_content() {
        let em = Node::element("em");
        em.append(&Node::text("x"));
        let pieces = vec![
            Piece::Node(Node::text("a")),
            Piece::Node(Node::text("   ")),
            Piece::Node(em),
        ];
        let result = normalize_whitespace(pieces);
        assert_eq!(result.len(), 3);
        match &result[1] {
            Piece::Node(n) => assert_eq!(n.text_value().as_deref(), Some(" ")),
            Piece::Boundary => panic!("expected text"),
        }
    }

    #[test]
    fn whitespace_only_next_to_boundary_is_dropped() {
        let pieces = vec![
            Piece::Boundary,
            Piece::Node(Node::text("   ")),
            Piece::Node(Node::text("real")),
        ];
        let result = normalize_whitespace(pieces);
        // the whitespace-only fragment vanishes, "real" survives
        let texts: Vec<String> = result
            .iter()
            .filter_map(|p| match p {
                Piece::Node(n) => n.text_value(),
                Piece::Boundary => None,
            })
            .collect();
        assert_eq!(texts, vec!["real".to_string()]);
    }

    #[test]
    fn br_runs_collapse_to_boundary() {
        let pieces = vec![
            Piece::Node(Node::text("h")),
            Piece::Node(Node::element("br")),
            Piece::Node(Node::element("br")),
            Piece::Node(Node::text("e")),
        ];
        let result = br_runs_to_boundaries(pieces);
        assert_eq!(result.len(), 3);
        assert!(matches!(result[1], Piece::Boundary));
    }

    #[test]
    fn single_br_is_kept() {
        let pieces = vec![
            Piece::Node(Node::text("h")),
            Piece::Node(Node::element("br")),
            Piece::Node(Node::text("lo")),
        ];
        let result = br_runs_to_boundaries(pieces);
        assert_eq!(result.len(), 3);
        assert!(matches!(&result[1], Piece::Node(n) if n.has_tag("br")));
    }
}
