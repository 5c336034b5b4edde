//! Figure normalization on the cleaned tree.
//!
//! Three passes, all operating on output-universe nodes only:
//! top-level paragraphs that hold a single media element become figures,
//! consecutive figcaptions inside a figure fuse into one (stray later
//! captions are dropped), and figures left with nothing but a caption are
//! removed entirely. Pages that inject media with scripts routinely produce
//! the latter once scripts are gone.

use crate::cleaner::tags::{CONTENT_EVEN_IF_EMPTY, FIGURE_CONTENT_TAGS};
use crate::tree::Node;

/// Run all figure passes. Preserved embedding subtrees are left untouched.
pub fn normalize_figures(root: &Node, preserved: &[Node]) {
    top_level_media_within_figure(root, preserved);
    for figure in collect_figures(root, preserved) {
        fuse_figcaptions(&figure);
    }
    remove_figures_without_content(root, preserved);
}

/// Top-level paragraphs containing exactly one media element (optionally
/// inside a bare link) are really figures.
fn top_level_media_within_figure(root: &Node, preserved: &[Node]) {
    for child in root.children() {
        if !child.has_tag("p") || preserved.iter().any(|p| p.same_node(&child)) {
            continue;
        }
        let Some(only) = single_element_child(&child) else {
            continue;
        };
        let is_media = |node: &Node| {
            node.tag()
                .is_some_and(|t| FIGURE_CONTENT_TAGS.contains(t.as_str()))
        };
        let wraps_media = is_media(&only)
            || (only.has_tag("a") && single_element_child(&only).is_some_and(|n| is_media(&n)));
        if wraps_media {
            child.set_tag("figure");
        }
    }
}

/// The sole child if it is an element and nothing else is present.
fn single_element_child(node: &Node) -> Option<Node> {
    let children = node.children();
    if children.len() == 1 && children[0].is_element() {
        Some(children[0].clone())
    } else {
        None
    }
}

fn collect_figures(root: &Node, preserved: &[Node]) -> Vec<Node> {
    fn walk(node: &Node, preserved: &[Node], out: &mut Vec<Node>) {
        for child in node.children() {
            if preserved.iter().any(|p| p.same_node(&child)) {
                continue;
            }
            if child.has_tag("figure") {
                out.push(child.clone());
            }
            walk(&child, preserved, out);
        }
    }
    let mut out = Vec::new();
    walk(root, preserved, &mut out);
    out
}

/// Fuse the first run of consecutive figcaptions into one caption (parts
/// joined by a double line break); captions outside that run are dropped so
/// the figure stays consistent.
fn fuse_figcaptions(figure: &Node) {
    let children = figure.children();

    let mut run: Vec<Node> = Vec::new();
    let mut run_complete = false;
    let mut strays: Vec<Node> = Vec::new();
    for child in &children {
        if child.has_tag("figcaption") {
            if run_complete {
                strays.push(child.clone());
            } else {
                run.push(child.clone());
            }
        } else if child.is_whitespace_text() {
            // does not separate captions
        } else if !run.is_empty() {
            run_complete = true;
        }
    }

    for stray in strays {
        stray.detach();
    }

    if run.len() > 1 {
        let first = &run[0];
        for caption in &run[1..] {
            first.append(&Node::element("br"));
            first.append(&Node::element("br"));
            for child in caption.children() {
                first.append(&child);
            }
            caption.detach();
        }
    }
}

/// Drop figures whose only content is their caption. Line breaks and other
/// empty non-media elements do not count as content.
fn remove_figures_without_content(root: &Node, preserved: &[Node]) {
    for figure in collect_figures(root, preserved) {
        let has_content = figure.children().iter().any(|child| {
            if child.has_tag("figcaption") {
                return false;
            }
            match child.tag() {
                Some(tag) => {
                    CONTENT_EVEN_IF_EMPTY.contains(tag.as_str())
                        || child.has_significant_text()
                        || child
                            .descendants()
                            .iter()
                            .any(|d| d.tag().is_some_and(|t| CONTENT_EVEN_IF_EMPTY.contains(t.as_str())))
                }
                None => !child.is_whitespace_text(),
            }
        });
        if !has_content {
            figure.detach();
        }
    }
}
