//! Heading level normalization.
//!
//! Article bodies arrive with arbitrary heading levels; the cleaned document
//! always starts its hierarchy at `h2` (the `h1` belongs to the page, not
//! the body). The minimum level found maps to `h2` and the rest shift by the
//! same amount. Input `h6` is already at the floor and demotes to a strong
//! paragraph instead.

use crate::cleaner::tags::heading_level;
use crate::tree::Node;

/// Normalize heading levels in a cleaned tree. Preserved embedding subtrees
/// are left untouched.
pub fn normalize_headings(root: &Node, preserved: &[Node]) {
    let mut headings: Vec<(Node, u8)> = Vec::new();
    collect_headings(root, preserved, &mut headings);

    let Some(min_level) = headings.iter().map(|(_, level)| *level).min() else {
        return;
    };

    for (heading, level) in headings {
        if level == 6 {
            demote_to_strong_paragraph(&heading);
        } else {
            heading.set_tag(&format!("h{}", level - min_level + 2));
        }
    }
}

fn collect_headings(node: &Node, preserved: &[Node], out: &mut Vec<(Node, u8)>) {
    for child in node.children() {
        if preserved.iter().any(|p| p.same_node(&child)) {
            continue;
        }
        if let Some(level) = child.tag().as_deref().and_then(heading_level) {
            out.push((child.clone(), level));
        }
        collect_headings(&child, preserved, out);
    }
}

/// `<h6>…</h6>` becomes `<p><strong>…</strong></p>`.
fn demote_to_strong_paragraph(heading: &Node) {
    let strong = Node::element("strong");
    for child in heading.children() {
        strong.append(&child);
    }
    heading.set_tag("p");
    heading.append(&strong);
}
