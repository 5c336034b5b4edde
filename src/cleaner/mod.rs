//! Article body cleaning: normalize an arbitrary HTML tree into the
//! restricted output universe.
//!
//! There are two kinds of markup to deal with. Inline tags live inside
//! paragraphs (`strong`, `em`, …); removing one must not introduce spacing:
//! `<p>I would like to visit <span class="location">Spain</span></p>`
//! simplifies to `<p>I would like to visit Spain</p>`. Block tags divide
//! blocks of content; removing one must keep the division:
//! `<div>first</div><div>second</div>` has to come out as
//! `<p>first</p><p>second</p>`, never as one run-on paragraph.
//!
//! The rewriter encodes that distinction explicitly. Each level of the
//! single depth-first pass yields finished nodes interleaved with *boundary*
//! markers; an unwrapped block wrapper leaves a boundary on each side, and a
//! literal `<br><br>` in the source counts as one too. At the article root,
//! boundaries split the content into paragraphs; anywhere else they render
//! back as a double line break.
//!
//! Pass order:
//! - classify every node (whitelist match, hard drop, unwrap, map) and
//!   assemble the output tree bottom-up: sibling merging, whitespace policy,
//!   empty-element drop, attribute sanitization;
//! - wrap everything in the `article` root, grouping loose phrasing runs
//!   into paragraphs;
//! - normalize heading levels;
//! - normalize figures (media paragraphs, caption fusing, empty figures).
//!
//! Whitelisted embedding subtrees bypass all of it and are moved into the
//! output by handle.

pub mod classify;
pub mod figures;
pub mod headings;
pub mod rewrite;
pub mod state;
pub mod tags;

use log::debug;

use crate::error::Result;
use crate::options::Options;
use crate::tree::Node;

/// Clean a parsed tree into a fresh `article`-rooted output tree.
///
/// The input is not rewritten; preserved embedding subtrees are moved into
/// the output by handle (re-parented, not copied).
pub fn clean_tree(root: &Node, options: &Options) -> Result<Node> {
    let mut state = state::CleanState::new(options);
    let article = rewrite::clean_root(root, &mut state)?;
    headings::normalize_headings(&article, state.preserved());
    figures::normalize_figures(&article, state.preserved());
    debug!(
        "cleaned tree: {} top-level blocks, {} preserved embeddings",
        article.child_count(),
        state.preserved().len()
    );
    Ok(article)
}
