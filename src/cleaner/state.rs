//! Per-run cleaning state.
//!
//! One `CleanState` exists per call to `clean_tree`. It carries the read-only
//! configuration plus the traversal context the classifier needs: the stack
//! of *output* ancestor tags (orphaned-structure rules), preformatted depth
//! (whitespace policy), the recursion-depth guard and the registry of
//! preserved embedding roots.

use log::warn;
use url::Url;

use crate::error::{Error, Result};
use crate::options::Options;
use crate::tree::Node;

pub struct CleanState<'a> {
    opts: &'a Options,
    base_url: Option<Url>,
    /// Output tags of the elements currently being assembled, outermost first.
    ancestors: Vec<&'static str>,
    pre_depth: usize,
    figcaption_depth: usize,
    depth: usize,
    preserved: Vec<Node>,
}

impl<'a> CleanState<'a> {
    #[must_use]
    pub fn new(opts: &'a Options) -> Self {
        let base_url = opts.base_url.as_deref().and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!("ignoring unparseable base_url {raw:?}: {err}");
                None
            }
        });
        CleanState {
            opts,
            base_url,
            ancestors: vec!["article"],
            pre_depth: 0,
            figcaption_depth: 0,
            depth: 0,
            preserved: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        self.opts
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    // === Ancestor tracking ===

    pub fn push_ancestor(&mut self, tag: &'static str) {
        if tag == "pre" {
            self.pre_depth += 1;
        }
        if tag == "figcaption" {
            self.figcaption_depth += 1;
        }
        self.ancestors.push(tag);
    }

    pub fn pop_ancestor(&mut self) {
        if let Some(tag) = self.ancestors.pop() {
            if tag == "pre" {
                self.pre_depth -= 1;
            }
            if tag == "figcaption" {
                self.figcaption_depth -= 1;
            }
        }
    }

    /// True if any enclosing output element has one of these tags.
    #[must_use]
    pub fn has_ancestor(&self, tags: &[&str]) -> bool {
        self.ancestors.iter().any(|a| tags.contains(a))
    }

    /// True while assembling preformatted content (whitespace untouched).
    #[must_use]
    pub fn in_pre(&self) -> bool {
        self.pre_depth > 0
    }

    /// True while assembling figcaption content (restricted tag set).
    #[must_use]
    pub fn in_figcaption(&self) -> bool {
        self.figcaption_depth > 0
    }

    // === Depth guard ===

    /// Enter one recursion level; errors once the input is deeper than any
    /// well-formed document can be (the malformed-tree fail-fast of the
    /// contract).
    pub fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.opts.max_depth {
            return Err(Error::MalformedTree(format!(
                "nesting exceeds {} levels; input tree is cyclic or corrupted",
                self.opts.max_depth
            )));
        }
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // === Preserved embeddings ===

    pub fn register_preserved(&mut self, node: &Node) {
        self.preserved.push(node.clone());
    }

    /// Preserved embedding roots, in document order.
    #[must_use]
    pub fn preserved(&self) -> &[Node] {
        &self.preserved
    }
}
