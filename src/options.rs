//! Configuration options for cleaning.
//!
//! `Options` holds data-only configuration: whitelist patterns, attribute
//! allow-lists and merge policy. Caller-supplied callables (text extractor,
//! embed preprocessor) are parameters of the operations that use them, not
//! fields here, so `Options` stays `Clone` and safely shareable across
//! concurrent cleaning calls.

use std::collections::{HashMap, HashSet};

use crate::cleaner::tags::{default_allowed_attributes, MERGEABLE_TAGS};
use crate::patterns::{default_patterns, EmbeddingPattern};

/// Configuration options for cleaning.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_clearhtml::{EmbeddingPattern, Options};
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     embedding_patterns: vec![EmbeddingPattern::class_token("my-widget")],
///     base_url: Some("https://example.com/articles/".to_string()),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Ordered whitelist of embedding patterns. A node matching any of them
    /// is preserved verbatim, subtree included.
    ///
    /// Default: Instagram/Twitter/Facebook marker classes.
    pub embedding_patterns: Vec<EmbeddingPattern>,

    /// Per-output-tag attribute allow-list. Attributes not listed for a tag
    /// are removed; tags not listed keep no attributes at all. Preserved
    /// embeddings bypass this entirely.
    ///
    /// Default: `href`/`title` on links, `src`/`alt`/`srcset`/`sizes` on
    /// images, structural attributes on tables and lists.
    pub allowed_attributes: HashMap<String, HashSet<String>>,

    /// Output tags whose adjacent same-tag siblings are merged into a single
    /// node during cleaning.
    ///
    /// Default: canonical inline tags (strong, em, u, s, sub, sup, cite).
    pub mergeable_tags: HashSet<String>,

    /// Base URL for resolving `href`/`src` (and other URL-valued attributes)
    /// to absolute form. Values that fail to resolve are kept as-is.
    ///
    /// Default: `None` (no rewriting).
    pub base_url: Option<String>,

    /// Maximum tree depth before the cleaner refuses the input as malformed.
    /// Realistic documents stay far below this; a cyclic tree would not.
    ///
    /// Default: `256`
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            embedding_patterns: default_patterns(),
            allowed_attributes: default_allowed_attributes(),
            mergeable_tags: MERGEABLE_TAGS.iter().map(|t| (*t).to_string()).collect(),
            base_url: None,
            max_depth: 256,
        }
    }
}

impl Options {
    /// True if `attr` is allowed on output elements with tag `tag`.
    #[must_use]
    pub fn attr_allowed(&self, tag: &str, attr: &str) -> bool {
        self.allowed_attributes
            .get(tag)
            .is_some_and(|set| set.contains(attr))
    }

    /// True if adjacent same-tag siblings with this output tag merge.
    #[must_use]
    pub fn is_mergeable(&self, tag: &str) -> bool {
        self.mergeable_tags.contains(tag)
    }
}
