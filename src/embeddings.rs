//! Embedding integration.
//!
//! Cleaning preserves whitelisted subtrees untouched; this pass lets callers
//! find them again in the cleaned tree and optionally transform each one
//! (rewriting embed URLs, attaching consent wrappers) without re-running the
//! whole rewrite. Only preserved embeddings can still match the whitelist
//! after cleaning: sanitization strips marker classes everywhere else.
//!
//! Preserved subtrees alias the input tree (they were moved by handle), so a
//! preprocessor that mutates them is visible through both trees. Callers
//! that need isolation should deep-clone first.

use crate::error::Result;
use crate::options::Options;
use crate::patterns::find_embedding_roots;
use crate::tree::Node;

/// Pluggable embedding transformation, applied during integration.
///
/// Implemented for any `Fn(&Node) -> Result<()>`, so plain closures work.
/// Failures are propagated to the caller unmodified.
pub trait EmbedPreprocessor {
    /// Transform one preserved embedding subtree in place.
    fn process(&self, node: &Node) -> Result<()>;
}

impl<F> EmbedPreprocessor for F
where
    F: Fn(&Node) -> Result<()>,
{
    fn process(&self, node: &Node) -> Result<()> {
        self(node)
    }
}

/// Locate preserved embedding roots in a cleaned tree, run the optional
/// preprocessor over each, and return them in document order.
pub fn integrate_embeddings(
    root: &Node,
    options: &Options,
    preprocessor: Option<&dyn EmbedPreprocessor>,
) -> Result<Vec<Node>> {
    let embeds = find_embedding_roots(root, &options.embedding_patterns);
    if let Some(preprocessor) = preprocessor {
        for embed in &embeds {
            preprocessor.process(embed)?;
        }
    }
    Ok(embeds)
}
