//! Embedding whitelist patterns.
//!
//! A pattern pairs a tag constraint with an attribute-value matcher. A node
//! matching any configured pattern is preserved verbatim through cleaning
//! (classification short-circuits to preserve, the subtree is never
//! rewritten). Matching is a pure predicate: no mutation, no state.
//!
//! The default pattern set covers the embed widgets of the major social
//! providers, keyed on their well-known marker classes.

use regex::Regex;

use crate::tree::Node;

/// Instagram embed marker classes.
pub static INSTAGRAM_CLASSES: [&str; 1] = ["instagram-media"];

/// Twitter embed marker classes.
pub static TWITTER_CLASSES: [&str; 3] = ["twitter-tweet", "twitter-timeline", "twitter-moment"];

/// Facebook embed marker classes.
pub static FACEBOOK_CLASSES: [&str; 3] = ["fb-post", "fb-video", "fb-comment-embed"];

/// How an attribute value is tested against a pattern.
#[derive(Debug, Clone)]
pub enum AttrMatcher {
    /// The value, split on ASCII whitespace, contains this token
    /// (the semantics of an HTML `class` list).
    Token(String),
    /// The value contains this substring.
    Substring(String),
    /// The value matches this regular expression.
    Regex(Regex),
}

impl AttrMatcher {
    fn matches(&self, value: &str) -> bool {
        match self {
            AttrMatcher::Token(token) => value.split_ascii_whitespace().any(|t| t == token),
            AttrMatcher::Substring(needle) => value.contains(needle.as_str()),
            AttrMatcher::Regex(re) => re.is_match(value),
        }
    }
}

/// One whitelist entry: tag constraint plus attribute-value matcher.
///
/// Immutable configuration, loaded once and read-only during a cleaning run.
#[derive(Debug, Clone)]
pub struct EmbeddingPattern {
    /// Tag the element must have; `None` matches any element.
    pub tag: Option<String>,
    /// Attribute whose value is inspected (commonly `class`).
    pub attribute: String,
    /// Test applied to the attribute value.
    pub matcher: AttrMatcher,
}

impl EmbeddingPattern {
    /// Pattern matching any element carrying `token` in its `class` list.
    #[must_use]
    pub fn class_token(token: &str) -> Self {
        EmbeddingPattern {
            tag: None,
            attribute: "class".to_string(),
            matcher: AttrMatcher::Token(token.to_string()),
        }
    }

    /// True if the node satisfies this pattern.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }
        if let Some(required) = &self.tag {
            if !node.has_tag(required) {
                return false;
            }
        }
        node.attr(&self.attribute)
            .is_some_and(|value| self.matcher.matches(&value))
    }
}

/// The default provider whitelist (Instagram, Twitter, Facebook embeds).
#[must_use]
pub fn default_patterns() -> Vec<EmbeddingPattern> {
    INSTAGRAM_CLASSES
        .iter()
        .chain(TWITTER_CLASSES.iter())
        .chain(FACEBOOK_CLASSES.iter())
        .map(|class| EmbeddingPattern::class_token(class))
        .collect()
}

/// True if the node matches any of the patterns (OR across patterns).
#[must_use]
pub fn matches_any(node: &Node, patterns: &[EmbeddingPattern]) -> bool {
    patterns.iter().any(|p| p.matches(node))
}

/// Top-most matching elements under (and including) `root`, in document
/// order. A match shields its subtree: nested matches are not reported.
#[must_use]
pub fn find_embedding_roots(root: &Node, patterns: &[EmbeddingPattern]) -> Vec<Node> {
    fn walk(node: &Node, patterns: &[EmbeddingPattern], out: &mut Vec<Node>) {
        if matches_any(node, patterns) {
            out.push(node.clone());
            return;
        }
        for child in node.children() {
            walk(&child, patterns, out);
        }
    }
    let mut out = Vec::new();
    walk(root, patterns, &mut out);
    out
}
