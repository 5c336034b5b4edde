//! # rs-clearhtml
//!
//! Rust port of clear-html - HTML cleanup and normalization library.
//!
//! This library normalizes arbitrary HTML into a small, predictable subset:
//! presentational noise (styles, scripts, ids, classes, empty containers) is
//! stripped, structural redundancy is collapsed, and the content is rewritten
//! into a whitelist of semantic tags under a single `<article>` root.
//! Whitelisted "embedding" subtrees (social-media widgets) pass through
//! untouched, nested scripts included.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_clearhtml::clean_html;
//!
//! let html = r#"<div style="color:blue" id="main_content">
//!     <p>Some text to be</p>
//!     <div>cleaned up!</div>
//! </div>"#;
//!
//! let cleaned = clean_html(html)?;
//! assert_eq!(
//!     cleaned,
//!     "<article><p>Some text to be</p><p>cleaned up!</p></article>"
//! );
//! # Ok::<(), rs_clearhtml::Error>(())
//! ```
//!
//! Working on trees instead of strings:
//!
//! ```rust
//! use rs_clearhtml::{clean, cleaned_to_html, cleaned_to_text, parse};
//!
//! let tree = parse("<div><b>x</b><b>y</b></div>");
//! let cleaned = clean(&tree)?;
//! assert_eq!(
//!     cleaned_to_html(&cleaned),
//!     "<article><p><strong>x y</strong></p></article>"
//! );
//! assert_eq!(cleaned_to_text(&cleaned)?, "x y");
//! # Ok::<(), rs_clearhtml::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Tag normalization**: the output uses a closed set of semantic tags;
//!   `b`/`i` become `strong`/`em`, wrapper `div`s dissolve into paragraphs,
//!   heading levels are renumbered from `h2`.
//! - **Attribute sanitization**: only a per-tag allow-list survives (`href`
//!   on links, `src`/`alt` on images); style, class, id and event handlers
//!   are gone.
//! - **Embedding preservation**: subtrees matching configured patterns are
//!   moved into the output verbatim, by handle.
//! - **Adapters**: cleaned trees render to compact HTML or layout-aware
//!   plain text, with pluggable strategies at both seams.
//!
//! ## Contract
//!
//! The cleaned tree is a fresh tree; the input is left untouched with one
//! documented exception: preserved embedding subtrees are *moved* into the
//! output by handle (re-parented, not copied), so after cleaning they hang
//! off the output tree and any later mutation of them is visible through
//! both handles. Cleaning never fails on well-formed input: unknown tags
//! unwrap, unknown attributes drop. The only library-raised error is
//! [`Error::MalformedTree`] when the input nesting exceeds
//! [`Options::max_depth`].

mod error;
mod options;

/// Body annotation fixtures (JSON store of raw/expected page pairs).
pub mod annotations;

/// The cleaning engine: classification, rewriting, policy tables.
pub mod cleaner;

/// Parse adapter: raw HTML in, [`Node`] trees out (via `dom_query`).
pub mod dom;

/// Embedding integration pass and preprocessor capability.
pub mod embeddings;

/// Character encoding detection for byte input.
pub mod encoding;

/// URL resolution helpers.
pub mod links;

/// Embedding whitelist patterns and matching.
pub mod patterns;

/// Cleaned tree to HTML string.
pub mod serialize;

/// Cleaned tree to plain text, with pluggable extraction.
pub mod text;

/// The element tree model.
pub mod tree;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;

pub use dom::{parse, parse_bytes};
pub use embeddings::{integrate_embeddings, EmbedPreprocessor};
pub use patterns::{AttrMatcher, EmbeddingPattern};
pub use text::{cleaned_to_text, cleaned_to_text_with, DefaultTextExtractor, TextExtractor};
pub use tree::{Node, NodeKind};

/// Clean a parsed tree using default options.
///
/// Returns a fresh tree rooted at `<article>`. The input is not rewritten;
/// the one structural change it sees is that preserved embedding subtrees
/// are moved into the output by handle (not copied).
pub fn clean(node: &Node) -> Result<Node> {
    clean_with_options(node, &Options::default())
}

/// Clean a parsed tree with custom options.
///
/// # Example
///
/// ```rust
/// use rs_clearhtml::{clean_with_options, cleaned_to_html, parse, EmbeddingPattern, Options};
///
/// let options = Options {
///     embedding_patterns: vec![EmbeddingPattern::class_token("twitter-embed")],
///     ..Options::default()
/// };
/// let tree = parse(r#"<div><div class="twitter-embed"><script>go()</script></div></div>"#);
/// let cleaned = clean_with_options(&tree, &options)?;
/// assert_eq!(
///     cleaned_to_html(&cleaned),
///     r#"<article><div class="twitter-embed"><script>go()</script></div></article>"#
/// );
/// # Ok::<(), rs_clearhtml::Error>(())
/// ```
pub fn clean_with_options(node: &Node, options: &Options) -> Result<Node> {
    cleaner::clean_tree(node, options)
}

/// Parse, clean and serialize an HTML string using default options.
pub fn clean_html(html: &str) -> Result<String> {
    clean_html_with_options(html, &Options::default())
}

/// Parse, clean and serialize an HTML string with custom options.
pub fn clean_html_with_options(html: &str, options: &Options) -> Result<String> {
    let tree = dom::parse(html);
    let cleaned = clean_with_options(&tree, options)?;
    Ok(serialize::to_html(&cleaned))
}

/// Parse, clean and serialize HTML bytes using default options.
///
/// Charset is detected from a byte-order mark or `<meta charset>`
/// declaration; invalid sequences become replacement characters.
pub fn clean_bytes(html: &[u8]) -> Result<String> {
    clean_bytes_with_options(html, &Options::default())
}

/// Parse, clean and serialize HTML bytes with custom options.
pub fn clean_bytes_with_options(html: &[u8], options: &Options) -> Result<String> {
    let tree = dom::parse_bytes(html);
    let cleaned = clean_with_options(&tree, options)?;
    Ok(serialize::to_html(&cleaned))
}

/// Serialize a cleaned tree to a compact HTML string.
#[must_use]
pub fn cleaned_to_html(node: &Node) -> String {
    serialize::to_html(node)
}
