//! Tag catalogs and policy tables for the cleaner.
//!
//! These tables drive classification (§ drop/unwrap/map), the empty-element
//! rules, sibling merging and attribute sanitization. They are data, not
//! logic: the rewriter consults them but never hardcodes tag names.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// === Output universe ===

/// Tags that may appear in cleaned output (the closed output set).
pub static ALLOWED_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // root container
        "article",
        // textual blocks
        "p", "h1", "h2", "h3", "h4", "h5", "h6", "aside", "blockquote", "code", "pre",
        // lists
        "ul", "ol", "li", "dl", "dt", "dd",
        // tables
        "table", "thead", "tbody", "tfoot", "tr", "td", "th",
        // figures
        "figure", "figcaption",
        // inline
        "a", "strong", "em", "u", "s", "sub", "sup", "cite", "br", "hr",
        // media
        "img", "video", "audio", "source", "iframe", "embed", "object",
    ]
    .into_iter()
    .collect()
});

/// Structurally-equivalent tag normalization (b -> strong and friends).
pub static TAG_TRANSLATIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| [("b", "strong"), ("i", "em"), ("tt", "code")].into_iter().collect());

/// Tags removed together with their whole subtree (cascading drop).
pub static HARD_DROP_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "script", "style", "noscript", "template", "head", "title", "meta", "link",
        "base", "frame", "frameset", "noframes", "param",
    ]
    .into_iter()
    .collect()
});

/// Tags whose children are discarded while the (empty) tag itself is kept.
/// Iframe payloads pollute article text but the frame may still be wanted.
pub static KILL_CONTENT_TAGS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["iframe"].into_iter().collect());

// === Emptiness ===

/// Embedded-media tags (meaningful without text content).
pub static EMBEDDED_MEDIA_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["video", "audio", "source", "iframe", "embed", "object"]
        .into_iter()
        .collect()
});

/// Output tags that survive the empty-element drop.
pub static CAN_BE_EMPTY: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set: HashSet<&'static str> =
        ["img", "br", "hr", "dt", "dd", "td"].into_iter().collect();
    set.extend(EMBEDDED_MEDIA_TAGS.iter().copied());
    set
});

/// Tags that count as content even with no text (for "does this figure or
/// container actually hold anything" checks).
pub static CONTENT_EVEN_IF_EMPTY: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set: HashSet<&'static str> = ["img"].into_iter().collect();
    set.extend(EMBEDDED_MEDIA_TAGS.iter().copied());
    set
});

// === Phrasing vs block ===

/// Phrasing content per the HTML5 spec, plus legacy inline tags that parsers
/// still produce. Tags outside [`HTML_UNIVERSE_TAGS`] are treated as phrasing
/// too (unknown markup should never split a paragraph).
pub static PHRASING_CONTENT: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "abbr", "audio", "b", "bdi", "bdo", "br", "button", "canvas", "cite",
        "code", "data", "datalist", "del", "dfn", "em", "embed", "i", "iframe", "img",
        "input", "ins", "kbd", "label", "link", "map", "mark", "math", "meta", "meter",
        "noscript", "object", "output", "picture", "progress", "q", "ruby", "s", "samp",
        "script", "select", "slot", "small", "span", "strong", "sub", "sup", "svg",
        "template", "textarea", "time", "u", "var", "video", "wbr",
        // legacy inline
        "big", "blink", "font", "nobr", "strike", "tt",
    ]
    .into_iter()
    .collect()
});

/// Every HTML tag this module knows about. Used to decide whether an unknown
/// tag is really unknown (treated as inline) or a known block element.
pub static HTML_UNIVERSE_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set: HashSet<&'static str> = [
        "address", "area", "article", "aside", "base", "blockquote", "body", "caption",
        "center", "col", "colgroup", "command", "dd", "details", "dialog", "dir", "div",
        "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "frame",
        "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup",
        "hr", "html", "iframe", "legend", "li", "main", "marquee", "menu", "menuitem",
        "nav", "noframes", "ol", "optgroup", "option", "p", "param", "pre", "rp", "rt",
        "ruby", "section", "source", "style", "summary", "table", "tbody", "td",
        "tfoot", "th", "thead", "title", "tr", "track", "ul",
    ]
    .into_iter()
    .collect();
    set.extend(PHRASING_CONTENT.iter().copied());
    set.extend(ALLOWED_TAGS.iter().copied());
    set
});

// === Figures ===

/// Tags that constitute figure content (media).
pub static FIGURE_CONTENT_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["img", "video", "audio", "iframe", "embed", "object"]
        .into_iter()
        .collect()
});

/// Tags allowed inside a figcaption. Anything else unwraps.
pub static FIGURE_CAPTION_ALLOWED_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "figcaption", "a", "p", "br", "strong", "em", "u", "s", "sub", "sup", "cite",
    ]
    .into_iter()
    .collect()
});

// === Structure rules ===

/// Tags that only make sense under specific ancestors; orphans unwrap
/// (content kept).
pub static REQUIRED_ANCESTORS: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| {
        [
            ("li", &["ul", "ol"] as &[&str]),
            ("thead", &["table"]),
            ("tbody", &["table"]),
            ("tfoot", &["table"]),
            ("tr", &["table"]),
            ("td", &["table"]),
            ("th", &["table"]),
            ("dt", &["dl"]),
            ("dd", &["dl"]),
        ]
        .into_iter()
        .collect()
    });

/// Tags that only make sense under specific ancestors; orphans are dropped
/// entirely (a caption without its figure is noise).
pub static REQUIRED_ANCESTORS_DROP: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| [("figcaption", &["figure"] as &[&str])].into_iter().collect());

// === Sibling merge policy ===

/// Default set of output tags whose adjacent same-tag siblings merge into
/// one node. Overridable through `Options::mergeable_tags`.
pub static MERGEABLE_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["strong", "em", "u", "s", "sub", "sup", "cite"].into_iter().collect()
});

// === Attribute allow-lists ===

/// Default per-output-tag attribute allow-list. Everything not listed here
/// is removed during sanitization; preserved embeddings bypass this table.
#[must_use]
pub fn default_allowed_attributes() -> HashMap<String, HashSet<String>> {
    fn entry(tag: &str, attrs: &[&str]) -> (String, HashSet<String>) {
        (
            tag.to_string(),
            attrs.iter().map(|a| (*a).to_string()).collect(),
        )
    }
    [
        entry("a", &["href", "title"]),
        entry("img", &["src", "alt", "srcset", "sizes", "title"]),
        entry("blockquote", &["cite"]),
        entry("ol", &["start"]),
        entry("li", &["value"]),
        entry("td", &["colspan", "rowspan"]),
        entry("th", &["colspan", "rowspan"]),
        entry("iframe", &["src", "title"]),
        entry("video", &["src", "poster"]),
        entry("audio", &["src"]),
        entry("source", &["src", "srcset", "sizes", "type"]),
        entry("embed", &["src", "type"]),
        entry("object", &["data", "type"]),
    ]
    .into_iter()
    .collect()
}

/// Attributes whose values are URLs and get resolved against the base URL.
pub static URL_ATTRIBUTES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["href", "src", "poster", "cite", "data"].into_iter().collect());

// === Helpers ===

/// True if the tag behaves as intra-paragraph (phrasing) content. Unknown
/// tags count as phrasing by default.
#[inline]
#[must_use]
pub fn is_phrasing_tag(tag: &str) -> bool {
    PHRASING_CONTENT.contains(tag) || !HTML_UNIVERSE_TAGS.contains(tag)
}

/// True if the tag is a known block-level element.
#[inline]
#[must_use]
pub fn is_block_tag(tag: &str) -> bool {
    !is_phrasing_tag(tag)
}

/// True if the tag is an h1-h6 heading; returns its level.
#[must_use]
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}
