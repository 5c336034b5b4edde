//! Node classification.
//!
//! Maps every input element to one of four outcomes: drop the subtree, unwrap
//! (discard the wrapper, keep the children), map onto an output tag, or
//! preserve as an embedding. The decision is computed fresh per traversal and
//! never stored on the node.
//!
//! Policy order matters: whitelist match wins over everything, hard drops win
//! over structure rules, and unknown tags fall open to unwrap so readable
//! text is never silently lost.

use crate::cleaner::state::CleanState;
use crate::cleaner::tags::{
    is_block_tag, ALLOWED_TAGS, FIGURE_CAPTION_ALLOWED_TAGS, HARD_DROP_TAGS,
    REQUIRED_ANCESTORS, REQUIRED_ANCESTORS_DROP, TAG_TRANSLATIONS,
};
use crate::patterns::matches_any;
use crate::tree::Node;

/// Classification outcome for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Discard the element and its entire subtree.
    Drop,
    /// Discard the element, promote its children. `block` records whether
    /// the removed wrapper separated blocks of content (a boundary must be
    /// kept) or was intra-paragraph markup (children splice in seamlessly).
    Unwrap { block: bool },
    /// Keep the element under the given output tag.
    MapTo(&'static str),
    /// Whitelisted embedding: moved to the output verbatim, subtree included.
    PreserveEmbedding,
}

/// Classify one element in its traversal context.
#[must_use]
pub fn classify(node: &Node, state: &CleanState<'_>) -> Decision {
    let Some(tag) = node.tag() else {
        // Text fragments are not classified.
        return Decision::Unwrap { block: false };
    };
    let tag = tag.as_str();

    if matches_any(node, &state.options().embedding_patterns) {
        return Decision::PreserveEmbedding;
    }

    if HARD_DROP_TAGS.contains(tag) {
        return Decision::Drop;
    }

    // Normalize structurally-equivalent tags before any table lookup.
    let translated: &str = TAG_TRANSLATIONS.get(tag).copied().unwrap_or(tag);

    // The root container tag is ours to emit; input occurrences are wrappers.
    if translated == "article" {
        return Decision::Unwrap { block: true };
    }

    // Structure parts without their required ancestor.
    if let Some(required) = REQUIRED_ANCESTORS_DROP.get(translated) {
        if !state.has_ancestor(required) {
            return Decision::Drop;
        }
    }
    if let Some(required) = REQUIRED_ANCESTORS.get(translated) {
        if !state.has_ancestor(required) {
            return Decision::Unwrap {
                block: is_block_tag(translated),
            };
        }
    }

    // Inside a figcaption only a small inline subset survives.
    if state.in_figcaption() && !FIGURE_CAPTION_ALLOWED_TAGS.contains(translated) {
        return Decision::Unwrap {
            block: is_block_tag(translated),
        };
    }

    if let Some(output) = ALLOWED_TAGS.get(translated).copied() {
        return Decision::MapTo(output);
    }

    // Unknown or unsupported: fail open, keep the content.
    Decision::Unwrap {
        block: is_block_tag(tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn classify_with_default(node: &Node) -> Decision {
        let opts = Options::default();
        let state = CleanState::new(&opts);
        classify(node, &state)
    }

    #[test]
    fn scripts_and_styles_drop() {
        assert_eq!(classify_with_default(&Node::element("script")), Decision::Drop);
        assert_eq!(classify_with_default(&Node::element("style")), Decision::Drop);
        assert_eq!(classify_with_default(&Node::element("meta")), Decision::Drop);
    }

    #[test]
    fn wrappers_unwrap_with_block_boundary() {
        assert_eq!(
            classify_with_default(&Node::element("div")),
            Decision::Unwrap { block: true }
        );
        assert_eq!(
            classify_with_default(&Node::element("section")),
            Decision::Unwrap { block: true }
        );
        assert_eq!(
            classify_with_default(&Node::element("article")),
            Decision::Unwrap { block: true }
        );
    }

    #[test]
    fn inline_wrappers_unwrap_without_boundary() {
        assert_eq!(
            classify_with_default(&Node::element("span")),
            Decision::Unwrap { block: false }
        );
        // unknown tags count as inline
        assert_eq!(
            classify_with_default(&Node::element("custom-widget")),
            Decision::Unwrap { block: false }
        );
    }

    #[test]
    fn allowed_tags_map_to_themselves() {
        assert_eq!(classify_with_default(&Node::element("p")), Decision::MapTo("p"));
        assert_eq!(
            classify_with_default(&Node::element("blockquote")),
            Decision::MapTo("blockquote")
        );
        assert_eq!(classify_with_default(&Node::element("img")), Decision::MapTo("img"));
    }

    #[test]
    fn legacy_tags_translate() {
        assert_eq!(classify_with_default(&Node::element("b")), Decision::MapTo("strong"));
        assert_eq!(classify_with_default(&Node::element("i")), Decision::MapTo("em"));
        assert_eq!(classify_with_default(&Node::element("tt")), Decision::MapTo("code"));
    }

    #[test]
    fn whitelist_match_preserves() {
        let embed = Node::element("div");
        embed.set_attr("class", "twitter-tweet");
        assert_eq!(classify_with_default(&embed), Decision::PreserveEmbedding);
    }

    #[test]
    fn whitelist_beats_hard_drop_context() {
        // a whitelisted node keeps even tags that would otherwise vanish
        let opts = Options::default();
        let state = CleanState::new(&opts);
        let embed = Node::element("blockquote");
        embed.set_attr("class", "twitter-tweet");
        assert_eq!(classify(&embed, &state), Decision::PreserveEmbedding);
    }

    #[test]
    fn orphaned_structure_parts_unwrap() {
        let opts = Options::default();
        let state = CleanState::new(&opts);
        assert_eq!(
            classify(&Node::element("li"), &state),
            Decision::Unwrap { block: true }
        );
        assert_eq!(
            classify(&Node::element("td"), &state),
            Decision::Unwrap { block: true }
        );
    }

    #[test]
    fn structure_parts_in_context_map() {
        let opts = Options::default();
        let mut state = CleanState::new(&opts);
        state.push_ancestor("ul");
        assert_eq!(classify(&Node::element("li"), &state), Decision::MapTo("li"));
    }

    #[test]
    fn orphaned_figcaption_drops() {
        let opts = Options::default();
        let mut state = CleanState::new(&opts);
        assert_eq!(classify(&Node::element("figcaption"), &state), Decision::Drop);
        state.push_ancestor("figure");
        assert_eq!(
            classify(&Node::element("figcaption"), &state),
            Decision::MapTo("figcaption")
        );
    }

    #[test]
    fn figcaption_content_is_restricted() {
        let opts = Options::default();
        let mut state = CleanState::new(&opts);
        state.push_ancestor("figure");
        state.push_ancestor("figcaption");
        // tables are allowed output in general but not inside captions
        assert_eq!(
            classify(&Node::element("table"), &state),
            Decision::Unwrap { block: true }
        );
        assert_eq!(classify(&Node::element("strong"), &state), Decision::MapTo("strong"));
    }
}
