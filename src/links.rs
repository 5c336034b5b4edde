//! URL resolution for attribute values.
//!
//! Real-world href/src values are messy: surrounding whitespace, fragments,
//! schemes `Url::join` refuses. Resolution failures keep the original value
//! instead of erroring, mirroring the tolerant behavior expected from a
//! cleaner that must never fail on odd markup.

use url::Url;

/// Resolve `value` against `base`. Returns `None` when the value should be
/// left untouched (already absolute and identical, or unresolvable).
#[must_use]
pub fn absolutize(base: &Url, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match base.join(trimmed) {
        Ok(resolved) => {
            let resolved = resolved.to_string();
            if resolved == value {
                None
            } else {
                Some(resolved)
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/articles/post.html").unwrap()
    }

    #[test]
    fn relative_paths_resolve() {
        assert_eq!(
            absolutize(&base(), "img/photo.jpg").as_deref(),
            Some("https://example.com/articles/img/photo.jpg")
        );
        assert_eq!(
            absolutize(&base(), "/root.png").as_deref(),
            Some("https://example.com/root.png")
        );
    }

    #[test]
    fn absolute_urls_are_untouched() {
        assert_eq!(absolutize(&base(), "https://other.org/x"), None);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(
            absolutize(&base(), "  img/a.png  ").as_deref(),
            Some("https://example.com/articles/img/a.png")
        );
    }

    #[test]
    fn empty_values_are_skipped() {
        assert_eq!(absolutize(&base(), "   "), None);
    }
}
