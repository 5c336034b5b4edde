//! Character encoding detection for byte input.
//!
//! Documents arrive as bytes more often than as strings. Before handing them
//! to the parser we sniff the declared charset (BOM, then meta declarations
//! in the document head) and decode to UTF-8, replacing invalid sequences
//! rather than failing.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// How far into the document charset declarations are searched for.
const SNIFF_WINDOW: usize = 1024;

#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("valid regex")
});

/// Pick the encoding declared by the document, if any.
///
/// Checks, in order: byte-order mark, `<meta charset=…>` /
/// `<meta http-equiv="Content-Type" content="…; charset=…">` within the
/// first kilobyte. Falls back to UTF-8.
#[must_use]
pub fn sniff_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }
    let head = &html[..html.len().min(SNIFF_WINDOW)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(label) = META_CHARSET_RE
        .captures(&head_str)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return encoding;
        }
    }
    UTF_8
}

/// Decode HTML bytes into a UTF-8 string.
///
/// Invalid sequences become U+FFFD replacement characters; this never fails.
#[must_use]
pub fn decode_to_utf8(html: &[u8]) -> String {
    let encoding = sniff_encoding(html);
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_utf8() {
        assert_eq!(sniff_encoding(b"<html><body>hi</body></html>"), UTF_8);
    }

    #[test]
    fn meta_charset_is_honored() {
        let html = br#"<html><head><meta charset="ISO-8859-1"></head></html>"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per the WHATWG spec
        assert_eq!(sniff_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn http_equiv_charset_is_honored() {
        let html =
            br#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1252">"#;
        assert_eq!(sniff_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn bom_wins_over_meta() {
        let mut html = vec![0xFF, 0xFE]; // UTF-16LE BOM
        html.extend_from_slice(b"<meta charset=\"utf-8\">");
        assert_eq!(sniff_encoding(&html).name(), "UTF-16LE");
    }

    #[test]
    fn decodes_legacy_encoding() {
        let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        assert!(decode_to_utf8(html).contains("Caf\u{e9}"));
    }

    #[test]
    fn invalid_bytes_become_replacement_chars() {
        let html = b"<html><body>ok \xFF\xFE still ok</body></html>";
        let decoded = decode_to_utf8(html);
        assert!(decoded.contains("ok"));
        assert!(decoded.contains("still ok"));
    }
}
