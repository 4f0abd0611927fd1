//! Small XML helpers shared by the reader and writer sides.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use quick_xml::events::{BytesRef, BytesStart};

// One automaton per direction, built on first use and shared after that
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("escaper patterns are valid")
});

// LeftmostLongest so an entity is never cut short at its leading '&'
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("unescaper patterns are valid")
});

/// Escape XML special characters.
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape the five standard XML entities.
///
/// Unknown or malformed entities are left unchanged.
#[inline]
pub fn unescape_xml(s: &str) -> String {
    XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"])
}

/// Re-emit a start (or empty) tag with its attributes into a byte buffer.
///
/// Used when capturing raw XML subtrees from streaming events.
pub(crate) fn push_tag(buf: &mut Vec<u8>, e: &BytesStart<'_>, self_closing: bool) {
    buf.push(b'<');
    buf.extend_from_slice(e.name().as_ref());
    for attr in e.attributes().flatten() {
        buf.push(b' ');
        buf.extend_from_slice(attr.key.as_ref());
        buf.extend_from_slice(b"=\"");
        buf.extend_from_slice(&attr.value);
        buf.push(b'"');
    }
    if self_closing {
        buf.extend_from_slice(b"/>");
    } else {
        buf.push(b'>');
    }
}

/// Re-emit an entity or character reference in its raw `&name;` spelling.
///
/// The parser reports references as their own events; a raw subtree capture
/// has to put them back, or the escaped characters vanish from the fragment.
pub(crate) fn push_ref(buf: &mut Vec<u8>, e: &BytesRef<'_>) {
    buf.push(b'&');
    buf.extend_from_slice(e);
    buf.push(b';');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_round_trip() {
        let original = "<amp & \"quotes\">";
        let escaped = escape_xml(original);
        assert_eq!(escaped, "&lt;amp &amp; &quot;quotes&quot;&gt;");
        assert_eq!(unescape_xml(&escaped), original);
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape_xml("&invalid; &amp"), "&invalid; &amp");
    }
}
