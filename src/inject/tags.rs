//! Pattern helpers for in-place tag rewriting.
//!
//! No DOM is built: tags are located with regexes and edited by byte range,
//! so everything outside the edited span stays byte-identical.

use regex::Regex;
use std::{ops::Range, sync::LazyLock};

/// A `<meta ...>` tag.
pub static RE_META: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<meta\b[^>]*>").unwrap());

/// A `<link>` or `<meta>` tag plus the line break right after it.
pub static RE_HEAD_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:link|meta)\b[^>]*>(?:\r?\n)?").unwrap());

/// The opening `<head>` tag (not `<header>`).
pub static RE_HEAD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head(?:\s[^>]*)?>").unwrap());

/// The closing `</head>` tag.
pub static RE_HEAD_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</head\s*>").unwrap());

/// One `name=value` attribute, value double-quoted, single-quoted or bare.
static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .unwrap()
});

/// Byte range of attribute `name`'s value inside `tag`.
pub fn attr_span(tag: &str, name: &str) -> Option<Range<usize>> {
    RE_ATTR.captures_iter(tag).find_map(|caps| {
        let key = caps.get(1)?;
        if !key.as_str().eq_ignore_ascii_case(name) {
            return None;
        }
        caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.range())
    })
}

/// Value of attribute `name` in `tag`, as written.
pub fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    attr_span(tag, name).map(|range| &tag[range])
}

/// Key of a `<meta>` tag: its `property`, else its `name`.
pub fn meta_key(tag: &str) -> Option<&str> {
    attr(tag, "property").or_else(|| attr(tag, "name"))
}

/// Replace attribute `name`'s value in `tag`.
pub fn replace_attr(tag: &str, name: &str, value: &str) -> Option<String> {
    let range = attr_span(tag, name)?;
    let mut out = String::with_capacity(tag.len() + value.len());
    out.push_str(&tag[..range.start]);
    out.push_str(value);
    out.push_str(&tag[range.end..]);
    Some(out)
}

/// Escape a value for a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Whether a URL carries a scheme (`https:`, `data:`, `mailto:`).
pub fn has_scheme(url: &str) -> bool {
    url.find(':').is_some_and(|pos| {
        pos > 0
            && url[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            && url.starts_with(|c: char| c.is_ascii_alphabetic())
    })
}

/// Insert `block` right before `</head>`, or append it when there is none.
pub fn insert_before_head_close(html: &str, block: &str) -> String {
    let at = RE_HEAD_CLOSE.find(html).map_or(html.len(), |m| m.start());
    let mut out = String::with_capacity(html.len() + block.len());
    out.push_str(&html[..at]);
    out.push_str(block);
    out.push_str(&html[at..]);
    out
}
