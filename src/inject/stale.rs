//! Remove metadata tags this tool regenerates.
//!
//! Dropping them before emitting fresh ones is what keeps repeated runs from
//! piling up duplicates.

use super::tags::{RE_HEAD_TAG_LINE, attr, meta_key};
use std::borrow::Cow;

/// Meta keys owned by the generated block.
const GENERATED_META_KEYS: &[&str] = &["og:url", "twitter:url", "og:locale", "og:locale:alternate"];

/// Whether `tag` is a canonical/hreflang link or a generated URL/locale meta.
pub fn is_generated_tag(tag: &str) -> bool {
    let lower = tag.get(..5).map(str::to_ascii_lowercase).unwrap_or_default();

    if lower.starts_with("<link") {
        let rel = attr(tag, "rel").unwrap_or_default();
        let has_rel = |want: &str| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case(want));
        return has_rel("canonical") || (has_rel("alternate") && attr(tag, "hreflang").is_some());
    }

    meta_key(tag).is_some_and(|key| {
        GENERATED_META_KEYS
            .iter()
            .any(|k| k.eq_ignore_ascii_case(key))
    })
}

/// Strip stale canonical, hreflang, `og:url`, `twitter:url` and `og:locale*` tags.
pub fn strip_generated_tags(html: &str) -> Cow<'_, str> {
    RE_HEAD_TAG_LINE.replace_all(html, |caps: &regex::Captures<'_>| {
        let line = &caps[0];
        if is_generated_tag(line.trim_end()) {
            String::new()
        } else {
            line.to_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_generated_tag() {
        assert!(is_generated_tag(r#"<link rel="canonical" href="/a">"#));
        assert!(is_generated_tag(r#"<LINK REL="CANONICAL" HREF="/a">"#));
        assert!(is_generated_tag(r#"<link rel="alternate" hreflang="en" href="/a-en">"#));
        assert!(is_generated_tag(r#"<meta property="og:url" content="/a">"#));
        assert!(is_generated_tag(r#"<meta name="twitter:url" content="/a">"#));
        assert!(is_generated_tag(r#"<meta property="og:locale" content="ru_RU">"#));
        assert!(is_generated_tag(r#"<meta property="og:locale:alternate" content="en_US">"#));
    }

    #[test]
    fn test_kept_tags() {
        assert!(!is_generated_tag(r#"<link rel="alternate" type="application/rss+xml" href="/feed.xml">"#));
        assert!(!is_generated_tag(r#"<link rel="stylesheet" href="/a.css">"#));
        assert!(!is_generated_tag(r#"<meta property="og:title" content="t">"#));
        assert!(!is_generated_tag(r#"<meta charset="utf-8">"#));
    }

    #[test]
    fn test_strip_removes_line_breaks_of_removed_tags() {
        let html = "<head>\n<meta charset=\"utf-8\">\n<link rel=\"canonical\" href=\"/old\">\n<meta property=\"og:url\" content=\"/old\">\n<title>t</title>\n</head>";
        assert_eq!(
            strip_generated_tags(html),
            "<head>\n<meta charset=\"utf-8\">\n<title>t</title>\n</head>"
        );
    }

    #[test]
    fn test_strip_leaves_body_links() {
        let html = r#"<body><link rel="stylesheet" href="/b.css"><a href="/x">x</a></body>"#;
        assert_eq!(strip_generated_tags(html), html);
    }
}
