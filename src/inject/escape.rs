//! Repair double-escaped entities in titles and social descriptions.
//!
//! Some exporters escape text that was already escaped, so `Tom &amp; Jerry`
//! ships as `Tom &amp;amp; Jerry`. Only `<title>` and the `content` of the
//! text-bearing meta tags are touched.

use super::tags::{RE_META, attr, meta_key, replace_attr};
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// Meta tags whose `content` is display text.
const TEXT_META_KEYS: &[&str] = &[
    "description",
    "og:title",
    "og:description",
    "twitter:title",
    "twitter:description",
];

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(<title\b[^>]*>)(.*?)(</title\s*>)").unwrap());

static RE_DOUBLE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&amp;(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").unwrap());

/// Collapse `&amp;<entity>;` to `&<entity>;` until nothing changes.
pub fn collapse_entities(text: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(text);
    while RE_DOUBLE_ENTITY.is_match(&out) {
        out = Cow::Owned(RE_DOUBLE_ENTITY.replace_all(&out, "&$1;").into_owned());
    }
    out
}

/// Un-double-escape `<title>` and text meta `content` values.
pub fn undouble_escape(html: &str) -> Cow<'_, str> {
    if !html.contains("&amp;") {
        return Cow::Borrowed(html);
    }

    let html = RE_TITLE.replace_all(html, |caps: &regex::Captures<'_>| {
        format!("{}{}{}", &caps[1], collapse_entities(&caps[2]), &caps[3])
    });

    let fixed = RE_META.replace_all(&html, |caps: &regex::Captures<'_>| {
        let tag = &caps[0];
        let is_text = meta_key(tag)
            .is_some_and(|key| TEXT_META_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)));
        if !is_text {
            return tag.to_owned();
        }
        match attr(tag, "content") {
            Some(content) => {
                let collapsed = collapse_entities(content);
                replace_attr(tag, "content", &collapsed).unwrap_or_else(|| tag.to_owned())
            }
            None => tag.to_owned(),
        }
    });

    Cow::Owned(fixed.into_owned())
}
