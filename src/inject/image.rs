//! Absolute social preview image URLs.
//!
//! Crawlers for Open Graph and Twitter cards ignore relative image paths, so
//! with a known base URL every site-relative image becomes absolute.

use super::tags::{RE_META, attr, has_scheme, meta_key, replace_attr};
use crate::site::url::{BaseUrl, PLACEHOLDER};
use std::borrow::Cow;

const IMAGE_META_KEYS: &[&str] = &[
    "og:image",
    "og:image:url",
    "og:image:secure_url",
    "twitter:image",
    "twitter:image:src",
];

/// Resolve a site-relative image URL against the base, if it needs it.
fn absolute_image(content: &str, base: &BaseUrl) -> Option<String> {
    let content = content.trim();
    let skip = content.is_empty()
        || has_scheme(content)
        || content.starts_with("//")
        || content.starts_with(PLACEHOLDER);
    (!skip).then(|| base.join(content))
}

/// Rewrite scheme-less `og:image`/`twitter:image` contents to `base + path`.
pub fn absolutize_images<'a>(html: &'a str, base: Option<&BaseUrl>) -> Cow<'a, str> {
    let Some(base) = base else {
        return Cow::Borrowed(html);
    };

    RE_META.replace_all(html, |caps: &regex::Captures<'_>| {
        let tag = &caps[0];
        let is_image = meta_key(tag)
            .is_some_and(|key| IMAGE_META_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)));

        is_image
            .then(|| attr(tag, "content"))
            .flatten()
            .and_then(|content| absolute_image(content, base))
            .and_then(|url| replace_attr(tag, "content", &url))
            .unwrap_or_else(|| tag.to_owned())
    })
}
