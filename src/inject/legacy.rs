//! Removal of inline scripts left by earlier SEO generators.
//!
//! Older exports patched canonical/hreflang/social tags at runtime from an
//! inline script. Those scripts fight the static tags we now emit.

use super::redirect::REDIRECT_SCRIPT_ID;
use super::tags::attr;
use crate::site::url::PLACEHOLDER;
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

static RE_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>(?:\r?\n)?").unwrap()
});

/// Mentions of the tags we own. Other social tags are left to the page.
static RE_OWNED_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)canonical|hreflang|og:url|og:locale|twitter:url").unwrap()
});

/// Writes to an existing element, matched within one statement.
static RE_SETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)setAttribute|\.(?:href|content|rel|hreflang)\s*=(?:[^=]|$)|\.remove\(\)|document\.write|insertAdjacentHTML|(?:inner|outer)HTML\s*=",
    )
    .unwrap()
});

/// Creation of a fresh `<link>` or `<meta>` element.
static RE_CREATE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)createElement\(\s*['"](?:link|meta)['"]\s*\)"#).unwrap()
});

static RE_INSERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"appendChild|insertBefore|\.append\(|\.prepend\(|insertAdjacentElement").unwrap()
});

/// Whether a script body is an obsolete metadata patcher.
///
/// A script qualifies when it references the base URL placeholder, when a
/// single statement writes to one of our tags, or when it builds and
/// inserts a new `<link>`/`<meta>` naming one of them.
pub fn is_legacy_script(open_attrs: &str, body: &str) -> bool {
    if attr(open_attrs, "src").is_some() || attr(open_attrs, "id") == Some(REDIRECT_SCRIPT_ID) {
        return false;
    }
    let is_json_ld = attr(open_attrs, "type")
        .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"));
    if is_json_ld {
        return false;
    }

    if body.contains(PLACEHOLDER) {
        return true;
    }

    let patches_owned_tag = body
        .split([';', '\n'])
        .any(|stmt| RE_OWNED_TARGET.is_match(stmt) && RE_SETTER.is_match(stmt));

    patches_owned_tag
        || (RE_CREATE_TAG.is_match(body) && RE_OWNED_TARGET.is_match(body) && RE_INSERT.is_match(body))
}

/// Delete legacy inline scripts wholesale.
pub fn remove_legacy_scripts(html: &str) -> Cow<'_, str> {
    RE_SCRIPT.replace_all(html, |caps: &regex::Captures<'_>| {
        if is_legacy_script(&caps[1], &caps[2]) {
            String::new()
        } else {
            caps[0].to_owned()
        }
    })
}
