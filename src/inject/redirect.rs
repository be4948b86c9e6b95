//! Locale-aware client redirect for home pages.
//!
//! A visitor landing on the site root (or any `index*` page directly under
//! it) is sent once to the home page matching their browser language. When
//! the base URL carries a path (`https://example.com/docs`), both the guard
//! and the targets live under that path. The choice is remembered in a
//! cookie so the visitor can switch languages freely afterwards.

use super::PageContext;
use super::tags::RE_HEAD_OPEN;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// `id` of the injected `<script>`, used to find and replace it on reruns.
pub const REDIRECT_SCRIPT_ID: &str = "polyglot-locale-redirect";

/// Cookie recording that the visitor was already redirected.
pub const REDIRECT_COOKIE: &str = "polyglot_locale";

static RE_REDIRECT_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?is)(?:\r?\n)?<script\b[^>]*\bid\s*=\s*["']?{REDIRECT_SCRIPT_ID}["']?[^>]*>.*?</script\s*>"#
    ))
    .unwrap()
});

const SCRIPT_TEMPLATE: &str = r#"(function () {
  var targets = __TARGETS__;
  var primary = __PRIMARY__;
  var base = __BASE__;
  var cookie = "__COOKIE__";
  if (/bot|crawl|spider|slurp|mediapartners|facebookexternalhit|embedly|pinterest|vkshare|telegrambot|whatsapp|lighthouse/i.test(navigator.userAgent)) return;
  if (document.cookie.split(/;\s*/).some(function (c) { return c.indexOf(cookie + "=") === 0; })) return;
  var path = location.pathname;
  if (path.indexOf(base) !== 0) return;
  var rest = path.slice(base.length) || "/";
  if (!/^\/(?:index[^\/]*)?$/.test(rest)) return;
  var norm = function (p) { return p.replace(/index\.html$/, "").replace(/\.html$/, "") || "/"; };
  var langs = navigator.languages && navigator.languages.length ? navigator.languages : [navigator.language || ""];
  var keys = Object.keys(targets);
  var pick = null;
  for (var i = 0; i < langs.length && !pick; i++) {
    var tag = String(langs[i]).toLowerCase();
    var lang = tag.split("-")[0];
    pick = keys.filter(function (k) { return k.toLowerCase() === tag; })[0]
      || keys.filter(function (k) { return k.toLowerCase().split("-")[0] === lang; })[0]
      || null;
  }
  var locale = pick || primary;
  var dest = targets[locale] || base + "/";
  if (norm(dest.slice(base.length) || "/") === norm(rest)) return;
  document.cookie = cookie + "=" + encodeURIComponent(locale) + "; path=" + base + "/; max-age=31536000; samesite=lax";
  location.replace(dest);
})();"#;

/// Render the redirect script body for a home page.
///
/// Targets are browser paths, so they carry the base URL's path prefix.
pub fn script_body(ctx: &PageContext<'_>) -> String {
    let urls = ctx.urls;
    let base_path = urls.base().map_or("", |base| base.path());
    let targets: Map<String, Value> = urls
        .redirect_targets(ctx.variants, ctx.page)
        .into_iter()
        .map(|target| (target.hreflang, Value::String(format!("{base_path}{}", target.path))))
        .collect();

    let targets = Value::Object(targets).to_string().replace("</", "<\\/");
    let primary = Value::String(urls.primary().to_owned()).to_string();
    let base = Value::String(base_path.to_owned()).to_string().replace("</", "<\\/");

    SCRIPT_TEMPLATE
        .replace("__TARGETS__", &targets)
        .replace("__PRIMARY__", &primary)
        .replace("__BASE__", &base)
        .replace("__COOKIE__", REDIRECT_COOKIE)
}

/// Replace the redirect script of a home page; other pages pass through.
///
/// Skipped when the document has no `<head>`.
pub fn inject_redirect(html: &str, ctx: &PageContext<'_>) -> String {
    if !ctx.page.is_home {
        return html.to_owned();
    }

    let html = RE_REDIRECT_SCRIPT.replace_all(html, "");
    let Some(head) = RE_HEAD_OPEN.find(&html) else {
        return html.into_owned();
    };

    let script = format!(
        "\n<script id=\"{REDIRECT_SCRIPT_ID}\">\n{}\n</script>",
        script_body(ctx)
    );
    let mut out = String::with_capacity(html.len() + script.len());
    out.push_str(&html[..head.end()]);
    out.push_str(&script);
    out.push_str(&html[head.end()..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::tests::{context, fixture};

    #[test]
    fn test_targets_table() {
        let fx = fixture(Some("https://example.com"), true);
        let body = script_body(&context(&fx, "index", "en"));

        assert!(body.contains(r#"var targets = {"en":"/index-en","ru":"/"};"#));
        assert!(body.contains(r#"var primary = "ru";"#));
        assert!(body.contains(r#"var base = "";"#));
        assert!(body.contains(REDIRECT_COOKIE));
        assert!(!body.contains("__"));
    }

    #[test]
    fn test_targets_under_base_path() {
        let fx = fixture(Some("https://example.com/docs/"), true);
        let body = script_body(&context(&fx, "index", "ru"));

        assert!(body.contains(r#"var targets = {"en":"/docs/index-en","ru":"/docs/"};"#));
        assert!(body.contains(r#"var base = "/docs";"#));
        assert!(!body.contains("__"));
    }

    #[test]
    fn test_inserted_after_head_open() {
        let fx = fixture(Some("https://example.com"), false);
        let ctx = context(&fx, "index", "ru");

        let out = inject_redirect("<html><head lang=\"ru\">\n<title>t</title></head></html>", &ctx);
        let expected_start = format!("<html><head lang=\"ru\">\n<script id=\"{REDIRECT_SCRIPT_ID}\">\n(function");
        assert!(out.starts_with(&expected_start));
        assert!(out.ends_with("})();\n</script>\n<title>t</title></head></html>"));
        assert!(out.contains(r#""en":"/index-en.html""#));
    }

    #[test]
    fn test_rerun_replaces_previous_script() {
        let fx = fixture(Some("https://example.com"), true);
        let ctx = context(&fx, "index", "ru");

        let once = inject_redirect("<head>\n<meta charset=\"utf-8\"></head>", &ctx);
        let twice = inject_redirect(&once, &ctx);
        assert_eq!(once, twice);
        assert_eq!(twice.matches(REDIRECT_SCRIPT_ID).count(), 1);
    }

    #[test]
    fn test_non_home_pages_untouched() {
        let fx = fixture(Some("https://example.com"), true);
        let html = "<head></head>";
        assert_eq!(inject_redirect(html, &context(&fx, "about", "en")), html);
    }

    #[test]
    fn test_skipped_without_head() {
        let fx = fixture(Some("https://example.com"), true);
        let html = "<p>no head here</p>";
        assert_eq!(inject_redirect(html, &context(&fx, "index", "ru")), html);
    }
}
