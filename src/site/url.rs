//! Canonical and alternate URL resolution.
//!
//! # Path Rules
//!
//! | Page                  | Primary locale  | Other locale (`en`)  |
//! |-----------------------|-----------------|----------------------|
//! | home (`index`)        | `/`             | `/index-en.html`     |
//! | `about`               | `/about.html`   | `/about-en.html`     |
//!
//! When the site's redirect config strips `.html`, the extension is dropped
//! from every emitted path (`/about`, `/index-en`). The primary home is
//! always `/`.

use super::page::{HOME_SLUG, Page, Variants};
use regex::Regex;
use std::sync::LazyLock;

/// Stand-in for the base URL in emitted markup when none is configured yet.
///
/// Substituted during the rewrite, so it never survives into output.
pub const PLACEHOLDER: &str = "__POLYGLOT_BASE_URL__";

/// `hreflang` value for the fallback alternate.
pub const X_DEFAULT: &str = "x-default";

static RE_BASE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<scheme>https?)://(?P<host>[^/\s?#]+)(?P<path>/[^\s?#]*)?$").unwrap()
});

/// A validated absolute base URL, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme: String,
    host: String,
}

impl BaseUrl {
    /// Parse `http(s)://host[/path]`. Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = RE_BASE_URL.captures(input.trim())?;
        let scheme = caps["scheme"].to_owned();
        let host = caps["host"].to_owned();
        let path = caps.name("path").map_or("", |m| m.as_str().trim_end_matches('/'));

        Some(Self {
            url: format!("{scheme}://{host}{path}"),
            scheme,
            host,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// `scheme://host`, the prefix every same-site absolute URL starts with.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Path prefix the site is served under: `""` at the root, else `/docs`.
    pub fn path(&self) -> &str {
        &self.url[self.scheme.len() + "://".len() + self.host.len()..]
    }

    /// Join a site path (`/about`) onto the base.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

/// One `hreflang` alternate: locale tag (or `x-default`) and canonical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: String,
    pub path: String,
}

/// Maps pages to their site paths and URLs.
///
/// Built once per run; the stripping policy is fixed at construction.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    primary: String,
    base: Option<BaseUrl>,
    strip_html: bool,
}

impl UrlResolver {
    pub fn new(primary: impl Into<String>, base: Option<BaseUrl>, strip_html: bool) -> Self {
        Self {
            primary: primary.into(),
            base,
            strip_html,
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn base(&self) -> Option<&BaseUrl> {
        self.base.as_ref()
    }

    pub const fn strips_html(&self) -> bool {
        self.strip_html
    }

    /// Site path of the file a page lives in (the inverse of `classify`).
    pub fn path_for(&self, slug: &str, locale: &str, is_home: bool) -> String {
        let is_primary = locale == self.primary;
        match (slug == HOME_SLUG && is_home, is_primary) {
            (true, true) => "/".to_owned(),
            (true, false) => format!("/{HOME_SLUG}-{locale}.html"),
            (false, true) => format!("/{slug}.html"),
            (false, false) => format!("/{slug}-{locale}.html"),
        }
    }

    /// Path emitted for a page: `path_for` with the stripping policy applied.
    pub fn canonical_path(&self, slug: &str, locale: &str, is_home: bool) -> String {
        let path = self.path_for(slug, locale, is_home);
        if self.strip_html {
            strip_html_ext(&path).to_owned()
        } else {
            path
        }
    }

    pub fn page_path(&self, page: &Page) -> String {
        self.canonical_path(&page.slug, &page.locale, page.is_home)
    }

    /// Absolute URL for a path, or a placeholder-prefixed one without a base URL.
    pub fn abs(&self, path: &str) -> String {
        match &self.base {
            Some(base) => base.join(path),
            None => format!("{PLACEHOLDER}{path}"),
        }
    }

    /// Final URL for a path: absolute with a base URL, site-relative without.
    pub fn public(&self, path: &str) -> String {
        match &self.base {
            Some(base) => base.join(path),
            None => path.to_owned(),
        }
    }

    /// The `hreflang` set of `page` among the variants of its slug.
    ///
    /// One entry per locale that has a page for this slug, a self entry if
    /// `page` is somehow absent, then `x-default` pointing at the primary
    /// locale's variant (or at `page` itself when there is none).
    pub fn alternates(&self, variants: &Variants, page: &Page) -> Vec<Alternate> {
        let mut alternates: Vec<Alternate> = variants
            .values()
            .map(|variant| Alternate {
                hreflang: variant.locale.clone(),
                path: self.page_path(variant),
            })
            .collect();

        if !variants.contains_key(&page.locale) {
            alternates.push(Alternate {
                hreflang: page.locale.clone(),
                path: self.page_path(page),
            });
        }

        let default = variants.get(&self.primary).unwrap_or(page);
        alternates.push(Alternate {
            hreflang: X_DEFAULT.to_owned(),
            path: self.page_path(default),
        });
        alternates
    }

    /// Home-page destinations per locale for the client redirect.
    ///
    /// Same as the alternate set without `x-default`, with the primary
    /// locale always sent to `/`.
    pub fn redirect_targets(&self, variants: &Variants, page: &Page) -> Vec<Alternate> {
        let mut targets = self.alternates(variants, page);
        targets.retain(|alt| alt.hreflang != X_DEFAULT);
        for target in &mut targets {
            if target.hreflang == self.primary {
                target.path = "/".to_owned();
            }
        }
        if !targets.iter().any(|t| t.hreflang == self.primary) {
            targets.push(Alternate {
                hreflang: self.primary.clone(),
                path: "/".to_owned(),
            });
        }
        targets
    }
}

/// Drop a trailing `.html` from a path.
pub fn strip_html_ext(path: &str) -> &str {
    path.strip_suffix(".html").unwrap_or(path)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::page::{PageMap, PageName, classify};

    fn resolver(strip: bool) -> UrlResolver {
        UrlResolver::new("ru", BaseUrl::parse("https://example.com"), strip)
    }

    fn page(slug: &str, locale: &str, is_home: bool) -> Page {
        let name = PageName {
            slug: slug.into(),
            locale: locale.into(),
            is_home,
        };
        Page::new(name, format!("{slug}-{locale}.html").into(), None)
    }

    fn map(entries: &[(&str, &str, bool)]) -> PageMap {
        let mut map = PageMap::new("ru");
        for (slug, locale, home) in entries {
            map.insert(page(slug, locale, *home));
        }
        map
    }

    #[test]
    fn test_base_url_parse() {
        let base = BaseUrl::parse("https://example.com/").unwrap();
        assert_eq!(base.as_str(), "https://example.com");
        assert_eq!(base.origin(), "https://example.com");

        let sub = BaseUrl::parse("http://localhost:8080/docs/").unwrap();
        assert_eq!(sub.as_str(), "http://localhost:8080/docs");
        assert_eq!(sub.origin(), "http://localhost:8080");

        assert!(BaseUrl::parse("example.com").is_none());
        assert!(BaseUrl::parse("ftp://example.com").is_none());
        assert!(BaseUrl::parse("https://").is_none());
    }

    #[test]
    fn test_base_url_path() {
        assert_eq!(BaseUrl::parse("https://example.com/").unwrap().path(), "");
        assert_eq!(BaseUrl::parse("https://example.com/docs/").unwrap().path(), "/docs");
        assert_eq!(BaseUrl::parse("http://localhost:8080/a/b").unwrap().path(), "/a/b");
    }

    #[test]
    fn test_base_url_join_no_double_slash() {
        let base = BaseUrl::parse("https://example.com/").unwrap();
        assert_eq!(base.join("/"), "https://example.com/");
        assert_eq!(base.join("/about"), "https://example.com/about");
    }

    #[test]
    fn test_path_for() {
        let r = resolver(false);
        assert_eq!(r.path_for("index", "ru", true), "/");
        assert_eq!(r.path_for("index", "en", true), "/index-en.html");
        assert_eq!(r.path_for("about", "ru", false), "/about.html");
        assert_eq!(r.path_for("about", "en", false), "/about-en.html");
        assert_eq!(r.path_for("blog/post", "de", false), "/blog/post-de.html");
    }

    #[test]
    fn test_path_for_round_trips_through_classify() {
        let r = resolver(false);
        let triples = [
            ("index", "ru", true),
            ("index", "en", true),
            ("index", "pt-BR", true),
            ("about", "ru", false),
            ("about", "en", false),
            ("my-long-page", "zh-Hans", false),
            ("contact", "es-419", false),
        ];
        for (slug, locale, home) in triples {
            let path = r.path_for(slug, locale, home);
            let stem = if path == "/" {
                "index"
            } else {
                path.trim_start_matches('/').trim_end_matches(".html")
            };
            let name = classify(stem, "ru", &[]);
            assert_eq!(
                (name.slug.as_str(), name.locale.as_str(), name.is_home),
                (slug, locale, home),
                "round trip failed for {path}"
            );
        }
    }

    #[test]
    fn test_canonical_path_stripping() {
        let r = resolver(true);
        assert_eq!(r.canonical_path("index", "ru", true), "/");
        assert_eq!(r.canonical_path("index", "en", true), "/index-en");
        assert_eq!(r.canonical_path("about", "ru", false), "/about");

        let keep = resolver(false);
        assert_eq!(keep.canonical_path("about", "en", false), "/about-en.html");
    }

    #[test]
    fn test_abs_and_public() {
        let r = resolver(true);
        assert_eq!(r.abs("/about"), "https://example.com/about");
        assert_eq!(r.public("/about"), "https://example.com/about");

        let relative = UrlResolver::new("ru", None, true);
        assert_eq!(relative.abs("/about"), format!("{PLACEHOLDER}/about"));
        assert_eq!(relative.public("/about"), "/about");
    }

    #[test]
    fn test_alternates_complete_and_ordered() {
        let r = resolver(true);
        let map = map(&[("about", "ru", false), ("about", "en", false), ("about", "de", false)]);
        let variants = map.variants("about").unwrap();

        for variant in variants.values() {
            let alts = r.alternates(variants, variant);
            let pairs: Vec<_> = alts.iter().map(|a| (a.hreflang.as_str(), a.path.as_str())).collect();
            assert_eq!(
                pairs,
                vec![
                    ("de", "/about-de"),
                    ("en", "/about-en"),
                    ("ru", "/about"),
                    ("x-default", "/about"),
                ]
            );
        }
    }

    #[test]
    fn test_alternates_x_default_falls_back_to_self() {
        let r = resolver(false);
        let map = map(&[("promo", "en", false), ("promo", "de", false)]);
        let variants = map.variants("promo").unwrap();
        let en = &variants["en"];

        let alts = r.alternates(variants, en);
        let x_default = alts.last().unwrap();
        assert_eq!(x_default.hreflang, X_DEFAULT);
        assert_eq!(x_default.path, "/promo-en.html");
    }

    #[test]
    fn test_alternates_adds_missing_self() {
        let r = resolver(false);
        let map = map(&[("about", "ru", false)]);
        let variants = map.variants("about").unwrap();
        let orphan = page("about", "fr", false);

        let alts = r.alternates(variants, &orphan);
        let tags: Vec<_> = alts.iter().map(|a| a.hreflang.as_str()).collect();
        assert_eq!(tags, vec!["ru", "fr", "x-default"]);
    }

    #[test]
    fn test_redirect_targets_force_primary_root() {
        let r = resolver(false);
        let map = map(&[("index", "ru", true), ("index", "en", true)]);
        let variants = map.variants("index").unwrap();

        let targets = r.redirect_targets(variants, &variants["en"]);
        let pairs: Vec<_> = targets.iter().map(|a| (a.hreflang.as_str(), a.path.as_str())).collect();
        assert_eq!(pairs, vec![("en", "/index-en.html"), ("ru", "/")]);
    }

    #[test]
    fn test_redirect_targets_without_primary_home() {
        let r = resolver(true);
        let map = map(&[("index", "en", true)]);
        let variants = map.variants("index").unwrap();

        let targets = r.redirect_targets(variants, &variants["en"]);
        let pairs: Vec<_> = targets.iter().map(|a| (a.hreflang.as_str(), a.path.as_str())).collect();
        assert_eq!(pairs, vec![("en", "/index-en"), ("ru", "/")]);
    }
}
