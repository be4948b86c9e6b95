//! JSON-LD structured data normalization.
//!
//! Every `application/ld+json` block is parsed into a [`serde_json::Value`]
//! and walked by a [`Normalizer`]. Page-level nodes get `inLanguage` and
//! their same-site URLs pinned to the canonical URL. A block is
//! re-serialized only when a field changed; otherwise (and for malformed
//! JSON) its bytes are left alone.

use regex::Regex;
use serde_json::{Map, Value};
use std::{borrow::Cow, sync::LazyLock};

/// Schema.org types describing the page itself.
const PAGE_TYPES: &[&str] = &[
    "WebPage",
    "AboutPage",
    "ContactPage",
    "CollectionPage",
    "FAQPage",
    "ItemPage",
    "ProfilePage",
    "QAPage",
    "SearchResultsPage",
    "CheckoutPage",
    "MedicalWebPage",
    "RealEstateListing",
    "Article",
    "BlogPosting",
    "NewsArticle",
    "TechArticle",
];

/// Keys whose same-site URL values are pinned to the canonical URL.
const URL_KEYS: &[&str] = &["url", "@id", "mainEntityOfPage"];

static RE_JSON_LD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)(<script\b[^>]*\btype\s*=\s*["']?application/ld\+json["']?[^>]*>)(.*?)(</script\s*>)"#,
    )
    .unwrap()
});

/// Visitor that normalizes page-level nodes in place.
pub struct Normalizer<'a> {
    locale: &'a str,
    canonical: &'a str,
    /// `scheme://host` of the site; `None` disables URL rewriting.
    origin: Option<&'a str>,
    changed: bool,
}

impl<'a> Normalizer<'a> {
    pub fn new(locale: &'a str, canonical: &'a str, origin: Option<&'a str>) -> Self {
        Self {
            locale,
            canonical,
            origin,
            changed: false,
        }
    }

    pub const fn changed(&self) -> bool {
        self.changed
    }

    /// Walk a value tree depth-first.
    pub fn visit(&mut self, value: &mut Value) {
        match value {
            Value::Array(items) => items.iter_mut().for_each(|item| self.visit(item)),
            Value::Object(node) => {
                if is_page_node(node) {
                    self.normalize(node);
                }
                node.values_mut().for_each(|child| self.visit(child));
            }
            _ => {}
        }
    }

    fn normalize(&mut self, node: &mut Map<String, Value>) {
        if !node.contains_key("inLanguage") {
            node.insert("inLanguage".into(), Value::String(self.locale.to_owned()));
            self.changed = true;
        }

        let Some(origin) = self.origin else {
            return;
        };
        for key in URL_KEYS {
            let Some(Value::String(current)) = node.get_mut(*key) else {
                continue;
            };
            if !is_same_site(current, origin) {
                continue;
            }
            let target = match current.split_once('#') {
                Some((_, fragment)) if *key == "@id" => format!("{}#{fragment}", self.canonical),
                _ => self.canonical.to_owned(),
            };
            if *current != target {
                *current = target;
                self.changed = true;
            }
        }
    }
}

/// Whether a node's `@type` (string or array) names a page type.
fn is_page_node(node: &Map<String, Value>) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => PAGE_TYPES.contains(&t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| PAGE_TYPES.contains(&t)),
        _ => false,
    }
}

/// `url` starts with `origin` followed by a path, query, fragment or nothing.
fn is_same_site(url: &str, origin: &str) -> bool {
    url.strip_prefix(origin)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}

/// Normalize one JSON-LD body; `None` when malformed or unchanged.
pub fn normalize_block(body: &str, normalizer: &mut Normalizer<'_>) -> Option<String> {
    let mut value: Value = serde_json::from_str(body.trim()).ok()?;
    normalizer.visit(&mut value);
    if !normalizer.changed() {
        return None;
    }
    let json = serde_json::to_string_pretty(&value).ok()?;
    // keep a literal "</script>" inside strings from closing the block
    Some(json.replace("</", "<\\/"))
}

/// Normalize every JSON-LD block of a page.
///
/// `canonical` is the final canonical URL; `origin` is `None` without a base URL.
pub fn normalize_json_ld<'h>(
    html: &'h str,
    locale: &str,
    canonical: &str,
    origin: Option<&str>,
) -> Cow<'h, str> {
    RE_JSON_LD.replace_all(html, |caps: &regex::Captures<'_>| {
        let mut normalizer = Normalizer::new(locale, canonical, origin);
        match normalize_block(&caps[2], &mut normalizer) {
            Some(json) => format!("{}\n{json}\n{}", &caps[1], &caps[3]),
            None => caps[0].to_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "https://example.com/about";
    const ORIGIN: Option<&str> = Some("https://example.com");

    fn ld(json: &str) -> String {
        format!(r#"<script type="application/ld+json">{json}</script>"#)
    }

    fn body_of(html: &str) -> Value {
        let caps = RE_JSON_LD.captures(html).unwrap();
        serde_json::from_str(caps[2].trim()).unwrap()
    }

    #[test]
    fn test_same_host_url_rewritten() {
        let html = ld(r#"{"@type":"WebPage","url":"https://example.com/about.html","inLanguage":"ru"}"#);
        let out = normalize_json_ld(&html, "ru", CANONICAL, ORIGIN);
        assert_eq!(body_of(&out)["url"], CANONICAL);
    }

    #[test]
    fn test_other_host_untouched() {
        let html = ld(r#"{"@type":"WebPage","url":"https://other.org/about","inLanguage":"ru"}"#);
        assert_eq!(normalize_json_ld(&html, "ru", CANONICAL, ORIGIN), html);

        // lookalike host is not the same site
        let html = ld(r#"{"@type":"WebPage","url":"https://example.com.evil.org/","inLanguage":"ru"}"#);
        assert_eq!(normalize_json_ld(&html, "ru", CANONICAL, ORIGIN), html);
    }

    #[test]
    fn test_malformed_json_byte_identical() {
        let html = ld(r#"{"@type":"WebPage","url": "https://example.com/",,}"#);
        assert_eq!(normalize_json_ld(&html, "ru", CANONICAL, ORIGIN), html);
    }

    #[test]
    fn test_in_language_added_once() {
        let html = ld(r#"{"@type":"Article","headline":"x"}"#);
        let out = normalize_json_ld(&html, "en", CANONICAL, ORIGIN);
        assert_eq!(body_of(&out)["inLanguage"], "en");
        // already normalized: left byte-identical
        assert_eq!(normalize_json_ld(&out, "en", CANONICAL, ORIGIN), out);
    }

    #[test]
    fn test_existing_in_language_kept() {
        let html = ld(r#"{"@type":"WebPage","inLanguage":"de"}"#);
        assert_eq!(normalize_json_ld(&html, "en", CANONICAL, ORIGIN), html);
    }

    #[test]
    fn test_non_page_types_untouched() {
        let html = ld(r#"{"@type":"Organization","url":"https://example.com/"}"#);
        assert_eq!(normalize_json_ld(&html, "en", CANONICAL, ORIGIN), html);
    }

    #[test]
    fn test_website_node_untouched() {
        // describes the whole site, not this page
        let html = ld(r#"{"@type":"WebSite","url":"https://example.com/"}"#);
        assert_eq!(normalize_json_ld(&html, "en", CANONICAL, ORIGIN), html);
    }

    #[test]
    fn test_graph_and_type_arrays() {
        let html = ld(
            r#"{"@context":"https://schema.org","@graph":[
                {"@type":"Organization","@id":"https://example.com/#org","url":"https://example.com/"},
                {"@type":["WebPage","ItemPage"],"@id":"https://example.com/#webpage","url":"https://example.com/","mainEntityOfPage":"https://example.com/x"}
            ]}"#,
        );
        let out = normalize_json_ld(&html, "ru", CANONICAL, ORIGIN);
        let value = body_of(&out);
        let org = &value["@graph"][0];
        let page = &value["@graph"][1];

        assert_eq!(org["url"], "https://example.com/");
        assert!(org.get("inLanguage").is_none());
        assert_eq!(page["url"], CANONICAL);
        assert_eq!(page["@id"], "https://example.com/about#webpage");
        assert_eq!(page["mainEntityOfPage"], CANONICAL);
        assert_eq!(page["inLanguage"], "ru");
    }

    #[test]
    fn test_key_order_preserved() {
        let html = ld(r#"{"@context":"https://schema.org","@type":"WebPage","name":"n"}"#);
        let out = normalize_json_ld(&html, "ru", CANONICAL, ORIGIN);
        let keys: Vec<_> = body_of(&out).as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["@context", "@type", "name", "inLanguage"]);
    }

    #[test]
    fn test_no_origin_only_sets_language() {
        let html = ld(r#"{"@type":"WebPage","url":"https://example.com/about.html"}"#);
        let out = normalize_json_ld(&html, "ru", "/about", None);
        let value = body_of(&out);
        assert_eq!(value["url"], "https://example.com/about.html");
        assert_eq!(value["inLanguage"], "ru");
    }

    #[test]
    fn test_script_close_escaped() {
        let html = ld(r#"{"@type":"WebPage","name":"a<\/script>b"}"#);
        let out = normalize_json_ld(&html, "ru", CANONICAL, ORIGIN);
        assert_eq!(out.matches("</script>").count(), 1);
        assert!(out.contains(r"a<\/script>b"));
    }
}
