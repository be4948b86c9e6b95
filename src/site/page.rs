//! Page model: filename classification and the slug × locale page map.
//!
//! Exported pages carry their identity in the filename:
//!
//! | File                | Slug     | Locale    | Home |
//! |---------------------|----------|-----------|------|
//! | `index.html`        | `index`  | primary   | yes  |
//! | `index-en.html`     | `index`  | `en`      | yes  |
//! | `about-pt-BR.html`  | `about`  | `pt-BR`   | no   |
//! | `about.html`        | `about`  | primary   | no   |
//! | `blog/post-en.html` | `blog/post` | `en`   | no   |
//!
//! [`UrlResolver::path_for`](super::url::UrlResolver::path_for) is the exact
//! inverse of [`classify`].

use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet, btree_map},
    path::{Path, PathBuf},
    sync::LazyLock,
    time::SystemTime,
};

/// Slug shared by every locale's home page.
pub const HOME_SLUG: &str = "index";

/// Locale suffix grammar: language subtag, optionally followed by a region
/// (`BR`, `419`) or script (`Hans`) subtag.
static RE_LOCALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(?:-(?:[A-Z]{2}|[0-9]{3}|[A-Z][a-z]{3}))?$").unwrap()
});

/// Check whether `tag` is shaped like a locale tag (`en`, `pt-BR`, `zh-Hans`).
pub fn is_locale_tag(tag: &str) -> bool {
    RE_LOCALE.is_match(tag)
}

/// Identity derived from a page filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageName {
    pub slug: String,
    pub locale: String,
    pub is_home: bool,
}

/// Classify a root-level basename (extension already stripped).
///
/// `allowed` restricts which suffixes count as locales; empty accepts any
/// tag-shaped suffix.
pub fn classify(stem: &str, primary: &str, allowed: &[String]) -> PageName {
    if stem == HOME_SLUG {
        return PageName {
            slug: HOME_SLUG.to_owned(),
            locale: primary.to_owned(),
            is_home: true,
        };
    }

    match split_locale(stem, allowed) {
        Some((HOME_SLUG, locale)) => PageName {
            slug: HOME_SLUG.to_owned(),
            locale: locale.to_owned(),
            is_home: true,
        },
        Some((slug, locale)) => PageName {
            slug: slug.to_owned(),
            locale: locale.to_owned(),
            is_home: false,
        },
        None => PageName {
            slug: stem.to_owned(),
            locale: primary.to_owned(),
            is_home: false,
        },
    }
}

/// Classify a path relative to the export root.
///
/// Returns `None` for non-`.html` files. Directory components are kept as a
/// slug prefix; only root-level `index*` files are home pages.
pub fn classify_path(relative: &Path, primary: &str, allowed: &[String]) -> Option<PageName> {
    let is_html = relative
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
    if !is_html {
        return None;
    }
    let stem = relative.file_stem()?.to_str()?;

    let dir: Vec<&str> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    if dir.is_empty() {
        return Some(classify(stem, primary, allowed));
    }

    let prefix = dir.join("/");
    let (slug, locale) = split_locale(stem, allowed).unwrap_or((stem, primary));
    Some(PageName {
        slug: format!("{prefix}/{slug}"),
        locale: locale.to_owned(),
        is_home: false,
    })
}

/// Split `<slug>-<locale>`, preferring the shortest slug (longest locale).
fn split_locale<'a>(stem: &'a str, allowed: &[String]) -> Option<(&'a str, &'a str)> {
    stem.match_indices('-')
        .map(|(pos, _)| (&stem[..pos], &stem[pos + 1..]))
        .find(|(slug, locale)| {
            !slug.is_empty()
                && if allowed.is_empty() {
                    is_locale_tag(locale)
                } else {
                    allowed.iter().any(|tag| tag == locale)
                }
        })
}

// ============================================================================
// Page Map
// ============================================================================

/// One exported HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub slug: String,
    pub locale: String,
    /// Path relative to the export root.
    pub relative_path: PathBuf,
    pub is_home: bool,
    /// File mtime captured at scan time.
    pub modified: Option<SystemTime>,
}

impl Page {
    pub fn new(name: PageName, relative_path: PathBuf, modified: Option<SystemTime>) -> Self {
        Self {
            slug: name.slug,
            locale: name.locale,
            relative_path,
            is_home: name.is_home,
            modified,
        }
    }
}

/// Locale variants of one slug, keyed by locale.
pub type Variants = BTreeMap<String, Page>;

/// All pages keyed by slug then locale, plus the set of discovered locales.
///
/// Sorted maps keep every iteration (and so every emitted document) in a
/// stable order.
#[derive(Debug, Clone, Default)]
pub struct PageMap {
    slugs: BTreeMap<String, Variants>,
    locales: BTreeSet<String>,
}

impl PageMap {
    /// Create an empty map whose locale set already holds the primary locale.
    pub fn new(primary: &str) -> Self {
        Self {
            slugs: BTreeMap::new(),
            locales: BTreeSet::from([primary.to_owned()]),
        }
    }

    /// Insert a page, returning the page it replaced (same slug and locale).
    pub fn insert(&mut self, page: Page) -> Option<Page> {
        self.locales.insert(page.locale.clone());
        self.slugs
            .entry(page.slug.clone())
            .or_default()
            .insert(page.locale.clone(), page)
    }

    pub fn get(&self, slug: &str, locale: &str) -> Option<&Page> {
        self.slugs.get(slug)?.get(locale)
    }

    /// All locale variants of a slug.
    pub fn variants(&self, slug: &str) -> Option<&Variants> {
        self.slugs.get(slug)
    }

    pub fn slugs(&self) -> btree_map::Iter<'_, String, Variants> {
        self.slugs.iter()
    }

    /// Every page, in slug then locale order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.slugs.values().flat_map(BTreeMap::values)
    }

    pub fn locales(&self) -> &BTreeSet<String> {
        &self.locales
    }

    pub fn len(&self) -> usize {
        self.slugs.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
