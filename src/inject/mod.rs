//! In-place metadata rewrite of exported pages.
//!
//! # Pipeline
//!
//! Every page goes through the same ordered steps. Each one is a pure
//! string transform, so the pipeline is idempotent: a second run over its
//! own output changes nothing.
//!
//! | Step | Module        | Effect                                              |
//! |------|---------------|-----------------------------------------------------|
//! | 1    | `escape`      | `&amp;amp;` → `&amp;` in titles and text metas      |
//! | 2    | `stale`       | drop canonical/hreflang/url/locale tags             |
//! | 3-5  | `head`        | emit canonical, social URLs, locales, hreflang      |
//! | 6    | `image`       | absolute `og:image` / `twitter:image`               |
//! | 7    | `legacy`      | delete inline scripts patching those tags           |
//! | 8    | `placeholder` | resolve `__POLYGLOT_BASE_URL__`                     |
//! | 9    | `jsonld`      | `inLanguage` + canonical URLs in page-level nodes   |
//! | 10   | `redirect`    | locale redirect script (home pages only)            |
//!
//! Legacy scripts are removed before placeholder substitution so scripts
//! referencing the placeholder can still be recognized.

pub mod escape;
pub mod head;
pub mod image;
pub mod jsonld;
pub mod legacy;
pub mod placeholder;
pub mod redirect;
pub mod stale;
pub mod tags;

use crate::site::{
    Site,
    page::{Page, Variants},
    url::{BaseUrl, UrlResolver},
};
use anyhow::{Context, Result};
use std::fs;

/// Everything a rewrite step may know about the page being processed.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub page: &'a Page,
    /// All locale variants of the page's slug, the page included.
    pub variants: &'a Variants,
    pub urls: &'a UrlResolver,
}

/// Result of processing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rewritten,
    Unchanged,
}

/// Run the full pipeline over one document.
pub fn rewrite(html: &str, ctx: &PageContext<'_>) -> String {
    let base = ctx.urls.base();

    let html = escape::undouble_escape(html);
    let html = stale::strip_generated_tags(&html);
    let html = head::inject_metadata(&html, ctx);
    let html = image::absolutize_images(&html, base);
    let html = legacy::remove_legacy_scripts(&html);
    let html = placeholder::substitute(&html, base);

    let canonical = ctx.urls.public(&ctx.urls.page_path(ctx.page));
    let origin = base.map(BaseUrl::origin);
    let html = jsonld::normalize_json_ld(&html, &ctx.page.locale, &canonical, origin.as_deref());

    redirect::inject_redirect(&html, ctx)
}

/// Rewrite one page file, writing it back only when the text changed.
pub fn process_page(site: &Site, page: &Page) -> Result<Outcome> {
    let path = site.file_path(page);
    let variants = site
        .variants_of(page)
        .with_context(|| format!("Page `{}` is missing from the page map", page.slug))?;

    let html = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let ctx = PageContext {
        page,
        variants,
        urls: &site.urls,
    };
    let output = rewrite(&html, &ctx);
    if output == html {
        return Ok(Outcome::Unchanged);
    }

    fs::write(&path, output).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Outcome::Rewritten)
}

// ============================================================================
// Tests
// ============================================================================
