//! Sitemap generation.
//!
//! Lists every page with its hreflang alternates, using the same alternate
//! set as the injected `<head>` tags.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://example.com/about</loc>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.8</priority>
//!     <xhtml:link rel="alternate" hreflang="en" href="https://example.com/about-en"/>
//!     <xhtml:link rel="alternate" hreflang="ru" href="https://example.com/about"/>
//!     <xhtml:link rel="alternate" hreflang="x-default" href="https://example.com/about"/>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    log,
    site::{
        Site,
        page::{Page, PageMap},
        url::UrlResolver,
    },
};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{fs, io::Cursor, path::Path};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// XML namespace for `xhtml:link` alternates
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, site: &Site) -> Result<()> {
    if !config.build.sitemap.enable {
        return Ok(());
    }

    let sitemap = Sitemap::from_pages(&site.pages, &site.urls, Utc::now());
    let count = sitemap.urls.len();
    let path = config.sitemap_path();
    sitemap.write(&path)?;

    log!("sitemap"; "{} ({count} urls)", path.display());
    Ok(())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    loc: String,
    /// RFC 3339, UTC, seconds precision
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
    /// `(hreflang, href)` pairs
    alternates: Vec<(String, String)>,
}

impl Sitemap {
    /// One entry per page, in slug then locale order.
    ///
    /// Pages without a recorded mtime get `generated_at` as `lastmod`.
    fn from_pages(pages: &PageMap, urls: &UrlResolver, generated_at: DateTime<Utc>) -> Self {
        let urls = pages
            .slugs()
            .flat_map(|(_, variants)| variants.values().map(move |page| (variants, page)))
            .map(|(variants, page)| {
                let modified = page.modified.map_or(generated_at, DateTime::<Utc>::from);
                UrlEntry {
                    loc: urls.public(&urls.page_path(page)),
                    lastmod: modified.to_rfc3339_opts(SecondsFormat::Secs, true),
                    changefreq: if page.is_home { "daily" } else { "weekly" },
                    priority: priority(page, urls.primary()),
                    alternates: urls
                        .alternates(variants, page)
                        .into_iter()
                        .map(|alt| (alt.hreflang, urls.public(&alt.path)))
                        .collect(),
                }
            })
            .collect();

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        urlset.push_attribute(("xmlns:xhtml", XHTML_NS));
        writer.write_event(Event::Start(urlset))?;

        for entry in &self.urls {
            writer.write_event(Event::Start(BytesStart::new("url")))?;

            write_text(&mut writer, "loc", &entry.loc)?;
            write_text(&mut writer, "lastmod", &entry.lastmod)?;
            write_text(&mut writer, "changefreq", entry.changefreq)?;
            write_text(&mut writer, "priority", entry.priority)?;

            for (hreflang, href) in &entry.alternates {
                let mut link = BytesStart::new("xhtml:link");
                link.push_attribute(("rel", "alternate"));
                link.push_attribute(("hreflang", hreflang.as_str()));
                link.push_attribute(("href", href.as_str()));
                writer.write_event(Event::Empty(link))?;
            }

            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut xml = String::from_utf8(writer.into_inner().into_inner())
            .context("Sitemap is not valid UTF-8")?;
        xml.push('\n');
        Ok(xml)
    }

    /// Write sitemap to output file, overwriting.
    fn write(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// `1.0` primary home, `0.9` other home, `0.8` primary page, `0.7` other page.
fn priority(page: &Page, primary: &str) -> &'static str {
    match (page.is_home, page.locale == primary) {
        (true, true) => "1.0",
        (true, false) => "0.9",
        (false, true) => "0.8",
        (false, false) => "0.7",
    }
}

fn write_text<W: std::io::Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
