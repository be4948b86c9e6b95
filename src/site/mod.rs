//! Site model: the pages of an export root and how they map to URLs.
//!
//! # Architecture
//!
//! ```text
//! Site::load()
//!     │
//!     ├── scan::scan_pages()  ──► PageMap (slug → locale → Page) + locale set
//!     │
//!     ├── policy::detect()    ──► strip `.html`?  (read once from redirect configs)
//!     │
//!     └── UrlResolver::new()  ──► canonical paths, hreflang alternates
//! ```
//!
//! A `Site` is immutable once loaded; page rewrites and the sitemap only
//! read from it.

pub mod locale;
pub mod page;
pub mod policy;
pub mod scan;
pub mod url;

use crate::{config::SiteConfig, config::WwwMode, log};
use anyhow::{Result, bail};
use page::{Page, PageMap, Variants};
use std::path::PathBuf;
use thiserror::Error;
use url::{BaseUrl, UrlResolver};

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("export directory `{0}` does not exist")]
    ExportDirMissing(PathBuf),

    #[error("no HTML pages found under `{0}`")]
    NoPages(PathBuf),
}

/// The loaded export root.
#[derive(Debug)]
pub struct Site {
    pub root: PathBuf,
    pub pages: PageMap,
    pub urls: UrlResolver,
}

impl Site {
    /// Scan the export root and resolve the URL policy.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let root = config.export_root();
        if !root.is_dir() {
            bail!(SiteError::ExportDirMissing(root.to_path_buf()));
        }

        let primary = &config.base.language;
        let pages = scan::scan_pages(root, primary, &config.base.locales);
        if pages.is_empty() {
            bail!(SiteError::NoPages(root.to_path_buf()));
        }
        log!("scan"; "{} pages, locales: {}", pages.len(), join(pages.locales()));

        let strip_html = match policy::detect(&config.redirect_config_paths()) {
            Some(path) => {
                log!("policy"; "stripping .html (rule found in {})", path.display());
                true
            }
            None => false,
        };

        let base = config.base.url.as_deref().and_then(BaseUrl::parse);
        if base.is_none() {
            log!("policy"; "no base url, emitting site-relative urls");
        }
        if config.base.www != WwwMode::Keep {
            log!("policy"; "www mode: {}", config.base.www.as_str());
        }

        Ok(Self {
            root: root.to_path_buf(),
            urls: UrlResolver::new(primary.clone(), base, strip_html),
            pages,
        })
    }

    /// Locale variants of the slug `page` belongs to.
    pub fn variants_of(&self, page: &Page) -> Option<&Variants> {
        self.pages.variants(&page.slug)
    }

    /// Absolute filesystem path of a page.
    pub fn file_path(&self, page: &Page) -> PathBuf {
        self.root.join(&page.relative_path)
    }
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
