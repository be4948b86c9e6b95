//! Run orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── Site::load()       ──► page map, URL policy
//!     │
//!     ├── rewrite_pages()    ──► inject::process_page() per page (parallel)
//!     │
//!     └── build_sitemap()    ──► <export root>/sitemap.xml
//! ```

use crate::{
    config::SiteConfig,
    generator::sitemap::build_sitemap,
    inject::{Outcome, process_page},
    log,
    logger::ProgressBars,
    site::{Site, page::Page},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Page counts of one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rewritten: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Rewrite every page of the export root, then emit the sitemap.
pub fn build_site(config: &SiteConfig) -> Result<Summary> {
    let site = Site::load(config)?;

    let summary = match config.build.jobs {
        0 => rewrite_pages(&site),
        jobs => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to build thread pool")?
            .install(|| rewrite_pages(&site)),
    };

    log!(
        "inject";
        "{} rewritten, {} unchanged, {} failed",
        summary.rewritten,
        summary.unchanged,
        summary.failed
    );

    build_sitemap(config, &site)?;
    Ok(summary)
}

/// Run the injector over all pages. Failures are logged and counted.
fn rewrite_pages(site: &Site) -> Summary {
    let pages: Vec<&Page> = site.pages.pages().collect();
    let progress = ProgressBars::new_filtered(&[("inject", pages.len())]);

    let rewritten = AtomicUsize::new(0);
    let unchanged = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    pages.par_iter().for_each(|page| {
        match process_page(site, page) {
            Ok(Outcome::Rewritten) => rewritten.fetch_add(1, Ordering::Relaxed),
            Ok(Outcome::Unchanged) => unchanged.fetch_add(1, Ordering::Relaxed),
            Err(e) => {
                log!("error"; "{}: {:#}", page.relative_path.display(), e);
                failed.fetch_add(1, Ordering::Relaxed)
            }
        };
        if let Some(progress) = &progress {
            progress.inc(0);
        }
    });

    if let Some(progress) = &progress {
        progress.finish();
    }

    Summary {
        rewritten: rewritten.into_inner(),
        unchanged: unchanged.into_inner(),
        failed: failed.into_inner(),
    }
}

/// Print the page × locale matrix without writing anything.
pub fn check_site(config: &SiteConfig) -> Result<()> {
    log!("check"; "{}", config_source(config));
    let site = Site::load(config)?;
    for line in matrix(&site) {
        log!("check"; "{line}");
    }
    log!(
        "check";
        "{} pages, primary `{}`, .html {}",
        site.pages.len(),
        site.urls.primary(),
        if site.urls.strips_html() { "stripped" } else { "kept" }
    );
    Ok(())
}

/// Where the settings came from: the config file, or defaults when it is absent.
fn config_source(config: &SiteConfig) -> String {
    let path = config.config_path.display();
    if config.config_path.is_file() {
        format!("config {path}")
    } else {
        format!("no config file at {path}, using defaults")
    }
}

/// One header row, then one row per slug: its canonical path per locale, `-` when absent.
fn matrix(site: &Site) -> Vec<String> {
    let locales: Vec<&String> = site.pages.locales().iter().collect();
    let width = site
        .pages
        .slugs()
        .map(|(slug, _)| slug.len())
        .max()
        .unwrap_or(0)
        .max("page".len());

    let mut rows = Vec::with_capacity(site.pages.slugs().len() + 1);
    let header: Vec<&str> = locales.iter().map(|l| l.as_str()).collect();
    rows.push(format!("{:<width$}  {}", "page", header.join("  ")));

    for (slug, _) in site.pages.slugs() {
        let cells: Vec<String> = locales
            .iter()
            .map(|locale| {
                site.pages
                    .get(slug, locale)
                    .map_or_else(|| "-".to_owned(), |page| site.urls.page_path(page))
            })
            .collect();
        rows.push(format!("{slug:<width$}  {}", cells.join("  ")));
    }
    rows
}
