//! Export tree scanning.
//!
//! Walks the export root, classifies every `.html` file and fills a
//! [`PageMap`]. Files are visited in lexical relative-path order, so when two
//! files claim the same slug and locale the later path wins on every run.

use super::page::{Page, PageMap, classify_path};
use crate::log;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Collect every `.html` file under `root` as a path relative to it, sorted.
pub fn collect_html_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
        })
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}

/// Build the page map for an export root.
pub fn scan_pages(root: &Path, primary: &str, allowed: &[String]) -> PageMap {
    let mut pages = PageMap::new(primary);

    for relative in collect_html_files(root) {
        let Some(name) = classify_path(&relative, primary, allowed) else {
            continue;
        };
        let modified = fs::metadata(root.join(&relative))
            .and_then(|meta| meta.modified())
            .ok();

        let page = Page::new(name, relative, modified);
        let key = format!("{}@{}", page.slug, page.locale);
        let path = page.relative_path.display().to_string();

        if let Some(replaced) = pages.insert(page) {
            log!("warn"; "{key}: {} overrides {}", path, replaced.relative_path.display());
        }
    }

    pages
}
