//! Extension-stripping policy detection.
//!
//! The webserver config step runs before us and may already serve pages
//! without `.html` (`/about` instead of `/about.html`). When any of its
//! outputs carries such a rule, every URL we emit drops the extension too,
//! so canonicals never point at a redirect.

use regex::RegexSet;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Signatures of a site-wide "serve pages without `.html`" rule across server configs.
///
/// Each one needs a capture carried over to the target, so one-off
/// redirects like `^old\.html$ /new.html` never count.
static STRIP_SIGNATURES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // Apache: RewriteCond %{REQUEST_FILENAME}.html -f
        r"(?im)^\s*RewriteCond\s+%\{REQUEST_FILENAME\}\.html\s+-f",
        // Apache: RewriteRule ^(.*)\.html$ /$1 [R=301,L]
        r"(?im)^\s*RewriteRule\s+\^?/?\((?:\.\*|\.\+\??|\[\^[^\]]*\]\+)\)\\\.html\$?\s+/?\$1(?:\s|$)",
        // Apache: RewriteRule ^([^.]+)$ $1.html [NC,L]
        r"(?im)^\s*RewriteRule\s+\^?/?\((?:\.\*|\.\+\??|\[\^[^\]]*\]\+)\)\$?\s+/?\$1\.html\b",
        // Apache: RewriteCond %{THE_REQUEST} \s/+(.+?)\.html[\s?]
        r"(?im)^\s*RewriteCond\s+%\{THE_REQUEST\}\s+\S*\(\.[*+]\??\)\\\.html",
        // nginx: try_files $uri $uri.html ...
        r"(?i)try_files\s+\$uri\s+\$uri\.html",
        // nginx: rewrite ^/(.*)\.html$ /$1 permanent;
        r"(?im)^\s*rewrite\s+\^/\((?:\.\*|\.\+\??)\)\\\.html\$?\s+/\$1[\s;]",
        // Netlify / Cloudflare _redirects: /*.html /:splat 301
        r"(?m)^\s*/\*\.html\s+/:splat\s+30[178]\b",
        // netlify.toml
        r"(?i)pretty_urls\s*=\s*true",
        // vercel.json
        r#"(?i)"cleanUrls"\s*:\s*true"#,
    ])
    .unwrap()
});

/// Check whether redirect-config text carries a `.html`-stripping rule.
pub fn strips_html(content: &str) -> bool {
    STRIP_SIGNATURES.is_match(content)
}

/// Inspect candidate redirect configs; returns the first one that strips `.html`.
///
/// Missing or unreadable files are skipped.
pub fn detect(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .find(|path| {
            fs::read_to_string(path)
                .map(|content| strips_html(&content))
                .unwrap_or(false)
        })
        .map(PathBuf::as_path)
}
