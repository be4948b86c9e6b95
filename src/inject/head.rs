//! Canonical, Open Graph/Twitter URL and hreflang block.
//!
//! Emitted one tag per line immediately before `</head>`:
//!
//! ```html
//! <link rel="canonical" href="https://example.com/about">
//! <meta property="og:url" content="https://example.com/about">
//! <meta name="twitter:url" content="https://example.com/about">
//! <meta property="og:locale" content="ru_RU">
//! <meta property="og:locale:alternate" content="en_US">
//! <link rel="alternate" hreflang="en" href="https://example.com/about-en">
//! <link rel="alternate" hreflang="ru" href="https://example.com/about">
//! <link rel="alternate" hreflang="x-default" href="https://example.com/about">
//! ```

use super::PageContext;
use super::tags::{escape_attr, insert_before_head_close};
use crate::site::{locale::og_locale, url::X_DEFAULT};
use std::fmt::Write;

/// Build the metadata block for a page.
pub fn metadata_block(ctx: &PageContext<'_>) -> String {
    let urls = ctx.urls;
    let canonical = escape_attr(&urls.abs(&urls.page_path(ctx.page)));
    let alternates = urls.alternates(ctx.variants, ctx.page);
    let own_og = og_locale(&ctx.page.locale);

    let mut block = String::with_capacity(256 + alternates.len() * 96);
    let _ = writeln!(block, r#"<link rel="canonical" href="{canonical}">"#);
    let _ = writeln!(block, r#"<meta property="og:url" content="{canonical}">"#);
    let _ = writeln!(block, r#"<meta name="twitter:url" content="{canonical}">"#);
    let _ = writeln!(block, r#"<meta property="og:locale" content="{own_og}">"#);

    let mut seen = vec![own_og];
    for alt in &alternates {
        if alt.hreflang == X_DEFAULT || alt.hreflang == ctx.page.locale {
            continue;
        }
        let og = og_locale(&alt.hreflang);
        if !seen.contains(&og) {
            seen.push(og);
            let _ = writeln!(block, r#"<meta property="og:locale:alternate" content="{og}">"#);
        }
    }

    for alt in &alternates {
        let _ = writeln!(
            block,
            r#"<link rel="alternate" hreflang="{}" href="{}">"#,
            escape_attr(&alt.hreflang),
            escape_attr(&urls.abs(&alt.path)),
        );
    }
    block
}

/// Insert the metadata block before `</head>` (or at the end of the document).
pub fn inject_metadata(html: &str, ctx: &PageContext<'_>) -> String {
    insert_before_head_close(html, &metadata_block(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::tests::{fixture, context};
    use crate::site::url::PLACEHOLDER;

    #[test]
    fn test_block_for_primary_page() {
        let fx = fixture(Some("https://example.com"), true);
        let ctx = context(&fx, "about", "ru");
        let block = metadata_block(&ctx);

        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"<link rel="canonical" href="https://example.com/about">"#,
                r#"<meta property="og:url" content="https://example.com/about">"#,
                r#"<meta name="twitter:url" content="https://example.com/about">"#,
                r#"<meta property="og:locale" content="ru_RU">"#,
                r#"<meta property="og:locale:alternate" content="en_US">"#,
                r#"<link rel="alternate" hreflang="en" href="https://example.com/about-en">"#,
                r#"<link rel="alternate" hreflang="ru" href="https://example.com/about">"#,
                r#"<link rel="alternate" hreflang="x-default" href="https://example.com/about">"#,
            ]
        );
    }

    #[test]
    fn test_og_alternates_deduplicated_by_mapped_value() {
        let fx = crate::inject::tests::fixture_with(
            Some("https://example.com"),
            false,
            &["post.html", "post-en.html", "post-xx.html", "post-pt-BR.html"],
        );
        let ctx = context(&fx, "post", "pt-BR");
        let block = metadata_block(&ctx);

        assert!(block.contains(r#"<meta property="og:locale" content="pt_BR">"#));
        // "en" and unmapped "xx" both map to en_US
        assert_eq!(block.matches(r#"og:locale:alternate" content="en_US""#).count(), 1);
        assert!(block.contains(r#"og:locale:alternate" content="ru_RU""#));
        assert!(!block.contains(r#"og:locale:alternate" content="pt_BR""#));
    }

    #[test]
    fn test_block_without_base_url_uses_placeholder() {
        let fx = fixture(None, false);
        let ctx = context(&fx, "about", "en");
        let block = metadata_block(&ctx);

        assert!(block.contains(&format!(r#"<link rel="canonical" href="{PLACEHOLDER}/about-en.html">"#)));
        assert!(block.contains(&format!(r#"hreflang="x-default" href="{PLACEHOLDER}/about.html""#)));
    }

    #[test]
    fn test_inject_metadata_position() {
        let fx = fixture(Some("https://example.com"), true);
        let ctx = context(&fx, "about", "en");

        let html = "<html><head><title>t</title>\n</head><body></body></html>";
        let out = inject_metadata(html, &ctx);
        assert!(out.starts_with("<html><head><title>t</title>\n<link rel=\"canonical\""));
        assert!(out.ends_with("x-default\" href=\"https://example.com/about\">\n</head><body></body></html>"));

        let bare = "<p>fragment</p>";
        let out = inject_metadata(bare, &ctx);
        assert!(out.starts_with("<p>fragment</p><link rel=\"canonical\""));
    }
}
