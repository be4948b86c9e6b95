//! Output files derived from the whole site rather than a single page.

pub mod sitemap;
