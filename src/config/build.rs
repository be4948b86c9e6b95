//! `[build]` section configuration.
//!
//! Export root location, redirect-config inspection and sitemap output.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in polyglot.toml.
///
/// # Example
/// ```toml
/// [build]
/// output = "dist"
/// redirect_configs = [".htaccess"]
/// jobs = 4
///
/// [build.sitemap]
/// path = "sitemap.xml"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Export root: the directory of exported HTML pages to post-process.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Redirect configuration files inspected for a `.html`-stripping rule.
    /// Relative paths are resolved against the export root.
    #[serde(default = "defaults::build::redirect_configs")]
    #[educe(Default = defaults::build::redirect_configs())]
    pub redirect_configs: Vec<PathBuf>,

    /// Worker threads for page rewriting (0 = one per core).
    #[serde(default)]
    pub jobs: usize,

    /// Sitemap generation settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// `[build.sitemap]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the export root.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}
