//! `[base]` section configuration.
//!
//! Site identity: public base URL and locale settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// How the webserver treats the `www.` host prefix.
///
/// Only reported in the run log; URLs are emitted with the host from `url`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WwwMode {
    /// Host is used as written (default).
    #[default]
    Keep,
    /// Server forces the `www.` prefix.
    Www,
    /// Server strips the `www.` prefix.
    NonWww,
}

impl WwwMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Www => "www",
            Self::NonWww => "non-www",
        }
    }
}

/// `[base]` section in polyglot.toml.
///
/// # Example
/// ```toml
/// [base]
/// url = "https://example.com"
/// language = "ru"
/// locales = ["ru", "en", "de"]
/// www = "non-www"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Public base URL. When absent, every emitted URL is site-relative.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Primary locale: pages without a locale suffix belong to it.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Locale suffixes accepted in filenames. Empty accepts any tag-shaped suffix.
    #[serde(default)]
    pub locales: Vec<String>,

    #[serde(default)]
    pub www: WwwMode,
}
