//! Site configuration management for `polyglot.toml`.
//!
//! # Sections
//!
//! | Section            | Purpose                                         |
//! |--------------------|-------------------------------------------------|
//! | `[base]`           | Public base URL, primary locale, locale allowlist |
//! | `[build]`          | Export root, redirect configs, worker count     |
//! | `[build.sitemap]`  | Sitemap output                                  |
//!
//! # Example
//!
//! ```toml
//! [base]
//! url = "https://example.com"
//! language = "ru"
//!
//! [build]
//! output = "dist"
//!
//! [build.sitemap]
//! enable = true
//! ```
//!
//! The config file is optional: without one, defaults apply and CLI flags
//! fill in the rest.

mod base;
mod build;
pub mod defaults;
mod error;

pub use base::WwwMode;
pub use error::ConfigError;

use base::BaseConfig;
use build::BuildConfig;

use crate::cli::{Cli, Commands};
use crate::site::{page::is_locale_tag, url::BaseUrl};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing polyglot.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Export root: the directory holding the pages.
    pub fn export_root(&self) -> &Path {
        &self.build.output
    }

    /// Sitemap output path.
    pub fn sitemap_path(&self) -> PathBuf {
        self.build.output.join(&self.build.sitemap.path)
    }

    /// Redirect config candidates, resolved against the export root.
    pub fn redirect_config_paths(&self) -> Vec<PathBuf> {
        self.build
            .redirect_configs
            .iter()
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    self.build.output.join(path)
                }
            })
            .collect()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = Self::normalize_path(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));

        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.root = Some(root);

        if let Some(url) = &cli.base_url {
            self.base.url = Some(url.clone());
        }
        Self::update_option(&mut self.base.language, cli.locale.as_ref());

        if let Commands::Build { sitemap } = &cli.command {
            Self::update_option(&mut self.build.sitemap.enable, sitemap.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base.url
            && BaseUrl::parse(url).is_none()
        {
            bail!(ConfigError::Validation(format!(
                "[base.url] must look like https://host[/path], got `{url}`"
            )));
        }

        if !is_locale_tag(&self.base.language) {
            bail!(ConfigError::Validation(format!(
                "[base.language] `{}` is not a locale tag like `en` or `pt-BR`",
                self.base.language
            )));
        }

        if let Some(bad) = self.base.locales.iter().find(|tag| !is_locale_tag(tag)) {
            bail!(ConfigError::Validation(format!(
                "[base.locales] entry `{bad}` is not a locale tag"
            )));
        }

        if self.build.sitemap.path.as_os_str().is_empty() {
            bail!(ConfigError::Validation(
                "[build.sitemap.path] must not be empty".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
