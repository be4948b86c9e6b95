//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// polyglot: canonical, hreflang and sitemap post-processor for multilingual static exports
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root; the config file and a relative export root are resolved against it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: polyglot.toml)
    #[arg(short = 'C', long, default_value = "polyglot.toml")]
    pub config: PathBuf,

    /// Export root holding the generated HTML pages (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Public base URL, e.g. https://example.com. Without it every URL is site-relative.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Primary locale: pages without a locale suffix belong to it
    #[arg(short, long)]
    pub locale: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite page metadata in place and write the sitemap
    Build {
        /// enable sitemap generation
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        sitemap: Option<bool>,
    },

    /// Scan the export root and print the page/locale matrix without writing anything
    Check,
}
