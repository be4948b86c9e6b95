//! polyglot - canonical, hreflang and sitemap post-processor for multilingual static exports.

mod build;
mod cli;
mod config;
mod generator;
mod inject;
mod logger;
mod site;

use anyhow::Result;
use build::{build_site, check_site};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Check => check_site(&config),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// The config file is optional; defaults apply when it is absent.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
