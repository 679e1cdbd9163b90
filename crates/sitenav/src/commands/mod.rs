//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod links;
pub(crate) mod page;

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};

pub(crate) use check::CheckArgs;
pub(crate) use links::LinksArgs;
pub(crate) use page::PageArgs;

use crate::error::CliError;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebar version to use (default: latest).
    #[arg(long = "version", value_name = "TAG", env = "SITENAV_VERSION")]
    version: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration with these arguments applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub(crate) fn load(&self, mut settings: CliSettings) -> Result<Config, CliError> {
        settings.source_dir.clone_from(&self.source_dir);
        settings.version.clone_from(&self.version);
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}
