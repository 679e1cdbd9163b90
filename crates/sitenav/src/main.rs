//! sitenav CLI - sidebar navigation tooling for documentation sites.
//!
//! Provides commands for:
//! - `check`: Validate sidebars and report dead links
//! - `page`: Show the navigation context of one page
//! - `links`: List the flattened sidebar sections

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, LinksArgs, PageArgs};
use output::Output;

/// sitenav - sidebar navigation for documentation sites.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate sidebar sections and check links.
    Check(CheckArgs),
    /// Show the sidebar, active nav entry and edit link of a page.
    Page(PageArgs),
    /// List sidebar sections as flat (depth, label, target) entries.
    Links(LinksArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.site.verbose,
            Self::Page(args) => args.site.verbose,
            Self::Links(args) => args.site.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Page(args) => args.execute(),
        Commands::Links(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
