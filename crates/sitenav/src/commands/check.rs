//! `sitenav check` command implementation.

use clap::Args;
use sitenav_config::CliSettings;
use sitenav_site::{Site, scan_pages};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Fail on malformed sidebar sections (overrides config).
    #[arg(long)]
    strict: bool,

    /// Report dead links even when the config ignores them.
    #[arg(long)]
    dead_links: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Malformed sections are errors; dead links are warnings and never fail
    /// the command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, or a section is malformed
    /// in strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            strict: self.strict.then_some(true),
            ignore_dead_links: self.dead_links.then_some(false),
            ..CliSettings::default()
        };
        let config = self.site.load(settings)?;

        let pages = scan_pages(&config.source_dir);
        output.info(&format!(
            "Found {} pages in {}",
            pages.len(),
            config.source_dir.display()
        ));

        let site = Site::new(config)?;
        let report = site.check(&pages);

        for defect in &report.malformed {
            output.error(&format!("{}: {}", defect.section, defect.node));
        }
        for (section, broken) in &report.broken_links {
            for link in broken {
                output.warning(&format!(
                    "{section}: dead link '{}' -> {}",
                    link.label, link.target
                ));
            }
        }

        if report.is_clean() {
            output.success(&format!(
                "Checked {} sidebar sections: no problems found",
                site.sidebar().len()
            ));
        } else {
            output.info(&format!(
                "{} malformed nodes, {} dead links",
                report.malformed.len(),
                report.broken_link_count()
            ));
        }

        Ok(())
    }
}
