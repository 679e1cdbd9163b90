//! `sitenav links` command implementation.

use std::collections::BTreeMap;

use clap::Args;
use sitenav_config::CliSettings;
use sitenav_site::Site;
use sitenav_tree::{FlatEntry, NavNode, flat_entries};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Only list this sidebar section.
    #[arg(long)]
    section: Option<String>,

    /// Print the listing as JSON to stdout.
    #[arg(long)]
    json: bool,
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the section does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.site.load(CliSettings::default())?;
        let site = Site::new(config)?;

        let sections = select_sections(&site, self.section.as_deref())?;

        if self.json {
            let listing: BTreeMap<&str, Vec<FlatEntry>> = sections
                .into_iter()
                .map(|(prefix, tree)| (prefix, flat_entries(tree)))
                .collect();
            return output.json(&listing);
        }

        for (prefix, tree) in sections {
            output.highlight(prefix);
            for entry in flat_entries(tree) {
                let target = entry
                    .target
                    .as_ref()
                    .map_or_else(|| "-".to_owned(), ToString::to_string);
                output.info(&format!("  {}\t{}\t{target}", entry.depth, entry.label));
            }
        }

        Ok(())
    }
}

/// Sections to list: one by key, or all of them.
fn select_sections<'s>(
    site: &'s Site,
    section: Option<&str>,
) -> Result<Vec<(&'s str, &'s [NavNode])>, CliError> {
    let Some(key) = section else {
        return Ok(site.sidebar().sections().collect());
    };
    let wanted = sitenav_sidebar::normalize_prefix(key);
    site.sidebar()
        .sections()
        .find(|(prefix, _)| *prefix == wanted)
        .map(|found| vec![found])
        .ok_or_else(|| CliError::Validation(format!("No sidebar section {key}")))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use pretty_assertions::assert_eq;
    use sitenav_config::Config;

    fn site() -> Site {
        let toml = r#"
[[sidebar."/guide/"]]
text = "Installation"
link = "/guide/installation"

[[sidebar."/nextftc/"]]
text = "Overview"
link = "/nextftc/"
"#;
        Site::new(Config::from_toml(toml, Path::new("/p")).unwrap()).unwrap()
    }

    #[test]
    fn test_select_all_sections() {
        let site = site();

        let prefixes: Vec<_> = select_sections(&site, None)
            .unwrap()
            .into_iter()
            .map(|(prefix, _)| prefix)
            .collect();

        assert_eq!(prefixes, vec!["/guide/", "/nextftc/"]);
    }

    #[test]
    fn test_select_section_normalizes_key() {
        let site = site();

        let sections = select_sections(&site, Some("nextftc")).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].1[0].label(), "Overview");
    }

    #[test]
    fn test_select_unknown_section() {
        let site = site();

        let err = select_sections(&site, Some("/missing/")).unwrap_err();

        assert!(err.to_string().contains("/missing/"));
    }
}
