//! `sitenav page` command implementation.

use clap::Args;
use sitenav_config::CliSettings;
use sitenav_site::{Site, scan_pages};
use sitenav_tree::{NavNode, flatten, normalize_page_path};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Page URL path, e.g. `/guide/installation`.
    path: String,

    #[command(flatten)]
    pub site: SiteArgs,

    /// Print the page context as JSON to stdout.
    #[arg(long)]
    json: bool,
}

impl PageArgs {
    /// Execute the page command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or JSON output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.site.load(CliSettings::default())?;
        let pages = scan_pages(&config.source_dir);
        let site = Site::new(config)?;

        let path = site.strip_base(&self.path);
        let context = site.page_context(path, &pages);

        if self.json {
            return output.json(&context);
        }

        match context.section {
            Some(section) => output.highlight(&format!("Section: {section}")),
            None => output.warning(&format!("No sidebar section matches {path}")),
        }
        print_tree(&output, context.sidebar, &normalize_page_path(path));

        if let Some(text) = context.active_nav {
            output.info(&format!("Active nav: {text}"));
        }
        if let Some(url) = &context.edit_url {
            output.info(&format!("Edit link: {url}"));
        }

        Ok(())
    }
}

/// Print a tree indented by depth, highlighting the node for `current`.
fn print_tree(output: &Output, tree: &[NavNode], current: &str) {
    for (depth, node) in flatten(tree) {
        let indent = "  ".repeat(depth + 1);
        let line = match node.target() {
            Some(target) => format!("{indent}{} -> {target}", node.label()),
            None => format!("{indent}{}", node.label()),
        };
        let is_current = node
            .target()
            .and_then(sitenav_tree::Link::page_path)
            .is_some_and(|page| page == current);
        if is_current {
            output.highlight(&line);
        } else if node.target().is_some_and(sitenav_tree::Link::is_external) {
            output.muted(&line);
        } else {
            output.info(&line);
        }
    }
}
