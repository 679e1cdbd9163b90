//! Site facade over configuration, sidebar and pages.

use std::collections::BTreeMap;

use serde::Serialize;
use sitenav_config::Config;
use sitenav_sidebar::SidebarTable;
use sitenav_tree::{BrokenLink, MalformedNode, NavNode, check_links, defects};

use crate::error::SiteError;
use crate::pages::PageIndex;

/// Malformed node found in a sidebar section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionDefect {
    /// Section prefix.
    pub section: String,
    /// The defect.
    pub node: MalformedNode,
}

/// Everything a page needs to render its navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageContext<'a> {
    /// Prefix of the section owning the page, `None` if no section matches.
    pub section: Option<&'a str>,
    /// Sidebar tree; empty when no section matches.
    pub sidebar: &'a [NavNode],
    /// Text of the highlighted top navigation entry.
    pub active_nav: Option<&'a str>,
    /// "Edit this page" URL, when configured and the page has a source file.
    pub edit_url: Option<String>,
}

/// Result of [`Site::check`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Malformed nodes, from sections withheld at build time.
    pub malformed: Vec<SectionDefect>,
    /// Dead internal links by section prefix.
    pub broken_links: BTreeMap<String, Vec<BrokenLink>>,
}

impl CheckReport {
    /// Whether any section is malformed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.malformed.is_empty()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.broken_links.is_empty()
    }

    /// Number of broken links across all sections.
    #[must_use]
    pub fn broken_link_count(&self) -> usize {
        self.broken_links.values().map(Vec::len).sum()
    }
}

/// Loaded site: configuration plus the validated sidebar of one version.
///
/// Immutable after construction; share it between threads freely.
#[derive(Debug)]
pub struct Site {
    config: Config,
    sidebar: SidebarTable,
    malformed: Vec<SectionDefect>,
}

impl Site {
    /// Build the sidebar for the configured version and validate it.
    ///
    /// In lenient mode a malformed section is logged, recorded and left out
    /// of resolution, so pages under it fall back to an enclosing section or
    /// an empty sidebar. The other sections are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Sidebar`] if the version cannot be built, and
    /// [`SiteError::Malformed`] for the first malformed section when
    /// `check.strict` is set.
    pub fn new(config: Config) -> Result<Self, SiteError> {
        let mut sidebar = config
            .sidebar_builder()
            .build(config.version.as_deref())?;

        let mut malformed = Vec::new();
        let sections: Vec<(String, Vec<MalformedNode>)> = sidebar
            .sections()
            .map(|(prefix, tree)| (prefix.to_owned(), defects(tree)))
            .filter(|(_, found)| !found.is_empty())
            .collect();

        if config.check.strict
            && let Some((section, found)) = sections.first()
            && let Some(source) = found.first()
        {
            return Err(SiteError::Malformed {
                section: section.clone(),
                source: source.clone(),
            });
        }

        for (section, found) in sections {
            for node in found {
                tracing::warn!(section = %section, error = %node, "Skipping malformed sidebar section");
                malformed.push(SectionDefect {
                    section: section.clone(),
                    node,
                });
            }
            sidebar.remove(&section);
        }

        Ok(Self {
            config,
            sidebar,
            malformed,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validated sidebar sections.
    #[must_use]
    pub fn sidebar(&self) -> &SidebarTable {
        &self.sidebar
    }

    /// Defects of sections withheld at build time.
    #[must_use]
    pub fn malformed(&self) -> &[SectionDefect] {
        &self.malformed
    }

    /// Strip `site.base` from a served URL path.
    ///
    /// Paths outside the base are returned unchanged.
    #[must_use]
    pub fn strip_base<'p>(&self, path: &'p str) -> &'p str {
        let base = self.config.site.base.trim_end_matches('/');
        if base.is_empty() {
            return path;
        }
        match path.strip_prefix(base) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }

    /// Navigation context for the page at `path` (relative to `site.base`).
    #[must_use]
    pub fn page_context(&self, path: &str, pages: &PageIndex) -> PageContext<'_> {
        let (section, sidebar) = match self.sidebar.resolve_section(path) {
            Ok((prefix, tree)) => (Some(prefix), tree),
            Err(e) => {
                tracing::debug!(error = %e, "Falling back to empty sidebar");
                (None, &[][..])
            }
        };

        let active_nav = self
            .config
            .nav
            .iter()
            .find(|entry| entry.is_active(path))
            .map(|entry| entry.text.as_str());

        let edit_url = self
            .config
            .site
            .edit_link
            .as_ref()
            .zip(pages.source_path(path))
            .map(|(link, source)| link.render(source));

        PageContext {
            section,
            sidebar,
            active_nav,
            edit_url,
        }
    }

    /// Check every section for dead internal links.
    ///
    /// With `check.ignore_dead_links` set, dead links are only logged at
    /// debug level and the report carries malformed sections alone.
    #[must_use]
    pub fn check(&self, pages: &PageIndex) -> CheckReport {
        let known = pages.known_paths();
        let mut broken_links = BTreeMap::new();

        for (section, tree) in self.sidebar.sections() {
            let broken = check_links(tree, &known);
            if broken.is_empty() {
                continue;
            }
            if self.config.check.ignore_dead_links {
                for link in &broken {
                    tracing::debug!(section, label = %link.label, target = %link.target, "Ignoring dead link");
                }
                continue;
            }
            broken_links.insert(section.to_owned(), broken);
        }

        CheckReport {
            malformed: self.malformed.clone(),
            broken_links,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use pretty_assertions::assert_eq;
    use sitenav_tree::DefectKind;

    const CONFIG: &str = r#"
[site]
title = "NextFTC"
edit_link = "https://github.com/example/docs/edit/main/src/:path"

[[nav]]
text = "Guide"
link = "/guide/"

[[nav]]
text = "NextFTC"
link = "/nextftc/"

[[sidebar."/guide/"]]
text = "Getting Started"

[[sidebar."/guide/".items]]
text = "Installation"
link = "/guide/installation"

[[sidebar."/guide/".items]]
text = "Missing"
link = "/guide/missing"

[[sidebar."/guide/"]]
text = "Discord"
link = "https://discord.gg/example"

[[sidebar."/nextftc/"]]
text = "Overview"
link = "/nextftc/"

[[sidebar."/nextftc/"]]
text = "Commands"
"#;

    fn config(extra: &str) -> Config {
        Config::from_toml(&format!("{CONFIG}\n{extra}"), Path::new("/project")).unwrap()
    }

    fn pages() -> PageIndex {
        ["index.md", "guide/index.md", "guide/installation.md", "nextftc/index.md"]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_lenient_site_withholds_malformed_section() {
        let site = Site::new(config("")).unwrap();

        assert!(site.sidebar().contains("/guide/"));
        assert!(!site.sidebar().contains("/nextftc/"));
        assert_eq!(site.malformed().len(), 1);
        assert_eq!(site.malformed()[0].section, "/nextftc/");
        assert_eq!(site.malformed()[0].node.label, "Commands");
        assert_eq!(site.malformed()[0].node.kind, DefectKind::DeadEnd);
    }

    #[test]
    fn test_strict_site_rejects_malformed_section() {
        let err = Site::new(config("[check]\nstrict = true")).unwrap_err();

        match err {
            SiteError::Malformed { section, source } => {
                assert_eq!(section, "/nextftc/");
                assert_eq!(source.label, "Commands");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_site_reports_first_section_in_prefix_order() {
        let extra = r#"
[[sidebar."/api/"]]
text = "Endpoints"
link = ""

[check]
strict = true
"#;
        let err = Site::new(config(extra)).unwrap_err();

        match err {
            SiteError::Malformed { section, source } => {
                assert_eq!(section, "/api/");
                assert_eq!(source.label, "Endpoints");
                assert_eq!(source.kind, DefectKind::DeadEnd);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_site_withholds_section_with_blank_link() {
        let extra = r#"
[[sidebar."/api/"]]
text = "Endpoints"
link = ""
"#;
        let site = Site::new(config(extra)).unwrap();

        assert!(!site.sidebar().contains("/api/"));
        assert!(site.sidebar().contains("/guide/"));
        assert!(
            site.malformed()
                .iter()
                .any(|d| d.section == "/api/" && d.node.label == "Endpoints")
        );
    }

    #[test]
    fn test_page_context() {
        let site = Site::new(config("")).unwrap();

        let context = site.page_context("/guide/installation", &pages());

        assert_eq!(context.section, Some("/guide/"));
        assert_eq!(context.sidebar[0].label(), "Getting Started");
        assert_eq!(context.active_nav, Some("Guide"));
        assert_eq!(
            context.edit_url.as_deref(),
            Some("https://github.com/example/docs/edit/main/src/guide/installation.md")
        );
    }

    #[test]
    fn test_page_context_of_withheld_section_is_empty() {
        let site = Site::new(config("")).unwrap();

        let context = site.page_context("/nextftc/", &pages());

        assert_eq!(context.section, None);
        assert!(context.sidebar.is_empty());
        assert_eq!(context.active_nav, Some("NextFTC"));
        assert_eq!(
            context.edit_url.as_deref(),
            Some("https://github.com/example/docs/edit/main/src/nextftc/index.md")
        );
    }

    #[test]
    fn test_page_context_without_source_has_no_edit_url() {
        let site = Site::new(config("")).unwrap();

        let context = site.page_context("/guide/missing", &pages());

        assert_eq!(context.section, Some("/guide/"));
        assert_eq!(context.edit_url, None);
    }

    #[test]
    fn test_page_context_serializes() {
        let site = Site::new(config("")).unwrap();

        let json = serde_json::to_value(site.page_context("/guide/", &pages())).unwrap();

        assert_eq!(json["section"], "/guide/");
        assert_eq!(json["sidebar"][0]["text"], "Getting Started");
        assert_eq!(json["sidebar"][0]["items"][0]["link"], "/guide/installation");
    }

    #[test]
    fn test_check_ignores_dead_links_by_default() {
        let site = Site::new(config("")).unwrap();

        let report = site.check(&pages());

        assert!(report.broken_links.is_empty());
        assert!(report.has_errors());
    }

    #[test]
    fn test_check_reports_dead_links() {
        let site = Site::new(config("[check]\nignore_dead_links = false")).unwrap();

        let report = site.check(&pages());

        assert_eq!(report.broken_link_count(), 1);
        assert_eq!(
            report.broken_links["/guide/"],
            vec![BrokenLink {
                label: "Missing".to_owned(),
                target: "/guide/missing".to_owned(),
            }]
        );
    }

    #[test]
    fn test_clean_report() {
        let toml = r#"
[[sidebar."/"]]
text = "Home"
link = "/"
"#;
        let config = Config::from_toml(toml, Path::new("/p")).unwrap();
        let site = Site::new(config).unwrap();

        assert!(site.check(&pages()).is_clean());
    }

    #[test]
    fn test_strip_base() {
        let mut config = config("");
        config.site.base = "/docs/".to_owned();
        let site = Site::new(config).unwrap();

        assert_eq!(site.strip_base("/docs/guide/"), "/guide/");
        assert_eq!(site.strip_base("/docs"), "/");
        assert_eq!(site.strip_base("/docsearch"), "/docsearch");
        assert_eq!(site.strip_base("/other"), "/other");
    }

    #[test]
    fn test_site_uses_selected_version() {
        let extra = r#"
[versions]
current = "v2"

[[versions.release]]
tag = "v1"
patches = [{ op = "remove", section = "/nextftc/", path = ["Commands"] }]
"#;
        let mut config = config(extra);
        config.version = Some("v1".to_owned());

        let site = Site::new(config).unwrap();

        assert!(site.malformed().is_empty());
        assert!(site.sidebar().contains("/nextftc/"));
    }
}
