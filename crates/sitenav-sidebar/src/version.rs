//! Versioned sidebars.
//!
//! The latest sidebar table is authoritative and stored in full. Older (or
//! otherwise divergent) versions are expressed as small lists of [`Patch`]es
//! against it instead of repeating whole trees. Each release is applied to the
//! base independently of the others.
//!
//! Nodes are addressed by label trails from the section root, e.g.
//! `["Getting Started", "Installation"]`.

use serde::{Deserialize, Serialize};
use sitenav_tree::{Link, NavNode};

use crate::error::{PatchError, SidebarError};
use crate::path::normalize_prefix;
use crate::table::SidebarTable;

/// One edit of a sidebar table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    /// Insert a node under `parent` (section root when empty), at `index` or last.
    Insert {
        section: String,
        #[serde(default)]
        parent: Vec<String>,
        #[serde(default)]
        index: Option<usize>,
        node: NavNode,
    },
    /// Remove the node at `path` together with its children.
    Remove { section: String, path: Vec<String> },
    /// Change the label of the node at `path`.
    Rename {
        section: String,
        path: Vec<String>,
        text: String,
    },
    /// Change the link target of the node at `path`.
    Retarget {
        section: String,
        path: Vec<String>,
        link: Link,
    },
    /// Add a whole section.
    AddSection {
        section: String,
        items: Vec<NavNode>,
    },
    /// Remove a whole section.
    DropSection { section: String },
}

impl Patch {
    /// Apply this patch to a table in place.
    pub fn apply(&self, table: &mut SidebarTable) -> Result<(), PatchError> {
        match self {
            Self::Insert {
                section,
                parent,
                index,
                node,
            } => {
                let siblings = if parent.is_empty() {
                    section_mut(table, section)?
                } else {
                    let target = node_mut(table, section, parent)?;
                    target.children_mut().ok_or_else(|| PatchError::NotAGroup {
                        section: normalize_prefix(section),
                        path: parent.join(" > "),
                    })?
                };
                let at = index.unwrap_or(siblings.len());
                if at > siblings.len() {
                    return Err(PatchError::IndexOutOfRange {
                        section: normalize_prefix(section),
                        path: parent.join(" > "),
                        index: at,
                        len: siblings.len(),
                    });
                }
                siblings.insert(at, node.clone());
            }
            Self::Remove { section, path } => {
                let (siblings, idx) = locate(table, section, path)?;
                siblings.remove(idx);
            }
            Self::Rename {
                section,
                path,
                text,
            } => node_mut(table, section, path)?.set_label(text.as_str()),
            Self::Retarget {
                section,
                path,
                link,
            } => node_mut(table, section, path)?.set_target(link.clone()),
            Self::AddSection { section, items } => {
                table
                    .insert(section, items.clone())
                    .map_err(|_| PatchError::SectionExists {
                        section: normalize_prefix(section),
                    })?;
            }
            Self::DropSection { section } => {
                table
                    .remove(section)
                    .ok_or_else(|| PatchError::UnknownSection {
                        section: normalize_prefix(section),
                    })?;
            }
        }
        Ok(())
    }
}

fn section_mut<'t>(
    table: &'t mut SidebarTable,
    section: &str,
) -> Result<&'t mut Vec<NavNode>, PatchError> {
    table
        .get_mut(section)
        .ok_or_else(|| PatchError::UnknownSection {
            section: normalize_prefix(section),
        })
}

/// Sibling list holding the node at `path`, and the node's index in it.
fn locate<'t>(
    table: &'t mut SidebarTable,
    section: &str,
    path: &[String],
) -> Result<(&'t mut Vec<NavNode>, usize), PatchError> {
    let not_found = || PatchError::NodeNotFound {
        section: normalize_prefix(section),
        path: path.join(" > "),
    };
    let root = section_mut(table, section)?;
    locate_in(root, path).ok_or_else(not_found)
}

fn locate_in<'n>(
    nodes: &'n mut Vec<NavNode>,
    path: &[String],
) -> Option<(&'n mut Vec<NavNode>, usize)> {
    let (first, rest) = path.split_first()?;
    let idx = nodes.iter().position(|node| node.label() == first)?;
    if rest.is_empty() {
        return Some((nodes, idx));
    }
    let children = nodes[idx].children_mut()?;
    locate_in(children, rest)
}

fn node_mut<'t>(
    table: &'t mut SidebarTable,
    section: &str,
    path: &[String],
) -> Result<&'t mut NavNode, PatchError> {
    let (siblings, idx) = locate(table, section, path)?;
    Ok(&mut siblings[idx])
}

/// Named set of patches describing one version of the sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version tag, e.g. `"v0.3"`.
    pub tag: String,
    /// Edits applied to the base table.
    #[serde(default)]
    pub patches: Vec<Patch>,
}

/// Builds the sidebar table for a given version.
///
/// # Example
///
/// ```
/// use sitenav_sidebar::{Patch, SidebarBuilder, SidebarTable};
/// use sitenav_tree::NavNode;
///
/// let base = SidebarTable::from_sections([(
///     "/guide/",
///     vec![NavNode::link("Installation", "/guide/installation")],
/// )])?;
///
/// let builder = SidebarBuilder::new(base).release(
///     "v1",
///     vec![Patch::Rename {
///         section: "/guide/".to_owned(),
///         path: vec!["Installation".to_owned()],
///         text: "Setup".to_owned(),
///     }],
/// );
///
/// let v1 = builder.build(Some("v1"))?;
/// assert_eq!(v1.resolve("/guide/")?[0].label(), "Setup");
/// assert_eq!(builder.build(None)?.resolve("/guide/")?[0].label(), "Installation");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SidebarBuilder {
    base: SidebarTable,
    latest_tag: Option<String>,
    releases: Vec<Release>,
}

impl SidebarBuilder {
    /// Create a builder around the authoritative (latest) table.
    #[must_use]
    pub fn new(base: SidebarTable) -> Self {
        Self {
            base,
            latest_tag: None,
            releases: Vec::new(),
        }
    }

    /// Name the version the base table represents.
    #[must_use]
    pub fn latest_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_tag = Some(tag.into());
        self
    }

    /// Declare a release.
    #[must_use]
    pub fn release(mut self, tag: impl Into<String>, patches: Vec<Patch>) -> Self {
        self.releases.push(Release {
            tag: tag.into(),
            patches,
        });
        self
    }

    /// Declare several releases.
    #[must_use]
    pub fn releases(mut self, releases: impl IntoIterator<Item = Release>) -> Self {
        self.releases.extend(releases);
        self
    }

    /// All declared version tags, latest first.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.latest_tag
            .as_deref()
            .into_iter()
            .chain(self.releases.iter().map(|r| r.tag.as_str()))
    }

    #[must_use]
    pub fn base(&self) -> &SidebarTable {
        &self.base
    }

    /// Build the table for `version`; `None` (or the latest tag) yields the base.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::UnknownVersion`] for an undeclared tag and
    /// [`SidebarError::Patch`] when one of the release's patches fails.
    pub fn build(&self, version: Option<&str>) -> Result<SidebarTable, SidebarError> {
        let Some(tag) = version else {
            return Ok(self.base.clone());
        };
        if self.latest_tag.as_deref() == Some(tag) {
            return Ok(self.base.clone());
        }

        let release = self
            .releases
            .iter()
            .find(|r| r.tag == tag)
            .ok_or_else(|| SidebarError::UnknownVersion(tag.to_owned()))?;

        let mut table = self.base.clone();
        for patch in &release.patches {
            patch
                .apply(&mut table)
                .map_err(|source| SidebarError::Patch {
                    version: tag.to_owned(),
                    source,
                })?;
        }

        tracing::debug!(
            version = tag,
            patches = release.patches.len(),
            "Built versioned sidebar"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn trail(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| (*l).to_owned()).collect()
    }

    fn base() -> SidebarTable {
        SidebarTable::from_sections([
            (
                "/guide/",
                vec![
                    NavNode::group(
                        "Getting Started",
                        vec![
                            NavNode::link("Installation", "/guide/installation"),
                            NavNode::link("Project Setup", "/guide/setup"),
                        ],
                    ),
                    NavNode::link("FAQ", "/guide/faq"),
                ],
            ),
            ("/nextftc/", vec![NavNode::link("Overview", "/nextftc/")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_without_version_returns_base() {
        let builder = SidebarBuilder::new(base());

        assert_eq!(builder.build(None).unwrap(), base());
    }

    #[test]
    fn test_build_latest_tag_returns_base() {
        let builder = SidebarBuilder::new(base()).latest_tag("v2");

        assert_eq!(builder.build(Some("v2")).unwrap(), base());
    }

    #[test]
    fn test_unknown_version() {
        let builder = SidebarBuilder::new(base());

        assert_eq!(
            builder.build(Some("v9")).unwrap_err(),
            SidebarError::UnknownVersion("v9".to_owned())
        );
    }

    #[test]
    fn test_insert_under_group_at_index() {
        let builder = SidebarBuilder::new(base()).release(
            "v1",
            vec![Patch::Insert {
                section: "/guide".to_owned(),
                parent: trail(&["Getting Started"]),
                index: Some(0),
                node: NavNode::link("Legacy Install", "/guide/legacy"),
            }],
        );

        let table = builder.build(Some("v1")).unwrap();

        let group = &table.get("/guide/").unwrap()[0];
        let labels: Vec<_> = group.children().iter().map(NavNode::label).collect();
        assert_eq!(labels, vec!["Legacy Install", "Installation", "Project Setup"]);
    }

    #[test]
    fn test_insert_at_section_root_appends() {
        let mut table = base();
        Patch::Insert {
            section: "/nextftc/".to_owned(),
            parent: Vec::new(),
            index: None,
            node: NavNode::link("Commands", "/nextftc/commands"),
        }
        .apply(&mut table)
        .unwrap();

        let labels: Vec<_> = table
            .get("/nextftc/")
            .unwrap()
            .iter()
            .map(NavNode::label)
            .collect();
        assert_eq!(labels, vec!["Overview", "Commands"]);
    }

    #[test]
    fn test_insert_under_link_fails() {
        let mut table = base();

        let err = Patch::Insert {
            section: "/guide/".to_owned(),
            parent: trail(&["FAQ"]),
            index: None,
            node: NavNode::link("X", "/x"),
        }
        .apply(&mut table)
        .unwrap_err();

        assert!(matches!(err, PatchError::NotAGroup { .. }));
    }

    #[test]
    fn test_insert_index_out_of_range() {
        let mut table = base();

        let err = Patch::Insert {
            section: "/nextftc/".to_owned(),
            parent: Vec::new(),
            index: Some(5),
            node: NavNode::link("X", "/x"),
        }
        .apply(&mut table)
        .unwrap_err();

        assert!(matches!(
            err,
            PatchError::IndexOutOfRange { index: 5, len: 1, .. }
        ));
    }

    #[test]
    fn test_remove_rename_retarget() {
        let builder = SidebarBuilder::new(base()).release(
            "v1",
            vec![
                Patch::Remove {
                    section: "/guide/".to_owned(),
                    path: trail(&["Getting Started", "Project Setup"]),
                },
                Patch::Rename {
                    section: "/guide/".to_owned(),
                    path: trail(&["Getting Started", "Installation"]),
                    text: "Install".to_owned(),
                },
                Patch::Retarget {
                    section: "/guide/".to_owned(),
                    path: trail(&["FAQ"]),
                    link: Link::parse("/v1/guide/faq"),
                },
            ],
        );

        let table = builder.build(Some("v1")).unwrap();

        assert_eq!(
            table.get("/guide/").unwrap(),
            [
                NavNode::group(
                    "Getting Started",
                    vec![NavNode::link("Install", "/guide/installation")]
                ),
                NavNode::link("FAQ", "/v1/guide/faq"),
            ]
            .as_slice()
        );
    }

    #[test]
    fn test_releases_are_independent() {
        let builder = SidebarBuilder::new(base())
            .release(
                "v1",
                vec![Patch::DropSection {
                    section: "/nextftc/".to_owned(),
                }],
            )
            .release("v0", Vec::new());

        assert!(!builder.build(Some("v1")).unwrap().contains("/nextftc/"));
        assert!(builder.build(Some("v0")).unwrap().contains("/nextftc/"));
    }

    #[test]
    fn test_add_section_and_existing_section() {
        let mut table = base();
        Patch::AddSection {
            section: "/old/".to_owned(),
            items: vec![NavNode::link("Old", "/old/")],
        }
        .apply(&mut table)
        .unwrap();
        assert!(table.contains("/old"));

        let err = Patch::AddSection {
            section: "/guide".to_owned(),
            items: Vec::new(),
        }
        .apply(&mut table)
        .unwrap_err();
        assert_eq!(
            err,
            PatchError::SectionExists {
                section: "/guide/".to_owned()
            }
        );
    }

    #[test]
    fn test_missing_node_error_names_trail() {
        let builder = SidebarBuilder::new(base()).release(
            "v1",
            vec![Patch::Remove {
                section: "/guide/".to_owned(),
                path: trail(&["Getting Started", "Nope"]),
            }],
        );

        let err = builder.build(Some("v1")).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Sidebar version v1: no node 'Getting Started > Nope' in section /guide/"
        );
    }

    #[test]
    fn test_unknown_section_in_patch() {
        let mut table = base();

        let err = Patch::DropSection {
            section: "/api/".to_owned(),
        }
        .apply(&mut table)
        .unwrap_err();

        assert_eq!(
            err,
            PatchError::UnknownSection {
                section: "/api/".to_owned()
            }
        );
    }

    #[test]
    fn test_tags_latest_first() {
        let builder = SidebarBuilder::new(base())
            .latest_tag("v2")
            .release("v1", Vec::new())
            .release("v0", Vec::new());

        assert_eq!(builder.tags().collect::<Vec<_>>(), vec!["v2", "v1", "v0"]);
    }

    #[test]
    fn test_release_deserializes_from_toml() {
        let toml = r#"
tag = "v1"

[[patches]]
op = "rename"
section = "/guide/"
path = ["FAQ"]
text = "Questions"

[[patches]]
op = "insert"
section = "/guide/"
parent = ["Getting Started"]
node = { text = "Legacy", link = "/guide/legacy" }
"#;

        let release: Release = toml::from_str(toml).unwrap();

        assert_eq!(release.tag, "v1");
        assert_eq!(
            release.patches[1],
            Patch::Insert {
                section: "/guide/".to_owned(),
                parent: trail(&["Getting Started"]),
                index: None,
                node: NavNode::link("Legacy", "/guide/legacy"),
            }
        );
    }
}
