//! Sidebar table and prefix resolution.
//!
//! A [`SidebarTable`] maps section prefixes to navigation trees. Resolution
//! picks the most specific section containing a page: starting from the page
//! path itself, it walks up one segment at a time until a section key
//! matches, so the longest matching prefix always wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sitenav_tree::NavNode;

use crate::error::{ResolveError, SidebarError};
use crate::path::{match_form, normalize_prefix, parent_prefix};

/// Mapping from section prefix to navigation tree.
///
/// Keys are stored normalized (see [`normalize_prefix`]). Immutable once
/// built; safe to share between threads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<NavNode>>",
    into = "BTreeMap<String, Vec<NavNode>>"
)]
pub struct SidebarTable {
    sections: BTreeMap<String, Vec<NavNode>>,
}

impl SidebarTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(key, tree)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::DuplicateSection`] if two keys normalize to
    /// the same prefix.
    pub fn from_sections<K, I>(sections: I) -> Result<Self, SidebarError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Vec<NavNode>)>,
    {
        let mut table = Self::new();
        for (key, tree) in sections {
            table.insert(key.as_ref(), tree)?;
        }
        Ok(table)
    }

    /// Add a section.
    pub fn insert(&mut self, key: &str, tree: Vec<NavNode>) -> Result<(), SidebarError> {
        let prefix = normalize_prefix(key);
        if self.sections.contains_key(&prefix) {
            return Err(SidebarError::DuplicateSection {
                prefix,
                key: key.to_owned(),
            });
        }
        self.sections.insert(prefix, tree);
        Ok(())
    }

    /// Remove a section, returning its tree.
    pub fn remove(&mut self, key: &str) -> Option<Vec<NavNode>> {
        self.sections.remove(&normalize_prefix(key))
    }

    /// Tree of a section by key (normalized before lookup).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[NavNode]> {
        self.sections.get(&normalize_prefix(key)).map(Vec::as_slice)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Vec<NavNode>> {
        self.sections.get_mut(&normalize_prefix(key))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.sections.contains_key(&normalize_prefix(key))
    }

    /// Sections in prefix order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[NavNode])> {
        self.sections
            .iter()
            .map(|(prefix, tree)| (prefix.as_str(), tree.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Find the section that owns `path` and return its prefix and tree.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatchingSection`] if no key is a prefix of
    /// the path.
    pub fn resolve_section(&self, path: &str) -> Result<(&str, &[NavNode]), ResolveError> {
        let form = match_form(path);
        let mut candidate = Some(form.as_str());
        while let Some(prefix) = candidate {
            if let Some((key, tree)) = self.sections.get_key_value(prefix) {
                return Ok((key.as_str(), tree.as_slice()));
            }
            candidate = parent_prefix(prefix);
        }
        Err(ResolveError::NoMatchingSection {
            path: path.to_owned(),
        })
    }

    /// Tree of the section that owns `path`. See [`resolve`].
    pub fn resolve(&self, path: &str) -> Result<&[NavNode], ResolveError> {
        self.resolve_section(path).map(|(_, tree)| tree)
    }

    /// Like [`SidebarTable::resolve`], but falls back to an empty tree.
    #[must_use]
    pub fn resolve_or_empty(&self, path: &str) -> &[NavNode] {
        match self.resolve(path) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::debug!(error = %e, "Falling back to empty sidebar");
                &[]
            }
        }
    }
}

/// Select the tree to show for `path`.
///
/// Among section keys that are prefixes of the path, the longest wins.
/// Matching is case-sensitive and segment-aligned: `/guide/` owns
/// `/guide` and `/guide/about` but not `/guidelines`.
///
/// ```
/// use sitenav_sidebar::{SidebarTable, resolve};
/// use sitenav_tree::NavNode;
///
/// let table = SidebarTable::from_sections([
///     ("/", vec![NavNode::link("Home", "/")]),
///     ("/guide/", vec![NavNode::link("About", "/guide/about")]),
/// ])?;
///
/// let tree = resolve("/guide/about", &table)?;
/// assert_eq!(tree[0].label(), "About");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resolve<'t>(path: &str, table: &'t SidebarTable) -> Result<&'t [NavNode], ResolveError> {
    table.resolve(path)
}

impl TryFrom<BTreeMap<String, Vec<NavNode>>> for SidebarTable {
    type Error = SidebarError;

    fn try_from(sections: BTreeMap<String, Vec<NavNode>>) -> Result<Self, Self::Error> {
        Self::from_sections(sections)
    }
}

impl From<SidebarTable> for BTreeMap<String, Vec<NavNode>> {
    fn from(table: SidebarTable) -> Self {
        table.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree(label: &str) -> Vec<NavNode> {
        vec![NavNode::link(label, format!("/{}", label.to_lowercase()))]
    }

    fn root_and_guide() -> SidebarTable {
        SidebarTable::from_sections([("/", tree("Root")), ("/guide/", tree("Guide"))]).unwrap()
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = root_and_guide();

        let result = resolve("/guide/about", &table).unwrap();

        assert_eq!(result, tree("Guide").as_slice());
    }

    #[test]
    fn test_root_catches_other_paths() {
        let table = root_and_guide();

        assert_eq!(table.resolve("/team").unwrap(), tree("Root").as_slice());
        assert_eq!(table.resolve("/").unwrap(), tree("Root").as_slice());
    }

    #[test]
    fn test_no_matching_section() {
        let table =
            SidebarTable::from_sections([("/guide/", tree("Guide")), ("/nextftc/", tree("Next"))])
                .unwrap();

        let err = resolve("/unknown/path", &table).unwrap_err();

        assert_eq!(
            err,
            ResolveError::NoMatchingSection {
                path: "/unknown/path".to_owned()
            }
        );
    }

    #[test]
    fn test_resolve_or_empty_falls_back() {
        let table = SidebarTable::from_sections([("/guide/", tree("Guide"))]).unwrap();

        assert!(table.resolve_or_empty("/elsewhere").is_empty());
    }

    #[test]
    fn test_section_key_matches_its_own_path() {
        let table = root_and_guide();

        let (prefix, _) = table.resolve_section("/guide").unwrap();

        assert_eq!(prefix, "/guide/");
    }

    #[test]
    fn test_prefix_is_segment_aligned() {
        let table = SidebarTable::from_sections([("/guide/", tree("Guide"))]).unwrap();

        assert!(table.resolve("/guidelines/intro").is_err());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let table = SidebarTable::from_sections([("/guide/", tree("Guide"))]).unwrap();

        assert!(table.resolve("/Guide/about").is_err());
    }

    #[test]
    fn test_nested_sections_pick_deepest() {
        let table = SidebarTable::from_sections([
            ("/nextftc/", tree("Next")),
            ("/nextftc/v1/", tree("NextV1")),
            ("/", tree("Root")),
        ])
        .unwrap();

        assert_eq!(
            table.resolve_section("/nextftc/v1/commands/sequential").unwrap().0,
            "/nextftc/v1/"
        );
        assert_eq!(
            table.resolve_section("/nextftc/v10/intro").unwrap().0,
            "/nextftc/"
        );
    }

    #[test]
    fn test_resolve_ignores_fragment_and_extension() {
        let table = root_and_guide();

        let (prefix, _) = table.resolve_section("/guide/about.html#faq").unwrap();

        assert_eq!(prefix, "/guide/");
    }

    #[test]
    fn test_duplicate_after_normalization_rejected() {
        let err = SidebarTable::from_sections([("/guide", tree("A")), ("/guide/", tree("B"))])
            .unwrap_err();

        assert_eq!(
            err,
            SidebarError::DuplicateSection {
                prefix: "/guide/".to_owned(),
                key: "/guide/".to_owned(),
            }
        );
    }

    #[test]
    fn test_get_and_remove_normalize_keys() {
        let mut table = root_and_guide();

        assert!(table.get("guide").is_some());
        assert!(table.contains("/guide"));
        assert_eq!(table.remove("/guide"), Some(tree("Guide")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
[["/guide/"]]
text = "Getting Started"

[["/guide/".items]]
text = "Installation"
link = "/guide/installation"

[["/"]]
text = "Home"
link = "/"
"#;

        let table: SidebarTable = toml::from_str(toml).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.resolve("/guide/installation").unwrap()[0].children()[0].label(),
            "Installation"
        );
    }

    #[test]
    fn test_deserialize_rejects_duplicate_sections() {
        let json = r#"{"/guide": [], "/guide/": []}"#;

        let result: Result<SidebarTable, _> = serde_json::from_str(json);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("Duplicate sidebar section"), "got: {err}");
    }
}
