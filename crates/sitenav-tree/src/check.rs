//! Advisory link-existence check.
//!
//! Internal targets are compared against the set of known page paths after
//! [`normalize_page_path`] on both sides. External targets are never checked.

use std::collections::HashSet;
use std::hash::BuildHasher;

use serde::Serialize;

use crate::flatten::flatten;
use crate::link::normalize_page_path;
use crate::node::NavNode;

/// Internal link whose page does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    /// Label of the node carrying the link.
    pub label: String,
    /// Link target as authored.
    pub target: String,
}

/// Report every internal target that points to an unknown page.
///
/// Results are in pre-order. The check never fails: dead links are
/// diagnostics for the author, not errors.
///
/// ```
/// use std::collections::HashSet;
/// use sitenav_tree::{BrokenLink, NavNode, check_links};
///
/// let tree = vec![
///     NavNode::link("X", "/missing"),
///     NavNode::link("Home", "/"),
///     NavNode::link("Out", "https://example.com"),
/// ];
/// let known: HashSet<String> = HashSet::from(["/".to_owned()]);
///
/// assert_eq!(
///     check_links(&tree, &known),
///     vec![BrokenLink { label: "X".to_owned(), target: "/missing".to_owned() }]
/// );
/// ```
#[must_use]
pub fn check_links<S: BuildHasher>(
    tree: &[NavNode],
    known_paths: &HashSet<String, S>,
) -> Vec<BrokenLink> {
    let known: HashSet<String> = known_paths
        .iter()
        .map(|path| normalize_page_path(path))
        .collect();

    flatten(tree)
        .filter_map(|(_, node)| {
            let target = node.target()?;
            let page = target.page_path()?;
            (!known.contains(&page)).then(|| BrokenLink {
                label: node.label().to_owned(),
                target: target.as_str().to_owned(),
            })
        })
        .collect()
}
