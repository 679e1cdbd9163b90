//! Pre-order flattening of navigation trees and reconstruction from depths.

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::link::Link;
use crate::node::NavNode;

/// Pre-order iterator over `(depth, node)` pairs.
///
/// Top-level nodes have depth 0. Created by [`flatten`]; every call to
/// [`flatten`] starts a fresh traversal from the root.
#[derive(Clone, Debug)]
pub struct Flatten<'a> {
    stack: Vec<(usize, std::slice::Iter<'a, NavNode>)>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = (usize, &'a NavNode);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, siblings) = self.stack.last_mut()?;
            let depth = *depth;
            match siblings.next() {
                Some(node) => {
                    let children = node.children();
                    if !children.is_empty() {
                        self.stack.push((depth + 1, children.iter()));
                    }
                    return Some((depth, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Iterate a tree in pre-order, parents before their children.
///
/// ```
/// use sitenav_tree::{NavNode, flatten};
///
/// let tree = vec![NavNode::group("Guide", vec![NavNode::link("Intro", "/guide/intro")])];
/// let labels: Vec<_> = flatten(&tree).map(|(depth, node)| (depth, node.label())).collect();
/// assert_eq!(labels, vec![(0, "Guide"), (1, "Intro")]);
/// ```
#[must_use]
pub fn flatten(tree: &[NavNode]) -> Flatten<'_> {
    Flatten {
        stack: vec![(0, tree.iter())],
    }
}

/// One node of a flat tree listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    /// Nesting depth, 0 for top-level nodes.
    pub depth: usize,
    /// Display text.
    pub label: String,
    /// Link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Link>,
    /// Collapsed-by-default hint (groups only).
    #[serde(default)]
    pub collapsed: bool,
    /// Whether the node is a group.
    #[serde(default)]
    pub group: bool,
}

impl FlatEntry {
    fn from_node(depth: usize, node: &NavNode) -> Self {
        Self {
            depth,
            label: node.label().to_owned(),
            target: node.target().cloned(),
            collapsed: node.is_collapsed(),
            group: node.is_group(),
        }
    }

    /// Childless node for this entry. Non-group entries without a target
    /// become empty groups, which validation reports as dead ends.
    fn to_node(&self) -> NavNode {
        match (&self.target, self.group) {
            (Some(target), false) => NavNode::Link {
                label: self.label.clone(),
                target: target.clone(),
            },
            (target, _) => NavNode::Group {
                label: self.label.clone(),
                target: target.clone(),
                collapsed: self.collapsed,
                children: Vec::new(),
            },
        }
    }
}

/// Flat pre-order listing of a tree with recorded depths.
#[must_use]
pub fn flat_entries(tree: &[NavNode]) -> Vec<FlatEntry> {
    flatten(tree)
        .map(|(depth, node)| FlatEntry::from_node(depth, node))
        .collect()
}

/// Rebuild a tree from a flat pre-order listing.
///
/// Inverse of [`flat_entries`]. Fails when an entry is more than one level
/// deeper than its predecessor, or would nest under a leaf entry.
pub fn unflatten(entries: &[FlatEntry]) -> Result<Vec<NavNode>, TreeError> {
    // levels[d] collects the nodes at depth d under the most recent parent
    let mut levels: Vec<Vec<NavNode>> = vec![Vec::new()];

    for (index, entry) in entries.iter().enumerate() {
        let current = levels.len() - 1;

        if entry.depth > current {
            let parent_is_group = levels[current].last().is_some_and(NavNode::is_group);
            if entry.depth != current + 1 || levels[current].is_empty() {
                return Err(TreeError::DepthJump {
                    index,
                    from: current,
                    to: entry.depth,
                });
            }
            if !parent_is_group {
                return Err(TreeError::NotAGroup { index });
            }
            levels.push(Vec::new());
        } else {
            while levels.len() - 1 > entry.depth {
                close_level(&mut levels);
            }
        }

        if let Some(level) = levels.last_mut() {
            level.push(entry.to_node());
        }
    }

    while levels.len() > 1 {
        close_level(&mut levels);
    }
    Ok(levels.pop().unwrap_or_default())
}

/// Attach the deepest level as children of the last node one level up.
fn close_level(levels: &mut Vec<Vec<NavNode>>) {
    let Some(children) = levels.pop() else {
        return;
    };
    if let Some(slot) = levels
        .last_mut()
        .and_then(|level| level.last_mut())
        .and_then(NavNode::children_mut)
    {
        *slot = children;
    }
}
