//! Navigation node type.
//!
//! Nodes are authored in the `{ text, link, items, collapsed }` shape used by
//! site generators and converted into a tagged tree on deserialization:
//! entries with `items` (even an empty list) or without `link` become
//! [`NavNode::Group`], the rest become [`NavNode::Link`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::link::Link;

/// Labeled entry in a navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum NavNode {
    /// Clickable leaf.
    Link {
        /// Display text.
        label: String,
        /// Link target.
        target: Link,
    },
    /// Group of child nodes, optionally clickable itself.
    Group {
        /// Display text.
        label: String,
        /// Link target of the group header, `None` for a plain header.
        target: Option<Link>,
        /// Rendering hint: start collapsed.
        collapsed: bool,
        /// Child nodes in display order.
        children: Vec<NavNode>,
    },
}

impl NavNode {
    /// Create a leaf link node.
    pub fn link(label: impl Into<String>, target: impl Into<Link>) -> Self {
        Self::Link {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Create a non-clickable group header with children.
    pub fn group(label: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self::Group {
            label: label.into(),
            target: None,
            collapsed: false,
            children,
        }
    }

    /// Make this node clickable. A leaf keeps its kind, a group gets a header link.
    #[must_use]
    pub fn with_target(self, link: impl Into<Link>) -> Self {
        match self {
            Self::Link { label, .. } => Self::Link {
                label,
                target: link.into(),
            },
            Self::Group {
                label,
                collapsed,
                children,
                ..
            } => Self::Group {
                label,
                target: Some(link.into()),
                collapsed,
                children,
            },
        }
    }

    /// Mark a group as collapsed by default. No effect on leaves.
    #[must_use]
    pub fn collapsed(mut self) -> Self {
        if let Self::Group { collapsed, .. } = &mut self {
            *collapsed = true;
        }
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link { label, .. } | Self::Group { label, .. } => label,
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<&Link> {
        match self {
            Self::Link { target, .. } => Some(target),
            Self::Group { target, .. } => target.as_ref(),
        }
    }

    /// Child nodes; always empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[NavNode] {
        match self {
            Self::Link { .. } => &[],
            Self::Group { children, .. } => children,
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        matches!(self, Self::Group { collapsed: true, .. })
    }

    pub(crate) fn label_mut(&mut self) -> &mut String {
        match self {
            Self::Link { label, .. } | Self::Group { label, .. } => label,
        }
    }

    /// Mutable children of a group, `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<NavNode>> {
        match self {
            Self::Link { .. } => None,
            Self::Group { children, .. } => Some(children),
        }
    }

    /// Replace the display text.
    pub fn set_label(&mut self, label: impl Into<String>) {
        *self.label_mut() = label.into();
    }

    /// Replace the link target, keeping the node kind.
    pub fn set_target(&mut self, link: impl Into<Link>) {
        match self {
            Self::Link { target, .. } => *target = link.into(),
            Self::Group { target, .. } => *target = Some(link.into()),
        }
    }
}

/// Total number of nodes in a tree.
#[must_use]
pub fn node_count(tree: &[NavNode]) -> usize {
    tree.iter().map(|node| 1 + node_count(node.children())).sum()
}

/// Number of levels in a tree (0 for an empty tree, 1 for a flat list).
#[must_use]
pub fn max_depth(tree: &[NavNode]) -> usize {
    tree.iter()
        .map(|node| 1 + max_depth(node.children()))
        .max()
        .unwrap_or(0)
}

/// Authored shape of a navigation node.
#[derive(Serialize, Deserialize)]
struct RawNode {
    #[serde(default)]
    text: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<NavNode>>,
    #[serde(default, skip_serializing_if = "is_false")]
    collapsed: bool,
}

/// A blank `link` means the node has no target.
fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Link>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(|value| Link::parse(&value)))
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl From<RawNode> for NavNode {
    fn from(raw: RawNode) -> Self {
        match (raw.link, raw.items) {
            (Some(target), None) => Self::Link {
                label: raw.text,
                target,
            },
            (target, items) => Self::Group {
                label: raw.text,
                target,
                collapsed: raw.collapsed,
                children: items.unwrap_or_default(),
            },
        }
    }
}

impl From<NavNode> for RawNode {
    fn from(node: NavNode) -> Self {
        match node {
            NavNode::Link { label, target } => Self {
                text: label,
                link: Some(target),
                items: None,
                collapsed: false,
            },
            NavNode::Group {
                label,
                target,
                collapsed,
                children,
            } => Self {
                text: label,
                link: target,
                items: Some(children),
                collapsed,
            },
        }
    }
}
