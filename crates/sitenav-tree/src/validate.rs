//! Structural validation of authored navigation trees.

use std::fmt;

use serde::Serialize;

use crate::link::Link;
use crate::node::NavNode;

/// Kind of structural defect found in a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    /// Label is empty or whitespace only.
    EmptyLabel,
    /// Node has neither a link target nor children.
    DeadEnd,
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => f.write_str("empty label"),
            Self::DeadEnd => f.write_str("no link and no children"),
        }
    }
}

/// Structural defect in authored navigation data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("malformed navigation node {}: {kind}", location(.trail, .label))]
pub struct MalformedNode {
    /// Label of the offending node (may be empty).
    pub label: String,
    /// Labels of the node's ancestors, outermost first.
    pub trail: Vec<String>,
    /// What is wrong with the node.
    pub kind: DefectKind,
}

impl MalformedNode {
    /// Human-readable position of the node, e.g. `Guide > Basics > Setup`.
    #[must_use]
    pub fn location(&self) -> String {
        location(&self.trail, &self.label)
    }
}

fn location(trail: &[String], label: &str) -> String {
    let label = if label.trim().is_empty() {
        "<unnamed>"
    } else {
        label
    };
    if trail.is_empty() {
        format!("'{label}'")
    } else {
        format!("'{} > {label}'", trail.join(" > "))
    }
}

/// Validate a navigation tree.
///
/// Fails with the first defect in pre-order: a node with an empty label, or a
/// node that has neither a link target nor any children.
///
/// # Example
///
/// ```
/// use sitenav_tree::{NavNode, validate};
///
/// let tree = vec![NavNode::group("Guide", vec![NavNode::link("Intro", "/guide/intro")])];
/// assert!(validate(&tree).is_ok());
///
/// let broken = vec![NavNode::group("Empty", vec![])];
/// assert!(validate(&broken).is_err());
/// ```
pub fn validate(tree: &[NavNode]) -> Result<(), MalformedNode> {
    let mut trail = Vec::new();
    let mut first = None;
    walk(tree, &mut trail, &mut |defect| {
        first = Some(defect);
        false
    });
    first.map_or(Ok(()), Err)
}

/// Collect every defect in a navigation tree, in pre-order.
#[must_use]
pub fn defects(tree: &[NavNode]) -> Vec<MalformedNode> {
    let mut trail = Vec::new();
    let mut found = Vec::new();
    walk(tree, &mut trail, &mut |defect| {
        found.push(defect);
        true
    });
    found
}

/// Depth-first walk reporting defects to `report`.
///
/// Stops as soon as `report` returns `false`. Returns `false` when stopped.
fn walk(
    nodes: &[NavNode],
    trail: &mut Vec<String>,
    report: &mut dyn FnMut(MalformedNode) -> bool,
) -> bool {
    for node in nodes {
        if let Some(kind) = defect_of(node) {
            let defect = MalformedNode {
                label: node.label().to_owned(),
                trail: trail.clone(),
                kind,
            };
            if !report(defect) {
                return false;
            }
        }

        let children = node.children();
        if !children.is_empty() {
            trail.push(node.label().to_owned());
            let keep_going = walk(children, trail, report);
            trail.pop();
            if !keep_going {
                return false;
            }
        }
    }
    true
}

fn defect_of(node: &NavNode) -> Option<DefectKind> {
    if node.label().trim().is_empty() {
        Some(DefectKind::EmptyLabel)
    } else if node.target().is_none_or(Link::is_empty) && node.children().is_empty() {
        Some(DefectKind::DeadEnd)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_tree_passes() {
        let tree = vec![
            NavNode::group(
                "Getting Started",
                vec![
                    NavNode::link("Installation", "/guide/installation"),
                    NavNode::group("Basics", vec![NavNode::link("Commands", "/guide/commands")]),
                ],
            ),
            NavNode::group("Reference", vec![]).with_target("/reference/"),
        ];

        assert!(validate(&tree).is_ok());
        assert!(defects(&tree).is_empty());
    }

    #[test]
    fn test_empty_tree_is_valid() {
        assert!(validate(&[]).is_ok());
    }

    #[test]
    fn test_dead_end_group_fails() {
        let tree = vec![NavNode::group(
            "Guide",
            vec![NavNode::group("Nothing here", vec![])],
        )];

        let err = validate(&tree).unwrap_err();

        assert_eq!(
            err,
            MalformedNode {
                label: "Nothing here".to_owned(),
                trail: vec!["Guide".to_owned()],
                kind: DefectKind::DeadEnd,
            }
        );
    }

    #[test]
    fn test_empty_label_fails() {
        let tree = vec![NavNode::link("  ", "/somewhere")];

        let err = validate(&tree).unwrap_err();

        assert_eq!(err.kind, DefectKind::EmptyLabel);
        assert!(err.trail.is_empty());
    }

    #[test]
    fn test_validate_reports_first_defect_in_pre_order() {
        let tree = vec![
            NavNode::group("A", vec![NavNode::group("A1", vec![])]),
            NavNode::group("B", vec![]),
        ];

        let err = validate(&tree).unwrap_err();

        assert_eq!(err.label, "A1");
    }

    #[test]
    fn test_defects_collects_all() {
        let tree = vec![
            NavNode::group("A", vec![NavNode::group("A1", vec![]), NavNode::link("", "/x")]),
            NavNode::group("B", vec![]),
        ];

        let found = defects(&tree);

        let summary: Vec<_> = found
            .iter()
            .map(|d| (d.location(), d.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("'A > A1'".to_owned(), DefectKind::DeadEnd),
                ("'A > <unnamed>'".to_owned(), DefectKind::EmptyLabel),
                ("'B'".to_owned(), DefectKind::DeadEnd),
            ]
        );
    }

    #[test]
    fn test_error_message_names_node_and_trail() {
        let tree = vec![NavNode::group(
            "Guide",
            vec![NavNode::group("Setup", vec![])],
        )];

        let msg = validate(&tree).unwrap_err().to_string();

        assert_eq!(
            msg,
            "malformed navigation node 'Guide > Setup': no link and no children"
        );
    }

    #[test]
    fn test_link_with_empty_target_is_dead_end() {
        let tree = vec![NavNode::group(
            "Guide",
            vec![NavNode::link("Nowhere", "")],
        )];

        let err = validate(&tree).unwrap_err();

        assert_eq!(err.label, "Nowhere");
        assert_eq!(err.kind, DefectKind::DeadEnd);
    }

    #[test]
    fn test_authored_blank_link_is_dead_end() {
        let tree: Vec<NavNode> =
            serde_json::from_str(r#"[{"text": "Nowhere", "link": ""}]"#).unwrap();

        let err = validate(&tree).unwrap_err();

        assert_eq!(err.kind, DefectKind::DeadEnd);
    }
}
