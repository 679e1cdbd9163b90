//! Navigation tree model for sitenav.
//!
//! This crate provides:
//! - [`NavNode`]: tagged tree of link leaves and groups, deserialized from the
//!   `{ text, link, items, collapsed }` shape
//! - [`validate`] and [`defects`]: structural checks for authored trees
//! - [`flatten`], [`flat_entries`] and [`unflatten`]: pre-order listings
//! - [`check_links`]: advisory dead-link detection
//!
//! # Quick Start
//!
//! ```
//! use sitenav_tree::{NavNode, flatten, validate};
//!
//! let tree = vec![
//!     NavNode::group("Getting Started", vec![
//!         NavNode::link("Installation", "/guide/installation"),
//!         NavNode::link("Discord", "https://discord.gg/example"),
//!     ]),
//! ];
//!
//! validate(&tree)?;
//! assert_eq!(flatten(&tree).count(), 3);
//! # Ok::<(), sitenav_tree::MalformedNode>(())
//! ```

mod check;
mod error;
mod flatten;
mod link;
mod node;
mod validate;

pub use check::{BrokenLink, check_links};
pub use error::TreeError;
pub use flatten::{FlatEntry, Flatten, flat_entries, flatten, unflatten};
pub use link::{Link, normalize_page_path};
pub use node::{NavNode, max_depth, node_count};
pub use validate::{DefectKind, MalformedNode, defects, validate};

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(NavNode: Send, Sync);
    assert_impl_all!(BrokenLink: Send, Sync);
    assert_impl_all!(MalformedNode: Send, Sync);
}
