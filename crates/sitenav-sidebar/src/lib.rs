//! Sidebar tables for sitenav.
//!
//! This crate provides:
//! - [`SidebarTable`]: section prefix to navigation tree mapping
//! - [`resolve`]: longest-prefix selection of the tree for a page
//! - [`SidebarBuilder`]: versioned sidebars as patches on the latest table
//!
//! # Quick Start
//!
//! ```
//! use sitenav_sidebar::SidebarTable;
//! use sitenav_tree::NavNode;
//!
//! let table = SidebarTable::from_sections([
//!     ("/guide/", vec![NavNode::link("Installation", "/guide/installation")]),
//!     ("/nextftc/", vec![NavNode::link("Overview", "/nextftc/")]),
//! ])?;
//!
//! let (section, tree) = table.resolve_section("/nextftc/commands")?;
//! assert_eq!(section, "/nextftc/");
//! assert_eq!(tree[0].label(), "Overview");
//!
//! assert!(table.resolve("/unknown/path").is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod path;
mod table;
mod version;

pub use error::{PatchError, ResolveError, SidebarError};
pub use path::normalize_prefix;
pub use table::{SidebarTable, resolve};
pub use version::{Patch, Release, SidebarBuilder};
