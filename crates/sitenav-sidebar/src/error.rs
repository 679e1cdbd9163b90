//! Sidebar error types.

/// No sidebar section matches a page path.
///
/// Recoverable: callers fall back to an empty sidebar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("No sidebar section matches {path}")]
    NoMatchingSection {
        /// Page path as requested.
        path: String,
    },
}

/// Error building a sidebar table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SidebarError {
    /// Two keys normalize to the same section prefix.
    #[error("Duplicate sidebar section {prefix} (from key {key:?})")]
    DuplicateSection {
        /// Normalized prefix.
        prefix: String,
        /// Key as authored.
        key: String,
    },
    /// Requested version is not declared.
    #[error("Unknown sidebar version: {0}")]
    UnknownVersion(String),
    /// A release patch could not be applied.
    #[error("Sidebar version {version}: {source}")]
    Patch {
        /// Release tag.
        version: String,
        /// Failing patch.
        #[source]
        source: PatchError,
    },
}

/// Error applying a sidebar patch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("section {section} does not exist")]
    UnknownSection { section: String },
    #[error("section {section} already exists")]
    SectionExists { section: String },
    #[error("no node '{path}' in section {section}")]
    NodeNotFound { section: String, path: String },
    #[error("node '{path}' in section {section} is a link and cannot have children")]
    NotAGroup { section: String, path: String },
    #[error("index {index} out of range for '{path}' in section {section} ({len} entries)")]
    IndexOutOfRange {
        section: String,
        path: String,
        index: usize,
        len: usize,
    },
}
