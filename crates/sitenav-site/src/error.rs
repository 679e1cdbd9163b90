//! Site error types.

use sitenav_sidebar::SidebarError;
use sitenav_tree::MalformedNode;

/// Error building a [`Site`](crate::Site).
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The sidebar for the selected version could not be built.
    #[error(transparent)]
    Sidebar(#[from] SidebarError),
    /// A sidebar section is malformed (strict mode only).
    #[error("Sidebar section {section}: {source}")]
    Malformed {
        /// Section prefix.
        section: String,
        /// First defect found in the section.
        #[source]
        source: MalformedNode,
    },
}
