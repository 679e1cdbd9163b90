//! Errors for tree reconstruction.

/// Error rebuilding a tree from a flat listing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Entry is more than one level deeper than its predecessor.
    #[error("entry {index} jumps from depth {from} to depth {to}")]
    DepthJump {
        /// Position of the entry in the listing.
        index: usize,
        /// Deepest open level before the entry.
        from: usize,
        /// Depth recorded on the entry.
        to: usize,
    },
    /// Entry would become a child of a leaf link.
    #[error("entry {index} nests under a link that cannot have children")]
    NotAGroup {
        /// Position of the entry in the listing.
        index: usize,
    },
}
