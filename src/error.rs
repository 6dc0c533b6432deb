//! Error types for tree operations with preconditions.

use thiserror::Error;

/// Errors returned by operations that cannot act on the current tree.
///
/// Plain lookups never fail; they return `None` for a missing key. Only operations that
/// require a node to exist report a `TreeError`.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreeError {
    /// The operation needs at least one entry but the tree is empty.
    #[error("tree is empty")]
    EmptyTree,

    /// A rank was at or past the number of entries.
    #[error("index {index} out of range for tree of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(TreeError::EmptyTree.to_string(), "tree is empty");
        assert_eq!(
            TreeError::IndexOutOfRange { index: 3, size: 3 }.to_string(),
            "index 3 out of range for tree of size 3"
        );
    }
}
