//! Error types for matrix-tree operations

use std::fmt;

use thiserror::Error;

use crate::node::{Node, NodeKind};

/// Main error type for matrix-tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixTreeError {
    /// A node was requested with zero rows or zero columns
    #[error("Invalid dimensions: {rows}x{cols} (both must be positive)")]
    InvalidDimensions {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// The element buffer for a node could not be allocated
    #[error("Allocation failure: could not allocate {elements} elements")]
    AllocationFailure {
        /// Number of elements requested (saturated on overflow)
        elements: usize,
    },

    /// A leaf operation was applied to an internal node or vice versa
    #[error("Type mismatch: expected {expected} node, got {found} node")]
    TypeMismatch {
        /// Kind the operation requires
        expected: NodeKind,
        /// Kind of the node it was applied to
        found: NodeKind,
    },

    /// Leaf data length differs from the declared element count
    #[error("Size mismatch: expected {expected} elements, got {found}")]
    SizeMismatch {
        /// Declared `rows * cols`
        expected: usize,
        /// Length of the supplied buffer
        found: usize,
    },

    /// A vector or output buffer does not match the declared rows/cols
    #[error("Dimension mismatch: expected length {expected}, got {found}")]
    DimensionMismatch {
        /// Length required by the node's declared shape
        expected: usize,
        /// Length supplied by the caller
        found: usize,
    },

    /// A leaf below a collapse root holds a different number of elements
    #[error("Shape mismatch: collapse root holds {expected} elements but a leaf below it holds {found}")]
    ShapeMismatch {
        /// `rows * cols` of the collapse root
        expected: usize,
        /// Element count of the offending leaf
        found: usize,
    },

    /// `set_internal` was called on a node whose children are already set
    #[error("Children already set: internal nodes are populated exactly once")]
    ChildrenAlreadySet,

    /// Collapse recursed deeper than the configured limit
    #[error("Depth limit exceeded: tree is deeper than {limit} levels")]
    DepthLimitExceeded {
        /// The configured maximum depth
        limit: usize,
    },

    /// A tree description could not be read or written
    #[error("Description error: {0}")]
    Description(String),
}

impl From<serde_json::Error> for MatrixTreeError {
    fn from(err: serde_json::Error) -> Self {
        MatrixTreeError::Description(err.to_string())
    }
}

/// Error returned by `Node::set_internal`.
///
/// A rejected child list is handed back so that ownership of the children
/// stays with the caller.
pub struct RejectedChildren {
    /// Why the children were rejected
    pub error: MatrixTreeError,

    /// The children that were passed in, untouched
    pub children: Vec<Node>,
}

impl RejectedChildren {
    /// Take the children back, discarding the error.
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }
}

impl fmt::Debug for RejectedChildren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RejectedChildren")
            .field("error", &self.error)
            .field("children", &self.children.len())
            .finish()
    }
}

impl fmt::Display for RejectedChildren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} children returned)", self.error, self.children.len())
    }
}

impl std::error::Error for RejectedChildren {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<RejectedChildren> for MatrixTreeError {
    fn from(rejected: RejectedChildren) -> Self {
        rejected.error
    }
}

/// Result type alias for matrix-tree operations
pub type Result<T> = std::result::Result<T, MatrixTreeError>;
