//! # Matrix Tree
//!
//! A hierarchical container for related matrices.
//!
//! Every node is either a leaf holding a dense row-major `f64` matrix, or an
//! internal node whose value is the elementwise sum of its children. A tree
//! can be collapsed into one matrix, multiplied against a vector through its
//! collapsed form, or scaled in place.
//!
//! ## Architecture
//!
//! - **Nodes** ([`node`]): an owning recursive tree; each internal node owns
//!   its children outright, so a subtree is released with its parent
//! - **Operations** ([`ops`]): collapse, matrix–vector multiply, scale
//! - **Descriptions** ([`description`]): serde/JSON form of a tree
//!
//! ## Example
//!
//! ```
//! use matrix_tree::Node;
//!
//! let l1 = Node::leaf_with_data(2, 2, &[1.0, 0.0, 0.0, 1.0]).unwrap();
//! let l2 = Node::leaf_with_data(2, 2, &[0.5, 0.0, 0.0, 0.5]).unwrap();
//! let l3 = Node::leaf_with_data(2, 2, &[0.25, 0.0, 0.0, 0.25]).unwrap();
//!
//! let inner = Node::internal_with_children(2, 2, vec![l1, l2]).unwrap();
//! let mut root = Node::internal_with_children(2, 2, vec![inner, l3]).unwrap();
//!
//! assert_eq!(root.collapse().unwrap().as_slice(), &[1.75, 0.0, 0.0, 1.75]);
//!
//! root.scale(2.0);
//! assert_eq!(root.multiply_collapsed(&[1.0, 1.0]).unwrap(), vec![3.5, 3.5]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod description;
pub mod error;
pub mod matrix;
pub mod node;
pub mod ops;

// Re-export main types
pub use context::{TreeContext, DEFAULT_MAX_DEPTH};
pub use description::{TreeDescription, MAX_DESCRIPTION_DEPTH};
pub use error::{MatrixTreeError, RejectedChildren, Result};
pub use matrix::Matrix;
pub use node::{Node, NodeKind, Shape, TreeDisplay};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
