//! Tree nodes: construction, population, introspection and teardown

mod display;

pub use display::TreeDisplay;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{MatrixTreeError, RejectedChildren, Result};

/// Which variant a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Holds a dense matrix
    Leaf,

    /// Holds child nodes that are summed on collapse
    Internal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf => write!(f, "leaf"),
            NodeKind::Internal => write!(f, "internal"),
        }
    }
}

/// Declared dimensions of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    /// Number of rows
    pub rows: usize,

    /// Number of columns
    pub cols: usize,
}

impl Shape {
    /// Validate and build a shape.
    ///
    /// Both dimensions must be positive and their product must fit in `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixTreeError::InvalidDimensions { rows, cols });
        }
        if rows.checked_mul(cols).is_none() {
            return Err(MatrixTreeError::AllocationFailure {
                elements: usize::MAX,
            });
        }
        Ok(Self { rows, cols })
    }

    /// Element count, `rows * cols`
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false for a validated shape
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Variant payload. Only the fields valid for each kind exist.
pub(crate) enum NodeBody {
    Leaf(Vec<f64>),
    Internal { children: Vec<Node>, populated: bool },
}

/// A node of a matrix tree.
///
/// A leaf owns a dense `rows x cols` row-major buffer. An internal node owns
/// its children outright; its value is the elementwise sum of theirs.
///
/// # Example
///
/// ```
/// use matrix_tree::Node;
///
/// let a = Node::leaf_with_data(2, 2, &[1.0, 0.0, 0.0, 1.0]).unwrap();
/// let b = Node::leaf_with_data(2, 2, &[2.0, 0.0, 0.0, 2.0]).unwrap();
/// let sum = Node::internal_with_children(2, 2, vec![a, b]).unwrap();
///
/// assert_eq!(sum.collapse().unwrap().as_slice(), &[3.0, 0.0, 0.0, 3.0]);
/// ```
pub struct Node {
    pub(crate) shape: Shape,
    pub(crate) body: NodeBody,
}

/// Allocate a zero-filled buffer, reporting allocator refusal as an error.
pub(crate) fn zeroed_buffer(len: usize) -> Result<Vec<f64>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| MatrixTreeError::AllocationFailure { elements: len })?;
    data.resize(len, 0.0);
    Ok(data)
}

impl Node {
    // ═══════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════

    /// Create an empty node of the given shape and kind.
    ///
    /// A leaf gets a zero-filled buffer; an internal node starts with no
    /// children until `set_internal` is called.
    pub fn new(rows: usize, cols: usize, kind: NodeKind) -> Result<Self> {
        let shape = Shape::new(rows, cols).inspect_err(|err| {
            debug!(rows, cols, %kind, error = %err, "rejected node shape");
        })?;

        let body = match kind {
            NodeKind::Leaf => NodeBody::Leaf(zeroed_buffer(shape.len())?),
            NodeKind::Internal => NodeBody::Internal {
                children: Vec::new(),
                populated: false,
            },
        };

        trace!(%shape, %kind, "created node");
        Ok(Self { shape, body })
    }

    /// Create a zero-filled leaf.
    pub fn leaf(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, NodeKind::Leaf)
    }

    /// Create an internal node with no children yet.
    pub fn internal(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, NodeKind::Internal)
    }

    /// Create a leaf and copy `data` into it in one step.
    pub fn leaf_with_data(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        let mut node = Self::leaf(rows, cols)?;
        node.set_leaf(data)?;
        Ok(node)
    }

    /// Create an internal node that owns `children`.
    pub fn internal_with_children(rows: usize, cols: usize, children: Vec<Node>) -> Result<Self> {
        let mut node = Self::internal(rows, cols)?;
        node.set_internal(children)?;
        Ok(node)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Population
    // ═══════════════════════════════════════════════════════════════════

    /// Copy `data` into this leaf's buffer.
    ///
    /// Fails with `TypeMismatch` on an internal node and with `SizeMismatch`
    /// when `data.len() != rows * cols`. The buffer is untouched on failure.
    pub fn set_leaf(&mut self, data: &[f64]) -> Result<()> {
        let expected = self.shape.len();
        match &mut self.body {
            NodeBody::Leaf(buffer) => {
                if data.len() != expected {
                    debug!(expected, found = data.len(), "rejected leaf data");
                    return Err(MatrixTreeError::SizeMismatch {
                        expected,
                        found: data.len(),
                    });
                }
                buffer.copy_from_slice(data);
                Ok(())
            }
            NodeBody::Internal { .. } => Err(MatrixTreeError::TypeMismatch {
                expected: NodeKind::Leaf,
                found: NodeKind::Internal,
            }),
        }
    }

    /// Hand ownership of `children` to this internal node.
    ///
    /// May be called once per node. An empty list is allowed and collapses
    /// to zeros. Children's shapes are not checked here; collapse reports
    /// any leaf whose size disagrees with the collapse root.
    ///
    /// On failure the children are returned inside the error.
    pub fn set_internal(
        &mut self,
        children: Vec<Node>,
    ) -> std::result::Result<(), RejectedChildren> {
        let error = match &mut self.body {
            NodeBody::Internal {
                children: slot,
                populated,
            } => {
                if !*populated {
                    debug!(shape = %self.shape, num_children = children.len(), "populated internal node");
                    *slot = children;
                    *populated = true;
                    return Ok(());
                }
                MatrixTreeError::ChildrenAlreadySet
            }
            NodeBody::Leaf(_) => MatrixTreeError::TypeMismatch {
                expected: NodeKind::Internal,
                found: NodeKind::Leaf,
            },
        };
        Err(RejectedChildren { error, children })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Introspection
    // ═══════════════════════════════════════════════════════════════════

    /// Which variant this node is
    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::Leaf(_) => NodeKind::Leaf,
            NodeBody::Internal { .. } => NodeKind::Internal,
        }
    }

    /// True for leaves
    pub fn is_leaf(&self) -> bool {
        matches!(self.body, NodeBody::Leaf(_))
    }

    /// True for internal nodes
    pub fn is_internal(&self) -> bool {
        !self.is_leaf()
    }

    /// Declared row count
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Declared column count
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Declared shape
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of direct children (always 0 for a leaf)
    pub fn num_children(&self) -> usize {
        self.children().len()
    }

    /// Direct children (empty for a leaf or an unpopulated internal node)
    pub fn children(&self) -> &[Node] {
        match &self.body {
            NodeBody::Leaf(_) => &[],
            NodeBody::Internal { children, .. } => children,
        }
    }

    /// The leaf's row-major buffer, or `None` for an internal node
    pub fn leaf_data(&self) -> Option<&[f64]> {
        match &self.body {
            NodeBody::Leaf(data) => Some(data),
            NodeBody::Internal { .. } => None,
        }
    }

    /// Whether the node has been given its contents.
    ///
    /// Leaves always count as populated since they are zero-filled at creation.
    pub fn is_populated(&self) -> bool {
        match &self.body {
            NodeBody::Leaf(_) => true,
            NodeBody::Internal { populated, .. } => *populated,
        }
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_, _| count += 1);
        count
    }

    /// Number of leaves in this subtree
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk(|node, _| {
            if node.is_leaf() {
                count += 1;
            }
        });
        count
    }

    /// Length of the longest root-to-node path (a lone node has depth 0)
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        self.walk(|_, depth| deepest = deepest.max(depth));
        deepest
    }

    /// Visit every node in the subtree with its depth, without recursion.
    fn walk(&self, mut visit: impl FnMut(&Node, usize)) {
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            visit(node, depth);
            stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }
    }

    /// Render the subtree as indented text.
    pub fn display(&self) -> TreeDisplay<'_> {
        TreeDisplay::new(self)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Teardown
    // ═══════════════════════════════════════════════════════════════════

    /// Destroy this node and its whole subtree, returning how many nodes
    /// were released.
    ///
    /// Dropping a node does the same; this form makes the release explicit
    /// and reports its size.
    pub fn destroy(self) -> usize {
        let released = self.node_count();
        trace!(shape = %self.shape, released, "destroying subtree");
        drop(self);
        released
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Move descendants onto a work stack so deep trees do not recurse.
        let mut pending = match &mut self.body {
            NodeBody::Internal { children, .. } if !children.is_empty() => {
                std::mem::take(children)
            }
            _ => return,
        };

        while let Some(mut node) = pending.pop() {
            if let NodeBody::Internal { children, .. } = &mut node.body {
                pending.append(children);
            }
        }
    }
}

impl Clone for Node {
    /// Deep copy, built bottom-up from an explicit stack of partially
    /// copied ancestors.
    fn clone(&self) -> Self {
        let mut ancestors: Vec<(&Node, Vec<Node>)> = Vec::new();
        let mut current: (&Node, Vec<Node>) = (self, Vec::with_capacity(self.num_children()));

        loop {
            let source = current.0;
            if let Some(child) = source.children().get(current.1.len()) {
                let copy = (child, Vec::with_capacity(child.num_children()));
                ancestors.push(std::mem::replace(&mut current, copy));
                continue;
            }

            let (source, copied) = current;
            let body = match &source.body {
                NodeBody::Leaf(data) => NodeBody::Leaf(data.clone()),
                NodeBody::Internal { populated, .. } => NodeBody::Internal {
                    children: copied,
                    populated: *populated,
                },
            };
            let node = Node {
                shape: source.shape,
                body,
            };

            match ancestors.pop() {
                Some(mut parent) => {
                    parent.1.push(node);
                    current = parent;
                }
                None => return node,
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((a, b)) = pairs.pop() {
            if a.shape != b.shape {
                return false;
            }
            match (&a.body, &b.body) {
                (NodeBody::Leaf(x), NodeBody::Leaf(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (
                    NodeBody::Internal {
                        children: xs,
                        populated: px,
                    },
                    NodeBody::Internal {
                        children: ys,
                        populated: py,
                    },
                ) => {
                    if px != py || xs.len() != ys.len() {
                        return false;
                    }
                    pairs.extend(xs.iter().zip(ys));
                }
                _ => return false,
            }
        }
        true
    }
}

/// Levels of children `Debug` prints before eliding the rest.
const DEBUG_NESTING: usize = 32;

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DebugNode {
            node: self,
            level: 0,
        }
        .fmt(f)
    }
}

struct DebugNode<'a> {
    node: &'a Node,
    level: usize,
}

impl fmt::Debug for DebugNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node.body {
            NodeBody::Leaf(data) => f
                .debug_struct("Leaf")
                .field("shape", &self.node.shape)
                .field("data", data)
                .finish(),
            NodeBody::Internal {
                children,
                populated,
            } => {
                let mut out = f.debug_struct("Internal");
                out.field("shape", &self.node.shape)
                    .field("populated", populated);
                if self.level < DEBUG_NESTING {
                    out.field(
                        "children",
                        &DebugChildren {
                            children,
                            level: self.level + 1,
                        },
                    )
                    .finish()
                } else {
                    out.field("child_count", &children.len())
                        .finish_non_exhaustive()
                }
            }
        }
    }
}

struct DebugChildren<'a> {
    children: &'a [Node],
    level: usize,
}

impl fmt::Debug for DebugChildren<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.children.iter().map(|node| DebugNode {
                node,
                level: self.level,
            }))
            .finish()
    }
}
