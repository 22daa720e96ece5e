//! Indented text rendering of a tree

use std::fmt;

use super::{Node, NodeBody};
use crate::matrix::write_block;

/// Read-only `Display` adapter returned by [`Node::display`].
///
/// ```text
/// INTERNAL (2x2) with 2 children:
///   Child 0:
///     LEAF (2x2):
///       [
///            1.000    0.000
///            0.000    1.000
///       ]
///   Child 1:
///     ...
/// ```
#[derive(Clone, Copy)]
pub struct TreeDisplay<'a> {
    node: &'a Node,
    depth: usize,
}

impl<'a> TreeDisplay<'a> {
    pub(super) fn new(node: &'a Node) -> Self {
        Self { node, depth: 0 }
    }

    /// Start the rendering `depth` levels in (two spaces per level).
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // (node, indent level, index under its parent)
        let mut stack = vec![(self.node, self.depth, None)];

        while let Some((node, depth, index)) = stack.pop() {
            let pad = "  ".repeat(depth);
            if let Some(i) = index {
                // Children sit two levels in, their label one level in.
                writeln!(f, "{}Child {i}:", &pad[2..])?;
            }
            match &node.body {
                NodeBody::Leaf(data) => {
                    writeln!(f, "{pad}LEAF ({}):", node.shape)?;
                    write_block(f, data, node.shape.cols, &"  ".repeat(depth + 1))?;
                    writeln!(f)?;
                }
                NodeBody::Internal { children, .. } => {
                    writeln!(
                        f,
                        "{pad}INTERNAL ({}) with {} children:",
                        node.shape,
                        children.len()
                    )?;
                    stack.extend(
                        children
                            .iter()
                            .enumerate()
                            .rev()
                            .map(|(i, child)| (child, depth + 2, Some(i))),
                    );
                }
            }
        }
        Ok(())
    }
}
