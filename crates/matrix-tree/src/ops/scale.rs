//! In-place scaling of every leaf in a subtree

use tracing::trace;

use crate::node::{Node, NodeBody};

impl Node {
    /// Multiply every element of every reachable leaf by `scalar`.
    ///
    /// Structure is unchanged. Returns the number of leaves scaled.
    pub fn scale(&mut self, scalar: f64) -> usize {
        let mut leaves = 0;
        let mut stack: Vec<&mut Node> = vec![self];

        while let Some(Node { body, .. }) = stack.pop() {
            match body {
                NodeBody::Leaf(data) => {
                    data.iter_mut().for_each(|value| *value *= scalar);
                    leaves += 1;
                }
                NodeBody::Internal { children, .. } => stack.extend(children.iter_mut()),
            }
        }

        trace!(scalar, leaves, "scaled subtree");
        leaves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_leaf() {
        let mut leaf = Node::leaf_with_data(1, 3, &[1.0, -2.0, 0.5]).unwrap();
        assert_eq!(leaf.scale(2.0), 1);
        assert_eq!(leaf.leaf_data(), Some(&[2.0, -4.0, 1.0][..]));
    }

    #[test]
    fn test_scale_reaches_nested_leaves() {
        let a = Node::leaf_with_data(1, 1, &[1.0]).unwrap();
        let b = Node::leaf_with_data(1, 1, &[2.0]).unwrap();
        let inner = Node::internal_with_children(1, 1, vec![a]).unwrap();
        let mut root = Node::internal_with_children(1, 1, vec![inner, b]).unwrap();

        assert_eq!(root.scale(-3.0), 2);
        assert_eq!(root.collapse().unwrap().as_slice(), &[-9.0]);
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_scale_empty_internal() {
        let mut root = Node::internal(2, 2).unwrap();
        assert_eq!(root.scale(10.0), 0);
    }
}
