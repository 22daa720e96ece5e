//! Collapse: recursive summation of a subtree into one dense matrix

use tracing::trace;

use crate::context::TreeContext;
use crate::error::{MatrixTreeError, Result};
use crate::matrix::Matrix;
use crate::node::{zeroed_buffer, Node, NodeBody};

impl Node {
    /// Collapse this subtree into a dense matrix of its declared shape.
    ///
    /// A leaf yields an exact copy of its data. An internal node yields the
    /// elementwise sum of its children's collapses, visited depth-first in
    /// insertion order starting from zero.
    ///
    /// Fails with `ShapeMismatch` if any leaf below holds a different number
    /// of elements than `rows * cols` of this node.
    pub fn collapse(&self) -> Result<Matrix> {
        self.collapse_with(&TreeContext::default())
    }

    /// Collapse with an explicit traversal context.
    pub fn collapse_with(&self, ctx: &TreeContext) -> Result<Matrix> {
        let data = match &self.body {
            NodeBody::Leaf(data) => data.clone(),
            NodeBody::Internal { .. } => {
                let mut acc = zeroed_buffer(self.shape.len())?;
                self.accumulate(&mut acc, ctx, 0)?;
                acc
            }
        };

        trace!(shape = %self.shape, kind = %self.kind(), "collapsed subtree");
        Ok(Matrix::from_parts(self.shape.rows, self.shape.cols, data))
    }

    /// Collapse into a caller-provided row-major buffer.
    ///
    /// `output` must hold exactly `rows * cols` values. It is written only
    /// once the whole collapse has succeeded.
    pub fn collapse_into(&self, output: &mut [f64]) -> Result<()> {
        if output.len() != self.shape.len() {
            return Err(MatrixTreeError::DimensionMismatch {
                expected: self.shape.len(),
                found: output.len(),
            });
        }
        let collapsed = self.collapse()?;
        output.copy_from_slice(collapsed.as_slice());
        Ok(())
    }

    /// Add this subtree's value into `acc`.
    ///
    /// The accumulator is owned by the outermost collapse call and passed
    /// down; no scratch state outlives the call.
    fn accumulate(&self, acc: &mut [f64], ctx: &TreeContext, depth: usize) -> Result<()> {
        if !ctx.allows(depth) {
            return Err(MatrixTreeError::DepthLimitExceeded {
                limit: ctx.max_depth,
            });
        }

        match &self.body {
            NodeBody::Leaf(data) => {
                if data.len() != acc.len() {
                    return Err(MatrixTreeError::ShapeMismatch {
                        expected: acc.len(),
                        found: data.len(),
                    });
                }
                for (sum, value) in acc.iter_mut().zip(data) {
                    *sum += value;
                }
                Ok(())
            }
            NodeBody::Internal { children, .. } => children
                .iter()
                .try_for_each(|child| child.accumulate(acc, ctx, depth + 1)),
        }
    }
}
