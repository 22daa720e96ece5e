//! Matrix–vector product over the collapsed form

use crate::context::TreeContext;
use crate::error::{MatrixTreeError, Result};
use crate::node::Node;

impl Node {
    /// Compute `collapse(self) · x`.
    ///
    /// `x` must have `cols` elements; the result has `rows` elements.
    pub fn multiply_collapsed(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.multiply_collapsed_with(x, &TreeContext::default())
    }

    /// Multiply with an explicit traversal context.
    pub fn multiply_collapsed_with(&self, x: &[f64], ctx: &TreeContext) -> Result<Vec<f64>> {
        self.check_input(x)?;
        self.collapse_with(ctx)?.mul_vec(x)
    }

    /// Multiply into a caller-provided output of length `rows`.
    ///
    /// `y` is left untouched on every error, including collapse failures.
    pub fn multiply_collapsed_into(&self, x: &[f64], y: &mut [f64]) -> Result<()> {
        self.multiply_collapsed_into_with(x, y, &TreeContext::default())
    }

    /// [`Node::multiply_collapsed_into`] with an explicit traversal context.
    pub fn multiply_collapsed_into_with(
        &self,
        x: &[f64],
        y: &mut [f64],
        ctx: &TreeContext,
    ) -> Result<()> {
        self.check_input(x)?;
        if y.len() != self.rows() {
            return Err(MatrixTreeError::DimensionMismatch {
                expected: self.rows(),
                found: y.len(),
            });
        }
        self.collapse_with(ctx)?.mul_vec_into(x, y)
    }

    fn check_input(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.cols() {
            return Err(MatrixTreeError::DimensionMismatch {
                expected: self.cols(),
                found: x.len(),
            });
        }
        Ok(())
    }
}
