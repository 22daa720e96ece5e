//! Tree operations
//!
//! Each operation is an `impl Node` block in its own module:
//!
//! - [`collapse`]: recursive summation into one dense matrix
//! - [`multiply`]: matrix–vector product over the collapsed form
//! - [`scale`]: in-place scaling of every reachable leaf

pub mod collapse;
pub mod multiply;
pub mod scale;
