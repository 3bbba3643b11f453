//! Right-aligned broadcast-shape inference.
//!
//! Shape combination follows the numpy rule: axes are aligned from the last
//! dimension backwards, a missing axis counts as size 1, and a size-1 axis
//! stretches to match the other operand. This module only infers the
//! combined shape; the elementwise replication itself is the backend's job
//! (`ArrayBase::broadcast`).

use smallvec::smallvec;

use crate::error::{ComponentError, Result};
use crate::types::Shape;

/// Compute the combined shape of two operands under right-aligned
/// broadcasting.
///
/// Walking axis positions from the end, the resulting dimension is the other
/// operand's when one side is 1, the shared value when both agree, and an
/// error naming both shapes otherwise.
///
/// # Examples
///
/// ```
/// use compar_core::broadcast_shape;
///
/// let shape = broadcast_shape(&[3, 3], &[1, 3, 3]).unwrap();
/// assert_eq!(shape.as_slice(), &[1, 3, 3]);
///
/// assert!(broadcast_shape(&[3, 3], &[1, 2, 3]).is_err());
/// ```
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Shape> {
    let n = lhs.len().max(rhs.len());
    let mut shape: Shape = smallvec![0; n];
    for i in 0..n {
        let da = if i < lhs.len() { lhs[lhs.len() - 1 - i] } else { 1 };
        let db = if i < rhs.len() { rhs[rhs.len() - 1 - i] } else { 1 };
        let dim = if da == 1 {
            db
        } else if db == 1 || da == db {
            da
        } else {
            return Err(ComponentError::broadcast(lhs, rhs));
        };
        shape[n - 1 - i] = dim;
    }
    Ok(shape)
}
