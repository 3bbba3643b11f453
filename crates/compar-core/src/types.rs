//! Shared type aliases for component-array metadata.
//!
//! Shapes and start-index tuples are short (one entry per axis), so both use
//! `SmallVec` with an inline capacity of 6, falling back to the heap for
//! higher ranks.

use smallvec::SmallVec;

/// Number of independent indices of a component array.
pub type Rank = usize;

/// Per-axis storage dimensions.
///
/// # Examples
///
/// ```
/// use compar_core::Shape;
///
/// let shape: Shape = Shape::from_slice(&[3, 3]);
/// assert_eq!(shape.len(), 2);
/// ```
pub type Shape = SmallVec<[usize; 6]>;

/// Per-axis logical index origins (may be negative).
pub type StartIndex = SmallVec<[i64; 6]>;

/// Zero-based storage coordinates after normalization.
pub type Coords = SmallVec<[usize; 6]>;
