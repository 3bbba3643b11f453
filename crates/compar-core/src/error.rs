//! Error types for component-array operations
//!
//! All failures are local contract violations reported synchronously to the
//! caller; nothing is caught or retried internally. The three kinds the
//! accessor and arithmetic surface can produce are arity errors (wrong index
//! count), range errors (index or slice bound outside the per-axis domain),
//! and usage errors (incompatible operand types or broadcast shapes).

use thiserror::Error;

/// Error type for all `compar-core` operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// Wrong number of indices supplied for the declared rank
    #[error("wrong number of indices: {expected} expected, while {provided} are provided")]
    Arity { expected: usize, provided: usize },

    /// A logical index outside the admissible closed interval of its axis
    #[error("index out of range: {index} not in [{min}, {max}]")]
    IndexRange { index: i64, min: i64, max: i64 },

    /// A slice bound outside the logical domain of axis 0
    #[error("slice [start:stop] not in range [{min}, {max}]")]
    SliceRange { min: i64, max: i64 },

    /// Two shapes that cannot be combined under right-aligned broadcasting
    #[error("shapes {lhs:?}, {rhs:?} cannot be broadcast together")]
    Broadcast { lhs: Vec<usize>, rhs: Vec<usize> },

    /// Equality against a nonzero scalar has no defined meaning
    #[error("cannot compare a set of components to a nonzero scalar")]
    ScalarComparison,

    /// Any other contract violation (construction, write-value shape, ...)
    #[error("{0}")]
    Usage(String),
}

impl ComponentError {
    /// Create an arity error
    pub fn arity(expected: usize, provided: usize) -> Self {
        ComponentError::Arity { expected, provided }
    }

    /// Create a range error for a single logical index
    pub fn index_range(index: i64, min: i64, max: i64) -> Self {
        ComponentError::IndexRange { index, min, max }
    }

    /// Create a broadcast-incompatibility error
    pub fn broadcast(lhs: &[usize], rhs: &[usize]) -> Self {
        ComponentError::Broadcast {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create a generic usage error
    pub fn usage(message: impl Into<String>) -> Self {
        ComponentError::Usage(message.into())
    }
}

/// Result type for component-array operations
pub type Result<T> = std::result::Result<T, ComponentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_display() {
        let err = ComponentError::arity(2, 3);
        assert_eq!(
            format!("{}", err),
            "wrong number of indices: 2 expected, while 3 are provided"
        );
    }

    #[test]
    fn test_index_range_display() {
        let err = ComponentError::index_range(3, 0, 2);
        assert_eq!(format!("{}", err), "index out of range: 3 not in [0, 2]");
    }

    #[test]
    fn test_slice_range_display() {
        let err = ComponentError::SliceRange { min: 1, max: 4 };
        assert_eq!(format!("{}", err), "slice [start:stop] not in range [1, 4]");
    }

    #[test]
    fn test_broadcast_display() {
        let err = ComponentError::broadcast(&[3, 3], &[1, 2, 3]);
        let msg = format!("{}", err);
        assert!(msg.contains("[3, 3]"));
        assert!(msg.contains("[1, 2, 3]"));
        assert!(msg.contains("cannot be broadcast"));
    }
}
