//! Error types for factorization routines

use compar_core::ComponentError;
use thiserror::Error;

/// Error type for Khatri-Rao expansion and SVD
#[derive(Error, Debug)]
pub enum DecompError {
    /// No input matrices were supplied
    #[error("at least one input matrix is required")]
    EmptyInput,

    /// An input container or array is not two-dimensional
    #[error("expected a 2-dimensional input, got rank {0}")]
    NotMatrix(usize),

    /// Inputs disagree on the shared column count
    #[error("column count mismatch: expected {expected} columns, input {index} has {actual}")]
    ColumnMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A target rank of zero has no meaning
    #[error("invalid target rank {0}")]
    InvalidRank(usize),

    /// The SVD backend reported a failure
    #[error("SVD failed: {0}")]
    Svd(String),

    /// The eigendecomposition backend reported a failure
    #[error("eigendecomposition failed: {0}")]
    Eig(String),

    /// A component-array contract violation surfaced through a wrapper
    #[error(transparent)]
    Component(#[from] ComponentError),
}

/// Result type for factorization routines
pub type Result<T> = std::result::Result<T, DecompError>;
