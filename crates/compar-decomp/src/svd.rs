//! Exact and truncated singular value decomposition.
//!
//! The full path delegates to `scirs2_linalg::svd` and truncates the three
//! factors. The truncated path (target rank below the smaller dimension)
//! goes through the Gram matrix of the smaller dimension: a Hermitian
//! eigendecomposition yields one factor and the singular values as square
//! roots of the eigenvalues, and the complementary factor follows by
//! back-substitution. The eigensolver returns ascending order, so all three
//! factors are reversed before return; singular values always come out
//! descending and the right factor in transposed `(U, S, Vᵗ)` orientation.

use std::iter::Sum;

use compar_core::ComponentArray;
use ndarray::Slice;
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView2, Axis, Ix2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign, NumCast};
use scirs2_linalg::{eigh, svd};

use crate::error::{DecompError, Result};

fn reverse_columns<T: Clone>(matrix: &Array2<T>) -> Array2<T> {
    matrix.slice_axis(Axis(1), Slice::new(0, None, -1)).to_owned()
}

// Divides each column by the matching singular value.
fn scale_columns<T: Float>(matrix: &Array2<T>, values: &Array1<T>) -> Array2<T> {
    let mut scaled = matrix.clone();
    for (mut column, &sv) in scaled.axis_iter_mut(Axis(1)).zip(values.iter()) {
        column.mapv_inplace(|v| v / sv);
    }
    scaled
}

/// Compute a truncated (or exact) SVD of a matrix, returning `(U, S, Vᵗ)`.
///
/// With `rank` absent or at least the smaller dimension, the thin exact
/// decomposition is computed and truncated. Below that, the Gram matrix of
/// the smaller dimension is eigendecomposed and only the top `rank`
/// eigenpairs are kept.
///
/// Singular values are non-negative and descending; `U` and `V` columns are
/// unit-norm and mutually orthogonal up to the solver's tolerance.
pub fn truncated_svd<T>(
    matrix: &ArrayView2<T>,
    rank: Option<usize>,
) -> Result<(Array2<T>, Array1<T>, Array2<T>)>
where
    T: Float + NumCast + NumAssign + Sum + Send + Sync + ScalarOperand + std::fmt::Debug + 'static,
{
    let (d1, d2) = (matrix.shape()[0], matrix.shape()[1]);
    let min_dim = d1.min(d2);
    if rank == Some(0) {
        return Err(DecompError::InvalidRank(0));
    }
    let r = rank.unwrap_or(min_dim).min(min_dim);

    if rank.is_none() || r == min_dim {
        let (u, s, vt) = svd(matrix, false, None).map_err(|e| DecompError::Svd(e.to_string()))?;
        let u = u
            .slice_axis(Axis(1), Slice::new(0, Some(r as isize), 1))
            .to_owned();
        let s = s
            .slice_axis(Axis(0), Slice::new(0, Some(r as isize), 1))
            .to_owned();
        let vt = vt
            .slice_axis(Axis(0), Slice::new(0, Some(r as isize), 1))
            .to_owned();
        return Ok((u, s, vt));
    }

    // Gram matrix of the smaller dimension; eigh returns eigenvalues
    // ascending, so the top-r pairs sit at the tail.
    let (u, s, v) = if d1 < d2 {
        let gram = matrix.dot(&matrix.t());
        let (evals, evecs) =
            eigh(&gram.view(), None).map_err(|e| DecompError::Eig(e.to_string()))?;
        let tail = (d1 - r) as isize;
        let evals = evals
            .slice_axis(Axis(0), Slice::new(tail, None, 1))
            .to_owned();
        let u = evecs
            .slice_axis(Axis(1), Slice::new(tail, None, 1))
            .to_owned();
        let s = evals.mapv(|v| v.max(T::zero()).sqrt());
        let v = matrix.t().dot(&scale_columns(&u, &s));
        (u, s, v)
    } else {
        let gram = matrix.t().dot(matrix);
        let (evals, evecs) =
            eigh(&gram.view(), None).map_err(|e| DecompError::Eig(e.to_string()))?;
        let tail = (d2 - r) as isize;
        let evals = evals
            .slice_axis(Axis(0), Slice::new(tail, None, 1))
            .to_owned();
        let v = evecs
            .slice_axis(Axis(1), Slice::new(tail, None, 1))
            .to_owned();
        let s = evals.mapv(|v| v.max(T::zero()).sqrt());
        let u = matrix.dot(&scale_columns(&v, &s));
        (u, s, v)
    };

    let u = reverse_columns(&u);
    let s = s.slice_axis(Axis(0), Slice::new(0, None, -1)).to_owned();
    let v = reverse_columns(&v);
    Ok((u, s, v.t().to_owned()))
}

/// Truncated SVD of a rank-2 component array, returning `(U, S, Vᵗ)`.
pub fn component_svd<T>(
    components: &ComponentArray<T>,
    rank: Option<usize>,
) -> Result<(Array2<T>, Array1<T>, Array2<T>)>
where
    T: Float + NumCast + NumAssign + Sum + Send + Sync + ScalarOperand + std::fmt::Debug + 'static,
{
    let view = components
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| DecompError::NotMatrix(components.rank()))?;
    truncated_svd(&view, rank)
}
