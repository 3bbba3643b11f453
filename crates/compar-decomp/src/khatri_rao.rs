//! Khatri-Rao expansion (column-wise Kronecker product).
//!
//! For matrices sharing a column count `c`, column `j` of the result is the
//! Kronecker product of the inputs' `j`-th columns, built by repeatedly
//! taking the outer product of the running column with the next input's
//! column and flattening row-major. That left-to-right reduction fixes the
//! row ordering: with inputs of `I` and `J` rows, result row `i * J + j`
//! holds the product of the first input's row `i` and the second's row `j`.

use compar_core::{ComponentArray, Formatter, FrameSet};
use scirs2_core::ndarray_ext::{Array2, ArrayView2, Ix2};
use scirs2_core::numeric::Float;

use crate::error::{DecompError, Result};

/// Compute the Khatri-Rao expansion of one or more matrices.
///
/// All inputs must share their column count `c`; the result has `c` columns
/// and as many rows as the product of the inputs' row counts.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use compar_decomp::khatri_rao;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = khatri_rao(&[a.view(), b.view()]).unwrap();
///
/// assert_eq!(c.shape(), &[4, 2]);
/// // First column: [1*5, 1*7, 3*5, 3*7]
/// assert_eq!(c[[0, 0]], 5.0);
/// assert_eq!(c[[1, 0]], 7.0);
/// assert_eq!(c[[2, 0]], 15.0);
/// assert_eq!(c[[3, 0]], 21.0);
/// ```
pub fn khatri_rao<T>(inputs: &[ArrayView2<T>]) -> Result<Array2<T>>
where
    T: Float,
{
    let first = inputs.first().ok_or(DecompError::EmptyInput)?;
    let cols = first.shape()[1];
    for (index, input) in inputs.iter().enumerate().skip(1) {
        if input.shape()[1] != cols {
            return Err(DecompError::ColumnMismatch {
                index,
                expected: cols,
                actual: input.shape()[1],
            });
        }
    }

    let rows: usize = inputs.iter().map(|input| input.shape()[0]).product();
    let mut result = Array2::<T>::zeros((rows, cols));

    for col_idx in 0..cols {
        // Fold the inputs' columns left to right: outer product with the
        // next column, flattened row-major.
        let mut running: Vec<T> = first.column(col_idx).iter().copied().collect();
        for input in &inputs[1..] {
            let column = input.column(col_idx);
            let mut expanded = Vec::with_capacity(running.len() * column.len());
            for &a in &running {
                for &b in column.iter() {
                    expanded.push(a * b);
                }
            }
            running = expanded;
        }
        for (row_idx, value) in running.into_iter().enumerate() {
            result[[row_idx, col_idx]] = value;
        }
    }

    Ok(result)
}

/// Khatri-Rao expansion of rank-2 component arrays.
///
/// Every input must have rank 2 and share its column count. The result is a
/// rank-2 container over the union of all input frame sets (left to right),
/// with zero start index on both axes and the shared formatter only when
/// every input carries the same instance.
pub fn khatri_rao_components<T>(inputs: &[&ComponentArray<T>]) -> Result<ComponentArray<T>>
where
    T: Float,
{
    let first = inputs.first().ok_or(DecompError::EmptyInput)?;
    let mut views = Vec::with_capacity(inputs.len());
    for input in inputs {
        let view = input
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| DecompError::NotMatrix(input.rank()))?;
        views.push(view);
    }
    let matrix = khatri_rao(&views)?;

    let mut frame: FrameSet = first.frame().clone();
    for input in &inputs[1..] {
        frame = frame.union(input.frame());
    }
    let formatter = if inputs
        .iter()
        .all(|input| Formatter::same_instance(first.formatter(), input.formatter()))
    {
        first.formatter().cloned()
    } else {
        None
    };

    Ok(ComponentArray::from_array(
        frame,
        matrix.into_dyn(),
        0,
        formatter,
    )?)
}
