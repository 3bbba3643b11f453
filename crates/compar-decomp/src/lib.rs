//! # compar-decomp
//!
//! Factorization helpers for component arrays.
//!
//! Two routines operating on matrices and on rank-2
//! [`ComponentArray`](compar_core::ComponentArray) containers:
//!
//! - **Khatri-Rao expansion** ([`khatri_rao`]): the column-wise Kronecker
//!   product of one or more matrices sharing a column count
//! - **Exact/truncated SVD** ([`truncated_svd`]): thin SVD via
//!   `scirs2_linalg::svd`, or a Gram-matrix eigendecomposition when the
//!   target rank is below the smaller dimension
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`; SVD and Hermitian
//! eigendecomposition use `scirs2_linalg`.
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::ndarray_ext::array;
//! use compar_decomp::{khatri_rao, truncated_svd};
//!
//! let a = array![[1.0, 2.0], [3.0, 4.0]];
//! let b = array![[5.0, 6.0], [7.0, 8.0]];
//! let kr = khatri_rao(&[a.view(), b.view()]).unwrap();
//! assert_eq!(kr.shape(), &[4, 2]);
//!
//! let (u, s, vt) = truncated_svd(&a.view(), Some(1)).unwrap();
//! assert_eq!(u.shape(), &[2, 1]);
//! assert_eq!(s.len(), 1);
//! assert_eq!(vt.shape(), &[1, 2]);
//! ```

#![deny(warnings)]

pub mod error;
pub mod khatri_rao;
pub mod svd;


pub use error::{DecompError, Result};
pub use khatri_rao::{khatri_rao, khatri_rao_components};
pub use svd::{component_svd, truncated_svd};
