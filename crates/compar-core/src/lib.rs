//! # compar-core
//!
//! Dense component arrays over labelled frames.
//!
//! A [`ComponentArray`] holds the scalar entries of a multi-index object
//! (e.g. a tensor's coordinates with respect to a basis) in a dense
//! N-dimensional buffer, with:
//!
//! - **Per-axis index origins** ([`StartSpec`]) so entries are addressed in
//!   logical coordinates rather than zero-based storage coordinates
//! - **A flexible accessor** ([`AccessRequest`]) covering bare indices,
//!   raw (unformatted) reads, axis-0 slices, and trailing format directives
//! - **Right-aligned broadcasting** ([`broadcast_shape`]) for combining
//!   containers of different rank or shape
//! - **Pure elementwise arithmetic** with operator sugar (see
//!   [`arith`](crate::arith))
//! - **Identity-compared formatters** ([`Formatter`]) applied only to
//!   single-scalar reads
//!
//! ## SciRS2 Integration
//!
//! All dense storage and elementwise work goes through `scirs2_core`'s
//! `ndarray_ext` and `numeric` modules; this crate never reimplements
//! kernels the backend provides.
//!
//! ## Quick Start
//!
//! ```
//! use compar_core::{AccessRequest, ComponentArray, Frame};
//!
//! // Rank-1 components with logical domain {2, 3, 4}.
//! let frame = Frame::new(["e1", "e2", "e3"]);
//! let mut c = ComponentArray::<f64>::new(frame, 1, Some(&[3]), 2, None).unwrap();
//!
//! c.set(&AccessRequest::index(3), 1.0.into()).unwrap();
//! assert_eq!(c.get(&AccessRequest::index(3)).unwrap().scalar(), Some(1.0));
//! assert!(c.get(&AccessRequest::index(5)).is_err());
//! ```
//!
//! ## Error Handling
//!
//! Contract violations (wrong index arity, out-of-range indices or slice
//! bounds, incompatible broadcast shapes, comparison against a nonzero
//! scalar) surface as [`ComponentError`] values; nothing is caught or
//! retried internally, and a failed operation leaves its operands untouched.

#![deny(warnings)]

pub mod arith;
pub mod broadcast;
pub mod component;
pub mod error;
pub mod format;
pub mod frame;
pub mod index;
pub mod types;


pub use broadcast::broadcast_shape;
pub use component::{ComponentArray, ReadValue, WriteValue};
pub use error::{ComponentError, Result};
pub use format::Formatter;
pub use frame::{Frame, FrameSet};
pub use index::{AccessRequest, AxisSlice, StartSpec};
pub use types::{Coords, Rank, Shape, StartIndex};
