//! Index normalization and the tagged access-request variants.
//!
//! Logical indices are user-facing coordinates whose origin on axis `i` is
//! `start_index[i]`; storage coordinates are zero-based. Normalization
//! subtracts the per-axis origin and validates every axis against its closed
//! admissible interval. The accessor's several calling conventions (bare
//! index, index tuple, raw form, axis-0 slice, trailing format directive)
//! are expressed as one tagged [`AccessRequest`] so the container dispatches
//! on a variant instead of sniffing argument shapes.

use smallvec::{smallvec, SmallVec};

use crate::error::{ComponentError, Result};
use crate::types::Coords;

/// Per-axis logical index origins at construction time.
///
/// `Uniform(s)` replicates one origin across every axis (the common case is
/// `Uniform(0)`); `PerAxis` must supply exactly one origin per axis.
///
/// # Examples
///
/// ```
/// use compar_core::StartSpec;
///
/// let zero: StartSpec = 0.into();
/// assert_eq!(zero.resolve(3).unwrap().as_slice(), &[0, 0, 0]);
///
/// let mixed: StartSpec = [1, -2].into();
/// assert_eq!(mixed.resolve(2).unwrap().as_slice(), &[1, -2]);
/// assert!(mixed.resolve(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartSpec {
    /// One origin replicated across all axes
    Uniform(i64),
    /// One origin per axis, in axis order
    PerAxis(SmallVec<[i64; 6]>),
}

impl StartSpec {
    /// Expand into one origin per axis, checking arity for the per-axis form
    pub fn resolve(&self, rank: usize) -> Result<SmallVec<[i64; 6]>> {
        match self {
            StartSpec::Uniform(s) => Ok(smallvec![*s; rank]),
            StartSpec::PerAxis(starts) => {
                if starts.len() != rank {
                    return Err(ComponentError::arity(rank, starts.len()));
                }
                Ok(starts.clone())
            }
        }
    }
}

impl From<i64> for StartSpec {
    fn from(s: i64) -> Self {
        StartSpec::Uniform(s)
    }
}

// Unsuffixed integer literals fall back to i32; accept them too.
impl From<i32> for StartSpec {
    fn from(s: i32) -> Self {
        StartSpec::Uniform(s as i64)
    }
}

impl From<&[i64]> for StartSpec {
    fn from(starts: &[i64]) -> Self {
        StartSpec::PerAxis(SmallVec::from_slice(starts))
    }
}

impl<const N: usize> From<[i64; N]> for StartSpec {
    fn from(starts: [i64; N]) -> Self {
        StartSpec::PerAxis(SmallVec::from_slice(&starts))
    }
}

/// A sub-range along axis 0, in logical (offset) coordinates.
///
/// `start` and `stop` default to the full logical extent of axis 0; `step`
/// passes through to the backend unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisSlice {
    /// Inclusive logical start, `None` meaning the axis origin
    pub start: Option<i64>,
    /// Exclusive logical stop, `None` meaning one past the last valid index
    pub stop: Option<i64>,
    /// Stride, `None` meaning 1
    pub step: Option<isize>,
}

impl AxisSlice {
    /// The full-axis slice (all entries along axis 0)
    pub fn full() -> Self {
        Self::default()
    }

    /// A bounded slice with unit step
    pub fn range(start: i64, stop: i64) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    /// A bounded slice with an explicit step
    pub fn range_step(start: i64, stop: i64, step: isize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: Some(step),
        }
    }

    /// Resolve to zero-based storage bounds `(start, stop, step)` for axis 0.
    ///
    /// Both bounds are validated against the half-open storage extent derived
    /// from `[origin, origin + len]` in logical coordinates.
    pub fn resolve(&self, len: usize, origin: i64) -> Result<(usize, usize, isize)> {
        let min = origin;
        let max = origin + len as i64;
        let start = self.start.unwrap_or(min);
        let stop = self.stop.unwrap_or(max);
        if start < min || start > max || stop < min || stop > max {
            return Err(ComponentError::SliceRange { min, max });
        }
        let lo = (start - origin) as usize;
        let hi = (stop - origin) as usize;
        Ok((lo, hi.max(lo), self.step.unwrap_or(1)))
    }
}

/// One read/write request against a component array.
///
/// # Examples
///
/// ```
/// use compar_core::AccessRequest;
///
/// // Rank-1 shortcut, full tuple, raw form, slice, trailing directive:
/// let _ = AccessRequest::index(2);
/// let _ = AccessRequest::indices([0, 1]);
/// let _ = AccessRequest::raw([0, 1]);
/// let _ = AccessRequest::full_slice();
/// let _ = AccessRequest::formatted([0, 1], "latex");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AccessRequest {
    /// A full logical multi-index; the formatter applies on read
    Indices(SmallVec<[i64; 6]>),
    /// A full logical multi-index with formatter post-processing suppressed
    RawIndices(SmallVec<[i64; 6]>),
    /// A sub-range along axis 0
    Slice(AxisSlice),
    /// A full logical multi-index plus a directive forwarded to the formatter
    Formatted(SmallVec<[i64; 6]>, String),
}

impl AccessRequest {
    /// Rank-1 shortcut: a single bare index
    pub fn index(index: i64) -> Self {
        AccessRequest::Indices(smallvec![index])
    }

    /// A full multi-index
    pub fn indices(indices: impl IntoIterator<Item = i64>) -> Self {
        AccessRequest::Indices(indices.into_iter().collect())
    }

    /// A full multi-index, bypassing any configured formatter on read
    pub fn raw(indices: impl IntoIterator<Item = i64>) -> Self {
        AccessRequest::RawIndices(indices.into_iter().collect())
    }

    /// All entries along axis 0
    pub fn full_slice() -> Self {
        AccessRequest::Slice(AxisSlice::full())
    }

    /// A bounded sub-range along axis 0
    pub fn slice(slice: AxisSlice) -> Self {
        AccessRequest::Slice(slice)
    }

    /// A full multi-index with a trailing format directive
    pub fn formatted(indices: impl IntoIterator<Item = i64>, directive: impl Into<String>) -> Self {
        AccessRequest::Formatted(indices.into_iter().collect(), directive.into())
    }
}

/// Convert a logical multi-index into zero-based storage coordinates.
///
/// Fails with an arity error when the index count differs from the rank, and
/// with a range error naming the offending index and the closed admissible
/// interval of its axis.
pub fn normalize_indices(indices: &[i64], shape: &[usize], start: &[i64]) -> Result<Coords> {
    if indices.len() != shape.len() {
        return Err(ComponentError::arity(shape.len(), indices.len()));
    }
    let mut coords = Coords::with_capacity(indices.len());
    for ((&idx, &dim), &s) in indices.iter().zip(shape).zip(start) {
        let max = s + dim as i64 - 1;
        if idx < s || idx > max {
            return Err(ComponentError::index_range(idx, s, max));
        }
        coords.push((idx - s) as usize);
    }
    Ok(coords)
}
