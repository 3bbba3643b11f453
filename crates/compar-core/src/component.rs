//! The dense component-array container.
//!
//! A [`ComponentArray`] stores the scalar entries of a multi-index object
//! with respect to one or more labelled frames. Each axis carries its own
//! logical index origin, so callers address entries in the coordinate system
//! natural to their problem while storage stays zero-based and dense.
//!
//! All mutation goes through the [`set`](ComponentArray::set) accessor;
//! arithmetic (see [`crate::arith`]) always allocates a fresh container.

use std::fmt;

use ndarray::Slice;
use scirs2_core::ndarray_ext::{Array, ArrayView, Axis, IxDyn};
use scirs2_core::numeric::Float;
use smallvec::smallvec;

use crate::broadcast::broadcast_shape;
use crate::error::{ComponentError, Result};
use crate::format::Formatter;
use crate::frame::FrameSet;
use crate::index::{normalize_indices, AccessRequest, StartSpec};
use crate::types::{Rank, Shape, StartIndex};

/// The value produced by a read through the accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadValue<T> {
    /// A single unformatted entry
    Scalar(T),
    /// A single entry rendered by the configured formatter
    Formatted(String),
    /// An owned sub-array from an axis-0 slice (rank preserved)
    Slice(Array<T, IxDyn>),
}

impl<T: Copy> ReadValue<T> {
    /// The raw scalar, if this read produced one
    pub fn scalar(&self) -> Option<T> {
        match self {
            ReadValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

/// The value accepted by a write through the accessor.
///
/// A scalar written through a slice request fills the whole sub-range; an
/// array must match the sliced sub-shape after backend broadcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteValue<T> {
    /// A single entry, or a fill value for a slice write
    Scalar(T),
    /// Bulk data for a slice write
    Array(Array<T, IxDyn>),
}

impl<T> From<T> for WriteValue<T> {
    fn from(value: T) -> Self {
        WriteValue::Scalar(value)
    }
}

impl<T> From<Array<T, IxDyn>> for WriteValue<T> {
    fn from(array: Array<T, IxDyn>) -> Self {
        WriteValue::Array(array)
    }
}

/// Dense rank-N numeric container with per-axis logical index origins.
///
/// # Examples
///
/// ```
/// use compar_core::{AccessRequest, ComponentArray, Frame};
///
/// // Rank-2 components over a 3-element frame, zero start index.
/// let frame = Frame::new(["e1", "e2", "e3"]);
/// let mut c = ComponentArray::<f64>::new(frame, 2, None, 0, None).unwrap();
///
/// c.set(&AccessRequest::indices([0, 1]), (-4.0).into()).unwrap();
/// let read = c.get(&AccessRequest::indices([0, 1])).unwrap();
/// assert_eq!(read.scalar(), Some(-4.0));
/// ```
#[derive(Clone)]
pub struct ComponentArray<T> {
    pub(crate) frame: FrameSet,
    pub(crate) rank: Rank,
    pub(crate) shape: Shape,
    pub(crate) start_index: StartIndex,
    pub(crate) formatter: Option<Formatter<T>>,
    /// Dense zero-based storage; dims always equal `shape`
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> ComponentArray<T>
where
    T: Float,
{
    /// Create a zero-filled container.
    ///
    /// `shape` defaults to the hypercube sized by the first frame's
    /// cardinality. `start` is either a single origin replicated across all
    /// axes or one origin per axis.
    pub fn new(
        frame: impl Into<FrameSet>,
        rank: Rank,
        shape: Option<&[usize]>,
        start: impl Into<StartSpec>,
        formatter: Option<Formatter<T>>,
    ) -> Result<Self> {
        let frame = frame.into();
        if rank == 0 {
            return Err(ComponentError::usage("rank must be at least 1"));
        }
        let shape: Shape = match shape {
            Some(dims) => {
                if dims.len() != rank {
                    return Err(ComponentError::arity(rank, dims.len()));
                }
                if dims.iter().any(|&d| d == 0) {
                    return Err(ComponentError::usage("every axis must have positive size"));
                }
                Shape::from_slice(dims)
            }
            None => smallvec![frame.first().len(); rank],
        };
        let start_index = start.into().resolve(rank)?;
        let data = Array::zeros(IxDyn(&shape));
        Ok(Self {
            frame,
            rank,
            shape,
            start_index,
            formatter,
            data,
        })
    }

    /// Wrap an existing dense array; its dimensionality becomes the rank.
    pub fn from_array(
        frame: impl Into<FrameSet>,
        data: Array<T, IxDyn>,
        start: impl Into<StartSpec>,
        formatter: Option<Formatter<T>>,
    ) -> Result<Self> {
        let rank = data.ndim();
        if rank == 0 {
            return Err(ComponentError::usage("rank must be at least 1"));
        }
        let start_index = start.into().resolve(rank)?;
        Ok(Self {
            frame: frame.into(),
            rank,
            shape: Shape::from_slice(data.shape()),
            start_index,
            formatter,
            data,
        })
    }

    /// A zero-filled container with identical metadata.
    pub fn new_instance(&self) -> Self {
        Self {
            frame: self.frame.clone(),
            rank: self.rank,
            shape: self.shape.clone(),
            start_index: self.start_index.clone(),
            formatter: self.formatter.clone(),
            data: Array::zeros(IxDyn(&self.shape)),
        }
    }

    /// The frames these components are expressed with respect to
    pub fn frame(&self) -> &FrameSet {
        &self.frame
    }

    /// Number of independent indices
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Per-axis storage dimensions
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Per-axis logical index origins
    pub fn start_index(&self) -> &[i64] {
        &self.start_index
    }

    /// The configured scalar formatter, if any
    pub fn formatter(&self) -> Option<&Formatter<T>> {
        self.formatter.as_ref()
    }

    /// The dense zero-based storage
    pub fn data(&self) -> &Array<T, IxDyn> {
        &self.data
    }

    /// A read-only view of the storage
    pub fn view(&self) -> ArrayView<'_, T, IxDyn> {
        self.data.view()
    }

    /// Read one entry or an axis-0 sub-range.
    ///
    /// The formatter applies only to single-scalar reads: absent, the raw
    /// scalar comes back; present, the rendered string does, with the
    /// request's directive forwarded when one was given. The raw request
    /// form and slice reads never invoke the formatter.
    pub fn get(&self, request: &AccessRequest) -> Result<ReadValue<T>> {
        match request {
            AccessRequest::Indices(indices) => {
                let v = self.entry(indices)?;
                Ok(match &self.formatter {
                    Some(f) => ReadValue::Formatted(f.apply(v, None)),
                    None => ReadValue::Scalar(v),
                })
            }
            AccessRequest::RawIndices(indices) => Ok(ReadValue::Scalar(self.entry(indices)?)),
            AccessRequest::Formatted(indices, directive) => {
                let v = self.entry(indices)?;
                Ok(match &self.formatter {
                    Some(f) => ReadValue::Formatted(f.apply(v, Some(directive))),
                    None => ReadValue::Scalar(v),
                })
            }
            AccessRequest::Slice(slice) => {
                let (lo, hi, step) = slice.resolve(self.shape[0], self.start_index[0])?;
                let view = self
                    .data
                    .slice_axis(Axis(0), Slice::new(lo as isize, Some(hi as isize), step));
                Ok(ReadValue::Slice(view.to_owned()))
            }
        }
    }

    /// Write one entry or an axis-0 sub-range.
    ///
    /// A scalar through a slice request fills the sub-range; an array must
    /// be broadcastable to the sliced sub-shape. Format directives have no
    /// meaning on write.
    pub fn set(&mut self, request: &AccessRequest, value: WriteValue<T>) -> Result<()> {
        match request {
            AccessRequest::Indices(indices) | AccessRequest::RawIndices(indices) => {
                let coords = normalize_indices(indices, &self.shape, &self.start_index)?;
                match value {
                    WriteValue::Scalar(v) => {
                        self.data[coords.as_slice()] = v;
                        Ok(())
                    }
                    WriteValue::Array(_) => Err(ComponentError::usage(
                        "a single entry takes a scalar value, not an array",
                    )),
                }
            }
            AccessRequest::Formatted(..) => Err(ComponentError::usage(
                "a format directive is not accepted on write",
            )),
            AccessRequest::Slice(slice) => {
                let (lo, hi, step) = slice.resolve(self.shape[0], self.start_index[0])?;
                let mut view = self
                    .data
                    .slice_axis_mut(Axis(0), Slice::new(lo as isize, Some(hi as isize), step));
                match value {
                    WriteValue::Scalar(v) => {
                        view.fill(v);
                        Ok(())
                    }
                    WriteValue::Array(array) => {
                        if array.broadcast(view.raw_dim()).is_none() {
                            return Err(ComponentError::usage(format!(
                                "value of shape {:?} does not fit the sliced sub-shape {:?}",
                                array.shape(),
                                view.shape()
                            )));
                        }
                        view.assign(&array);
                        Ok(())
                    }
                }
            }
        }
    }

    fn entry(&self, indices: &[i64]) -> Result<T> {
        let coords = normalize_indices(indices, &self.shape, &self.start_index)?;
        Ok(self.data[coords.as_slice()])
    }

    /// Allocate the zero-initialized combination container for `self` and
    /// `other` under right-aligned broadcasting.
    ///
    /// The result has the combined rank and shape, the union of both frame
    /// sets (self's frames first), zero start index on every axis, and the
    /// shared formatter only when both operands carry the same instance.
    pub fn broadcast_with(&self, other: &Self) -> Result<Self> {
        let shape = broadcast_shape(&self.shape, &other.shape)?;
        let rank = shape.len();
        let formatter = if Formatter::same_instance(self.formatter.as_ref(), other.formatter.as_ref())
        {
            self.formatter.clone()
        } else {
            None
        };
        Ok(Self {
            frame: self.frame.union(&other.frame),
            rank,
            data: Array::zeros(IxDyn(&shape)),
            shape,
            start_index: smallvec![0; rank],
            formatter,
        })
    }

    /// Check whether every entry is exactly zero
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&v| v == T::zero())
    }

    /// Compare against a scalar of the numeric domain.
    ///
    /// Only the literal zero has a defined meaning (every entry zero);
    /// any nonzero scalar is a usage error.
    pub fn eq_scalar(&self, scalar: T) -> Result<bool> {
        if scalar == T::zero() {
            Ok(self.is_zero())
        } else {
            Err(ComponentError::ScalarComparison)
        }
    }

    // Rebuilds around freshly computed storage, keeping this container's
    // metadata. Storage dims must already match the metadata shape.
    pub(crate) fn with_storage(&self, data: Array<T, IxDyn>) -> Self {
        debug_assert_eq!(data.shape(), self.shape.as_slice());
        Self {
            frame: self.frame.clone(),
            rank: self.rank,
            shape: self.shape.clone(),
            start_index: self.start_index.clone(),
            formatter: self.formatter.clone(),
            data,
        }
    }
}

impl<T> PartialEq for ComponentArray<T>
where
    T: Float,
{
    /// Metadata first, storage last: frame-label sets (unordered), rank,
    /// start-index tuples (ordered), formatter identity, then exact entry
    /// equality. Any metadata mismatch is `false`, never an error.
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.rank == other.rank
            && self.start_index == other.start_index
            && Formatter::same_instance(self.formatter.as_ref(), other.formatter.as_ref())
            && self.data == other.data
    }
}

impl<T> fmt::Display for ComponentArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.shape.iter().all(|&d| d == self.shape[0]) {
            let dims = self
                .shape
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "({})-shaped ", dims)?;
        }
        let noun = if self.rank == 1 { "index" } else { "indices" };
        write!(f, "{}-{} components w.r.t. {}", self.rank, noun, self.frame)
    }
}

impl<T: fmt::Debug> fmt::Debug for ComponentArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentArray")
            .field("frame", &self.frame)
            .field("rank", &self.rank)
            .field("shape", &self.shape)
            .field("start_index", &self.start_index)
            .field("formatter", &self.formatter)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use crate::index::AxisSlice;
    use scirs2_core::ndarray_ext::arr1;

    fn frame3() -> Frame {
        Frame::new(["e1", "e2", "e3"])
    }

    #[test]
    fn test_default_shape_is_hypercube() {
        let c = ComponentArray::<f64>::new(frame3(), 3, None, 0, None).unwrap();
        assert_eq!(c.shape(), &[3, 3, 3]);
        assert_eq!(c.start_index(), &[0, 0, 0]);
        assert!(c.is_zero());
    }

    #[test]
    fn test_explicit_shape_arity_checked() {
        let err = ComponentArray::<f64>::new(frame3(), 2, Some(&[3, 3, 3]), 0, None).unwrap_err();
        assert_eq!(err, ComponentError::arity(2, 3));
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let mut c = ComponentArray::<f64>::new(frame3(), 2, None, 0, None).unwrap();
        c.set(&AccessRequest::indices([0, 1]), (-4.0).into()).unwrap();

        let read = c.get(&AccessRequest::indices([0, 1])).unwrap();
        assert_eq!(read, ReadValue::Scalar(-4.0));

        // Every other entry stays zero.
        let mut nonzero = 0;
        for v in c.data().iter() {
            if *v != 0.0 {
                nonzero += 1;
            }
        }
        assert_eq!(nonzero, 1);
    }

    #[test]
    fn test_offset_axis_read_write() {
        // Logical domain {2, 3, 4}.
        let mut c = ComponentArray::<f64>::new(frame3(), 1, Some(&[3]), 2, None).unwrap();
        c.set(
            &AccessRequest::full_slice(),
            arr1(&[0.0, 1.0, 2.0]).into_dyn().into(),
        )
        .unwrap();

        assert_eq!(c.get(&AccessRequest::index(2)).unwrap().scalar(), Some(0.0));
        assert_eq!(c.get(&AccessRequest::index(3)).unwrap().scalar(), Some(1.0));
        assert_eq!(c.get(&AccessRequest::index(4)).unwrap().scalar(), Some(2.0));

        let err = c.get(&AccessRequest::index(5)).unwrap_err();
        assert_eq!(err, ComponentError::index_range(5, 2, 4));
    }

    #[test]
    fn test_formatter_applies_only_to_plain_scalar_reads() {
        let fmt = Formatter::new(|x: f64, d: Option<&str>| match d {
            Some(dir) => format!("{}:{}", dir, x),
            None => format!("<{}>", x),
        });
        let mut c = ComponentArray::new(frame3(), 1, Some(&[3]), 0, Some(fmt)).unwrap();
        c.set(&AccessRequest::index(1), 2.5.into()).unwrap();

        assert_eq!(
            c.get(&AccessRequest::index(1)).unwrap(),
            ReadValue::Formatted("<2.5>".into())
        );
        assert_eq!(
            c.get(&AccessRequest::formatted([1], "x")).unwrap(),
            ReadValue::Formatted("x:2.5".into())
        );
        // Raw form bypasses the formatter entirely.
        assert_eq!(
            c.get(&AccessRequest::raw([1])).unwrap(),
            ReadValue::Scalar(2.5)
        );
        // Slice reads are never formatted.
        assert!(matches!(
            c.get(&AccessRequest::full_slice()).unwrap(),
            ReadValue::Slice(_)
        ));
    }

    #[test]
    fn test_stepped_slice_over_offset_axis() {
        let mut c = ComponentArray::<f64>::new(frame3(), 1, Some(&[4]), 1, None).unwrap();
        c.set(
            &AccessRequest::full_slice(),
            arr1(&[10.0, 11.0, 12.0, 13.0]).into_dyn().into(),
        )
        .unwrap();

        // Logical [1, 4) with step 2 picks storage rows 0 and 2.
        let read = c
            .get(&AccessRequest::slice(AxisSlice::range_step(1, 4, 2)))
            .unwrap();
        match read {
            ReadValue::Slice(sub) => assert_eq!(sub, arr1(&[10.0, 12.0]).into_dyn()),
            other => panic!("expected slice, got {:?}", other),
        }
    }

    #[test]
    fn test_slice_fill_with_scalar() {
        let mut c = ComponentArray::<f64>::new(frame3(), 2, None, 0, None).unwrap();
        c.set(
            &AccessRequest::slice(AxisSlice::range(1, 3)),
            WriteValue::Scalar(7.0),
        )
        .unwrap();

        assert_eq!(c.get(&AccessRequest::raw([0, 0])).unwrap().scalar(), Some(0.0));
        assert_eq!(c.get(&AccessRequest::raw([1, 2])).unwrap().scalar(), Some(7.0));
        assert_eq!(c.get(&AccessRequest::raw([2, 0])).unwrap().scalar(), Some(7.0));
    }

    #[test]
    fn test_slice_write_shape_mismatch_is_usage_error() {
        let mut c = ComponentArray::<f64>::new(frame3(), 1, Some(&[3]), 0, None).unwrap();
        let err = c
            .set(
                &AccessRequest::full_slice(),
                arr1(&[1.0, 2.0]).into_dyn().into(),
            )
            .unwrap_err();
        assert!(matches!(err, ComponentError::Usage(_)));
    }

    #[test]
    fn test_broadcast_with_combines_metadata() {
        let a = ComponentArray::<f64>::new(Frame::new(["x", "y", "z"]), 2, None, 1, None).unwrap();
        let b = ComponentArray::<f64>::new(
            Frame::new(["u", "v", "w"]),
            3,
            Some(&[1, 3, 3]),
            0,
            None,
        )
        .unwrap();

        let c = a.broadcast_with(&b).unwrap();
        assert_eq!(c.shape(), &[1, 3, 3]);
        assert_eq!(c.rank(), 3);
        assert_eq!(c.start_index(), &[0, 0, 0]);
        assert_eq!(c.frame().len(), 2);
        assert!(c.is_zero());
        assert!(c.formatter().is_none());
    }

    #[test]
    fn test_broadcast_formatter_propagates_only_on_identity() {
        let fmt = Formatter::new(|x: f64, _| x.to_string());
        let a =
            ComponentArray::new(frame3(), 1, Some(&[3]), 0, Some(fmt.clone())).unwrap();
        let b = ComponentArray::new(frame3(), 1, Some(&[1]), 0, Some(fmt)).unwrap();
        assert!(a.broadcast_with(&b).unwrap().formatter().is_some());

        let other = Formatter::new(|x: f64, _| x.to_string());
        let c = ComponentArray::new(frame3(), 1, Some(&[1]), 0, Some(other)).unwrap();
        assert!(a.broadcast_with(&c).unwrap().formatter().is_none());
    }

    #[test]
    fn test_equality_contract() {
        let mut a = ComponentArray::<f64>::new(frame3(), 2, None, 0, None).unwrap();
        let mut b = a.clone();
        assert_eq!(a, b);

        a.set(&AccessRequest::indices([1, 1]), 3.0.into()).unwrap();
        assert_ne!(a, b);
        b.set(&AccessRequest::indices([1, 1]), 3.0.into()).unwrap();
        assert_eq!(a, b);

        // Same stored values but different start index: not equal.
        let shifted = ComponentArray::<f64>::new(frame3(), 2, None, 1, None).unwrap();
        let zeroed = ComponentArray::<f64>::new(frame3(), 2, None, 0, None).unwrap();
        assert_ne!(shifted, zeroed);

        // Rank mismatch is false, never an error.
        let vector = ComponentArray::<f64>::new(frame3(), 1, None, 0, None).unwrap();
        assert_ne!(zeroed, vector);
    }

    #[test]
    fn test_eq_scalar() {
        let mut c = ComponentArray::<f64>::new(frame3(), 1, None, 0, None).unwrap();
        assert_eq!(c.eq_scalar(0.0), Ok(true));

        c.set(&AccessRequest::index(0), 1.0.into()).unwrap();
        assert_eq!(c.eq_scalar(0.0), Ok(false));
        assert_eq!(c.eq_scalar(2.0), Err(ComponentError::ScalarComparison));
    }

    #[test]
    fn test_display() {
        let square = ComponentArray::<f64>::new(frame3(), 2, None, 0, None).unwrap();
        assert_eq!(
            format!("{}", square),
            "2-indices components w.r.t. (e1, e2, e3)"
        );

        let vector = ComponentArray::<f64>::new(frame3(), 1, None, 0, None).unwrap();
        assert_eq!(
            format!("{}", vector),
            "1-index components w.r.t. (e1, e2, e3)"
        );

        let ragged =
            ComponentArray::<f64>::new(frame3(), 3, Some(&[1, 3, 3]), 0, None).unwrap();
        assert_eq!(
            format!("{}", ragged),
            "(1, 3, 3)-shaped 3-indices components w.r.t. (e1, e2, e3)"
        );
    }

    #[test]
    fn test_new_instance_zeroes_storage() {
        let mut c = ComponentArray::<f64>::new(frame3(), 1, None, 2, None).unwrap();
        c.set(&AccessRequest::index(3), 5.0.into()).unwrap();

        let fresh = c.new_instance();
        assert!(fresh.is_zero());
        assert_eq!(fresh.start_index(), c.start_index());
        assert_eq!(fresh.shape(), c.shape());
    }
}
