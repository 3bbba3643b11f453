//! Frames: opaque basis labels attached to component arrays
//!
//! A [`Frame`] is an ordered list of basis-element labels; a [`FrameSet`]
//! holds one or more frames. The core never interprets frames
//! arithmetically: they exist for display and for the equality contract,
//! where frame sets compare as unordered collections while display keeps
//! the declared order.

use std::collections::HashSet;
use std::fmt;

/// An ordered list of opaque basis-element labels.
///
/// The number of labels is the basis cardinality, which sizes the default
/// hypercube shape of a component array built over this frame.
///
/// # Examples
///
/// ```
/// use compar_core::Frame;
///
/// let frame = Frame::new(["e1", "e2", "e3"]);
/// assert_eq!(frame.len(), 3);
/// assert_eq!(format!("{}", frame), "(e1, e2, e3)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    labels: Vec<String>,
}

impl Frame {
    /// Create a frame from an ordered collection of labels
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of basis elements in this frame
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check whether the frame has no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The ordered labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.labels.join(", "))
    }
}

/// A non-empty collection of frames.
///
/// Order is significant for display but not for equality: two frame sets
/// holding the same frames in different orders compare equal.
///
/// # Examples
///
/// ```
/// use compar_core::{Frame, FrameSet};
///
/// let a = FrameSet::new(vec![Frame::new(["x", "y"]), Frame::new(["u", "v"])]).unwrap();
/// let b = FrameSet::new(vec![Frame::new(["u", "v"]), Frame::new(["x", "y"])]).unwrap();
/// assert_eq!(a, b);
/// assert_ne!(format!("{}", a), format!("{}", b));
/// ```
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    /// Create a frame set from a single frame
    pub fn single(frame: Frame) -> Self {
        Self {
            frames: vec![frame],
        }
    }

    /// Create a frame set from an ordered list of frames
    ///
    /// Returns `None` if the list is empty: a component array is always
    /// expressed with respect to at least one frame.
    pub fn new(frames: Vec<Frame>) -> Option<Self> {
        if frames.is_empty() {
            None
        } else {
            Some(Self { frames })
        }
    }

    /// The first frame, whose cardinality sizes the default shape
    pub fn first(&self) -> &Frame {
        &self.frames[0]
    }

    /// The frames in display order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames in the set
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// A frame set is never empty by construction
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Union of two frame sets: self's frames first, then other's frames
    /// not already present
    pub fn union(&self, other: &FrameSet) -> FrameSet {
        let mut frames = self.frames.clone();
        let seen: HashSet<&Frame> = self.frames.iter().collect();
        for frame in &other.frames {
            if !seen.contains(frame) {
                frames.push(frame.clone());
            }
        }
        FrameSet { frames }
    }
}

impl From<Frame> for FrameSet {
    fn from(frame: Frame) -> Self {
        FrameSet::single(frame)
    }
}

impl PartialEq for FrameSet {
    /// Unordered comparison: the same frames in any order are equal
    fn eq(&self, other: &Self) -> bool {
        let lhs: HashSet<&Frame> = self.frames.iter().collect();
        let rhs: HashSet<&Frame> = other.frames.iter().collect();
        lhs == rhs
    }
}

impl Eq for FrameSet {}

impl fmt::Display for FrameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.len() == 1 {
            write!(f, "{}", self.frames[0])
        } else {
            let joined = self
                .frames
                .iter()
                .map(|fr| fr.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "({})", joined)
        }
    }
}
