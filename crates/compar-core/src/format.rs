//! Scalar formatters: caller-supplied display transforms
//!
//! A formatter is applied only when a single scalar is read through the
//! accessor, never on slice reads, and is compared by identity: two
//! formatters built from structurally identical closures are still
//! considered different. Cloned handles share identity.

use std::fmt;
use std::sync::Arc;

/// The formatting callable: a scalar plus an optional caller-supplied
/// directive, producing a displayable representation.
pub type FormatFn<T> = dyn Fn(T, Option<&str>) -> String + Send + Sync;

/// Identity-compared handle around a scalar formatting function.
///
/// # Examples
///
/// ```
/// use compar_core::Formatter;
///
/// let f = Formatter::new(|x: f64, _| format!("{:.2}", x));
/// assert_eq!(f.apply(1.5, None), "1.50");
///
/// // Cloning shares identity; rebuilding does not.
/// let g = f.clone();
/// let h = Formatter::new(|x: f64, _| format!("{:.2}", x));
/// assert!(Formatter::same_instance(Some(&f), Some(&g)));
/// assert!(!Formatter::same_instance(Some(&f), Some(&h)));
/// ```
#[derive(Clone)]
pub struct Formatter<T> {
    func: Arc<FormatFn<T>>,
}

impl<T> Formatter<T> {
    /// Wrap a formatting function
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(T, Option<&str>) -> String + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Apply the formatter to a scalar, with an optional format directive
    pub fn apply(&self, value: T, directive: Option<&str>) -> String {
        (self.func)(value, directive)
    }

    /// Identity comparison of two optional formatter handles.
    ///
    /// Two `None`s are the same; a `None` and a `Some` are not; two
    /// `Some`s are the same only when they share the underlying function
    /// allocation.
    pub fn same_instance(lhs: Option<&Formatter<T>>, rhs: Option<&Formatter<T>>) -> bool {
        match (lhs, rhs) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(&a.func, &b.func),
            _ => false,
        }
    }
}

impl<T> fmt::Debug for Formatter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("func", &Arc::as_ptr(&self.func))
            .finish()
    }
}
