//! Elementwise arithmetic on component arrays.
//!
//! Every operation is pure: it allocates a fresh container and never touches
//! either operand. Same-shape operands combine directly and the result keeps
//! the left operand's metadata; shape-differing operands resolve through
//! right-aligned broadcasting first (see [`crate::broadcast`]), with the
//! backend performing the replication.
//!
//! The named methods return `Result`; the operator traits are sugar over
//! them and panic on broadcast failure. Compound assignment is plain
//! rebinding to a freshly produced value.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use scirs2_core::ndarray_ext::{IxDyn, Zip};
use scirs2_core::numeric::Float;

use crate::component::ComponentArray;
use crate::error::{ComponentError, Result};

// Floored modulo, matching the sign-of-divisor convention.
fn floored_rem<T: Float>(a: T, b: T) -> T {
    a - b * (a / b).floor()
}

impl<T> ComponentArray<T>
where
    T: Float,
{
    fn zip_with<F>(&self, other: &Self, op: F) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape == other.shape {
            let data = Zip::from(&self.data)
                .and(&other.data)
                .map_collect(|&a, &b| op(a, b));
            return Ok(self.with_storage(data));
        }
        let mut out = self.broadcast_with(other)?;
        let dims = IxDyn(&out.shape);
        let lv = self
            .data
            .broadcast(dims.clone())
            .ok_or_else(|| ComponentError::broadcast(&self.shape, &out.shape))?;
        let rv = other
            .data
            .broadcast(dims)
            .ok_or_else(|| ComponentError::broadcast(&other.shape, &out.shape))?;
        out.data = Zip::from(&lv).and(&rv).map_collect(|&a, &b| op(a, b));
        Ok(out)
    }

    /// Elementwise negation
    pub fn neg(&self) -> Self {
        self.with_storage(self.data.mapv(|v| -v))
    }

    /// Elementwise sum
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise (Hadamard) product, not an outer product
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise quotient
    pub fn div(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a / b)
    }

    /// Elementwise floored quotient
    pub fn floor_div(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| (a / b).floor())
    }

    /// Elementwise floored modulo (remainder takes the divisor's sign)
    pub fn rem(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, floored_rem)
    }

    /// Elementwise power
    pub fn pow(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a.powf(b))
    }

    /// Elementwise absolute value.
    ///
    /// Returns a plain copy when every entry already satisfies `v >= 0`;
    /// a negative zero passes that test and keeps its sign bit.
    pub fn abs(&self) -> Self {
        if self.data.iter().all(|&v| v >= T::zero()) {
            self.clone()
        } else {
            self.with_storage(self.data.mapv(|v| v.abs()))
        }
    }

    /// Add a scalar to every entry; the literal zero yields an identity copy
    pub fn add_scalar(&self, scalar: T) -> Self {
        if scalar == T::zero() {
            self.clone()
        } else {
            self.with_storage(self.data.mapv(|v| v + scalar))
        }
    }

    /// Subtract a scalar from every entry; the literal zero yields an
    /// identity copy
    pub fn sub_scalar(&self, scalar: T) -> Self {
        if scalar == T::zero() {
            self.clone()
        } else {
            self.with_storage(self.data.mapv(|v| v - scalar))
        }
    }

    /// Reflected subtraction `scalar - self`; the literal zero yields a
    /// full negation
    pub fn scalar_sub(&self, scalar: T) -> Self {
        if scalar == T::zero() {
            self.neg()
        } else {
            self.with_storage(self.data.mapv(|v| scalar - v))
        }
    }

    /// Multiply every entry by a scalar
    pub fn mul_scalar(&self, scalar: T) -> Self {
        self.with_storage(self.data.mapv(|v| v * scalar))
    }

    /// Divide every entry by a scalar
    pub fn div_scalar(&self, scalar: T) -> Self {
        self.with_storage(self.data.mapv(|v| v / scalar))
    }

    /// Reflected division `scalar / self`
    pub fn scalar_div(&self, scalar: T) -> Self {
        self.with_storage(self.data.mapv(|v| scalar / v))
    }

    /// Floored quotient of every entry by a scalar
    pub fn floor_div_scalar(&self, scalar: T) -> Self {
        self.with_storage(self.data.mapv(|v| (v / scalar).floor()))
    }

    /// Floored modulo of every entry by a scalar
    pub fn rem_scalar(&self, scalar: T) -> Self {
        self.with_storage(self.data.mapv(|v| floored_rem(v, scalar)))
    }

    /// Raise every entry to a scalar power
    pub fn pow_scalar(&self, scalar: T) -> Self {
        self.with_storage(self.data.mapv(|v| v.powf(scalar)))
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $named:ident) => {
        impl<T: Float> $trait for &ComponentArray<T> {
            type Output = ComponentArray<T>;

            fn $method(self, rhs: Self) -> ComponentArray<T> {
                self.$named(rhs).expect("incompatible broadcast shapes")
            }
        }

        impl<T: Float> $trait for ComponentArray<T> {
            type Output = ComponentArray<T>;

            fn $method(self, rhs: Self) -> ComponentArray<T> {
                (&self).$named(&rhs).expect("incompatible broadcast shapes")
            }
        }
    };
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, div);
impl_binary_op!(Rem, rem, rem);

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $named:ident) => {
        impl<T: Float> $trait<T> for &ComponentArray<T> {
            type Output = ComponentArray<T>;

            fn $method(self, rhs: T) -> ComponentArray<T> {
                self.$named(rhs)
            }
        }

        impl<T: Float> $trait<T> for ComponentArray<T> {
            type Output = ComponentArray<T>;

            fn $method(self, rhs: T) -> ComponentArray<T> {
                (&self).$named(rhs)
            }
        }
    };
}

impl_scalar_op!(Add, add, add_scalar);
impl_scalar_op!(Sub, sub, sub_scalar);
impl_scalar_op!(Mul, mul, mul_scalar);
impl_scalar_op!(Div, div, div_scalar);
impl_scalar_op!(Rem, rem, rem_scalar);

impl<T: Float> Neg for &ComponentArray<T> {
    type Output = ComponentArray<T>;

    fn neg(self) -> ComponentArray<T> {
        ComponentArray::neg(self)
    }
}

impl<T: Float> Neg for ComponentArray<T> {
    type Output = ComponentArray<T>;

    fn neg(self) -> ComponentArray<T> {
        ComponentArray::neg(&self)
    }
}

// Compound assignment is rebinding, never in-place mutation of storage.
macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $named:ident, $scalar_named:ident) => {
        impl<T: Float> $trait<&ComponentArray<T>> for ComponentArray<T> {
            fn $method(&mut self, rhs: &ComponentArray<T>) {
                *self = (&*self).$named(rhs).expect("incompatible broadcast shapes");
            }
        }

        impl<T: Float> $trait<T> for ComponentArray<T> {
            fn $method(&mut self, rhs: T) {
                *self = (&*self).$scalar_named(rhs);
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, add, add_scalar);
impl_assign_op!(SubAssign, sub_assign, sub, sub_scalar);
impl_assign_op!(MulAssign, mul_assign, mul, mul_scalar);
impl_assign_op!(DivAssign, div_assign, div, div_scalar);
impl_assign_op!(RemAssign, rem_assign, rem, rem_scalar);
