// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Supported tensor element data types.
//!
//! [`DType`] is the runtime tag, [`Element`] the compile-time contract every
//! storage type of a [`crate::Tensor`] satisfies. Per-type behaviour (integer
//! wrapping, logical arithmetic on `bool`, identity `abs` on unsigned types)
//! is resolved by the trait impls below, never by runtime branching.

use std::fmt;

use rand::Rng;

/// Enumerates the numeric types a [`crate::Tensor`] can hold.
///
/// The predictor uses `DType` to match weight files against the element
/// type a model is instantiated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// 32-bit IEEE 754 floating point.
    F32,
    /// 64-bit IEEE 754 floating point.
    F64,
    /// Boolean storage (one byte per element).
    Bool,
}

impl DType {
    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::I16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 => 8,
            DType::Bool => 1,
        }
    }

    /// Returns a human-readable label for this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::Bool => "bool",
        }
    }

    /// Returns `true` for the floating point types.
    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value that can be stored in a [`crate::Tensor`].
///
/// Integer arithmetic wraps on overflow. Integer division by zero panics,
/// as it does for the primitive types. On `bool`, `add` is OR, `sub` is XOR
/// and `mul`/`div` are AND.
pub trait Element:
    Copy + PartialEq + PartialOrd + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Runtime tag of this element type.
    const DTYPE: DType;

    /// Additive identity.
    fn zero() -> Self;
    /// Multiplicative identity.
    fn one() -> Self;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;

    /// Absolute value. Identity for unsigned and boolean types.
    fn abs(self) -> Self;

    /// Numeric zero test used by the normalization policies.
    ///
    /// Floats compare `|x| < EPSILON`, every other type compares exactly.
    fn is_zero(self) -> bool;

    fn to_f64(self) -> f64;
    /// Converts from `f64`, saturating for integers.
    fn from_f64(value: f64) -> Self;
    fn from_usize(value: usize) -> Self;

    /// Draws a value uniformly from `[low, high)` in the type's own domain.
    /// Callers guarantee `low < high` and finite bounds.
    fn sample_uniform<R: Rng>(rng: &mut R, low: Self, high: Self) -> Self;
}

/// Floating point elements, required by gradient descent and inference.
pub trait FloatElement: Element + std::ops::Neg<Output = Self> {
    fn sqrt(self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn tanh(self) -> Self;
    fn cosh(self) -> Self;
    fn is_finite(self) -> bool;
}

macro_rules! impl_signed_element {
    ($($t:ty => $dtype:ident),* $(,)?) => {$(
        impl Element for $t {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn zero() -> Self { 0 }
            #[inline]
            fn one() -> Self { 1 }
            #[inline]
            fn add(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            #[inline]
            fn sub(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
            #[inline]
            fn mul(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
            #[inline]
            fn div(self, rhs: Self) -> Self { self.wrapping_div(rhs) }
            #[inline]
            fn abs(self) -> Self { self.wrapping_abs() }
            #[inline]
            fn is_zero(self) -> bool { self == 0 }
            #[inline]
            fn to_f64(self) -> f64 { self as f64 }
            #[inline]
            fn from_f64(value: f64) -> Self { value as $t }
            #[inline]
            fn from_usize(value: usize) -> Self { value as $t }

            fn sample_uniform<R: Rng>(rng: &mut R, low: Self, high: Self) -> Self {
                rng.gen_range(low..high)
            }
        }
    )*};
}

macro_rules! impl_unsigned_element {
    ($($t:ty => $dtype:ident),* $(,)?) => {$(
        impl Element for $t {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn zero() -> Self { 0 }
            #[inline]
            fn one() -> Self { 1 }
            #[inline]
            fn add(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            #[inline]
            fn sub(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
            #[inline]
            fn mul(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
            #[inline]
            fn div(self, rhs: Self) -> Self { self / rhs }
            #[inline]
            fn abs(self) -> Self { self }
            #[inline]
            fn is_zero(self) -> bool { self == 0 }
            #[inline]
            fn to_f64(self) -> f64 { self as f64 }
            #[inline]
            fn from_f64(value: f64) -> Self { value as $t }
            #[inline]
            fn from_usize(value: usize) -> Self { value as $t }

            fn sample_uniform<R: Rng>(rng: &mut R, low: Self, high: Self) -> Self {
                rng.gen_range(low..high)
            }
        }
    )*};
}

macro_rules! impl_float_element {
    ($($t:ty => $dtype:ident),* $(,)?) => {$(
        impl Element for $t {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn zero() -> Self { 0.0 }
            #[inline]
            fn one() -> Self { 1.0 }
            #[inline]
            fn add(self, rhs: Self) -> Self { self + rhs }
            #[inline]
            fn sub(self, rhs: Self) -> Self { self - rhs }
            #[inline]
            fn mul(self, rhs: Self) -> Self { self * rhs }
            #[inline]
            fn div(self, rhs: Self) -> Self { self / rhs }
            #[inline]
            fn abs(self) -> Self { <$t>::abs(self) }
            #[inline]
            fn is_zero(self) -> bool { <$t>::abs(self) < <$t>::EPSILON }
            #[inline]
            fn to_f64(self) -> f64 { self as f64 }
            #[inline]
            fn from_f64(value: f64) -> Self { value as $t }
            #[inline]
            fn from_usize(value: usize) -> Self { value as $t }

            fn sample_uniform<R: Rng>(rng: &mut R, low: Self, high: Self) -> Self {
                if (high - low).is_finite() {
                    return rng.gen_range(low..high);
                }
                // Width overflows; interpolate between the bounds instead.
                let u: $t = rng.gen();
                let v = low * (1.0 - u) + high * u;
                if v < high { v } else { low }
            }
        }

        impl FloatElement for $t {
            #[inline]
            fn sqrt(self) -> Self { <$t>::sqrt(self) }
            #[inline]
            fn exp(self) -> Self { <$t>::exp(self) }
            #[inline]
            fn ln(self) -> Self { <$t>::ln(self) }
            #[inline]
            fn tanh(self) -> Self { <$t>::tanh(self) }
            #[inline]
            fn cosh(self) -> Self { <$t>::cosh(self) }
            #[inline]
            fn is_finite(self) -> bool { <$t>::is_finite(self) }
        }
    )*};
}

impl_signed_element!(i16 => I16, i32 => I32, i64 => I64);
impl_unsigned_element!(u32 => U32, u64 => U64);
impl_float_element!(f32 => F32, f64 => F64);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    fn zero() -> Self {
        false
    }
    fn one() -> Self {
        true
    }
    fn add(self, rhs: Self) -> Self {
        self | rhs
    }
    fn sub(self, rhs: Self) -> Self {
        self ^ rhs
    }
    fn mul(self, rhs: Self) -> Self {
        self & rhs
    }
    fn div(self, rhs: Self) -> Self {
        self & rhs
    }
    fn abs(self) -> Self {
        self
    }
    fn is_zero(self) -> bool {
        !self
    }
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }
    fn from_f64(value: f64) -> Self {
        value != 0.0
    }
    fn from_usize(value: usize) -> Self {
        value != 0
    }
    /// `false` is the only value in `[false, true)`.
    fn sample_uniform<R: Rng>(_rng: &mut R, low: Self, _high: Self) -> Self {
        low
    }
}
