// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type and view abstractions.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::normalizer::NormalizationType;
use crate::{func, ops, Element, Shape, TensorError};

/// An owned, n-dimensional tensor stored in contiguous memory.
///
/// # Memory Layout
/// Data is stored in row-major (C) order in a flat `Vec<T>` whose length
/// always equals `shape.num_elements()`. Cloning deep-copies the buffer.
///
/// Equality is exact: same shape and bitwise-equal elements, no tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Element> Tensor<T> {
    /// Creates a tensor with every element set to `T::zero()`.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Shape, Tensor};
    /// let t = Tensor::<f32>::new(Shape::matrix(2, 3));
    /// assert_eq!(t.dim(), 6);
    /// assert_eq!(t.memory_size(), 24);
    /// ```
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self::filled(shape, T::zero())
    }

    /// Creates a tensor with every element set to `value`.
    pub fn filled(shape: impl Into<Shape>, value: T) -> Self {
        let shape = shape.into();
        let data = vec![value; shape.num_elements()];
        Self { shape, data }
    }

    /// Creates a tensor from row-major values.
    ///
    /// # Errors
    /// [`TensorError::BufferSizeMismatch`] unless `values.len()` equals the
    /// shape's capacity.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Shape, Tensor};
    /// let t = Tensor::from_values(Shape::vector(3), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_values(shape: impl Into<Shape>, values: Vec<T>) -> Result<Self, TensorError> {
        let shape = shape.into();
        let expected = shape.num_elements();
        if values.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            shape,
            data: values,
        })
    }

    /// Creates an order-2 tensor from a list of rows.
    ///
    /// An empty outer list yields shape `[0, 0]`.
    ///
    /// # Errors
    /// [`TensorError::InconsistentNesting`] if the rows differ in length.
    pub fn from_nested2(rows: Vec<Vec<T>>) -> Result<Self, TensorError> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(TensorError::InconsistentNesting { depth: 1 });
        }
        let shape = Shape::matrix(rows.len(), cols);
        let data = rows.into_iter().flatten().collect();
        Ok(Self { shape, data })
    }

    /// Creates an order-3 tensor from a list of matrices.
    ///
    /// # Errors
    /// [`TensorError::InconsistentNesting`] if any list differs in length
    /// from the other lists at the same depth.
    pub fn from_nested3(blocks: Vec<Vec<Vec<T>>>) -> Result<Self, TensorError> {
        let rows = blocks.first().map_or(0, Vec::len);
        if blocks.iter().any(|b| b.len() != rows) {
            return Err(TensorError::InconsistentNesting { depth: 1 });
        }
        let cols = blocks
            .first()
            .and_then(|b| b.first())
            .map_or(0, Vec::len);
        if blocks.iter().flatten().any(|r| r.len() != cols) {
            return Err(TensorError::InconsistentNesting { depth: 2 });
        }
        let shape = Shape::new(vec![blocks.len(), rows, cols]);
        let data = blocks.into_iter().flatten().flatten().collect();
        Ok(Self { shape, data })
    }

    /// Creates an order-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            shape: Shape::scalar(),
            data: vec![value],
        }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of axes.
    pub fn order(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the number of elements.
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    /// Alias of [`dim`](Self::dim).
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// Returns the memory footprint of the element buffer in bytes.
    pub fn memory_size(&self) -> usize {
        self.shape.size_bytes(T::DTYPE)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Consumes the tensor and returns its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Checked element access.
    ///
    /// # Errors
    /// [`TensorError::OrderMismatch`] when `indices.len()` differs from the
    /// order, [`TensorError::IndexOutOfBounds`] when an index is not smaller
    /// than its axis dimension.
    pub fn at(&self, indices: &[usize]) -> Result<&T, TensorError> {
        let offset = checked_offset(&self.shape, indices)?;
        Ok(&self.data[offset])
    }

    /// Checked mutable element access. Same errors as [`at`](Self::at).
    pub fn at_mut(&mut self, indices: &[usize]) -> Result<&mut T, TensorError> {
        let offset = checked_offset(&self.shape, indices)?;
        Ok(&mut self.data[offset])
    }

    /// Returns a new tensor with `f` applied to every element.
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Self {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Applies `f` to every element in place.
    pub fn map_in_place(&mut self, f: impl Fn(T) -> T) {
        self.data.iter_mut().for_each(|v| *v = f(*v));
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    /// Fills the tensor with values drawn uniformly from `[min, max)` using
    /// an entropy-seeded generator.
    ///
    /// # Errors
    /// [`TensorError::InvalidRange`] if `max <= min` or either bound is
    /// not finite.
    pub fn fill_with_uniform_random(&mut self, min: T, max: T) -> Result<(), TensorError> {
        check_random_range(min, max)?;
        self.fill_uniform(&mut rand::thread_rng(), min, max);
        Ok(())
    }

    /// Deterministic variant of
    /// [`fill_with_uniform_random`](Self::fill_with_uniform_random): the same
    /// seeds always produce the same contents.
    pub fn fill_with_uniform_random_seeded(
        &mut self,
        min: T,
        max: T,
        seed1: u64,
        seed2: u64,
    ) -> Result<(), TensorError> {
        check_random_range(min, max)?;
        let mut seed = [0u8; 32];
        seed[..8].copy_from_slice(&seed1.to_le_bytes());
        seed[8..16].copy_from_slice(&seed2.to_le_bytes());
        self.fill_uniform(&mut StdRng::from_seed(seed), min, max);
        Ok(())
    }

    fn fill_uniform<R: Rng>(&mut self, rng: &mut R, min: T, max: T) {
        if self.data.is_empty() {
            return;
        }
        for v in &mut self.data {
            *v = T::sample_uniform(rng, min, max);
        }
    }

    /// Randomly permutes the buffer (shape unchanged).
    pub fn shuffle(&mut self) {
        self.data.shuffle(&mut rand::thread_rng());
    }

    /// Deterministic variant of [`shuffle`](Self::shuffle).
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.data.shuffle(&mut StdRng::seed_from_u64(seed));
    }

    /// Reinterprets the buffer under a new shape.
    ///
    /// # Errors
    /// [`TensorError::CapacityMismatch`] unless both shapes hold the same
    /// number of elements.
    pub fn reshape(&mut self, shape: impl Into<Shape>) -> Result<(), TensorError> {
        let shape = shape.into();
        check_capacity("reshape", self.data.len(), &shape)?;
        self.shape = shape;
        Ok(())
    }

    /// Removes every axis of dimension 1.
    pub fn squeeze(&mut self) {
        self.shape = self.shape.squeezed();
    }

    /// Copies rows `[begin, end)` along axis 0.
    ///
    /// # Errors
    /// [`TensorError::AxisOutOfRange`] on an order-0 tensor,
    /// [`TensorError::InvalidRange`] if `end < begin` or `end` exceeds the
    /// first dimension.
    pub fn slice(&self, begin: usize, end: usize) -> Result<Self, TensorError> {
        let rows = self.shape.axis_dim(0)?;
        if end < begin || end > rows {
            return Err(TensorError::InvalidRange {
                op: "slice",
                detail: format!("[{begin}, {end}) on axis of dimension {rows}"),
            });
        }
        let step = self.shape.strides()[0];
        let mut dims = self.shape.dims().to_vec();
        dims[0] = end - begin;
        Ok(Self {
            shape: Shape::new(dims),
            data: self.data[begin * step..end * step].to_vec(),
        })
    }

    /// Borrows the buffer under another shape of equal capacity.
    ///
    /// # Errors
    /// [`TensorError::CapacityMismatch`] if the capacities differ.
    pub fn view_of(&self, shape: impl Into<Shape>) -> Result<TensorView<'_, T>, TensorError> {
        let shape = shape.into();
        check_capacity("view_of", self.data.len(), &shape)?;
        Ok(TensorView {
            shape,
            data: &self.data,
        })
    }

    /// Borrows the buffer under its own shape.
    pub fn view(&self) -> TensorView<'_, T> {
        TensorView {
            shape: self.shape.clone(),
            data: &self.data,
        }
    }

    /// Returns an order-1 copy in row-major order.
    pub fn flatten(&self) -> Self {
        Self {
            shape: Shape::vector(self.data.len()),
            data: self.data.clone(),
        }
    }

    /// Grows axis `axis` by one, filling the new trailing slab with `value`.
    ///
    /// # Errors
    /// [`TensorError::AxisOutOfRange`] if `axis >= order`.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Tensor;
    /// let mut t = Tensor::from_nested2(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// t.increase_dimension(1, 9).unwrap();
    /// assert_eq!(t.as_slice(), &[1, 2, 9, 3, 4, 9]);
    /// ```
    pub fn increase_dimension(&mut self, axis: usize, value: T) -> Result<(), TensorError> {
        let axis_dim = self.shape.axis_dim(axis)?;
        let slab = self.shape.strides()[axis];
        let block = axis_dim * slab;
        let outer: usize = self.shape.dims()[..axis].iter().product();

        let mut dims = self.shape.dims().to_vec();
        dims[axis] += 1;
        let shape = Shape::new(dims);

        let mut data = Vec::with_capacity(shape.num_elements());
        for o in 0..outer {
            data.extend_from_slice(&self.data[o * block..(o + 1) * block]);
            data.extend(std::iter::repeat(value).take(slab));
        }
        self.shape = shape;
        self.data = data;
        Ok(())
    }

    /// Raises every element to `exponent` in place.
    pub fn power(&mut self, exponent: f64) -> Result<(), TensorError> {
        func::power_elem_by(self, exponent)
    }

    /// Squares every element in place.
    pub fn square(&mut self) {
        func::square_by(self);
    }

    pub fn sqrt(&mut self) -> Result<(), TensorError> {
        func::sqrt_by(self)
    }

    pub fn abs(&mut self) -> Result<(), TensorError> {
        func::abs_by(self)
    }

    /// Permutes the axes in place. See [`func::permute`].
    pub fn permute(&mut self, axes: &[usize]) -> Result<(), TensorError> {
        func::permute_by(self, axes)
    }

    /// Normalizes the whole tensor as a single fiber.
    pub fn normalize(&mut self, kind: NormalizationType) -> Result<(), TensorError> {
        func::normalize_by(self, kind)
    }

    /// Normalizes every fiber along `axis` independently.
    pub fn normalize_axis(
        &mut self,
        axis: usize,
        kind: NormalizationType,
    ) -> Result<(), TensorError> {
        func::normalize_axis_by(self, axis, kind)
    }

    /// Sum of elementwise products. See [`ops::inner`].
    pub fn inner(&self, other: &Self) -> Result<T, TensorError> {
        ops::inner(self, other)
    }

    pub(crate) fn from_raw_parts(shape: Shape, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.num_elements(), data.len());
        Self { shape, data }
    }
}

fn checked_offset(shape: &Shape, indices: &[usize]) -> Result<usize, TensorError> {
    if indices.len() != shape.rank() {
        return Err(TensorError::OrderMismatch {
            expected: shape.rank(),
            actual: indices.len(),
        });
    }
    for (axis, (&index, &dim)) in indices.iter().zip(shape.dims()).enumerate() {
        if index >= dim {
            return Err(TensorError::IndexOutOfBounds { axis, index, dim });
        }
    }
    Ok(shape.flat_offset(indices))
}

fn check_capacity(op: &'static str, expected: usize, target: &Shape) -> Result<(), TensorError> {
    let actual = target.num_elements();
    if actual != expected {
        return Err(TensorError::CapacityMismatch {
            op,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_random_range<T: Element>(min: T, max: T) -> Result<(), TensorError> {
    if !(min.to_f64().is_finite() && max.to_f64().is_finite()) {
        return Err(TensorError::InvalidRange {
            op: "fill_with_uniform_random",
            detail: format!("bounds must be finite, got [{min}, {max})"),
        });
    }
    if min < max {
        Ok(())
    } else {
        Err(TensorError::InvalidRange {
            op: "fill_with_uniform_random",
            detail: format!("max ({max}) must be greater than min ({min})"),
        })
    }
}

impl<'a, T: Element> Index<&'a [usize]> for Tensor<T> {
    type Output = T;

    /// Unchecked multi-index access: no arity or per-axis bound checks.
    #[inline]
    fn index(&self, indices: &'a [usize]) -> &T {
        &self.data[self.shape.flat_offset(indices)]
    }
}

impl<'a, T: Element> IndexMut<&'a [usize]> for Tensor<T> {
    #[inline]
    fn index_mut(&mut self, indices: &'a [usize]) -> &mut T {
        let offset = self.shape.flat_offset(indices);
        &mut self.data[offset]
    }
}

impl<T: Element, const N: usize> Index<[usize; N]> for Tensor<T> {
    type Output = T;

    #[inline]
    fn index(&self, indices: [usize; N]) -> &T {
        &self[&indices[..]]
    }
}

impl<T: Element, const N: usize> IndexMut<[usize; N]> for Tensor<T> {
    #[inline]
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        &mut self[&indices[..]]
    }
}

impl<T: Element> TryFrom<Vec<Vec<T>>> for Tensor<T> {
    type Error = TensorError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::from_nested2(rows)
    }
}

impl<T: Element> TryFrom<Vec<Vec<Vec<T>>>> for Tensor<T> {
    type Error = TensorError;

    fn try_from(blocks: Vec<Vec<Vec<T>>>) -> Result<Self, Self::Error> {
        Self::from_nested3(blocks)
    }
}

impl<'a, T> IntoIterator for &'a Tensor<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Tensor<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

/// Prints the shape followed by the values, one innermost row per line.
impl<T: Element> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, &self.shape, &self.data)
    }
}

fn write_elements<T: Element>(f: &mut fmt::Formatter<'_>, shape: &Shape, data: &[T]) -> fmt::Result {
    writeln!(f, "Tensor<{}> {}", T::DTYPE, shape)?;
    let row_len = shape.dims().last().copied().unwrap_or(1).max(1);
    for row in data.chunks(row_len) {
        let line: Vec<String> = row.iter().map(ToString::to_string).collect();
        writeln!(f, "  {}", line.join(" "))?;
    }
    Ok(())
}

macro_rules! impl_scalar_ops {
    ($($trait:ident::$method:ident, $assign:ident::$assign_method:ident => $elem:ident;)*) => {$(
        impl<T: Element> $trait<T> for &Tensor<T> {
            type Output = Tensor<T>;

            fn $method(self, rhs: T) -> Tensor<T> {
                self.map(|v| Element::$elem(v, rhs))
            }
        }

        impl<T: Element> $assign<T> for Tensor<T> {
            fn $assign_method(&mut self, rhs: T) {
                self.map_in_place(|v| Element::$elem(v, rhs));
            }
        }
    )*};
}

impl_scalar_ops! {
    Add::add, AddAssign::add_assign => add;
    Sub::sub, SubAssign::sub_assign => sub;
    Mul::mul, MulAssign::mul_assign => mul;
    Div::div, DivAssign::div_assign => div;
}

/// A borrowed, read-only view over a [`Tensor`]'s buffer, possibly under a
/// different shape of the same capacity.
///
/// Views are zero-copy and tied to the lifetime of the source tensor,
/// enforced by the borrow checker.
#[derive(Debug, Clone)]
pub struct TensorView<'a, T> {
    shape: Shape,
    data: &'a [T],
}

impl<'a, T: Element> TensorView<'a, T> {
    /// Returns the shape the buffer is viewed under.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn order(&self) -> usize {
        self.shape.rank()
    }

    pub fn dim(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Checked element access. Same errors as [`Tensor::at`].
    pub fn at(&self, indices: &[usize]) -> Result<&'a T, TensorError> {
        let offset = checked_offset(&self.shape, indices)?;
        Ok(&self.data[offset])
    }

    /// Copies the viewed data into an owned tensor with the view's shape.
    pub fn to_tensor(&self) -> Tensor<T> {
        Tensor::from_raw_parts(self.shape.clone(), self.data.to_vec())
    }
}

impl<'a, T: Element> Index<&'a [usize]> for TensorView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, indices: &'a [usize]) -> &T {
        &self.data[self.shape.flat_offset(indices)]
    }
}

impl<T: Element, const N: usize> Index<[usize; N]> for TensorView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, indices: [usize; N]) -> &T {
        &self[&indices[..]]
    }
}

impl<T: Element> fmt::Display for TensorView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, &self.shape, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(shape: impl Into<Shape>) -> Tensor<f64> {
        let shape = shape.into();
        let values = (1..=shape.num_elements()).map(|v| v as f64).collect();
        Tensor::from_values(shape, values).unwrap()
    }

    #[test]
    fn test_new_is_zeroed() {
        let t = Tensor::<f32>::new(Shape::matrix(2, 3));
        assert_eq!(t.dim(), 6);
        assert_eq!(t.order(), 2);
        assert_eq!(t.memory_size(), 24);
        assert!(t.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_values_size_mismatch() {
        let result = Tensor::from_values(Shape::matrix(2, 3), vec![1i32; 5]);
        assert_eq!(
            result,
            Err(TensorError::BufferSizeMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_from_nested2() {
        let t = Tensor::from_nested2(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(2, 3));
        assert_eq!(t[[1, 0]], 4);
    }

    #[test]
    fn test_from_nested2_ragged() {
        let result = Tensor::from_nested2(vec![vec![1, 2, 3], vec![4, 5]]);
        assert_eq!(result, Err(TensorError::InconsistentNesting { depth: 1 }));
    }

    #[test]
    fn test_from_nested2_empty() {
        let t = Tensor::<i32>::from_nested2(vec![]).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(0, 0));
        assert_eq!(t.dim(), 0);
    }

    #[test]
    fn test_from_nested3() {
        let t = Tensor::try_from(vec![
            vec![vec![1u64, 2], vec![3, 4]],
            vec![vec![5, 6], vec![7, 8]],
        ])
        .unwrap();
        assert_eq!(t.shape().dims(), &[2, 2, 2]);
        assert_eq!(t[[1, 1, 0]], 7);

        let ragged = Tensor::from_nested3(vec![vec![vec![1u64, 2]], vec![vec![3]]]);
        assert_eq!(ragged, Err(TensorError::InconsistentNesting { depth: 2 }));
    }

    #[test]
    fn test_checked_access() {
        let mut t = seq([2, 3]);
        assert_eq!(*t.at(&[1, 2]).unwrap(), 6.0);
        assert_eq!(
            t.at(&[0, 0, 0]),
            Err(TensorError::OrderMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            t.at(&[2, 0]),
            Err(TensorError::IndexOutOfBounds {
                axis: 0,
                index: 2,
                dim: 2
            })
        );
        *t.at_mut(&[0, 1]).unwrap() = -1.0;
        assert_eq!(t[[0, 1]], -1.0);
    }

    #[test]
    fn test_scalar_access() {
        let t = Tensor::scalar(5i16);
        assert_eq!(t.order(), 0);
        assert_eq!(*t.at(&[]).unwrap(), 5);
    }

    #[test]
    fn test_unchecked_index_uses_strides() {
        let mut t = seq([2, 3, 4]);
        assert_eq!(t[&[1, 2, 3][..]], 24.0);
        t[[0, 0, 1]] = 100.0;
        assert_eq!(t.as_slice()[1], 100.0);
    }

    #[test]
    fn test_random_fill_range_checked_first() {
        let mut empty = Tensor::<f64>::new(Shape::vector(0));
        assert!(matches!(
            empty.fill_with_uniform_random(1.0, 1.0),
            Err(TensorError::InvalidRange { .. })
        ));
        empty.fill_with_uniform_random(0.0, 1.0).unwrap();
    }

    #[test]
    fn test_random_fill_seeded_is_deterministic() {
        let mut a = Tensor::<f64>::new(Shape::matrix(4, 4));
        let mut b = Tensor::<f64>::new(Shape::matrix(4, 4));
        a.fill_with_uniform_random_seeded(-2.0, 3.0, 7, 11).unwrap();
        b.fill_with_uniform_random_seeded(-2.0, 3.0, 7, 11).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| (-2.0..3.0).contains(&v)));
    }

    #[test]
    fn test_random_fill_adjacent_wide_integers() {
        let mut t = Tensor::<i64>::new(Shape::vector(4));
        t.fill_with_uniform_random_seeded(i64::MAX - 1, i64::MAX, 1, 2)
            .unwrap();
        assert!(t.iter().all(|&v| v == i64::MAX - 1));

        let mut u = Tensor::<u64>::new(Shape::vector(3));
        u.fill_with_uniform_random(u64::MAX - 1, u64::MAX).unwrap();
        assert!(u.iter().all(|&v| v == u64::MAX - 1));
    }

    #[test]
    fn test_random_fill_rejects_infinite_bounds() {
        let mut t = Tensor::<f64>::new(Shape::vector(2));
        assert!(matches!(
            t.fill_with_uniform_random(0.0, f64::INFINITY),
            Err(TensorError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut t = seq([10]);
        t.shuffle_seeded(42);
        let mut values = t.as_slice().to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, seq([10]).into_vec());
    }

    #[test]
    fn test_reshape_and_flatten() {
        let original = seq([2, 3, 4]);
        let mut flat = original.flatten();
        assert_eq!(flat.shape(), &Shape::vector(24));
        flat.reshape([2, 3, 4]).unwrap();
        assert_eq!(flat, original);
        assert_eq!(
            flat.reshape([5, 5]),
            Err(TensorError::CapacityMismatch {
                op: "reshape",
                expected: 24,
                actual: 25
            })
        );
    }

    #[test]
    fn test_squeeze() {
        let mut t = seq([1, 3, 1]);
        t.squeeze();
        assert_eq!(t.shape(), &Shape::vector(3));
    }

    #[test]
    fn test_slice_rows() {
        let t = seq([4, 2]);
        let s = t.slice(1, 3).unwrap();
        assert_eq!(s.shape(), &Shape::matrix(2, 2));
        assert_eq!(s.as_slice(), &[3.0, 4.0, 5.0, 6.0]);
        assert_eq!(t.slice(4, 4).unwrap().dim(), 0);
        assert!(matches!(t.slice(3, 1), Err(TensorError::InvalidRange { .. })));
        assert!(matches!(t.slice(0, 5), Err(TensorError::InvalidRange { .. })));
        assert!(matches!(
            Tensor::scalar(1.0).slice(0, 1),
            Err(TensorError::AxisOutOfRange { axis: 0, order: 0 })
        ));
    }

    #[test]
    fn test_view_of_aliases() {
        let t = seq([2, 3]);
        let v = t.view_of([3, 2]).unwrap();
        assert_eq!(v.shape(), &Shape::matrix(3, 2));
        assert_eq!(v[[2, 1]], 6.0);
        assert_eq!(*v.at(&[1, 0]).unwrap(), 3.0);
        assert!(std::ptr::eq(v.as_slice(), t.as_slice()));
        assert!(t.view_of([4, 2]).is_err());
    }

    #[test]
    fn test_increase_dimension() {
        let mut t = seq([2, 3]);
        t.increase_dimension(1, 0.5).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(2, 4));
        assert_eq!(t[[0, 3]], 0.5);
        assert_eq!(t[[1, 3]], 0.5);
        assert_eq!(t[[1, 2]], 6.0);

        let mut u = seq([2, 3]);
        u.increase_dimension(0, -1.0).unwrap();
        assert_eq!(u.shape(), &Shape::matrix(3, 3));
        assert_eq!(&u.as_slice()[6..], &[-1.0, -1.0, -1.0]);
        assert!(u.increase_dimension(2, 0.0).is_err());
    }

    #[test]
    fn test_scalar_operators() {
        let t = seq([3]);
        assert_eq!((&t + 1.0).as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!((&t * 2.0).as_slice(), &[2.0, 4.0, 6.0]);
        let mut u = t.clone();
        u -= 1.0;
        u /= 2.0;
        assert_eq!(u.as_slice(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_equality_is_exact() {
        let a = seq([2, 2]);
        let mut b = a.clone();
        assert_eq!(a, b);
        b[[1, 1]] += 1e-12;
        assert_ne!(a, b);
        let mut c = a.clone();
        c.reshape([4]).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let t = Tensor::from_nested2(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(format!("{t}"), "Tensor<i32> [2, 2]\n  1 2\n  3 4\n");
    }
}
