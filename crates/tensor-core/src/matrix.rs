// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Order-2 tensor wrapper.

use std::fmt;
use std::ops::{Deref, Index, IndexMut};

use crate::{func, ops, Element, NormalizationType, Shape, Tensor, TensorError};

/// A [`Tensor`] constrained to exactly two axes, `[rows, cols]`.
///
/// Read access goes through `Deref<Target = Tensor<T>>`. Mutation is only
/// possible through the forwarding methods below, none of which can change
/// the order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    tensor: Tensor<T>,
}

impl<T: Element> Matrix<T> {
    /// Creates a zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            tensor: Tensor::new(Shape::matrix(rows, cols)),
        }
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            tensor: Tensor::filled(Shape::matrix(rows, cols), value),
        }
    }

    /// Creates a matrix from row-major values.
    ///
    /// # Errors
    /// [`TensorError::BufferSizeMismatch`] unless `values.len() == rows * cols`.
    pub fn from_values(rows: usize, cols: usize, values: Vec<T>) -> Result<Self, TensorError> {
        Ok(Self {
            tensor: Tensor::from_values(Shape::matrix(rows, cols), values)?,
        })
    }

    /// Creates a matrix from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, TensorError> {
        Ok(Self {
            tensor: Tensor::from_nested2(rows)?,
        })
    }

    pub fn as_tensor(&self) -> &Tensor<T> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<T> {
        self.tensor
    }

    /// Number of rows.
    pub fn row_size(&self) -> usize {
        self.tensor.shape().dims()[0]
    }

    /// Number of columns.
    pub fn col_size(&self) -> usize {
        self.tensor.shape().dims()[1]
    }

    /// Returns row `i` as a slice, or `None` if `i >= row_size()`.
    pub fn row(&self, i: usize) -> Option<&[T]> {
        let cols = self.col_size();
        (i < self.row_size()).then(|| &self.tensor.as_slice()[i * cols..(i + 1) * cols])
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.row_size()).filter_map(move |i| self.row(i))
    }

    /// Reinterprets the buffer under another order-2 shape.
    ///
    /// # Errors
    /// [`TensorError::OrderMismatch`] if `shape` is not order 2, then
    /// [`TensorError::CapacityMismatch`].
    pub fn reshape(&mut self, shape: impl Into<Shape>) -> Result<(), TensorError> {
        let shape = shape.into();
        check_order(shape.rank())?;
        self.tensor.reshape(shape)
    }

    pub fn transpose(&self) -> Result<Self, TensorError> {
        func::transpose(self)
    }

    /// Matrix product `self · other`.
    pub fn dot(&self, other: &Self) -> Result<Self, TensorError> {
        ops::dot(self, other)
    }

    /// Normalizes each column independently.
    pub fn normalize_columns(&mut self, kind: NormalizationType) -> Result<(), TensorError> {
        self.tensor.normalize_axis(0, kind)
    }

    /// Normalizes each row independently.
    pub fn normalize_rows(&mut self, kind: NormalizationType) -> Result<(), TensorError> {
        self.tensor.normalize_axis(1, kind)
    }

    pub fn fill(&mut self, value: T) {
        self.tensor.fill(value);
    }

    pub fn fill_with_uniform_random(&mut self, min: T, max: T) -> Result<(), TensorError> {
        self.tensor.fill_with_uniform_random(min, max)
    }

    pub fn fill_with_uniform_random_seeded(
        &mut self,
        min: T,
        max: T,
        seed1: u64,
        seed2: u64,
    ) -> Result<(), TensorError> {
        self.tensor
            .fill_with_uniform_random_seeded(min, max, seed1, seed2)
    }

    pub fn at_mut(&mut self, indices: &[usize]) -> Result<&mut T, TensorError> {
        self.tensor.at_mut(indices)
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.tensor.as_mut_slice()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.tensor.iter_mut()
    }

    pub fn map_in_place(&mut self, f: impl Fn(T) -> T) {
        self.tensor.map_in_place(f);
    }

    /// Appends a row (`axis = 0`) or a column (`axis = 1`) filled with `value`.
    pub fn increase_dimension(&mut self, axis: usize, value: T) -> Result<(), TensorError> {
        self.tensor.increase_dimension(axis, value)
    }
}

fn check_order(order: usize) -> Result<(), TensorError> {
    if order != 2 {
        return Err(TensorError::OrderMismatch {
            expected: 2,
            actual: order,
        });
    }
    Ok(())
}

impl<T: Element> TryFrom<Tensor<T>> for Matrix<T> {
    type Error = TensorError;

    fn try_from(tensor: Tensor<T>) -> Result<Self, Self::Error> {
        check_order(tensor.order())?;
        Ok(Self { tensor })
    }
}

impl<T> From<Matrix<T>> for Tensor<T> {
    fn from(matrix: Matrix<T>) -> Self {
        matrix.tensor
    }
}

impl<T> Deref for Matrix<T> {
    type Target = Tensor<T>;

    fn deref(&self) -> &Tensor<T> {
        &self.tensor
    }
}

impl<T: Element> Index<[usize; 2]> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: [usize; 2]) -> &T {
        &self.tensor[index]
    }
}

impl<T: Element> IndexMut<[usize; 2]> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, index: [usize; 2]) -> &mut T {
        &mut self.tensor[index]
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tensor, f)
    }
}
