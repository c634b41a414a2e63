// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Order-1 tensor wrapper.

use std::fmt;
use std::ops::{Deref, Index, IndexMut};

use crate::{Element, Shape, Tensor, TensorError};

/// A [`Tensor`] constrained to exactly one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    tensor: Tensor<T>,
}

impl<T: Element> Vector<T> {
    /// Creates a zero-filled vector of `len` elements.
    pub fn new(len: usize) -> Self {
        Self {
            tensor: Tensor::new(Shape::vector(len)),
        }
    }

    pub fn filled(len: usize, value: T) -> Self {
        Self {
            tensor: Tensor::filled(Shape::vector(len), value),
        }
    }

    pub fn from_values(values: Vec<T>) -> Self {
        let shape = Shape::vector(values.len());
        Self {
            tensor: Tensor::from_raw_parts(shape, values),
        }
    }

    pub fn len(&self) -> usize {
        self.tensor.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.tensor.dim() == 0
    }

    pub fn as_tensor(&self) -> &Tensor<T> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<T> {
        self.tensor
    }

    /// # Errors
    /// [`TensorError::OrderMismatch`] if `shape` is not order 1, then
    /// [`TensorError::CapacityMismatch`].
    pub fn reshape(&mut self, shape: impl Into<Shape>) -> Result<(), TensorError> {
        let shape = shape.into();
        check_order(shape.rank())?;
        self.tensor.reshape(shape)
    }

    pub fn fill(&mut self, value: T) {
        self.tensor.fill(value);
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, TensorError> {
        self.tensor.at_mut(&[index])
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.tensor.as_mut_slice()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.tensor.iter_mut()
    }
}

fn check_order(order: usize) -> Result<(), TensorError> {
    if order != 1 {
        return Err(TensorError::OrderMismatch {
            expected: 1,
            actual: order,
        });
    }
    Ok(())
}

impl<T: Element> TryFrom<Tensor<T>> for Vector<T> {
    type Error = TensorError;

    fn try_from(tensor: Tensor<T>) -> Result<Self, Self::Error> {
        check_order(tensor.order())?;
        Ok(Self { tensor })
    }
}

impl<T: Element> From<Vec<T>> for Vector<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}

impl<T> From<Vector<T>> for Tensor<T> {
    fn from(vector: Vector<T>) -> Self {
        vector.tensor
    }
}

impl<T> Deref for Vector<T> {
    type Target = Tensor<T>;

    fn deref(&self) -> &Tensor<T> {
        &self.tensor
    }
}

impl<T: Element> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.tensor.as_slice()[index]
    }
}

impl<T: Element> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.tensor.as_mut_slice()[index]
    }
}

impl<T: Element> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tensor, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_basics() {
        let mut v = Vector::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.len(), 3);
        assert_eq!(v.order(), 1);
        v[1] = 5.0;
        *v.at_mut(2).unwrap() = 6.0;
        assert_eq!(v.as_slice(), &[1.0, 5.0, 6.0]);
        assert!(v.at_mut(3).is_err());
    }

    #[test]
    fn test_vector_order_checks() {
        assert!(Vector::try_from(Tensor::<i32>::new([4])).is_ok());
        assert_eq!(
            Vector::try_from(Tensor::<i32>::new([2, 2])),
            Err(TensorError::OrderMismatch {
                expected: 1,
                actual: 2
            })
        );
        let mut v = Vector::<i32>::new(4);
        assert!(v.reshape([2, 2]).is_err());
        v.reshape([4]).unwrap();
        assert!(matches!(
            v.reshape([5]),
            Err(TensorError::CapacityMismatch { .. })
        ));
    }
}
