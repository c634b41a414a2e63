// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Inner product and matrix multiplication.

use crate::{Element, Matrix, Shape, Tensor, TensorError};

/// Sum of elementwise products of two equally shaped tensors.
///
/// # Errors
/// [`TensorError::ShapeMismatch`] if the shapes differ.
pub fn inner<T: Element>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<T, TensorError> {
    if lhs.shape() != rhs.shape() {
        return Err(TensorError::ShapeMismatch {
            op: "inner",
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }
    Ok(lhs
        .iter()
        .zip(rhs.iter())
        .fold(T::zero(), |acc, (&a, &b)| acc.add(a.mul(b))))
}

/// Matrix product: `lhs` is `[M, K]`, `rhs` is `[K, N]`, the result `[M, N]`.
///
/// # Errors
/// [`TensorError::ShapeMismatch`] if the inner dimensions differ.
///
/// # Examples
/// ```
/// use tensor_core::{ops, Matrix};
/// let a = Matrix::from_values(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let b = Matrix::from_values(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
/// let c = ops::dot(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
/// ```
pub fn dot<T: Element>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>, TensorError> {
    if !lhs.shape().is_matmul_compatible(rhs.shape()) {
        return Err(TensorError::ShapeMismatch {
            op: "dot",
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }
    let (m, k, n) = (lhs.row_size(), lhs.col_size(), rhs.col_size());
    let mut c = vec![T::zero(); m * n];
    matmul_generic(lhs.as_slice(), rhs.as_slice(), &mut c, m, k, n);
    Matrix::try_from(Tensor::from_raw_parts(Shape::matrix(m, n), c))
}

/// Portable matrix multiplication kernel.
///
/// ikj loop order: the inner loop is an axpy on a row of `c`, sequential in
/// memory for both `b` and `c`.
fn matmul_generic<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij = (*c_ij).add(a_ip.mul(b_pj));
            }
        }
    }
}
