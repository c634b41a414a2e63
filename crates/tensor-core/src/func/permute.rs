// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Axis permutation, transposition and Gram matrices.

use crate::{ops, Element, Matrix, Shape, Tensor, TensorError};

fn validate_axes(order: usize, axes: &[usize]) -> Result<(), TensorError> {
    if axes.len() != order {
        return Err(TensorError::ArityMismatch {
            expected: order,
            actual: axes.len(),
        });
    }
    let mut seen = vec![false; order];
    for &axis in axes {
        if axis >= order || seen[axis] {
            return Err(TensorError::InvalidPermutation {
                axes: axes.to_vec(),
            });
        }
        seen[axis] = true;
    }
    Ok(())
}

/// Returns the tensor with its axes reordered so that output axis `j` is
/// input axis `axes[j]`.
///
/// # Errors
/// [`TensorError::EmptyTensor`] on a tensor without elements,
/// [`TensorError::ArityMismatch`] if `axes.len()` differs from the order,
/// [`TensorError::InvalidPermutation`] on an out-of-range or repeated axis.
///
/// # Examples
/// ```
/// use tensor_core::{func, Tensor};
/// let t = Tensor::from_values([2, 3, 4], (1..=24).collect::<Vec<i32>>()).unwrap();
/// let p = func::permute(&t, &[1, 2, 0]).unwrap();
/// assert_eq!(p.shape().dims(), &[3, 4, 2]);
/// assert_eq!(p[[2, 3, 1]], 24);
/// ```
pub fn permute<T: Element>(tensor: &Tensor<T>, axes: &[usize]) -> Result<Tensor<T>, TensorError> {
    if tensor.dim() == 0 {
        return Err(TensorError::EmptyTensor { op: "permute" });
    }
    validate_axes(tensor.order(), axes)?;

    let in_dims = tensor.shape().dims();
    let in_strides = tensor.shape().strides();
    let out_dims: Vec<usize> = axes.iter().map(|&a| in_dims[a]).collect();
    let steps: Vec<usize> = axes.iter().map(|&a| in_strides[a]).collect();

    let src = tensor.as_slice();
    let mut data = Vec::with_capacity(src.len());
    let mut index = vec![0usize; out_dims.len()];
    let mut offset = 0usize;
    for _ in 0..src.len() {
        data.push(src[offset]);
        // Odometer increment over the output index, tracking the input offset.
        for j in (0..index.len()).rev() {
            index[j] += 1;
            offset += steps[j];
            if index[j] < out_dims[j] {
                break;
            }
            offset -= steps[j] * out_dims[j];
            index[j] = 0;
        }
    }
    Ok(Tensor::from_raw_parts(Shape::new(out_dims), data))
}

/// In-place form of [`permute`].
pub fn permute_by<T: Element>(tensor: &mut Tensor<T>, axes: &[usize]) -> Result<(), TensorError> {
    *tensor = permute(tensor, axes)?;
    Ok(())
}

/// Returns the permutation that undoes `axes`.
///
/// # Errors
/// [`TensorError::InvalidPermutation`] if `axes` is not a permutation of
/// `0..axes.len()`.
pub fn inverse_permutation(axes: &[usize]) -> Result<Vec<usize>, TensorError> {
    validate_axes(axes.len(), axes)?;
    let mut inverse = vec![0; axes.len()];
    for (j, &a) in axes.iter().enumerate() {
        inverse[a] = j;
    }
    Ok(inverse)
}

/// Matrix transpose, `permute(m, [1, 0])`.
pub fn transpose<T: Element>(matrix: &Matrix<T>) -> Result<Matrix<T>, TensorError> {
    Matrix::try_from(permute(matrix.as_tensor(), &[1, 0])?)
}

pub fn transpose_by<T: Element>(matrix: &mut Matrix<T>) -> Result<(), TensorError> {
    *matrix = transpose(matrix)?;
    Ok(())
}

/// Computes `Mᵀ · M`.
pub fn compute_gram_matrix<T: Element>(matrix: &Matrix<T>) -> Result<Matrix<T>, TensorError> {
    let t = transpose(matrix)?;
    ops::dot(&t, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(dims: [usize; 3]) -> Tensor<i32> {
        let n: usize = dims.iter().product();
        Tensor::from_values(dims, (1..=n as i32).collect()).unwrap()
    }

    #[test]
    fn test_permute_3d() {
        let t = seq([2, 3, 4]);
        let p = permute(&t, &[1, 2, 0]).unwrap();
        assert_eq!(p.shape().dims(), &[3, 4, 2]);
        assert_eq!(p[[0, 0, 0]], 1);
        assert_eq!(p[[2, 3, 1]], 24);
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(p[[j, k, i]], t[[i, j, k]]);
                }
            }
        }
    }

    #[test]
    fn test_permute_round_trip() {
        let t = seq([2, 3, 4]);
        let axes = [2, 0, 1];
        let inv = inverse_permutation(&axes).unwrap();
        assert_eq!(inv, vec![1, 2, 0]);
        let back = permute(&permute(&t, &axes).unwrap(), &inv).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_permute_errors() {
        let t = seq([2, 3, 4]);
        assert_eq!(
            permute(&t, &[0, 1]),
            Err(TensorError::ArityMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            permute(&t, &[0, 1, 3]),
            Err(TensorError::InvalidPermutation {
                axes: vec![0, 1, 3]
            })
        );
        assert!(matches!(
            permute(&t, &[0, 0, 1]),
            Err(TensorError::InvalidPermutation { .. })
        ));
        let empty = Tensor::<i32>::new([0, 2]);
        assert_eq!(
            permute(&empty, &[0]),
            Err(TensorError::EmptyTensor { op: "permute" })
        );
    }

    #[test]
    fn test_transpose_and_gram() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let t = transpose(&m).unwrap();
        assert_eq!(t.row_size(), 2);
        assert_eq!(t.col_size(), 3);
        assert_eq!(t.as_slice(), &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);

        let g = compute_gram_matrix(&m).unwrap();
        assert_eq!(g.as_slice(), &[35.0, 44.0, 44.0, 56.0]);
    }
}
