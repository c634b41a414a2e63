// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Row and column sub-matrix extraction.

use crate::{Element, Matrix, TensorError};

fn check_indices(indices: &[usize], axis: usize, dim: usize) -> Result<(), TensorError> {
    match indices.iter().find(|&&i| i >= dim) {
        Some(&index) => Err(TensorError::IndexOutOfBounds { axis, index, dim }),
        None => Ok(()),
    }
}

/// Copies the listed columns, in the order given.
///
/// # Errors
/// [`TensorError::IndexOutOfBounds`] if a column index is not smaller than
/// `col_size()`.
pub fn sub_matrix_cols<T: Element>(
    matrix: &Matrix<T>,
    cols: &[usize],
) -> Result<Matrix<T>, TensorError> {
    check_indices(cols, 1, matrix.col_size())?;
    let mut values = Vec::with_capacity(matrix.row_size() * cols.len());
    for row in matrix.rows() {
        values.extend(cols.iter().map(|&c| row[c]));
    }
    Matrix::from_values(matrix.row_size(), cols.len(), values)
}

/// Copies every column except the listed ones, preserving column order.
pub fn sub_matrix_cols_exclude<T: Element>(
    matrix: &Matrix<T>,
    cols: &[usize],
) -> Result<Matrix<T>, TensorError> {
    check_indices(cols, 1, matrix.col_size())?;
    let keep: Vec<usize> = (0..matrix.col_size())
        .filter(|c| !cols.contains(c))
        .collect();
    sub_matrix_cols(matrix, &keep)
}

/// Copies the listed rows, in the order given.
pub fn sub_matrix_rows<T: Element>(
    matrix: &Matrix<T>,
    rows: &[usize],
) -> Result<Matrix<T>, TensorError> {
    check_indices(rows, 0, matrix.row_size())?;
    let cols = matrix.col_size();
    let data = matrix.as_slice();
    let mut values = Vec::with_capacity(rows.len() * cols);
    for &r in rows {
        values.extend_from_slice(&data[r * cols..(r + 1) * cols]);
    }
    Matrix::from_values(rows.len(), cols, values)
}
