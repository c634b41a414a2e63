// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Min-max and z-score normalization, global and per axis.

use super::axis::{rewrite_fibers, visit_fibers};
use crate::{Element, NormalizationType, Normalizer, Tensor, TensorError};

/// Normalizes the whole tensor in place, treating it as one fiber.
///
/// # Errors
/// [`TensorError::EmptyTensor`] on a tensor without elements.
pub fn normalize_by<T: Element>(
    tensor: &mut Tensor<T>,
    kind: NormalizationType,
) -> Result<(), TensorError> {
    if tensor.dim() == 0 {
        return Err(TensorError::EmptyTensor { op: "normalize" });
    }
    let normalizer = Normalizer::from_fiber(tensor.as_slice(), kind);
    normalizer.apply_slice(tensor.as_mut_slice());
    Ok(())
}

/// Copying form of [`normalize_by`].
///
/// # Examples
/// ```
/// use tensor_core::{func, NormalizationType, Tensor};
/// let t = Tensor::from_values([3, 3], (1..=9).map(f64::from).collect()).unwrap();
/// let n = func::normalize(&t, NormalizationType::MinMax).unwrap();
/// assert_eq!(n[[0, 1]], 0.125);
/// assert_eq!(n[[2, 2]], 1.0);
/// ```
pub fn normalize<T: Element>(
    tensor: &Tensor<T>,
    kind: NormalizationType,
) -> Result<Tensor<T>, TensorError> {
    let mut out = tensor.clone();
    normalize_by(&mut out, kind)?;
    Ok(out)
}

/// Normalizes every fiber along `axis` independently, in place.
///
/// With `axis = 0` on a matrix each column is normalized on its own.
///
/// # Errors
/// [`TensorError::EmptyTensor`], then [`TensorError::AxisOutOfRange`].
pub fn normalize_axis_by<T: Element>(
    tensor: &mut Tensor<T>,
    axis: usize,
    kind: NormalizationType,
) -> Result<(), TensorError> {
    rewrite_fibers(tensor, axis, "normalize_axis", |values, _| {
        Normalizer::from_fiber(values, kind).apply_slice(values);
    })
}

/// Copying form of [`normalize_axis_by`].
pub fn normalize_axis<T: Element>(
    tensor: &Tensor<T>,
    axis: usize,
    kind: NormalizationType,
) -> Result<Tensor<T>, TensorError> {
    let mut out = tensor.clone();
    normalize_axis_by(&mut out, axis, kind)?;
    Ok(out)
}

/// Fits a single [`Normalizer`] on all elements of `tensor`.
pub fn make_normalize_function<T: Element>(
    tensor: &Tensor<T>,
    kind: NormalizationType,
) -> Result<Normalizer<T>, TensorError> {
    Normalizer::fit(tensor.as_slice(), kind)
}

/// Fits one [`Normalizer`] per fiber along `axis`, in fiber order.
///
/// For a matrix and `axis = 0` the result holds one normalizer per column,
/// which can later be applied to unseen rows.
pub fn make_normalize_functions<T: Element>(
    tensor: &Tensor<T>,
    axis: usize,
    kind: NormalizationType,
) -> Result<Vec<Normalizer<T>>, TensorError> {
    let data = tensor.as_slice();
    let mut normalizers = Vec::new();
    let mut values = Vec::new();
    visit_fibers(tensor.shape(), axis, "make_normalize_functions", |addresses| {
        values.clear();
        values.extend(addresses.iter().map(|&a| data[a]));
        normalizers.push(Normalizer::from_fiber(&values, kind));
    })?;
    Ok(normalizers)
}
