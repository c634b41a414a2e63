// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fiber traversal along a single axis.
//!
//! A fiber is the set of elements obtained by varying the index of one axis
//! while every other index stays fixed. In a row-major buffer the fiber
//! headed at flat offset `p` is `p, p + s, ..., p + (d - 1) * s` where `s` is
//! the stride of the axis and `d` its dimension.

use crate::{Element, Shape, Tensor, TensorError};

/// Calls `visit` with the flat addresses of every fiber along `axis`, in
/// increasing order of the fiber head.
///
/// Each flat offset belongs to exactly one fiber; a visited bitmap skips the
/// offsets already covered by an earlier head.
pub(crate) fn visit_fibers(
    shape: &Shape,
    axis: usize,
    op: &'static str,
    mut visit: impl FnMut(&[usize]),
) -> Result<(), TensorError> {
    let capacity = shape.num_elements();
    if capacity == 0 {
        return Err(TensorError::EmptyTensor { op });
    }
    let axis_dim = shape.axis_dim(axis)?;
    let accum_step = shape.strides()[axis];

    let mut visited = vec![false; capacity];
    let mut addresses = Vec::with_capacity(axis_dim);
    for head in 0..capacity {
        if visited[head] {
            continue;
        }
        addresses.clear();
        addresses.extend((0..axis_dim).map(|k| head + k * accum_step));
        for &a in &addresses {
            visited[a] = true;
        }
        visit(&addresses);
    }
    Ok(())
}

/// Gathers each fiber, hands it to `f` mutably and scatters it back.
pub(crate) fn rewrite_fibers<T: Element>(
    tensor: &mut Tensor<T>,
    axis: usize,
    op: &'static str,
    mut f: impl FnMut(&mut [T], &[usize]),
) -> Result<(), TensorError> {
    let shape = tensor.shape().clone();
    let data = tensor.as_mut_slice();
    let mut values = Vec::new();
    visit_fibers(&shape, axis, op, |addresses| {
        values.clear();
        values.extend(addresses.iter().map(|&a| data[a]));
        f(&mut values, addresses);
        for (&a, &v) in addresses.iter().zip(&values) {
            data[a] = v;
        }
    })
}

/// Applies `f` to every fiber along `axis`.
///
/// `f` receives the fiber's values and their flat buffer addresses.
///
/// # Errors
/// [`TensorError::EmptyTensor`] when the tensor holds no elements (checked
/// first), [`TensorError::AxisOutOfRange`] when `axis >= order`.
///
/// # Examples
/// ```
/// use tensor_core::{func, Tensor};
/// let t = Tensor::from_nested2(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
/// let mut sums = Vec::new();
/// func::axis_func(&t, 0, |values, _| sums.push(values.iter().sum::<i32>())).unwrap();
/// assert_eq!(sums, vec![5, 7, 9]);
/// ```
pub fn axis_func<T: Element>(
    tensor: &Tensor<T>,
    axis: usize,
    mut f: impl FnMut(&[T], &[usize]),
) -> Result<(), TensorError> {
    let data = tensor.as_slice();
    let mut values = Vec::new();
    visit_fibers(tensor.shape(), axis, "axis_func", |addresses| {
        values.clear();
        values.extend(addresses.iter().map(|&a| data[a]));
        f(&values, addresses);
    })
}

/// Like [`axis_func`], but changes `f` makes to a fiber are written back to
/// the tensor.
pub fn axis_func_mut<T: Element>(
    tensor: &mut Tensor<T>,
    axis: usize,
    f: impl FnMut(&mut [T], &[usize]),
) -> Result<(), TensorError> {
    rewrite_fibers(tensor, axis, "axis_func", f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_fibers(dims: &[usize], axis: usize) -> Vec<Vec<usize>> {
        let mut fibers = Vec::new();
        visit_fibers(&Shape::from(dims), axis, "test", |a| fibers.push(a.to_vec())).unwrap();
        fibers
    }

    #[test]
    fn test_fibers_along_last_axis() {
        assert_eq!(
            collect_fibers(&[2, 3], 1),
            vec![vec![0, 1, 2], vec![3, 4, 5]]
        );
    }

    #[test]
    fn test_fibers_along_first_axis() {
        assert_eq!(
            collect_fibers(&[2, 3], 0),
            vec![vec![0, 3], vec![1, 4], vec![2, 5]]
        );
    }

    #[test]
    fn test_fibers_middle_axis_cover_once() {
        let fibers = collect_fibers(&[2, 3, 4], 1);
        assert_eq!(fibers.len(), 8);
        assert_eq!(fibers[0], vec![0, 4, 8]);
        assert_eq!(fibers[4], vec![12, 16, 20]);
        let mut all: Vec<usize> = fibers.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_checked_before_axis() {
        let t = Tensor::<f64>::new([0, 3]);
        assert_eq!(
            axis_func(&t, 5, |_, _| {}),
            Err(TensorError::EmptyTensor { op: "axis_func" })
        );
    }

    #[test]
    fn test_axis_out_of_range() {
        let t = Tensor::<f64>::new([2, 3]);
        assert_eq!(
            axis_func(&t, 2, |_, _| {}),
            Err(TensorError::AxisOutOfRange { axis: 2, order: 2 })
        );
    }

    #[test]
    fn test_axis_func_mut_writes_back() {
        let mut t = Tensor::from_nested2(vec![vec![1, 2], vec![3, 4]]).unwrap();
        axis_func_mut(&mut t, 0, |values, _| values.reverse()).unwrap();
        assert_eq!(t.as_slice(), &[3, 4, 1, 2]);
    }
}
