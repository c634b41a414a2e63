// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

use crate::Shape;

/// Errors that can occur during tensor operations.
///
/// Every fallible operation validates its arguments before touching the
/// buffer, so a returned error leaves the tensor in its pre-call state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    /// The number of provided values does not match the shape's capacity.
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Two tensors have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// A reshape or view targets a shape with a different capacity.
    #[error("capacity mismatch in {op}: tensor holds {expected} elements, target shape holds {actual}")]
    CapacityMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Checked access with an index outside `[0, dim)`.
    #[error("index {index} out of bounds for axis {axis} with dimension {dim}")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        dim: usize,
    },

    /// Checked access or a shape-constrained wrapper with the wrong number of axes.
    #[error("order mismatch: expected {expected} axes, got {actual}")]
    OrderMismatch { expected: usize, actual: usize },

    /// An axis argument is not smaller than the tensor order.
    #[error("axis {axis} out of range for tensor of order {order}")]
    AxisOutOfRange { axis: usize, order: usize },

    /// The operation requires at least one element.
    #[error("{op} requires a non-empty tensor")]
    EmptyTensor { op: &'static str },

    /// Invalid numeric range or slice bounds.
    #[error("invalid range in {op}: {detail}")]
    InvalidRange { op: &'static str, detail: String },

    /// Ragged nested-literal construction.
    #[error("inconsistent nesting at depth {depth}: sibling lists differ in length")]
    InconsistentNesting { depth: usize },

    /// A permutation whose length differs from the tensor order.
    #[error("permutation has {actual} axes, tensor order is {expected}")]
    ArityMismatch { expected: usize, actual: usize },

    /// A permutation with an out-of-range or repeated axis.
    #[error("invalid permutation {axes:?}")]
    InvalidPermutation { axes: Vec<usize> },
}
