// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Axis-wise and elementwise tensor functions.
//!
//! Every transform comes in two flavours: a copying form returning a new
//! tensor and an in-place `*_by` form. Arguments are validated before the
//! buffer is touched.

mod axis;
mod elementwise;
mod normalize;
mod permute;

pub use axis::{axis_func, axis_func_mut};
pub use elementwise::{abs, abs_by, power_elem, power_elem_by, sqrt, sqrt_by, square, square_by};
pub use normalize::{
    make_normalize_function, make_normalize_functions, normalize, normalize_axis,
    normalize_axis_by, normalize_by,
};
pub use permute::{
    compute_gram_matrix, inverse_permutation, permute, permute_by, transpose, transpose_by,
};
