// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor arithmetic operations.
//!
//! Binary tensor-tensor operations require identical shapes; there is no
//! broadcasting. Scalar operations apply to every element. Each operation
//! has a copying form and an in-place `*_by` form.

mod arith;
mod linalg;

pub use arith::{
    divide_scalar, divide_scalar_by, hadamard_div, hadamard_div_by, hadamard_prod,
    hadamard_prod_by, multiply_scalar, multiply_scalar_by, scalar_divide, scalar_divide_by,
    scalar_subtract, scalar_subtract_by, subtract, subtract_by, subtract_scalar,
    subtract_scalar_by, sum, sum_by, sum_scalar, sum_scalar_by,
};
pub use linalg::{dot, inner};

pub use crate::func::{power_elem, power_elem_by};
