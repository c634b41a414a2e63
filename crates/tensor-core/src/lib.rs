// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Typed n-dimensional tensors with shape-aware indexing, elementwise
//! arithmetic and axis-wise normalization.
//!
//! This crate provides:
//! - [`Tensor`]: an owned, row-major tensor generic over its [`Element`] type.
//! - [`Shape`]: dimension list with precomputed strides.
//! - [`Matrix`] and [`Vector`]: order-checked wrappers.
//! - [`ops`]: tensor-tensor and tensor-scalar arithmetic, inner and matrix products.
//! - [`func`]: fiber traversal, min-max and z-score normalization, permutation.
//! - [`part`]: row and column sub-matrix extraction.
//!
//! # Design Goals
//! - Validate before mutating: a failed operation leaves its operand unchanged.
//! - No broadcasting; binary operations require identical shapes.
//! - Clean error types via `thiserror`.

mod dtype;
mod error;
pub mod func;
mod matrix;
mod normalizer;
pub mod ops;
pub mod part;
mod shape;
mod tensor;
mod vector;

pub use dtype::{DType, Element, FloatElement};
pub use error::TensorError;
pub use matrix::Matrix;
pub use normalizer::{NormalizationType, Normalizer};
pub use shape::Shape;
pub use tensor::{Tensor, TensorView};
pub use vector::Vector;
