// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for training.

use tensor_core::TensorError;

/// Errors that can occur while preparing data, training or predicting.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    /// `predict` or a loss evaluation was requested before training.
    #[error("the model has not been trained")]
    NotTrained,

    /// The data table or an input matrix cannot be used.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A tensor operation failed.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
