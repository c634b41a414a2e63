// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model loading and inference.

use tensor_core::{Shape, TensorError};

/// Errors that can occur when loading a model or running a prediction.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// The model manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    ManifestRead(#[from] std::io::Error),

    /// The manifest JSON is malformed.
    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// The manifest is well-formed but describes an unusable model.
    #[error("invalid model metadata: {0}")]
    InvalidMetadata(String),

    /// The SafeTensors file could not be opened or parsed.
    #[error("failed to load SafeTensors: {0}")]
    SafeTensors(String),

    /// A weight tensor referenced in the manifest is missing from the weight file.
    #[error("weight tensor not found: {name}")]
    WeightNotFound { name: String },

    /// A weight tensor is stored with a dtype the predictor cannot read.
    #[error("weight tensor '{name}' has unsupported dtype {dtype}")]
    UnsupportedDType { name: String, dtype: String },

    /// The input tensor does not match the model's input signature.
    #[error("input '{input}' has shape {actual}, model expects {expected}")]
    ShapeMismatch {
        input: String,
        expected: Shape,
        actual: Shape,
    },

    /// The model's layers disagree with its declared input or output signature.
    #[error("model does not fit signature '{name}': {detail}")]
    SignatureMismatch { name: String, detail: String },

    /// The backend produced an output that contradicts the output signature.
    #[error("output '{output}' has shape {actual}, signature declares {expected}")]
    OutputMismatch {
        output: String,
        expected: Shape,
        actual: Shape,
    },

    /// A named input is not part of the model's signature.
    #[error("unknown model input '{name}'")]
    UnknownInput { name: String },

    /// A tensor operation failed while running a layer.
    #[error("execution error in layer '{layer}': {source}")]
    Execution {
        layer: String,
        #[source]
        source: TensorError,
    },

    /// A tensor operation failed outside of layer execution.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
