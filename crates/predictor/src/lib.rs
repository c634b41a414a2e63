// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # predictor
//!
//! Loads a pre-trained dense model and runs shape-checked inference on
//! [`tensor_core::Tensor`] values.
//!
//! - [`ModelManifest`]: the JSON model descriptor with input and output
//!   signatures and the dense layer list.
//! - [`ServingBackend`]: the execution seam; [`DenseBackend`] is the
//!   built-in CPU runtime.
//! - [`Predictor`]: validates inputs against the signature before running.
//!
//! # Supported Model Format
//! A model directory holds:
//! - `model.json`: manifest (see [`manifest`]).
//! - `model.safetensors`: F32 or F64 weights, memory-mapped on load.
//!
//! # Example
//! ```no_run
//! use predictor::Predictor;
//! use std::path::Path;
//!
//! let model = Predictor::<f64>::load(Path::new("./models/housing")).unwrap();
//! for input in model.input_metadata() {
//!     println!("{}: {}", input.name, input.shape);
//! }
//! ```

mod backend;
mod error;
pub mod manifest;
mod predictor;

pub use backend::{DenseBackend, DenseLayer, DeviceInfo, ServingBackend, WEIGHTS_FILE};
pub use error::PredictorError;
pub use manifest::{Activation, LayerSpec, ModelManifest, TensorInfo};
pub use predictor::{Predictor, MANIFEST_FILE};
