// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape-checked inference over a loaded model.

use std::path::Path;

use tensor_core::{FloatElement, Shape, Tensor};

use crate::backend::{DenseBackend, DeviceInfo, ServingBackend, WEIGHTS_FILE};
use crate::manifest::{ModelManifest, TensorInfo};
use crate::PredictorError;

/// Default manifest filename inside a model directory.
pub const MANIFEST_FILE: &str = "model.json";

/// Runs a pre-trained model on [`Tensor`] inputs.
///
/// The predictor owns the model's signature metadata and validates every
/// input against it before handing the tensors to its [`ServingBackend`].
///
/// # Example
/// ```no_run
/// use predictor::Predictor;
/// use std::path::Path;
/// use tensor_core::Tensor;
///
/// let model = Predictor::<f32>::load(Path::new("./models/regressor")).unwrap();
/// let x = Tensor::from_values([1, 4], vec![0.1, 0.2, 0.3, 0.4]).unwrap();
/// let y = model.predict(&x).unwrap();
/// println!("{y}");
/// ```
pub struct Predictor<T: FloatElement> {
    manifest: ModelManifest,
    backend: Box<dyn ServingBackend<T>>,
}

impl<T: FloatElement> Predictor<T> {
    /// Loads `model.json` and `model.safetensors` from `model_dir`.
    ///
    /// # Errors
    /// Any manifest read, parse or validation failure, and any weight
    /// loading failure.
    pub fn load(model_dir: &Path) -> Result<Self, PredictorError> {
        let manifest = ModelManifest::from_file(&model_dir.join(MANIFEST_FILE))?;
        manifest.validate()?;
        let backend = DenseBackend::<T>::from_safetensors(&manifest, &model_dir.join(WEIGHTS_FILE))?;
        let predictor = Self::with_backend(manifest, backend)?;
        tracing::info!(
            "model '{}' loaded successfully from {}",
            predictor.manifest.name,
            model_dir.display(),
        );
        Ok(predictor)
    }

    /// Wraps an already constructed backend.
    ///
    /// # Errors
    /// Any manifest validation failure, or
    /// [`PredictorError::SignatureMismatch`] if the backend's model does not
    /// fit the declared signatures.
    pub fn with_backend(
        manifest: ModelManifest,
        backend: impl ServingBackend<T> + 'static,
    ) -> Result<Self, PredictorError> {
        manifest.validate()?;
        backend.check_signature(&manifest)?;
        Ok(Self {
            manifest,
            backend: Box::new(backend),
        })
    }

    pub fn manifest(&self) -> &ModelManifest {
        &self.manifest
    }

    /// Input signature: `(name, shape)` pairs in feed order.
    pub fn input_metadata(&self) -> &[TensorInfo] {
        &self.manifest.inputs
    }

    /// Output signature: `(name, shape)` pairs in fetch order.
    pub fn output_metadata(&self) -> &[TensorInfo] {
        &self.manifest.outputs
    }

    /// Shape of the named input, if the model has one.
    pub fn input_metadata_shape(&self, name: &str) -> Option<&Shape> {
        self.manifest.input(name).map(|i| &i.shape)
    }

    /// Shape of the named output, if the model has one.
    pub fn output_metadata_shape(&self, name: &str) -> Option<&Shape> {
        self.manifest.output(name).map(|o| &o.shape)
    }

    pub fn devices(&self) -> Vec<DeviceInfo> {
        self.backend.devices()
    }

    /// Feeds `input` to the model's first input and returns its first output.
    ///
    /// # Errors
    /// [`PredictorError::ShapeMismatch`] if `input` does not fit the first
    /// input signature, [`PredictorError::OutputMismatch`] if the result does
    /// not fit the first output signature, or any backend failure.
    pub fn predict(&self, input: &Tensor<T>) -> Result<Tensor<T>, PredictorError> {
        let signature = &self.manifest.inputs[0];
        check_shape(signature, input.shape())?;

        let feeds = [(signature.name.clone(), input.clone())];
        let fetches = [self.manifest.outputs[0].name.clone()];

        tracing::info!("prediction started");
        let mut outputs = self.backend.run(&feeds, &fetches)?;
        tracing::info!("prediction finished");

        let output = outputs.pop().ok_or_else(|| {
            PredictorError::InvalidMetadata("backend returned no output".into())
        })?;
        check_output(&self.manifest.outputs[0], &output)?;
        Ok(output)
    }

    /// Feeds several named inputs at once and returns every fetched output.
    ///
    /// # Errors
    /// [`PredictorError::UnknownInput`] for a name not in the input
    /// signature, [`PredictorError::ShapeMismatch`] for a tensor that does
    /// not fit its signature, or any backend failure.
    pub fn predict_batch(
        &self,
        inputs: &[(String, Tensor<T>)],
    ) -> Result<Vec<Tensor<T>>, PredictorError> {
        for (name, tensor) in inputs {
            let signature = self
                .manifest
                .input(name)
                .ok_or_else(|| PredictorError::UnknownInput { name: name.clone() })?;
            check_shape(signature, tensor.shape())?;
        }

        let fetches = [self.manifest.outputs[0].name.clone()];

        tracing::info!("batch prediction started ({} inputs)", inputs.len());
        let outputs = self.backend.run(inputs, &fetches)?;
        tracing::info!("batch prediction finished");

        for output in &outputs {
            check_output(&self.manifest.outputs[0], output)?;
        }

        Ok(outputs)
    }
}

fn check_shape(signature: &TensorInfo, actual: &Shape) -> Result<(), PredictorError> {
    if signature.accepts(actual) {
        Ok(())
    } else {
        Err(PredictorError::ShapeMismatch {
            input: signature.name.clone(),
            expected: signature.shape.clone(),
            actual: actual.clone(),
        })
    }
}

fn check_output<T: FloatElement>(
    signature: &TensorInfo,
    output: &Tensor<T>,
) -> Result<(), PredictorError> {
    if signature.accepts(output.shape()) {
        Ok(())
    } else {
        Err(PredictorError::OutputMismatch {
            output: signature.name.clone(),
            expected: signature.shape.clone(),
            actual: output.shape().clone(),
        })
    }
}

impl<T: FloatElement> std::fmt::Debug for Predictor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("model", &self.manifest.name)
            .field("inputs", &self.manifest.inputs.len())
            .field("outputs", &self.manifest.outputs.len())
            .finish()
    }
}
