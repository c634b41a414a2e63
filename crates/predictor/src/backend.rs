// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model execution backends.
//!
//! [`ServingBackend`] is the seam between the shape-checking [`crate::Predictor`]
//! and whatever actually evaluates the model. [`DenseBackend`] is the
//! built-in runtime: a stack of fully connected layers whose weights are read
//! from a memory-mapped SafeTensors file.

use std::path::Path;

use safetensors::{Dtype, SafeTensors};
use tensor_core::{ops, FloatElement, Matrix, Tensor, TensorError, Vector};

use crate::manifest::{Activation, LayerSpec, ModelManifest};
use crate::PredictorError;

/// Default SafeTensors filename inside a model directory.
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// A compute device reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub device_type: String,
    /// Memory available to the device in bytes, when known.
    pub memory_limit: Option<usize>,
}

/// Evaluates a loaded model.
pub trait ServingBackend<T: FloatElement>: Send + Sync {
    /// Feeds `inputs` (name, tensor) to the model and fetches `outputs` by name.
    ///
    /// Inputs are already shape-checked against the model signature.
    fn run(
        &self,
        inputs: &[(String, Tensor<T>)],
        outputs: &[String],
    ) -> Result<Vec<Tensor<T>>, PredictorError>;

    /// Devices the backend executes on.
    fn devices(&self) -> Vec<DeviceInfo>;

    /// Checks the loaded model against the manifest's signatures.
    ///
    /// Backends that cannot introspect their model accept any manifest.
    fn check_signature(&self, _manifest: &ModelManifest) -> Result<(), PredictorError> {
        Ok(())
    }
}

/// A fully connected layer with its weights resident in memory.
#[derive(Debug, Clone)]
pub struct DenseLayer<T> {
    pub name: String,
    /// `[in, out]`.
    pub weight: Matrix<T>,
    /// `[out]`.
    pub bias: Option<Vector<T>>,
    pub activation: Activation,
}

impl<T: FloatElement> DenseLayer<T> {
    /// Computes `act(x · W + b)` for a batch `x` of shape `[batch, in]`.
    fn forward(&self, x: &Matrix<T>) -> Result<Matrix<T>, TensorError> {
        let mut y = ops::dot(x, &self.weight)?;
        if let Some(bias) = &self.bias {
            let cols = y.col_size();
            for (k, v) in y.iter_mut().enumerate() {
                *v = (*v).add(bias[k % cols]);
            }
        }
        let activation = self.activation;
        y.map_in_place(|v| activate(activation, v));
        Ok(y)
    }

    fn in_features(&self) -> usize {
        self.weight.row_size()
    }

    fn out_features(&self) -> usize {
        self.weight.col_size()
    }
}

fn activate<T: FloatElement>(activation: Activation, v: T) -> T {
    match activation {
        Activation::Linear => v,
        Activation::Relu => {
            if v > T::zero() {
                v
            } else {
                T::zero()
            }
        }
        Activation::Sigmoid => T::one().div(T::one().add((-v).exp())),
        Activation::Tanh => v.tanh(),
    }
}

/// Built-in runtime evaluating a stack of [`DenseLayer`]s.
///
/// The first input of the signature is fed through every layer in order and
/// the result is returned for the first output name.
#[derive(Debug, Clone)]
pub struct DenseBackend<T> {
    input_name: String,
    output_name: String,
    layers: Vec<DenseLayer<T>>,
}

impl<T: FloatElement> DenseBackend<T> {
    /// Creates a backend from in-memory layers.
    ///
    /// # Errors
    /// [`PredictorError::InvalidMetadata`] if the stack is empty or a layer's
    /// input width differs from the previous layer's output width, or if a
    /// bias length differs from its layer's output width.
    pub fn new(
        input_name: impl Into<String>,
        output_name: impl Into<String>,
        layers: Vec<DenseLayer<T>>,
    ) -> Result<Self, PredictorError> {
        if layers.is_empty() {
            return Err(PredictorError::InvalidMetadata(
                "dense model has no layers".into(),
            ));
        }
        for pair in layers.windows(2) {
            if pair[0].out_features() != pair[1].in_features() {
                return Err(PredictorError::InvalidMetadata(format!(
                    "layer '{}' outputs {} features but layer '{}' expects {}",
                    pair[0].name,
                    pair[0].out_features(),
                    pair[1].name,
                    pair[1].in_features(),
                )));
            }
        }
        for layer in &layers {
            if let Some(bias) = &layer.bias {
                if bias.len() != layer.out_features() {
                    return Err(PredictorError::InvalidMetadata(format!(
                        "layer '{}' has {} outputs but a bias of length {}",
                        layer.name,
                        layer.out_features(),
                        bias.len(),
                    )));
                }
            }
        }
        Ok(Self {
            input_name: input_name.into(),
            output_name: output_name.into(),
            layers,
        })
    }

    /// Reads every layer of `manifest` from the SafeTensors file at `path`.
    pub fn from_safetensors(manifest: &ModelManifest, path: &Path) -> Result<Self, PredictorError> {
        let file = std::fs::File::open(path).map_err(|e| {
            PredictorError::SafeTensors(format!("cannot open '{}': {e}", path.display()))
        })?;
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| PredictorError::SafeTensors(format!("mmap failed: {e}")))?;
        tracing::info!(
            "dense backend: mmap'd {} ({:.2} MB)",
            path.display(),
            mmap.len() as f64 / (1024.0 * 1024.0),
        );

        let st = SafeTensors::deserialize(&mmap)
            .map_err(|e| PredictorError::SafeTensors(format!("SafeTensors parse error: {e}")))?;

        let layers = manifest
            .layers
            .iter()
            .map(|spec| load_layer(&st, spec))
            .collect::<Result<Vec<_>, _>>()?;

        let input = manifest
            .inputs
            .first()
            .ok_or_else(|| PredictorError::InvalidMetadata("no input metadata".into()))?;
        let output = manifest
            .outputs
            .first()
            .ok_or_else(|| PredictorError::InvalidMetadata("no output metadata".into()))?;
        let backend = Self::new(input.name.clone(), output.name.clone(), layers)?;
        backend.check_signature(manifest)?;
        Ok(backend)
    }

    pub fn layers(&self) -> &[DenseLayer<T>] {
        &self.layers
    }

    /// Total bytes held by weights and biases.
    pub fn weight_bytes(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.weight.memory_size() + l.bias.as_ref().map_or(0, |b| b.memory_size()))
            .sum()
    }
}

fn load_layer<T: FloatElement>(
    st: &SafeTensors<'_>,
    spec: &LayerSpec,
) -> Result<DenseLayer<T>, PredictorError> {
    let (dims, values) = read_tensor::<T>(st, &spec.weight)?;
    if dims.len() != 2 {
        return Err(PredictorError::InvalidMetadata(format!(
            "weight '{}' of layer '{}' must be 2-D, found shape {:?}",
            spec.weight, spec.name, dims
        )));
    }
    let weight = Matrix::from_values(dims[0], dims[1], values)?;

    let bias = match &spec.bias {
        Some(name) => {
            let (_, values) = read_tensor::<T>(st, name)?;
            Some(Vector::from_values(values))
        }
        None => None,
    };

    tracing::debug!(
        "dense backend: layer '{}' [{} -> {}] {:?}",
        spec.name,
        weight.row_size(),
        weight.col_size(),
        spec.activation,
    );

    Ok(DenseLayer {
        name: spec.name.clone(),
        weight,
        bias,
        activation: spec.activation,
    })
}

/// Decodes a little-endian F32/F64 tensor into `T` values.
fn read_tensor<T: FloatElement>(
    st: &SafeTensors<'_>,
    name: &str,
) -> Result<(Vec<usize>, Vec<T>), PredictorError> {
    let view = st.tensor(name).map_err(|_| PredictorError::WeightNotFound {
        name: name.to_string(),
    })?;
    let bytes = view.data();
    let values: Vec<T> = match view.dtype() {
        Dtype::F32 => bytes
            .chunks_exact(4)
            .map(|c| T::from_f64(f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64))
            .collect(),
        Dtype::F64 => bytes
            .chunks_exact(8)
            .map(|c| {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(c);
                T::from_f64(f64::from_le_bytes(raw))
            })
            .collect(),
        other => {
            return Err(PredictorError::UnsupportedDType {
                name: name.to_string(),
                dtype: format!("{other:?}"),
            })
        }
    };
    Ok((view.shape().to_vec(), values))
}

impl<T: FloatElement> ServingBackend<T> for DenseBackend<T> {
    fn run(
        &self,
        inputs: &[(String, Tensor<T>)],
        outputs: &[String],
    ) -> Result<Vec<Tensor<T>>, PredictorError> {
        let (_, input) = inputs
            .iter()
            .find(|(name, _)| *name == self.input_name)
            .ok_or_else(|| PredictorError::UnknownInput {
                name: self.input_name.clone(),
            })?;

        // A lone feature vector is treated as a batch of one.
        let batch = match input.order() {
            1 => Matrix::from_values(1, input.dim(), input.as_slice().to_vec())?,
            _ => Matrix::try_from(input.clone())?,
        };

        let mut x = batch;
        for layer in &self.layers {
            x = layer
                .forward(&x)
                .map_err(|source| PredictorError::Execution {
                    layer: layer.name.clone(),
                    source,
                })?;
        }

        let result = x.into_tensor();
        outputs
            .iter()
            .map(|name| {
                if *name == self.output_name {
                    Ok(result.clone())
                } else {
                    Err(PredictorError::InvalidMetadata(format!(
                        "dense backend cannot fetch output '{name}'"
                    )))
                }
            })
            .collect()
    }

    fn devices(&self) -> Vec<DeviceInfo> {
        vec![DeviceInfo {
            name: "/cpu:0".into(),
            device_type: "CPU".into(),
            memory_limit: None,
        }]
    }

    /// The first input must be `[in]` or `[batch, in]` with `in` equal to the
    /// first layer's width, and the first output `[batch, out]` with `out`
    /// equal to the last layer's width.
    fn check_signature(&self, manifest: &ModelManifest) -> Result<(), PredictorError> {
        let (Some(first), Some(last)) = (self.layers.first(), self.layers.last()) else {
            return Err(PredictorError::InvalidMetadata(
                "dense model has no layers".into(),
            ));
        };

        let input = manifest
            .input(&self.input_name)
            .ok_or_else(|| PredictorError::SignatureMismatch {
                name: self.input_name.clone(),
                detail: "not declared in the input metadata".into(),
            })?;
        let rank = input.shape.rank();
        if !(rank == 1 || rank == 2) || input.shape.dims()[rank - 1] != first.in_features() {
            return Err(PredictorError::SignatureMismatch {
                name: input.name.clone(),
                detail: format!(
                    "shape {} does not feed layer '{}' with {} input features",
                    input.shape,
                    first.name,
                    first.in_features(),
                ),
            });
        }

        let output = manifest
            .output(&self.output_name)
            .ok_or_else(|| PredictorError::SignatureMismatch {
                name: self.output_name.clone(),
                detail: "not declared in the output metadata".into(),
            })?;
        if output.shape.rank() != 2 || output.shape.dims()[1] != last.out_features() {
            return Err(PredictorError::SignatureMismatch {
                name: output.name.clone(),
                detail: format!(
                    "shape {} does not match layer '{}' with {} output features",
                    output.shape,
                    last.name,
                    last.out_features(),
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn layer(
        name: &str,
        rows: usize,
        cols: usize,
        w: Vec<f64>,
        b: Option<Vec<f64>>,
        act: Activation,
    ) -> DenseLayer<f64> {
        DenseLayer {
            name: name.into(),
            weight: Matrix::from_values(rows, cols, w).unwrap(),
            bias: b.map(Vector::from_values),
            activation: act,
        }
    }

    #[test]
    fn test_forward_affine() {
        // x = [[1, 2]], W = [[1, 0, 2], [0, 1, 1]], b = [1, 1, 1]
        let l = layer(
            "fc",
            2,
            3,
            vec![1.0, 0.0, 2.0, 0.0, 1.0, 1.0],
            Some(vec![1.0, 1.0, 1.0]),
            Activation::Linear,
        );
        let x = Matrix::from_values(1, 2, vec![1.0, 2.0]).unwrap();
        let y = l.forward(&x).unwrap();
        assert_eq!(y.as_slice(), &[2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_activations() {
        assert_eq!(activate(Activation::Relu, -2.0f64), 0.0);
        assert_eq!(activate(Activation::Relu, 3.0f64), 3.0);
        assert!(approx_eq(activate(Activation::Sigmoid, 0.0f64), 0.5));
        assert!(approx_eq(activate(Activation::Tanh, 1.0f64), 1.0f64.tanh()));
    }

    #[test]
    fn test_mismatched_stack_rejected() {
        let a = layer("a", 2, 3, vec![0.0; 6], None, Activation::Linear);
        let b = layer("b", 2, 1, vec![0.0; 2], None, Activation::Linear);
        assert!(matches!(
            DenseBackend::new("x", "y", vec![a, b]),
            Err(PredictorError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_bad_bias_rejected() {
        let a = layer("a", 2, 3, vec![0.0; 6], Some(vec![0.0; 2]), Activation::Linear);
        assert!(DenseBackend::new("x", "y", vec![a]).is_err());
    }

    #[test]
    fn test_signature_checked_against_layers() {
        let backend = DenseBackend::new(
            "x",
            "y",
            vec![layer("fc", 2, 2, vec![1.0, 0.0, 0.0, 1.0], None, Activation::Linear)],
        )
        .unwrap();
        let manifest = |input: Vec<usize>, output: Vec<usize>| ModelManifest {
            name: "identity".into(),
            inputs: vec![crate::TensorInfo::new("x", input)],
            outputs: vec![crate::TensorInfo::new("y", output)],
            layers: vec![],
        };

        backend.check_signature(&manifest(vec![0, 2], vec![0, 2])).unwrap();
        backend.check_signature(&manifest(vec![2], vec![1, 2])).unwrap();

        for (input, output) in [
            (vec![0, 2], vec![0, 5]),
            (vec![0, 3], vec![0, 2]),
            (vec![0, 2], vec![2]),
            (vec![1, 1, 2], vec![0, 2]),
        ] {
            assert!(matches!(
                backend.check_signature(&manifest(input, output)),
                Err(PredictorError::SignatureMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_run_single_vector() {
        let l = layer("fc", 2, 1, vec![3.0, -1.0], None, Activation::Linear);
        let backend = DenseBackend::new("x", "y", vec![l]).unwrap();
        let input = Tensor::from_values([2], vec![2.0, 1.0]).unwrap();
        let out = backend
            .run(&[("x".to_string(), input)], &["y".to_string()])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shape().dims(), &[1, 1]);
        assert_eq!(out[0].as_slice(), &[5.0]);
        assert_eq!(backend.devices()[0].device_type, "CPU");
    }

    #[test]
    fn test_run_unknown_output() {
        let l = layer("fc", 1, 1, vec![1.0], None, Activation::Linear);
        let backend = DenseBackend::new("x", "y", vec![l]).unwrap();
        let input = Tensor::from_values([1, 1], vec![1.0]).unwrap();
        assert!(backend
            .run(&[("x".to_string(), input)], &["z".to_string()])
            .is_err());
    }
}
