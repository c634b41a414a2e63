// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON model manifest parsing.
//!
//! The manifest (`model.json`) declares the model's input and output
//! signatures and maps each dense layer to weight tensor names in the
//! SafeTensors file.
//!
//! # Format
//! ```json
//! {
//!   "name": "housing-regressor",
//!   "inputs": [{ "name": "features", "shape": [0, 4] }],
//!   "outputs": [{ "name": "price", "shape": [0, 1] }],
//!   "layers": [
//!     { "name": "hidden", "weight": "hidden.weight", "bias": "hidden.bias", "activation": "relu" },
//!     { "name": "head", "weight": "head.weight" }
//!   ]
//! }
//! ```
//!
//! A leading `0` in a signature shape marks a variable batch axis.

use std::collections::HashSet;
use std::path::Path;

use tensor_core::Shape;

use crate::PredictorError;

/// Top-level model manifest, deserialized from `model.json`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelManifest {
    /// Human-readable model name.
    pub name: String,
    /// Input signature, in feed order.
    pub inputs: Vec<TensorInfo>,
    /// Output signature, in fetch order.
    pub outputs: Vec<TensorInfo>,
    /// Dense layers, applied in order.
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
}

/// Name and shape of a model input or output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TensorInfo {
    pub name: String,
    pub shape: Shape,
}

impl TensorInfo {
    pub fn new(name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
        }
    }

    /// `true` when the leading axis accepts any batch size.
    pub fn has_variable_batch(&self) -> bool {
        self.shape.dim(0) == Some(0)
    }

    /// Checks whether a tensor of shape `actual` can be fed to this input.
    ///
    /// With a fixed signature the shapes must be equal. With a variable
    /// batch axis the orders must agree and every axis after the first
    /// must match.
    pub fn accepts(&self, actual: &Shape) -> bool {
        if !self.has_variable_batch() {
            return &self.shape == actual;
        }
        self.shape.rank() == actual.rank() && self.shape.dims()[1..] == actual.dims()[1..]
    }
}

/// A single `y = act(x · W + b)` layer entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    pub name: String,
    /// Weight tensor name, shape `[in, out]`.
    pub weight: String,
    /// Optional bias tensor name, shape `[out]`.
    #[serde(default)]
    pub bias: Option<String>,
    #[serde(default)]
    pub activation: Activation,
}

/// Elementwise activation applied after the affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl ModelManifest {
    /// Loads a manifest from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, PredictorError> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, PredictorError> {
        let manifest: Self = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Serializes the manifest to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, PredictorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates that the manifest is internally consistent.
    ///
    /// Checks:
    /// - At least one input and one output signature.
    /// - No duplicate signature or layer names.
    ///
    /// A model with several inputs is accepted with a warning, since the
    /// built-in dense runtime only consumes the first one.
    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.inputs.is_empty() {
            return Err(PredictorError::InvalidMetadata(
                "the model has no input metadata".into(),
            ));
        }
        if self.outputs.is_empty() {
            return Err(PredictorError::InvalidMetadata(
                "the model has no output metadata".into(),
            ));
        }

        for (kind, entries) in [("input", &self.inputs), ("output", &self.outputs)] {
            let mut seen = HashSet::new();
            for entry in entries {
                if !seen.insert(entry.name.as_str()) {
                    return Err(PredictorError::InvalidMetadata(format!(
                        "duplicate {kind} name '{}'",
                        entry.name
                    )));
                }
            }
        }

        let mut seen_layers = HashSet::new();
        for layer in &self.layers {
            if !seen_layers.insert(layer.name.as_str()) {
                return Err(PredictorError::InvalidMetadata(format!(
                    "duplicate layer name '{}'",
                    layer.name
                )));
            }
        }

        if self.inputs.len() > 1 {
            tracing::warn!(
                "manifest '{}' declares {} inputs; dense layers consume only '{}'",
                self.name,
                self.inputs.len(),
                self.inputs[0].name,
            );
        }

        Ok(())
    }

    /// Looks up an input signature by name.
    pub fn input(&self, name: &str) -> Option<&TensorInfo> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// Looks up an output signature by name.
    pub fn output(&self, name: &str) -> Option<&TensorInfo> {
        self.outputs.iter().find(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_manifest_json() -> &'static str {
        r#"{
            "name": "housing-regressor",
            "inputs": [{ "name": "features", "shape": [0, 4] }],
            "outputs": [{ "name": "price", "shape": [0, 1] }],
            "layers": [
                { "name": "hidden", "weight": "hidden.weight", "bias": "hidden.bias", "activation": "relu" },
                { "name": "head", "weight": "head.weight" }
            ]
        }"#
    }

    #[test]
    fn test_parse_manifest() {
        let m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        assert_eq!(m.name, "housing-regressor");
        assert_eq!(m.inputs[0].shape, Shape::matrix(0, 4));
        assert_eq!(m.layers.len(), 2);
        assert_eq!(m.layers[0].activation, Activation::Relu);
        assert_eq!(m.layers[1].activation, Activation::Linear);
        assert!(m.layers[1].bias.is_none());
        m.validate().unwrap();
    }

    #[test]
    fn test_json_round_trip() {
        let m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        let back = ModelManifest::from_json(&m.to_json().unwrap()).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_missing_outputs_rejected() {
        let mut m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        m.outputs.clear();
        assert!(matches!(
            m.validate(),
            Err(PredictorError::InvalidMetadata(msg)) if msg.contains("output")
        ));
    }

    #[test]
    fn test_duplicate_layer_rejected() {
        let mut m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        m.layers[1].name = "hidden".into();
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ModelManifest::from_json("{ not json"),
            Err(PredictorError::ManifestParse(_))
        ));
    }

    #[test]
    fn test_accepts_variable_batch() {
        let info = TensorInfo::new("x", [0, 3]);
        assert!(info.has_variable_batch());
        assert!(info.accepts(&Shape::matrix(7, 3)));
        assert!(!info.accepts(&Shape::matrix(7, 2)));
        assert!(!info.accepts(&Shape::vector(3)));
    }

    #[test]
    fn test_accepts_fixed_shape() {
        let info = TensorInfo::new("x", [2, 3]);
        assert!(!info.has_variable_batch());
        assert!(info.accepts(&Shape::matrix(2, 3)));
        assert!(!info.accepts(&Shape::matrix(3, 3)));
    }
}
