// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: model directory on disk → loaded predictor → outputs.

use std::path::PathBuf;

use predictor::{Predictor, PredictorError, MANIFEST_FILE, WEIGHTS_FILE};
use safetensors::tensor::TensorView;
use safetensors::Dtype;
use tensor_core::{Shape, Tensor};

// ── Helpers ────────────────────────────────────────────────────

/// Creates a fresh model directory under the system temp dir.
fn model_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("predictor-it-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn f64_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

const MANIFEST: &str = r#"{
    "name": "linear-2x2",
    "inputs": [{ "name": "features", "shape": [0, 3] }],
    "outputs": [{ "name": "target", "shape": [0, 2] }],
    "layers": [
        { "name": "fc", "weight": "fc.weight", "bias": "fc.bias" }
    ]
}"#;

// W is [3, 2], b is [2].
const W: [f64; 6] = [1.0, -1.0, 0.5, 2.0, 0.0, 3.0];
const B: [f64; 2] = [0.25, -0.5];

/// Writes the manifest plus an F64 weight file for `y = x · W + b`.
fn write_linear_model(tag: &str) -> PathBuf {
    let dir = model_dir(tag);
    std::fs::write(dir.join(MANIFEST_FILE), MANIFEST).unwrap();

    let w_bytes = f64_bytes(&W);
    let b_bytes = f64_bytes(&B);
    let tensors = vec![
        ("fc.weight", TensorView::new(Dtype::F64, vec![3, 2], &w_bytes).unwrap()),
        ("fc.bias", TensorView::new(Dtype::F64, vec![2], &b_bytes).unwrap()),
    ];
    let bytes = safetensors::serialize(tensors, &None).unwrap();
    std::fs::write(dir.join(WEIGHTS_FILE), bytes).unwrap();
    dir
}

fn expected(x: &[f64]) -> Vec<f64> {
    (0..2)
        .map(|j| (0..3).map(|k| x[k] * W[k * 2 + j]).sum::<f64>() + B[j])
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[test]
fn test_load_and_predict_matches_affine() {
    let dir = write_linear_model("affine");
    let model = Predictor::<f64>::load(&dir).unwrap();

    assert_eq!(model.manifest().name, "linear-2x2");
    assert_eq!(model.input_metadata_shape("features"), Some(&Shape::matrix(0, 3)));
    assert_eq!(model.output_metadata()[0].name, "target");

    let rows = [[1.0, 2.0, 3.0], [-1.0, 0.0, 4.0]];
    let x = Tensor::from_values([2, 3], rows.concat()).unwrap();
    let y = model.predict(&x).unwrap();

    assert_eq!(y.shape(), &Shape::matrix(2, 2));
    let mut want = expected(&rows[0]);
    want.extend(expected(&rows[1]));
    for (a, b) in y.iter().zip(want.iter()) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_wrong_feature_width_rejected() {
    let dir = write_linear_model("shape");
    let model = Predictor::<f64>::load(&dir).unwrap();

    let x = Tensor::<f64>::new([4, 2]);
    match model.predict(&x) {
        Err(PredictorError::ShapeMismatch {
            input,
            expected,
            actual,
        }) => {
            assert_eq!(input, "features");
            assert_eq!(expected, Shape::matrix(0, 3));
            assert_eq!(actual, Shape::matrix(4, 2));
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_f32_weights_loaded_into_f64_model() {
    let dir = model_dir("f32");
    std::fs::write(dir.join(MANIFEST_FILE), MANIFEST).unwrap();
    let w: Vec<f32> = W.iter().map(|&v| v as f32).collect();
    let b: Vec<f32> = B.iter().map(|&v| v as f32).collect();
    let w_bytes = f32_bytes(&w);
    let b_bytes = f32_bytes(&b);
    let tensors = vec![
        ("fc.weight", TensorView::new(Dtype::F32, vec![3, 2], &w_bytes).unwrap()),
        ("fc.bias", TensorView::new(Dtype::F32, vec![2], &b_bytes).unwrap()),
    ];
    std::fs::write(dir.join(WEIGHTS_FILE), safetensors::serialize(tensors, &None).unwrap()).unwrap();

    let model = Predictor::<f64>::load(&dir).unwrap();
    let x = Tensor::from_values([1, 3], vec![1.0, 1.0, 1.0]).unwrap();
    let y = model.predict(&x).unwrap();
    let want = expected(&[1.0, 1.0, 1.0]);
    assert!((y.as_slice()[0] - want[0]).abs() < 1e-6);
    assert!((y.as_slice()[1] - want[1]).abs() < 1e-6);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_weight_reported() {
    let dir = model_dir("missing");
    std::fs::write(dir.join(MANIFEST_FILE), MANIFEST).unwrap();
    let w_bytes = f64_bytes(&W);
    let tensors = vec![("fc.weight", TensorView::new(Dtype::F64, vec![3, 2], &w_bytes).unwrap())];
    std::fs::write(dir.join(WEIGHTS_FILE), safetensors::serialize(tensors, &None).unwrap()).unwrap();

    assert!(matches!(
        Predictor::<f64>::load(&dir),
        Err(PredictorError::WeightNotFound { name }) if name == "fc.bias"
    ));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_model_dir_fails() {
    let dir = std::env::temp_dir().join("predictor-it-does-not-exist");
    assert!(matches!(
        Predictor::<f32>::load(&dir),
        Err(PredictorError::ManifestRead(_))
    ));
}

#[test]
fn test_predict_batch_by_name() {
    let dir = write_linear_model("batch");
    let model = Predictor::<f64>::load(&dir).unwrap();

    let inputs = vec![(
        "features".to_string(),
        Tensor::from_values([1, 3], vec![0.0, 0.0, 0.0]).unwrap(),
    )];
    let outputs = model.predict_batch(&inputs).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].as_slice(), &B);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_output_signature_must_match_last_layer() {
    let dir = model_dir("out-width");
    let manifest = MANIFEST.replace(r#""shape": [0, 2]"#, r#""shape": [0, 5]"#);
    std::fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
    let w_bytes = f64_bytes(&W);
    let b_bytes = f64_bytes(&B);
    let tensors = vec![
        ("fc.weight", TensorView::new(Dtype::F64, vec![3, 2], &w_bytes).unwrap()),
        ("fc.bias", TensorView::new(Dtype::F64, vec![2], &b_bytes).unwrap()),
    ];
    std::fs::write(dir.join(WEIGHTS_FILE), safetensors::serialize(tensors, &None).unwrap()).unwrap();

    match Predictor::<f64>::load(&dir) {
        Err(PredictorError::SignatureMismatch { name, .. }) => assert_eq!(name, "target"),
        other => panic!("expected SignatureMismatch, got {other:?}"),
    }

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_input_signature_must_match_first_layer() {
    let dir = model_dir("in-width");
    let manifest = MANIFEST.replace(r#""shape": [0, 3]"#, r#""shape": [0, 4]"#);
    std::fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
    let w_bytes = f64_bytes(&W);
    let b_bytes = f64_bytes(&B);
    let tensors = vec![
        ("fc.weight", TensorView::new(Dtype::F64, vec![3, 2], &w_bytes).unwrap()),
        ("fc.bias", TensorView::new(Dtype::F64, vec![2], &b_bytes).unwrap()),
    ];
    std::fs::write(dir.join(WEIGHTS_FILE), safetensors::serialize(tensors, &None).unwrap()).unwrap();

    match Predictor::<f64>::load(&dir) {
        Err(PredictorError::SignatureMismatch { name, .. }) => assert_eq!(name, "features"),
        other => panic!("expected SignatureMismatch, got {other:?}"),
    }

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_prediction_shape_agrees_with_output_metadata() {
    let dir = write_linear_model("meta");
    let model = Predictor::<f64>::load(&dir).unwrap();

    let x = Tensor::<f64>::new([5, 3]);
    let y = model.predict(&x).unwrap();
    assert!(model.output_metadata()[0].accepts(y.shape()));

    std::fs::remove_dir_all(dir).ok();
}
