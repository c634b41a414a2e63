// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-cli predict` command: run a model over CSV rows and print CSV.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use predictor::Predictor;
use tensor_core::Matrix;

pub fn execute(model: PathBuf, input: PathBuf, header: bool) -> anyhow::Result<()> {
    let predictor = Predictor::<f64>::load(&model)
        .with_context(|| format!("failed to load model from '{}'", model.display()))?;
    let features = super::read_csv_matrix(&input, header)?;
    tracing::info!(
        "predicting {} rows x {} features",
        features.row_size(),
        features.col_size()
    );

    let start = Instant::now();
    let output = predictor.predict(features.as_tensor())?;
    tracing::info!("inference took {:.2} ms", start.elapsed().as_secs_f64() * 1000.0);

    let output = Matrix::try_from(output)?;
    print!("{}", super::to_csv(&output));
    Ok(())
}
