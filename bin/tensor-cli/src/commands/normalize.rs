// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-cli normalize` command: normalize CSV data and print CSV.

use std::path::PathBuf;

use tensor_core::{func, Matrix, NormalizationType};

pub fn execute(
    input: PathBuf,
    axis: Option<usize>,
    method: NormalizationType,
    header: bool,
) -> anyhow::Result<()> {
    let data = super::read_csv_matrix(&input, header)?;
    let normalized = normalize(&data, axis, method)?;
    print!("{}", super::to_csv(&normalized));
    Ok(())
}

fn normalize(
    data: &Matrix<f64>,
    axis: Option<usize>,
    method: NormalizationType,
) -> anyhow::Result<Matrix<f64>> {
    let out = match axis {
        Some(axis) => {
            tracing::info!("{method} normalization along axis {axis}");
            func::normalize_axis(data.as_tensor(), axis, method)?
        }
        None => {
            tracing::info!("{method} normalization over all elements");
            func::normalize(data.as_tensor(), method)?
        }
    };
    Ok(Matrix::try_from(out)?)
}
