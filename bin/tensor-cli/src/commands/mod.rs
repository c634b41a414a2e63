// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared helpers.

pub mod fit;
pub mod inspect;
pub mod normalize;
pub mod predict;

use std::path::Path;

use anyhow::Context;
use tensor_core::{Element, Matrix};
use tracing_subscriber::EnvFilter;

/// Initialises `tracing-subscriber`; `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a numeric CSV file into a matrix.
pub fn read_csv_matrix(path: &Path, header: bool) -> anyhow::Result<Matrix<f64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    parse_csv(&content, header).with_context(|| format!("invalid CSV in '{}'", path.display()))
}

/// Parses comma-separated numeric rows; blank lines are skipped.
pub fn parse_csv(content: &str, header: bool) -> anyhow::Result<Matrix<f64>> {
    let mut rows = Vec::new();
    for (line_no, line) in content.lines().enumerate().skip(usize::from(header)) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .map(|cell| {
                let cell = cell.trim();
                cell.parse::<f64>()
                    .with_context(|| format!("line {}: '{cell}' is not a number", line_no + 1))
            })
            .collect::<anyhow::Result<Vec<f64>>>()?;
        rows.push(row);
    }
    anyhow::ensure!(!rows.is_empty(), "no data rows");
    Ok(Matrix::from_rows(rows)?)
}

/// Formats a matrix as CSV, one row per line.
pub fn to_csv<T: Element>(matrix: &Matrix<T>) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}
