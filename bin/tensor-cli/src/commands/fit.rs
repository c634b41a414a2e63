// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-cli fit` command: train least squares on CSV data.

use std::path::PathBuf;
use std::time::Instant;

use trainer::{Trainer, TrainerConfig};

pub fn execute(
    data: PathBuf,
    targets: Vec<usize>,
    config: Option<PathBuf>,
    header: bool,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            tensor-cli · Least-Squares Fit            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let config = match &config {
        Some(path) => TrainerConfig::from_file(path)?,
        None => TrainerConfig::default(),
    };
    let matrix = super::read_csv_matrix(&data, header)?;

    println!("  Config:");
    println!(
        "   Data:          {} ({} x {})",
        data.display(),
        matrix.row_size(),
        matrix.col_size()
    );
    println!("   Targets:       {targets:?}");
    println!("   Epochs:        {}", config.epochs);
    println!("   Loss:          {}", config.loss);
    let lr_mode = if config.variable_lr { " (variable)" } else { "" };
    println!("   Learning rate: {}{lr_mode}", config.learning_rate);
    if let Some(kind) = config.normalization {
        println!("   Normalization: {kind}");
    }
    if let Some(patience) = config.patience {
        println!("   Patience:      {patience} (eval {}%)", config.eval_percent);
    }
    println!();

    let mut ols = config.build_trainer(&matrix, &targets)?;
    let start = Instant::now();
    config.run(&mut ols)?;
    let elapsed = start.elapsed();

    // ── Results ────────────────────────────────────────────────
    println!("  Results:");
    println!("   Time:          {:.2} ms", elapsed.as_secs_f64() * 1000.0);
    println!("   Converged:     {}", ols.is_converged());
    println!("   Min loss:      {:.6}", ols.min_loss());
    if ols.data_table().has_test() {
        println!("   Test loss:     {:.6}", ols.compute_test_loss(config.loss)?);
    }
    println!();

    let weights = ols.weight_bias()?;
    let x_cols = ols.data_table().x_cols().to_vec();
    println!("  Weights (last row is the intercept):");
    for (i, row) in weights.rows().enumerate() {
        let label = x_cols
            .get(i)
            .map_or_else(|| "bias".to_string(), |c| format!("col {c}"));
        let cells: Vec<String> = row.iter().map(|w| format!("{w:>12.6}")).collect();
        println!("   {:<8} {}", label, cells.join(" "));
    }
    println!();
    Ok(())
}
