// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-cli
//!
//! Command-line interface for the tensor workspace.
//!
//! ## Usage
//! ```bash
//! # Print a model's input and output signatures
//! tensor-cli inspect --model ./models/housing
//!
//! # Run inference on a CSV feature matrix
//! tensor-cli predict --model ./models/housing --input features.csv --header
//!
//! # Normalize CSV columns
//! tensor-cli normalize --input data.csv --axis 0 --method z-score
//!
//! # Fit least squares on columns 0..3 predicting column 4
//! tensor-cli fit --data data.csv --targets 4 --config train.toml
//! ```

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tensor_core::NormalizationType;

#[derive(Parser)]
#[command(
    name = "tensor-cli",
    about = "Tensors, normalization, least-squares training and model inference",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a model: print its signature, layers and devices.
    Inspect {
        /// Path to the model directory.
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Run inference on a CSV matrix, one sample per row.
    Predict {
        /// Path to the model directory.
        #[arg(short, long)]
        model: PathBuf,

        /// CSV file with one feature vector per row.
        #[arg(short, long)]
        input: PathBuf,

        /// Skip the first CSV line.
        #[arg(long)]
        header: bool,
    },

    /// Normalize a CSV matrix and print the result as CSV.
    Normalize {
        /// CSV file to normalize.
        #[arg(short, long)]
        input: PathBuf,

        /// Axis to normalize along (0 = columns, 1 = rows); whole matrix if omitted.
        #[arg(short, long)]
        axis: Option<usize>,

        /// Normalization method: min-max, z-score.
        #[arg(long, default_value = "min-max")]
        method: NormalizationType,

        /// Skip the first CSV line.
        #[arg(long)]
        header: bool,
    },

    /// Fit ordinary least squares by gradient descent.
    Fit {
        /// CSV data file; every column not listed in --targets is a feature.
        #[arg(short, long)]
        data: PathBuf,

        /// Comma-separated target column indices (e.g., "3" or "3,4").
        #[arg(short, long, value_delimiter = ',', required = true)]
        targets: Vec<usize>,

        /// Path to a TOML training configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip the first CSV line.
        #[arg(long)]
        header: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { model } => commands::inspect::execute(model),
        Commands::Predict {
            model,
            input,
            header,
        } => commands::predict::execute(model, input, header),
        Commands::Normalize {
            input,
            axis,
            method,
            header,
        } => commands::normalize::execute(input, axis, method, header),
        Commands::Fit {
            data,
            targets,
            config,
            header,
        } => commands::fit::execute(data, targets, config, header),
    }
}
