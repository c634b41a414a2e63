// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # trainer
//!
//! Supervised training on [`tensor_core::Matrix`] data.
//!
//! - [`DataTable`]: splits a data matrix into features and targets and
//!   into training, evaluation and test rows.
//! - [`DataTableNorm`]: per-column feature normalizers fitted on the
//!   training rows.
//! - [`Loss`] / [`LossFunc`]: MSE, MAE, MSLE and log-cosh errors.
//! - [`Trainer`]: the fitting lifecycle shared by every learner.
//! - [`OlsGdTrainer`]: least squares by batch gradient descent.
//! - [`TrainerConfig`]: TOML-driven training runs.
//!
//! # Example
//! ```
//! use tensor_core::Matrix;
//! use trainer::{DataTable, LossFunc, OlsGdTrainer, Trainer};
//! use tensor_core::NormalizationType;
//!
//! let data = Matrix::from_rows((1..=10).map(|i| vec![i as f64, 3.0 * i as f64]).collect()).unwrap();
//! let mut ols = OlsGdTrainer::new(DataTable::new(&data, &[1]).unwrap());
//! ols.set_learning_rate(0.5).unwrap();
//! ols.enable_feature_norm(NormalizationType::MinMax).unwrap();
//! ols.fit(3000, LossFunc::Mse).unwrap();
//! assert!(ols.is_trained());
//! ```

mod config;
pub mod data_table;
mod data_table_norm;
mod error;
mod loss;
mod ols;
mod trainer;

pub use config::TrainerConfig;
pub use data_table::DataTable;
pub use data_table_norm::DataTableNorm;
pub use error::TrainerError;
pub use loss::{Loss, LossFunc};
pub use ols::OlsGdTrainer;
pub use trainer::{Trainer, TrainerState};
