// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Training configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! epochs = 2000
//! loss = "mse"
//! learning_rate = 0.05
//! variable_lr = true
//! tolerance = 1e-8
//! normalization = "z-score"
//! patience = 20
//! eval_percent = 20
//! test_percent = 10
//! seed = 42
//! ```

use std::path::Path;

use tensor_core::{FloatElement, Matrix, NormalizationType};

use crate::{data_table, DataTable, LossFunc, OlsGdTrainer, Trainer, TrainerError};

/// Configuration for an [`OlsGdTrainer`] run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrainerConfig {
    /// Maximum number of epochs.
    pub epochs: usize,
    /// Loss used for progress and early stopping.
    #[serde(default)]
    pub loss: LossFunc,
    /// Initial (or fixed) learning rate.
    pub learning_rate: f64,
    /// Whether to adapt the learning rate with Barzilai–Borwein steps.
    #[serde(default)]
    pub variable_lr: bool,
    /// Largest weight update that counts as converged.
    pub tolerance: f64,
    /// Feature normalization fitted on the training rows, if any.
    pub normalization: Option<NormalizationType>,
    /// Early stopping patience in epochs; requires `eval_percent > 0`.
    pub patience: Option<usize>,
    /// Percentage of rows held out for evaluation.
    #[serde(default)]
    pub eval_percent: usize,
    /// Percentage of rows held out for testing.
    #[serde(default)]
    pub test_percent: usize,
    /// Shuffles rows with this seed before splitting.
    pub seed: Option<u64>,
}

impl TrainerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TrainerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrainerError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, TrainerError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| TrainerError::Config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, TrainerError> {
        toml::to_string_pretty(self)
            .map_err(|e| TrainerError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks value ranges and option combinations.
    pub fn validate(&self) -> Result<(), TrainerError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(TrainerError::Config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(TrainerError::Config(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if self.eval_percent + self.test_percent >= 100 {
            return Err(TrainerError::Config(format!(
                "eval_percent ({}) + test_percent ({}) must stay below 100",
                self.eval_percent, self.test_percent
            )));
        }
        if self.patience == Some(0) {
            return Err(TrainerError::Config(
                "patience must be at least 1 epoch".into(),
            ));
        }
        if self.patience.is_some() && self.eval_percent == 0 {
            return Err(TrainerError::Config(
                "patience requires eval_percent > 0".into(),
            ));
        }
        Ok(())
    }

    /// Builds the data table for `data` (optionally shuffled) and a trainer
    /// with this configuration's hyper-parameters.
    pub fn build_trainer<T: FloatElement>(
        &self,
        data: &Matrix<T>,
        y_cols: &[usize],
    ) -> Result<OlsGdTrainer<T>, TrainerError> {
        self.validate()?;
        let table = match self.seed {
            Some(seed) => {
                let shuffled = data_table::shuffle_rows(data, seed)?;
                DataTable::with_split(&shuffled, y_cols, self.eval_percent, self.test_percent)?
            }
            None => DataTable::with_split(data, y_cols, self.eval_percent, self.test_percent)?,
        };

        let mut trainer = OlsGdTrainer::new(table);
        trainer.set_learning_rate(T::from_f64(self.learning_rate))?;
        trainer.set_tolerance(T::from_f64(self.tolerance))?;
        if self.variable_lr {
            trainer.enable_variable_lr();
        }
        Ok(trainer)
    }

    /// Fits `trainer` with the configured normalization, loss and stopping rule.
    pub fn run<T: FloatElement>(&self, trainer: &mut impl Trainer<T>) -> Result<(), TrainerError> {
        match (self.normalization, self.patience) {
            (Some(kind), Some(patience)) => {
                trainer.fit_normalized(self.epochs, self.loss, patience, kind)
            }
            (Some(kind), None) => {
                trainer.enable_feature_norm(kind)?;
                trainer.fit(self.epochs, self.loss)
            }
            (None, Some(patience)) => trainer.fit_with_patience(self.epochs, self.loss, patience),
            (None, None) => trainer.fit(self.epochs, self.loss),
        }
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 1000,
            loss: LossFunc::Mse,
            learning_rate: 0.01,
            variable_lr: false,
            tolerance: 1e-6,
            normalization: None,
            patience: None,
            eval_percent: 0,
            test_percent: 0,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = TrainerConfig::default();
        assert_eq!(c.epochs, 1000);
        assert_eq!(c.loss, LossFunc::Mse);
        assert!(c.normalization.is_none());
        c.validate().unwrap();
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
epochs = 300
loss = "mae"
learning_rate = 0.1
variable_lr = true
tolerance = 1e-9
normalization = "z-score"
patience = 10
eval_percent = 20
seed = 7
"#;
        let c = TrainerConfig::from_toml(toml).unwrap();
        assert_eq!(c.epochs, 300);
        assert_eq!(c.loss, LossFunc::Mae);
        assert!(c.variable_lr);
        assert_eq!(c.normalization, Some(NormalizationType::ZScore));
        assert_eq!(c.patience, Some(10));
        assert_eq!(c.eval_percent, 20);
        assert_eq!(c.test_percent, 0);
        assert_eq!(c.seed, Some(7));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = TrainerConfig {
            normalization: Some(NormalizationType::MinMax),
            seed: Some(3),
            ..Default::default()
        };
        let back = TrainerConfig::from_toml(&c.to_toml().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_invalid_values() {
        let bad_lr = "epochs = 1\nlearning_rate = -1.0\ntolerance = 0.0\n";
        assert!(matches!(
            TrainerConfig::from_toml(bad_lr),
            Err(TrainerError::Config(_))
        ));

        let c = TrainerConfig {
            patience: Some(5),
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = TrainerConfig {
            eval_percent: 60,
            test_percent: 40,
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = TrainerConfig {
            patience: Some(0),
            eval_percent: 20,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_unknown_loss_rejected() {
        let toml = "epochs = 1\nloss = \"hinge\"\nlearning_rate = 0.1\ntolerance = 0.0\n";
        assert!(TrainerConfig::from_toml(toml).is_err());
    }

    #[test]
    fn test_build_and_run() {
        let values = (1..=20)
            .flat_map(|i| {
                let x = i as f64;
                [x, 2.0 * x + 1.0]
            })
            .collect();
        let data = Matrix::from_values(20, 2, values).unwrap();
        let c = TrainerConfig {
            epochs: 5000,
            learning_rate: 0.5,
            tolerance: 1e-10,
            normalization: Some(NormalizationType::MinMax),
            seed: Some(11),
            ..Default::default()
        };
        let mut trainer = c.build_trainer(&data, &[1]).unwrap();
        c.run(&mut trainer).unwrap();

        let x = Matrix::from_values(1, 1, vec![30.0]).unwrap();
        let y = trainer.predict(&x).unwrap();
        assert!((y.as_slice()[0] - 61.0).abs() < 1e-3);
    }
}
