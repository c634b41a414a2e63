// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Ordinary least squares fitted by batch gradient descent.
//!
//! With the feature matrix augmented by a column of ones, `X' = [X | 1]`,
//! each epoch applies
//!
//! ```text
//! W ← W − lr · (2/m) · X'ᵀ (X'W − Y)
//! ```
//!
//! where `m` is the number of training rows. The last row of `W` holds the
//! intercepts. With a variable learning rate the step size follows the
//! Barzilai–Borwein rule `lr = (s·s) / (s·g)` with `s = ΔW` and `g = Δ∇`.

use tensor_core::{ops, FloatElement, Matrix, Tensor};

use crate::{DataTable, Loss, LossFunc, Trainer, TrainerError, TrainerState};

/// Least-squares linear regressor trained by gradient descent.
///
/// # Example
/// ```
/// use tensor_core::Matrix;
/// use trainer::{DataTable, LossFunc, OlsGdTrainer, Trainer};
///
/// let data = Matrix::from_rows(vec![
///     vec![0.0_f64, 1.0],
///     vec![0.5, 2.0],
///     vec![1.0, 3.0],
/// ]).unwrap();
/// let mut trainer = OlsGdTrainer::new(DataTable::new(&data, &[1]).unwrap());
/// trainer.set_learning_rate(0.5).unwrap();
/// trainer.fit(2000, LossFunc::Mse).unwrap();
///
/// let x = Matrix::from_values(1, 1, vec![2.0]).unwrap();
/// let y = trainer.predict(&x).unwrap();
/// assert!((y.as_slice()[0] - 5.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct OlsGdTrainer<T> {
    state: TrainerState<T>,
    weight_bias: Option<Matrix<T>>,
    learning_rate: T,
    tolerance: T,
    variable_lr: bool,
    min_loss: T,
    converged: bool,
    epochs_run: usize,
}

impl<T: FloatElement> OlsGdTrainer<T> {
    pub fn new(data_table: DataTable<T>) -> Self {
        Self {
            state: TrainerState::new(data_table),
            weight_bias: None,
            learning_rate: T::from_f64(0.01),
            tolerance: T::from_f64(1e-6),
            variable_lr: false,
            min_loss: T::from_f64(f64::MAX),
            converged: false,
            epochs_run: 0,
        }
    }

    pub fn learning_rate(&self) -> T {
        self.learning_rate
    }

    /// # Errors
    /// [`TrainerError::Config`] unless `lr` is positive and finite.
    pub fn set_learning_rate(&mut self, lr: T) -> Result<(), TrainerError> {
        if !(lr.is_finite() && lr > T::zero()) {
            return Err(TrainerError::Config(format!(
                "learning rate must be positive, got {lr}"
            )));
        }
        self.learning_rate = lr;
        Ok(())
    }

    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Training stops once no weight moves by more than `tolerance` in an epoch.
    ///
    /// # Errors
    /// [`TrainerError::Config`] if `tolerance` is negative or not finite.
    pub fn set_tolerance(&mut self, tolerance: T) -> Result<(), TrainerError> {
        if !(tolerance.is_finite() && tolerance >= T::zero()) {
            return Err(TrainerError::Config(format!(
                "tolerance must be non-negative, got {tolerance}"
            )));
        }
        self.tolerance = tolerance;
        Ok(())
    }

    pub fn enable_variable_lr(&mut self) {
        self.variable_lr = true;
    }

    pub fn disable_variable_lr(&mut self) {
        self.variable_lr = false;
    }

    pub fn is_variable_lr(&self) -> bool {
        self.variable_lr
    }

    /// Fitted `[features + 1, outputs]` matrix; the last row holds the intercepts.
    ///
    /// # Errors
    /// [`TrainerError::NotTrained`] before fitting.
    pub fn weight_bias(&self) -> Result<&Matrix<T>, TrainerError> {
        match (&self.weight_bias, self.state.is_trained) {
            (Some(w), true) => Ok(w),
            _ => Err(TrainerError::NotTrained),
        }
    }

    /// Best loss reached during the last fit: the evaluation loss with early
    /// stopping, the training loss otherwise.
    pub fn min_loss(&self) -> T {
        self.min_loss
    }

    /// Whether the last fit stopped on the tolerance criterion.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Epochs completed by the last fit.
    pub fn epochs_run(&self) -> usize {
        self.epochs_run
    }

    /// `[x | 1]` after optional feature normalization.
    fn design_matrix(&self, x: &Matrix<T>) -> Result<Matrix<T>, TrainerError> {
        let mut design = self.state.prepare_features(x)?;
        design.increase_dimension(1, T::one())?;
        Ok(design)
    }
}

fn max_abs<T: FloatElement>(t: &Tensor<T>) -> T {
    t.iter()
        .map(|v| v.abs())
        .fold(T::zero(), |m, v| if v > m { v } else { m })
}

impl<T: FloatElement> Trainer<T> for OlsGdTrainer<T> {
    fn state(&self) -> &TrainerState<T> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TrainerState<T> {
        &mut self.state
    }

    fn train(&mut self, epochs: usize, loss: LossFunc) -> Result<(), TrainerError> {
        let table = self.state.data_table();
        let x = self.design_matrix(table.x_train())?;
        let y = table.y_train().clone();
        let xt = x.transpose()?;
        let train_loss = Loss::new(y.as_tensor(), loss)?;

        let eval = match (self.state.early_stop, table.x_eval(), table.y_eval()) {
            (true, Some(xe), Some(ye)) => {
                Some((self.design_matrix(xe)?, Loss::new(ye.as_tensor(), loss)?))
            }
            (true, _, _) => {
                return Err(TrainerError::InvalidData(
                    "early stopping needs an evaluation split".into(),
                ))
            }
            _ => None,
        };

        let rows = x.row_size();
        let factor = T::from_f64(2.0 / rows as f64);
        let mut lr = self.learning_rate;
        let mut w = Matrix::<T>::new(x.col_size(), y.col_size());
        let mut best = w.clone();
        let mut prev: Option<(Tensor<T>, Tensor<T>)> = None;
        let mut stalled = 0usize;

        self.min_loss = T::from_f64(f64::MAX);
        self.converged = false;
        self.epochs_run = 0;
        self.state.is_trained = false;

        tracing::info!(
            "training OLS: {} rows, {} features, {} outputs, {} epochs, loss {}",
            rows,
            x.col_size() - 1,
            y.col_size(),
            epochs,
            loss,
        );

        for epoch in 0..epochs {
            let residual = ops::subtract(x.dot(&w)?.as_tensor(), y.as_tensor())?;
            let residual = Matrix::try_from(residual)?;
            let grad = ops::multiply_scalar(xt.dot(&residual)?.as_tensor(), factor);

            if self.variable_lr {
                if let Some((prev_w, prev_grad)) = &prev {
                    let s = ops::subtract(w.as_tensor(), prev_w)?;
                    let g = ops::subtract(&grad, prev_grad)?;
                    let sg = ops::inner(&s, &g)?;
                    let step = ops::inner(&s, &s)?.div(sg);
                    if sg > T::zero() && step.is_finite() {
                        lr = step;
                    }
                }
                prev = Some((w.as_tensor().clone(), grad.clone()));
            }

            let update = ops::multiply_scalar(&grad, lr);
            w = Matrix::try_from(ops::subtract(w.as_tensor(), &update)?)?;

            let epoch_loss = match &eval {
                Some((xe, eval_loss)) => eval_loss.get_loss(xe.dot(&w)?.as_tensor())?,
                None => train_loss.get_loss(x.dot(&w)?.as_tensor())?,
            };
            tracing::debug!("epoch {epoch}: loss {epoch_loss}");
            self.epochs_run = epoch + 1;

            if epoch_loss < self.min_loss {
                self.min_loss = epoch_loss;
                best = w.clone();
                stalled = 0;
            } else {
                stalled += 1;
            }

            if max_abs(&update) <= self.tolerance {
                self.converged = true;
                tracing::info!("converged after {} epochs", epoch + 1);
                break;
            }
            if eval.is_some() && stalled >= self.state.patience {
                tracing::info!(
                    "early stop at epoch {}: no eval improvement for {} epochs",
                    epoch + 1,
                    stalled
                );
                break;
            }
        }

        self.weight_bias = Some(if eval.is_some() { best } else { w });
        self.state.is_trained = true;
        tracing::info!("training finished, min loss {}", self.min_loss);
        Ok(())
    }

    fn predict(&self, input: &Matrix<T>) -> Result<Matrix<T>, TrainerError> {
        let w = self.weight_bias()?;
        let expected = w.row_size() - 1;
        if input.col_size() != expected {
            return Err(TrainerError::InvalidData(format!(
                "expected {expected} feature columns, found {}",
                input.col_size()
            )));
        }
        let design = self.design_matrix(input)?;
        Ok(design.dot(w)?)
    }
}
