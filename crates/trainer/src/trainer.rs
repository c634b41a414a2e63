// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`Trainer`] trait and the training state shared by all trainers.

use tensor_core::{FloatElement, Matrix, NormalizationType};

use crate::{DataTable, DataTableNorm, Loss, LossFunc, TrainerError};

/// Lifecycle state owned by every trainer implementation.
#[derive(Debug, Clone)]
pub struct TrainerState<T> {
    data_table: DataTable<T>,
    norm: Option<DataTableNorm<T>>,
    pub(crate) is_trained: bool,
    pub(crate) early_stop: bool,
    pub(crate) patience: usize,
}

impl<T: FloatElement> TrainerState<T> {
    pub fn new(data_table: DataTable<T>) -> Self {
        Self {
            data_table,
            norm: None,
            is_trained: false,
            early_stop: false,
            patience: 0,
        }
    }

    pub fn data_table(&self) -> &DataTable<T> {
        &self.data_table
    }

    /// The active feature normalization, if enabled.
    pub fn feature_norm(&self) -> Option<&DataTableNorm<T>> {
        self.norm.as_ref()
    }

    /// Whether training stops on stalled evaluation loss.
    pub fn early_stop(&self) -> bool {
        self.early_stop
    }

    pub fn patience(&self) -> usize {
        self.patience
    }

    /// Applies the active feature normalization to `x`, or copies it.
    pub fn prepare_features(&self, x: &Matrix<T>) -> Result<Matrix<T>, TrainerError> {
        match &self.norm {
            Some(norm) => norm.normalize(x),
            None => Ok(x.clone()),
        }
    }
}

/// A supervised learner over a [`DataTable`].
///
/// Implementors provide [`train`](Trainer::train) and
/// [`predict`](Trainer::predict); the fitting entry points, test-loss
/// evaluation and feature normalization switches are shared.
pub trait Trainer<T: FloatElement> {
    fn state(&self) -> &TrainerState<T>;

    fn state_mut(&mut self) -> &mut TrainerState<T>;

    /// Runs the training algorithm for at most `epochs` iterations.
    fn train(&mut self, epochs: usize, loss: LossFunc) -> Result<(), TrainerError>;

    /// Predicts targets for `input` (`[samples, features]`).
    ///
    /// # Errors
    /// [`TrainerError::NotTrained`] before a successful fit.
    fn predict(&self, input: &Matrix<T>) -> Result<Matrix<T>, TrainerError>;

    /// Trains for `epochs` iterations without early stopping.
    fn fit(&mut self, epochs: usize, loss: LossFunc) -> Result<(), TrainerError> {
        let state = self.state_mut();
        state.early_stop = false;
        state.patience = 0;
        self.train(epochs, loss)
    }

    /// Trains with early stopping on the evaluation split.
    ///
    /// `patience` counts consecutive epochs whose evaluation loss fails to
    /// improve on the best so far; training stops once that count reaches
    /// `patience`, so `1` stops at the first stalled epoch. The weights of
    /// the best epoch are kept.
    ///
    /// # Errors
    /// [`TrainerError::Config`] if `patience` is zero and
    /// [`TrainerError::InvalidData`] if the data table has no evaluation split.
    fn fit_with_patience(
        &mut self,
        epochs: usize,
        loss: LossFunc,
        patience: usize,
    ) -> Result<(), TrainerError> {
        if patience == 0 {
            return Err(TrainerError::Config(
                "patience must be at least 1 epoch".into(),
            ));
        }
        if !self.state().data_table().has_eval() {
            return Err(TrainerError::InvalidData(
                "early stopping needs an evaluation split".into(),
            ));
        }
        let state = self.state_mut();
        state.early_stop = true;
        state.patience = patience;
        self.train(epochs, loss)
    }

    /// Enables feature normalization, then fits with early stopping.
    fn fit_normalized(
        &mut self,
        epochs: usize,
        loss: LossFunc,
        patience: usize,
        kind: NormalizationType,
    ) -> Result<(), TrainerError> {
        self.enable_feature_norm(kind)?;
        self.fit_with_patience(epochs, loss, patience)
    }

    /// Evaluates `loss` on the test split.
    ///
    /// # Errors
    /// [`TrainerError::NotTrained`] before fitting and
    /// [`TrainerError::InvalidData`] if the data table has no test split.
    fn compute_test_loss(&self, loss: LossFunc) -> Result<T, TrainerError> {
        if !self.is_trained() {
            return Err(TrainerError::NotTrained);
        }
        let table = self.state().data_table();
        let (Some(x_test), Some(y_test)) = (table.x_test(), table.y_test()) else {
            return Err(TrainerError::InvalidData("the data table has no test split".into()));
        };
        let pred = self.predict(x_test)?;
        let loss = Loss::new(y_test.as_tensor(), loss)?;
        Ok(loss.get_loss(pred.as_tensor())?)
    }

    /// Fits per-column normalizers on the training features and applies
    /// them from now on. Any previous fit is discarded.
    fn enable_feature_norm(&mut self, kind: NormalizationType) -> Result<(), TrainerError> {
        let state = self.state_mut();
        state.norm = Some(DataTableNorm::fit(&state.data_table, kind)?);
        state.is_trained = false;
        Ok(())
    }

    fn disable_feature_norm(&mut self) {
        let state = self.state_mut();
        if state.norm.take().is_some() {
            state.is_trained = false;
        }
    }

    fn is_trained(&self) -> bool {
        self.state().is_trained
    }

    fn data_table(&self) -> &DataTable<T> {
        self.state().data_table()
    }
}
