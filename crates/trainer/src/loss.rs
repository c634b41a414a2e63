// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Loss functions comparing predictions against reference values.

use std::fmt;
use std::str::FromStr;

use tensor_core::{FloatElement, Tensor, TensorError};

/// Error metric used for training and evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossFunc {
    /// Mean squared error.
    #[default]
    Mse,
    /// Mean absolute error.
    Mae,
    /// Mean squared logarithmic error.
    Msle,
    /// Log-cosh error.
    Lche,
}

impl LossFunc {
    pub fn as_str(self) -> &'static str {
        match self {
            LossFunc::Mse => "mse",
            LossFunc::Mae => "mae",
            LossFunc::Msle => "msle",
            LossFunc::Lche => "lche",
        }
    }
}

impl fmt::Display for LossFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LossFunc {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mse" => Ok(LossFunc::Mse),
            "mae" => Ok(LossFunc::Mae),
            "msle" => Ok(LossFunc::Msle),
            "lche" | "log-cosh" => Ok(LossFunc::Lche),
            other => Err(format!(
                "unknown loss function '{other}'; expected 'mse', 'mae', 'msle' or 'lche'"
            )),
        }
    }
}

/// A loss bound to a fixed set of valid (reference) values.
///
/// # Example
/// ```
/// use tensor_core::Tensor;
/// use trainer::{Loss, LossFunc};
///
/// let valid = Tensor::from_values([3], vec![1.0_f64, 2.0, 3.0]).unwrap();
/// let loss = Loss::new(&valid, LossFunc::Mae).unwrap();
/// let pred = Tensor::from_values([3], vec![2.0, 2.0, 2.0]).unwrap();
/// assert!((loss.get_loss(&pred).unwrap() - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Loss<T> {
    valid: Tensor<T>,
    func: LossFunc,
}

impl<T: FloatElement> Loss<T> {
    /// # Errors
    /// [`TensorError::EmptyTensor`] if `valid` has no elements.
    pub fn new(valid: &Tensor<T>, func: LossFunc) -> Result<Self, TensorError> {
        if valid.dim() == 0 {
            return Err(TensorError::EmptyTensor { op: "loss" });
        }
        Ok(Self {
            valid: valid.clone(),
            func,
        })
    }

    pub fn func(&self) -> LossFunc {
        self.func
    }

    pub fn set_func(&mut self, func: LossFunc) {
        self.func = func;
    }

    pub fn valid(&self) -> &Tensor<T> {
        &self.valid
    }

    /// Evaluates the configured loss on `pred`.
    ///
    /// # Errors
    /// [`TensorError::ShapeMismatch`] if `pred` and the valid values differ in shape.
    pub fn get_loss(&self, pred: &Tensor<T>) -> Result<T, TensorError> {
        match self.func {
            LossFunc::Mse => self.mean_squared_error(pred),
            LossFunc::Mae => self.mean_absolute_error(pred),
            LossFunc::Msle => self.mean_squared_logarithmic_error(pred),
            LossFunc::Lche => self.log_cosh_error(pred),
        }
    }

    pub fn mean_squared_error(&self, pred: &Tensor<T>) -> Result<T, TensorError> {
        self.mean_of(pred, |v, p| {
            let d = p.sub(v);
            d.mul(d)
        })
    }

    pub fn mean_absolute_error(&self, pred: &Tensor<T>) -> Result<T, TensorError> {
        self.mean_of(pred, |v, p| p.sub(v).abs())
    }

    /// `mean((ln(1 + v) - ln(1 + p))²)`; defined for values above `-1`.
    pub fn mean_squared_logarithmic_error(&self, pred: &Tensor<T>) -> Result<T, TensorError> {
        self.mean_of(pred, |v, p| {
            let d = T::one().add(v).ln().sub(T::one().add(p).ln());
            d.mul(d)
        })
    }

    pub fn log_cosh_error(&self, pred: &Tensor<T>) -> Result<T, TensorError> {
        self.mean_of(pred, |v, p| p.sub(v).cosh().ln())
    }

    fn mean_of(&self, pred: &Tensor<T>, term: impl Fn(T, T) -> T) -> Result<T, TensorError> {
        if pred.shape() != self.valid.shape() {
            return Err(TensorError::ShapeMismatch {
                op: "loss",
                lhs: self.valid.shape().clone(),
                rhs: pred.shape().clone(),
            });
        }
        let total = self
            .valid
            .iter()
            .zip(pred.iter())
            .fold(T::zero(), |acc, (&v, &p)| acc.add(term(v, p)));
        Ok(total.div(T::from_usize(self.valid.dim())))
    }
}
