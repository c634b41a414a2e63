// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reusable univariate normalization transforms.

use std::fmt;
use std::str::FromStr;

use crate::{Element, TensorError};

/// Statistical transform applied by the normalization functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationType {
    /// `(v - min) / (max - min)`.
    #[default]
    MinMax,
    /// `(v - mean) / std`, population standard deviation.
    ZScore,
}

impl NormalizationType {
    pub fn as_str(self) -> &'static str {
        match self {
            NormalizationType::MinMax => "min-max",
            NormalizationType::ZScore => "z-score",
        }
    }
}

impl fmt::Display for NormalizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min-max" | "minmax" => Ok(NormalizationType::MinMax),
            "z-score" | "zscore" => Ok(NormalizationType::ZScore),
            other => Err(format!("unknown normalization type: {other}")),
        }
    }
}

/// A fitted normalization `f(v) = (v - subtractor) / denominator`.
///
/// The parameters are computed once from reference values and the transform
/// can then be applied to any number of new values. A zero denominator marks
/// the normalizer as degenerate and every input maps to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer<T> {
    subtractor: T,
    denominator: T,
    degenerate: bool,
}

impl<T: Element> Normalizer<T> {
    /// Fits a normalizer on `values`.
    ///
    /// # Errors
    /// [`TensorError::EmptyTensor`] if `values` is empty.
    pub fn fit(values: &[T], kind: NormalizationType) -> Result<Self, TensorError> {
        if values.is_empty() {
            return Err(TensorError::EmptyTensor {
                op: "make_normalize_function",
            });
        }
        Ok(Self::from_fiber(values, kind))
    }

    /// Fits on a fiber known to be non-empty.
    pub(crate) fn from_fiber(values: &[T], kind: NormalizationType) -> Self {
        match kind {
            NormalizationType::MinMax => Self::min_max(values),
            NormalizationType::ZScore => Self::z_score(values),
        }
    }

    fn min_max(values: &[T]) -> Self {
        let (min, max) = values[1..]
            .iter()
            .fold((values[0], values[0]), |(lo, hi), &v| {
                (if v < lo { v } else { lo }, if v > hi { v } else { hi })
            });
        Self::with_parameters(min, max.sub(min))
    }

    fn z_score(values: &[T]) -> Self {
        // A lone sample has no spread to scale by; leave it untouched.
        if values.len() == 1 {
            return Self::with_parameters(T::zero(), T::one());
        }
        let n = values.len() as f64;
        let mean = values.iter().map(|v| v.to_f64()).sum::<f64>() / n;
        let variance = values
            .iter()
            .map(|v| {
                let d = v.to_f64() - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        Self::with_parameters(T::from_f64(mean), T::from_f64(variance.sqrt()))
    }

    fn with_parameters(subtractor: T, denominator: T) -> Self {
        Self {
            subtractor,
            denominator,
            degenerate: denominator.is_zero(),
        }
    }

    pub fn subtractor(&self) -> T {
        self.subtractor
    }

    pub fn denominator(&self) -> T {
        self.denominator
    }

    /// `true` when the reference values had zero range or zero deviation.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Normalizes a single value.
    #[inline]
    pub fn apply(&self, value: T) -> T {
        if self.degenerate {
            T::zero()
        } else {
            value.sub(self.subtractor).div(self.denominator)
        }
    }

    /// Normalizes every value of `values` in place.
    pub fn apply_slice(&self, values: &mut [T]) {
        values.iter_mut().for_each(|v| *v = self.apply(*v));
    }
}
