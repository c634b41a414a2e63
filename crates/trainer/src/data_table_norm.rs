// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-column feature normalization fitted on training data.

use tensor_core::{func, Element, Matrix, NormalizationType, Normalizer};

use crate::{DataTable, TrainerError};

/// One [`Normalizer`] per feature column, fitted on `x_train` and
/// reusable for evaluation, test and prediction inputs.
#[derive(Debug, Clone)]
pub struct DataTableNorm<T> {
    normalizers: Vec<Normalizer<T>>,
    kind: NormalizationType,
}

impl<T: Element> DataTableNorm<T> {
    pub fn fit(table: &DataTable<T>, kind: NormalizationType) -> Result<Self, TrainerError> {
        let normalizers = func::make_normalize_functions(table.x_train().as_tensor(), 0, kind)?;
        Ok(Self { normalizers, kind })
    }

    pub fn kind(&self) -> NormalizationType {
        self.kind
    }

    pub fn normalizers(&self) -> &[Normalizer<T>] {
        &self.normalizers
    }

    /// Returns a copy of `x` with every column normalized by its fitted transform.
    ///
    /// # Errors
    /// [`TrainerError::InvalidData`] if `x` does not have one column per normalizer.
    pub fn normalize(&self, x: &Matrix<T>) -> Result<Matrix<T>, TrainerError> {
        if x.col_size() != self.normalizers.len() {
            return Err(TrainerError::InvalidData(format!(
                "expected {} feature columns, found {}",
                self.normalizers.len(),
                x.col_size()
            )));
        }
        let mut out = x.clone();
        let cols = self.normalizers.len();
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.normalizers[i % cols].apply(*v);
        }
        Ok(out)
    }
}
