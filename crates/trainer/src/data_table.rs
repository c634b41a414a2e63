// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Splitting a data matrix into features and targets, and into
//! training, evaluation and test rows.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tensor_core::{part, Element, Matrix};

use crate::TrainerError;

/// Feature (`x`) and target (`y`) matrices for training, with optional
/// evaluation and test splits.
///
/// Rows are assigned in order: the first rows train, the next
/// `eval_percent`% evaluate, the last `test_percent`% test. Shuffle the
/// source with [`shuffle_rows`] first if it is sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable<T> {
    x_train: Matrix<T>,
    y_train: Matrix<T>,
    eval: Option<(Matrix<T>, Matrix<T>)>,
    test: Option<(Matrix<T>, Matrix<T>)>,
    x_cols: Vec<usize>,
    y_cols: Vec<usize>,
}

impl<T: Element> DataTable<T> {
    /// Uses every row for training; `y_cols` are the target columns.
    pub fn new(data: &Matrix<T>, y_cols: &[usize]) -> Result<Self, TrainerError> {
        Self::with_split(data, y_cols, 0, 0)
    }

    /// Splits off `eval_percent`% and `test_percent`% of the rows.
    ///
    /// # Errors
    /// [`TrainerError::InvalidData`] when `y_cols` is empty, repeats a
    /// column, names a column outside the matrix or covers every column,
    /// and when the percentages exceed 100, leave no training rows or
    /// request a split too small to hold a single row.
    pub fn with_split(
        data: &Matrix<T>,
        y_cols: &[usize],
        eval_percent: usize,
        test_percent: usize,
    ) -> Result<Self, TrainerError> {
        let y_cols = check_output_columns(y_cols, data.col_size())?;
        let x_cols: Vec<usize> = (0..data.col_size())
            .filter(|c| !y_cols.contains(c))
            .collect();

        if eval_percent + test_percent > 100 {
            return Err(TrainerError::InvalidData(format!(
                "eval ({eval_percent}%) and test ({test_percent}%) splits exceed 100%"
            )));
        }

        let rows = data.row_size();
        let eval_rows = split_rows(rows, eval_percent, "eval")?;
        let test_rows = split_rows(rows, test_percent, "test")?;
        let train_rows = rows - eval_rows - test_rows;
        if train_rows == 0 {
            return Err(TrainerError::InvalidData(format!(
                "no training rows left out of {rows}"
            )));
        }

        let xy = |range: std::ops::Range<usize>| -> Result<(Matrix<T>, Matrix<T>), TrainerError> {
            let indices: Vec<usize> = range.collect();
            let block = part::sub_matrix_rows(data, &indices)?;
            Ok((
                part::sub_matrix_cols(&block, &x_cols)?,
                part::sub_matrix_cols(&block, &y_cols)?,
            ))
        };

        let (x_train, y_train) = xy(0..train_rows)?;
        let eval = match eval_rows {
            0 => None,
            n => Some(xy(train_rows..train_rows + n)?),
        };
        let test = match test_rows {
            0 => None,
            n => Some(xy(rows - n..rows)?),
        };

        Ok(Self {
            x_train,
            y_train,
            eval,
            test,
            x_cols,
            y_cols,
        })
    }

    /// Builds a training-only table from separate feature and target matrices.
    pub fn from_xy(x: Matrix<T>, y: Matrix<T>) -> Result<Self, TrainerError> {
        if x.row_size() != y.row_size() {
            return Err(TrainerError::InvalidData(format!(
                "x has {} rows but y has {}",
                x.row_size(),
                y.row_size()
            )));
        }
        if x.row_size() == 0 || x.col_size() == 0 || y.col_size() == 0 {
            return Err(TrainerError::InvalidData("x and y must be non-empty".into()));
        }
        let x_cols = (0..x.col_size()).collect();
        let y_cols = (x.col_size()..x.col_size() + y.col_size()).collect();
        Ok(Self {
            x_train: x,
            y_train: y,
            eval: None,
            test: None,
            x_cols,
            y_cols,
        })
    }

    pub fn x_train(&self) -> &Matrix<T> {
        &self.x_train
    }

    pub fn y_train(&self) -> &Matrix<T> {
        &self.y_train
    }

    pub fn x_eval(&self) -> Option<&Matrix<T>> {
        self.eval.as_ref().map(|(x, _)| x)
    }

    pub fn y_eval(&self) -> Option<&Matrix<T>> {
        self.eval.as_ref().map(|(_, y)| y)
    }

    pub fn x_test(&self) -> Option<&Matrix<T>> {
        self.test.as_ref().map(|(x, _)| x)
    }

    pub fn y_test(&self) -> Option<&Matrix<T>> {
        self.test.as_ref().map(|(_, y)| y)
    }

    pub fn has_eval(&self) -> bool {
        self.eval.is_some()
    }

    pub fn has_test(&self) -> bool {
        self.test.is_some()
    }

    /// Number of feature columns.
    pub fn x_dim(&self) -> usize {
        self.x_train.col_size()
    }

    /// Number of target columns.
    pub fn y_dim(&self) -> usize {
        self.y_train.col_size()
    }

    /// Number of training rows.
    pub fn row_size(&self) -> usize {
        self.x_train.row_size()
    }

    /// Source column indices of the features.
    pub fn x_cols(&self) -> &[usize] {
        &self.x_cols
    }

    /// Source column indices of the targets.
    pub fn y_cols(&self) -> &[usize] {
        &self.y_cols
    }
}

/// Returns a copy of `data` with its rows in a seeded random order.
pub fn shuffle_rows<T: Element>(data: &Matrix<T>, seed: u64) -> Result<Matrix<T>, TrainerError> {
    let mut order: Vec<usize> = (0..data.row_size()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    Ok(part::sub_matrix_rows(data, &order)?)
}

fn check_output_columns(y_cols: &[usize], cols: usize) -> Result<Vec<usize>, TrainerError> {
    if y_cols.is_empty() {
        return Err(TrainerError::InvalidData("no output columns given".into()));
    }
    let mut sorted = y_cols.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != y_cols.len() {
        return Err(TrainerError::InvalidData(format!(
            "duplicate output columns in {y_cols:?}"
        )));
    }
    if let Some(&c) = y_cols.iter().find(|&&c| c >= cols) {
        return Err(TrainerError::InvalidData(format!(
            "output column {c} out of range for {cols} columns"
        )));
    }
    if y_cols.len() == cols {
        return Err(TrainerError::InvalidData(
            "every column is an output; no features left".into(),
        ));
    }
    Ok(y_cols.to_vec())
}

fn split_rows(rows: usize, percent: usize, split: &str) -> Result<usize, TrainerError> {
    let n = rows * percent / 100;
    if percent > 0 && n == 0 {
        return Err(TrainerError::InvalidData(format!(
            "{percent}% of {rows} rows leaves the {split} split empty"
        )));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10 rows of `[i, 10 + i, 100 + i]`.
    fn table() -> Matrix<f64> {
        let values = (0..10)
            .flat_map(|i| {
                let i = i as f64;
                [i, 10.0 + i, 100.0 + i]
            })
            .collect();
        Matrix::from_values(10, 3, values).unwrap()
    }

    #[test]
    fn test_columns_split() {
        let t = DataTable::new(&table(), &[1]).unwrap();
        assert_eq!(t.x_cols(), &[0, 2]);
        assert_eq!(t.y_cols(), &[1]);
        assert_eq!(t.x_dim(), 2);
        assert_eq!(t.y_dim(), 1);
        assert_eq!(t.x_train().row(3).unwrap(), &[3.0, 103.0]);
        assert_eq!(t.y_train().row(3).unwrap(), &[13.0]);
        assert!(!t.has_eval());
        assert!(!t.has_test());
    }

    #[test]
    fn test_row_split_order() {
        let t = DataTable::with_split(&table(), &[2], 20, 30).unwrap();
        assert_eq!(t.row_size(), 5);
        assert_eq!(t.x_eval().unwrap().row_size(), 2);
        assert_eq!(t.x_test().unwrap().row_size(), 3);
        assert_eq!(t.y_eval().unwrap().as_slice(), &[105.0, 106.0]);
        assert_eq!(t.y_test().unwrap().as_slice(), &[107.0, 108.0, 109.0]);
    }

    #[test]
    fn test_invalid_output_columns() {
        let m = table();
        assert!(DataTable::new(&m, &[]).is_err());
        assert!(DataTable::new(&m, &[1, 1]).is_err());
        assert!(DataTable::new(&m, &[3]).is_err());
        assert!(DataTable::new(&m, &[0, 1, 2]).is_err());
    }

    #[test]
    fn test_invalid_percentages() {
        let m = table();
        assert!(DataTable::with_split(&m, &[0], 60, 50).is_err());
        assert!(DataTable::with_split(&m, &[0], 50, 50).is_err());
        assert!(DataTable::with_split(&m, &[0], 5, 0).is_err());
    }

    #[test]
    fn test_from_xy() {
        let x = Matrix::from_values(2, 1, vec![1.0, 2.0]).unwrap();
        let y = Matrix::from_values(2, 1, vec![3.0, 6.0]).unwrap();
        let t = DataTable::from_xy(x, y).unwrap();
        assert_eq!(t.y_cols(), &[1]);

        let x = Matrix::from_values(2, 1, vec![1.0, 2.0]).unwrap();
        let y = Matrix::from_values(1, 1, vec![3.0]).unwrap();
        assert!(DataTable::from_xy(x, y).is_err());
    }

    #[test]
    fn test_shuffle_rows_is_seeded_permutation() {
        let m = table();
        let a = shuffle_rows(&m, 7).unwrap();
        let b = shuffle_rows(&m, 7).unwrap();
        assert_eq!(a, b);

        let mut firsts: Vec<f64> = a.rows().map(|r| r[0]).collect();
        firsts.sort_by(|x, y| x.total_cmp(y));
        assert_eq!(firsts, (0..10).map(f64::from).collect::<Vec<_>>());
        for row in a.rows() {
            assert_eq!(row[1], row[0] + 10.0);
        }
    }
}
