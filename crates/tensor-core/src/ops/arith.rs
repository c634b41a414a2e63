// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise tensor-tensor and tensor-scalar arithmetic.

use crate::{Element, Tensor, TensorError};

fn check_same_shape<T: Element>(
    op: &'static str,
    lhs: &Tensor<T>,
    rhs: &Tensor<T>,
) -> Result<(), TensorError> {
    if lhs.shape() != rhs.shape() {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }
    Ok(())
}

fn zip_by<T: Element>(
    op: &'static str,
    lhs: &mut Tensor<T>,
    rhs: &Tensor<T>,
    f: impl Fn(T, T) -> T,
) -> Result<(), TensorError> {
    check_same_shape(op, lhs, rhs)?;
    for (a, &b) in lhs.iter_mut().zip(rhs.iter()) {
        *a = f(*a, b);
    }
    Ok(())
}

macro_rules! binary_op {
    ($(#[$doc:meta])* $name:ident, $name_by:ident, $op:literal, $f:expr) => {
        $(#[$doc])*
        ///
        /// # Errors
        /// [`TensorError::ShapeMismatch`] unless both shapes are identical.
        pub fn $name<T: Element>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorError> {
            let mut out = lhs.clone();
            $name_by(&mut out, rhs)?;
            Ok(out)
        }

        /// In-place form; `lhs` is left untouched on error.
        pub fn $name_by<T: Element>(lhs: &mut Tensor<T>, rhs: &Tensor<T>) -> Result<(), TensorError> {
            zip_by($op, lhs, rhs, $f)
        }
    };
}

binary_op!(
    /// Elementwise `lhs + rhs`.
    sum, sum_by, "sum", |a: T, b: T| a.add(b)
);
binary_op!(
    /// Elementwise `lhs - rhs`.
    subtract, subtract_by, "subtract", |a: T, b: T| a.sub(b)
);
binary_op!(
    /// Elementwise (Hadamard) product.
    hadamard_prod, hadamard_prod_by, "hadamard_prod", |a: T, b: T| a.mul(b)
);
binary_op!(
    /// Elementwise quotient `lhs / rhs`.
    hadamard_div, hadamard_div_by, "hadamard_div", |a: T, b: T| a.div(b)
);

macro_rules! scalar_op {
    ($(#[$doc:meta])* $name:ident, $name_by:ident, $f:expr) => {
        $(#[$doc])*
        pub fn $name<T: Element>(tensor: &Tensor<T>, scalar: T) -> Tensor<T> {
            let f = $f;
            tensor.map(|v| f(v, scalar))
        }

        pub fn $name_by<T: Element>(tensor: &mut Tensor<T>, scalar: T) {
            let f = $f;
            tensor.map_in_place(|v| f(v, scalar));
        }
    };
}

scalar_op!(
    /// `t + s` for every element.
    sum_scalar, sum_scalar_by, |v: T, s: T| v.add(s)
);
scalar_op!(
    /// `t - s` for every element.
    subtract_scalar, subtract_scalar_by, |v: T, s: T| v.sub(s)
);
scalar_op!(
    /// `s - t` for every element.
    scalar_subtract, scalar_subtract_by, |v: T, s: T| s.sub(v)
);
scalar_op!(
    /// `t * s` for every element.
    multiply_scalar, multiply_scalar_by, |v: T, s: T| v.mul(s)
);
scalar_op!(
    /// `t / s` for every element.
    divide_scalar, divide_scalar_by, |v: T, s: T| v.div(s)
);
scalar_op!(
    /// `s / t` for every element.
    scalar_divide, scalar_divide_by, |v: T, s: T| s.div(v)
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn t(values: &[f64]) -> Tensor<f64> {
        Tensor::from_values(Shape::vector(values.len()), values.to_vec()).unwrap()
    }

    #[test]
    fn test_binary_ops() {
        let a = t(&[1.0, 2.0, 3.0]);
        let b = t(&[4.0, 5.0, 6.0]);
        assert_eq!(sum(&a, &b).unwrap().as_slice(), &[5.0, 7.0, 9.0]);
        assert_eq!(subtract(&b, &a).unwrap().as_slice(), &[3.0, 3.0, 3.0]);
        assert_eq!(hadamard_prod(&a, &b).unwrap().as_slice(), &[4.0, 10.0, 18.0]);
        assert_eq!(hadamard_div(&b, &a).unwrap().as_slice(), &[4.0, 2.5, 2.0]);
    }

    #[test]
    fn test_shape_mismatch_leaves_lhs_untouched() {
        let mut a = t(&[1.0, 2.0, 3.0]);
        let b = Tensor::<f64>::filled([3, 1], 1.0);
        let err = sum_by(&mut a, &b).unwrap_err();
        assert_eq!(
            err,
            TensorError::ShapeMismatch {
                op: "sum",
                lhs: Shape::vector(3),
                rhs: Shape::matrix(3, 1),
            }
        );
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_scalar_ops() {
        let a = t(&[1.0, 2.0, 4.0]);
        assert_eq!(sum_scalar(&a, 1.0).as_slice(), &[2.0, 3.0, 5.0]);
        assert_eq!(subtract_scalar(&a, 1.0).as_slice(), &[0.0, 1.0, 3.0]);
        assert_eq!(scalar_subtract(&a, 1.0).as_slice(), &[0.0, -1.0, -3.0]);
        assert_eq!(multiply_scalar(&a, 0.5).as_slice(), &[0.5, 1.0, 2.0]);
        assert_eq!(divide_scalar(&a, 2.0).as_slice(), &[0.5, 1.0, 2.0]);
        assert_eq!(scalar_divide(&a, 8.0).as_slice(), &[8.0, 4.0, 2.0]);
    }

    #[test]
    fn test_scalar_ops_in_place() {
        let mut a = Tensor::from_values(Shape::vector(3), vec![10i32, 20, 30]).unwrap();
        scalar_subtract_by(&mut a, 5);
        assert_eq!(a.as_slice(), &[-5, -15, -25]);
        divide_scalar_by(&mut a, 5);
        assert_eq!(a.as_slice(), &[-1, -3, -5]);
    }
}
