// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise unary transforms.

use crate::{Element, Tensor, TensorError};

fn require_elements<T: Element>(tensor: &Tensor<T>, op: &'static str) -> Result<(), TensorError> {
    if tensor.dim() == 0 {
        return Err(TensorError::EmptyTensor { op });
    }
    Ok(())
}

/// Raises every element to `exponent`, computed in `f64`.
pub fn power_elem_by<T: Element>(tensor: &mut Tensor<T>, exponent: f64) -> Result<(), TensorError> {
    require_elements(tensor, "power")?;
    tensor.map_in_place(|v| T::from_f64(v.to_f64().powf(exponent)));
    Ok(())
}

pub fn power_elem<T: Element>(tensor: &Tensor<T>, exponent: f64) -> Result<Tensor<T>, TensorError> {
    require_elements(tensor, "power")?;
    Ok(tensor.map(|v| T::from_f64(v.to_f64().powf(exponent))))
}

/// Hadamard self-product. Empty tensors stay empty.
pub fn square_by<T: Element>(tensor: &mut Tensor<T>) {
    tensor.map_in_place(|v| v.mul(v));
}

pub fn square<T: Element>(tensor: &Tensor<T>) -> Tensor<T> {
    tensor.map(|v| v.mul(v))
}

/// Square root, computed in `f64`. Negative inputs yield NaN for floats.
pub fn sqrt_by<T: Element>(tensor: &mut Tensor<T>) -> Result<(), TensorError> {
    require_elements(tensor, "sqrt")?;
    tensor.map_in_place(|v| T::from_f64(v.to_f64().sqrt()));
    Ok(())
}

pub fn sqrt<T: Element>(tensor: &Tensor<T>) -> Result<Tensor<T>, TensorError> {
    require_elements(tensor, "sqrt")?;
    Ok(tensor.map(|v| T::from_f64(v.to_f64().sqrt())))
}

/// Absolute value. Unsigned and boolean tensors are left as they are.
pub fn abs_by<T: Element>(tensor: &mut Tensor<T>) -> Result<(), TensorError> {
    require_elements(tensor, "abs")?;
    tensor.map_in_place(<T as Element>::abs);
    Ok(())
}

pub fn abs<T: Element>(tensor: &Tensor<T>) -> Result<Tensor<T>, TensorError> {
    require_elements(tensor, "abs")?;
    Ok(tensor.map(<T as Element>::abs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    #[test]
    fn test_power_and_sqrt() {
        let t = Tensor::from_values(Shape::vector(3), vec![1.0, 4.0, 9.0]).unwrap();
        assert_eq!(sqrt(&t).unwrap().as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(power_elem(&t, 0.5).unwrap().as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(square(&t).as_slice(), &[1.0, 16.0, 81.0]);
    }

    #[test]
    fn test_integer_power() {
        let mut t = Tensor::from_values(Shape::vector(3), vec![2i64, -3, 10]).unwrap();
        power_elem_by(&mut t, 3.0).unwrap();
        assert_eq!(t.as_slice(), &[8, -27, 1000]);
    }

    #[test]
    fn test_abs_signed_and_unsigned() {
        let t = Tensor::from_values(Shape::vector(3), vec![-1i32, 0, 5]).unwrap();
        assert_eq!(abs(&t).unwrap().as_slice(), &[1, 0, 5]);

        let mut u = Tensor::from_values(Shape::vector(2), vec![3u32, 9]).unwrap();
        abs_by(&mut u).unwrap();
        assert_eq!(u.as_slice(), &[3, 9]);
    }

    #[test]
    fn test_empty_tensor_errors() {
        let mut t = Tensor::<f64>::new(Shape::new(vec![2, 0]));
        assert!(matches!(sqrt_by(&mut t), Err(TensorError::EmptyTensor { op: "sqrt" })));
        assert!(abs(&t).is_err());
        assert!(power_elem(&t, 2.0).is_err());
        square_by(&mut t);
        assert_eq!(t.dim(), 0);
    }
}
