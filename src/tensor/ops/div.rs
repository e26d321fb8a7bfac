/*
 * @Author       : 老董
 * @Date         : 2026-02-10
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-07
 * @Description  : 张量的除法，实现了两个张量“逐元素”（或张量与纯数）相除的运算，并返回一个新的张量。
 *                 除数中出现0时按 IEEE 754 规则得到无穷或NaN，不会panic。
 */

use std::ops::Div;

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl Div<Tensor> for f32 {
    type Output = Tensor;

    fn div(self, tensor: Tensor) -> Tensor {
        Tensor::from_array(self / &tensor.data)
    }
}
impl Div<&Tensor> for f32 {
    type Output = Tensor;

    fn div(self, tensor: &Tensor) -> Tensor {
        Tensor::from_array(self / &tensor.data)
    }
}

impl Div<f32> for Tensor {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self::from_array(self.data / scalar)
    }
}
impl Div<f32> for &Tensor {
    type Output = Tensor;

    fn div(self, scalar: f32) -> Tensor {
        Tensor::from_array(&self.data / scalar)
    }
}

impl Div for Tensor {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        div_within_tensors(&self, &other)
    }
}
impl Div<&Self> for Tensor {
    type Output = Self;

    fn div(self, other: &Self) -> Self {
        div_within_tensors(&self, other)
    }
}
impl Div<Tensor> for &Tensor {
    type Output = Tensor;

    fn div(self, other: Tensor) -> Tensor {
        div_within_tensors(self, &other)
    }
}
impl Div<&Tensor> for &Tensor {
    type Output = Tensor;

    fn div(self, other: &Tensor) -> Tensor {
        div_within_tensors(self, other)
    }
}

fn div_within_tensors(tensor_1: &Tensor, tensor_2: &Tensor) -> Tensor {
    assert!(
        tensor_1.can_broadcast_with(tensor_2),
        "{}",
        TensorError::OperatorError {
            operator: Operator::Div,
            tensor1_shape: tensor_1.shape().to_vec(),
            tensor2_shape: tensor_2.shape().to_vec(),
        }
    );
    Tensor::from_array(&tensor_1.data / &tensor_2.data)
}
