use ndarray::Ix2;

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl Tensor {
    /// 矩阵乘法：`self`形状为[m,k]，`other`形状为[k,n]，结果形状为[m,n]。
    /// 两者都必须是2阶张量，且`self`的列数等于`other`的行数，否则会panic。
    pub fn mat_mul(&self, other: &Self) -> Self {
        let lhs = self.as_matrix();
        let rhs = other.as_matrix();
        assert!(
            lhs.ncols() == rhs.nrows(),
            "{}",
            TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        Self::from_array(lhs.dot(&rhs).into_dyn())
    }

    fn as_matrix(&self) -> ndarray::ArrayView2<'_, f32> {
        self.data
            .view()
            .into_dimensionality::<Ix2>()
            .unwrap_or_else(|_| panic!("{}", TensorError::MatMulNeed2Dims(self.dimension())))
    }
}
