use ndarray::{Axis, IxDyn};

use super::Tensor;
use crate::errors::TensorError;

impl Tensor {
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let new_total_elements: usize = shape.iter().product();
        assert!(
            self.size() == new_total_elements,
            "{}",
            TensorError::IncompatibleShape
        );
        Self::new(&self.to_vec(), shape)
    }

    /// 交换前两个维度；对于矩阵即为转置。阶数小于2时原样返回
    pub fn transpose(&self) -> Self {
        if self.dimension() < 2 {
            return self.clone();
        }
        let mut axes: Vec<usize> = (0..self.dimension()).collect();
        axes.swap(0, 1);
        let permuted = self.data.view().permuted_axes(IxDyn(&axes));
        Self::from_array(permuted.as_standard_layout().into_owned())
    }

    /// 把广播后的梯度按求和方式归约回`target`形状，是广播的逆操作。
    /// 多出来的前导维度直接求和消去，`target`中为1的维度求和后保留
    pub fn sum_to_shape(&self, target: &[usize]) -> Self {
        if self.shape() == target {
            return self.clone();
        }
        assert!(
            self.dimension() >= target.len(),
            "{}",
            TensorError::IncompatibleShape
        );

        let mut data = self.data.clone();
        while data.ndim() > target.len() {
            data = data.sum_axis(Axis(0));
        }
        for (axis, &dim) in target.iter().enumerate() {
            if dim == 1 && data.shape()[axis] != 1 {
                data = data.sum_axis(Axis(axis)).insert_axis(Axis(axis));
            }
        }
        assert!(data.shape() == target, "{}", TensorError::IncompatibleShape);
        Self::from_array(data)
    }

    /// 在第0维前插入一个长度为1的维度，如[n] -> [1,n]
    pub fn unsqueeze_front(&self) -> Self {
        let mut shape = vec![1];
        shape.extend_from_slice(self.shape());
        self.reshape(&shape)
    }

    /// 沿第0维取出`[start, end)`的切片（常用于取一个批次的样本）
    pub fn slice_rows(&self, start: usize, end: usize) -> Self {
        assert!(
            self.dimension() >= 1,
            "{}",
            TensorError::AxisOutOfRange { axis: 0, dimension: 0 }
        );
        assert!(
            start <= end && end <= self.shape()[0],
            "{}",
            TensorError::IncompatibleShape
        );
        let rows = self
            .data
            .slice_axis(Axis(0), ndarray::Slice::from(start..end));
        Self::from_array(rows.to_owned())
    }

    /// 沿第0维按给定下标挑出若干行并堆叠成新张量
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        assert!(
            self.dimension() >= 1,
            "{}",
            TensorError::AxisOutOfRange { axis: 0, dimension: 0 }
        );
        Self::from_array(self.data.select(Axis(0), indices))
    }
}
