use ndarray::Axis;

use crate::errors::TensorError;
use crate::tensor::Tensor;

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Tensor {
    /// 所有元素之和
    pub fn sum(&self) -> f32 {
        self.data.sum()
    }

    /// 所有元素的均值；空张量返回`NaN`
    pub fn mean(&self) -> f32 {
        if self.size() == 0 {
            return f32::NAN;
        }
        self.sum() / self.size() as f32
    }

    /// 沿`axis`求和并保留该维度（长度变为1）
    pub fn sum_axis_keepdims(&self, axis: usize) -> Self {
        self.check_axis(axis);
        Self::from_array(self.data.sum_axis(Axis(axis)).insert_axis(Axis(axis)))
    }

    /// 沿`axis`取最大值并保留该维度（长度变为1）
    pub fn max_axis_keepdims(&self, axis: usize) -> Self {
        self.check_axis(axis);
        let max = self
            .data
            .fold_axis(Axis(axis), f32::NEG_INFINITY, |acc, &x| acc.max(x));
        Self::from_array(max.insert_axis(Axis(axis)))
    }

    /// 沿`axis`取最大值所在的下标（以f32存储），结果去掉该维度。
    /// 有多个最大值时取第一个
    pub fn argmax(&self, axis: usize) -> Self {
        self.check_axis(axis);
        let indices = self.data.map_axis(Axis(axis), |lane| {
            let mut best = 0;
            for (i, &x) in lane.iter().enumerate() {
                if x > lane[best] {
                    best = i;
                }
            }
            best as f32
        });
        Self::from_array(indices)
    }

    pub fn exp(&self) -> Self {
        self.map(f32::exp)
    }

    pub fn ln(&self) -> Self {
        self.map(f32::ln)
    }

    pub fn sqrt(&self) -> Self {
        self.map(f32::sqrt)
    }

    /// 对每个元素应用`f`，返回同形状的新张量
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
        Self::from_array(self.data.mapv(f))
    }

    /// 逐元素过滤：满足`condition`的元素取`true_value`，否则取`false_value`
    pub fn where_with_f32<F: Fn(f32) -> bool>(
        &self,
        condition: F,
        true_value: f32,
        false_value: f32,
    ) -> Self {
        self.map(|x| if condition(x) { true_value } else { false_value })
    }

    fn check_axis(&self, axis: usize) {
        assert!(
            axis < self.dimension(),
            "{}",
            TensorError::AxisOutOfRange {
                axis,
                dimension: self.dimension(),
            }
        );
    }
}
