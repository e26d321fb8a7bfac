/*
 * @Author       : 老董
 * @Date         : 2026-02-18
 * @Description  : LogSoftmax 节点
 *                 沿类别维做减去行最大值的 log-sum-exp
 */

use super::super::{check_parents_count, parent_value, NodeHandle, TraitNode};
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;

/// 沿类别维（第1维）的 log-softmax，输入输出形状均为[batch, classes]。
/// 先减去每行最大值再求 log-sum-exp，避免上溢
pub(in crate::nn) struct LogSoftmax {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
}

impl LogSoftmax {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("LogSoftmax", parents, 1)?;
        let shape = parents[0].value_expected_shape();
        if shape.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: shape.len(),
                message: format!("LogSoftmax节点只接受形如[batch, classes]的输入，但得到了{shape:?}"),
            });
        }
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape: shape.to_vec(),
        })
    }

    pub(in crate::nn) fn log_softmax(x: &Tensor) -> Tensor {
        let shifted = x - x.max_axis_keepdims(1);
        let log_sum_exp = shifted.exp().sum_axis_keepdims(1).ln();
        shifted - log_sum_exp
    }
}

impl TraitNode for LogSoftmax {
    fn id(&self) -> NodeId {
        self.id
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        _is_train: bool,
    ) -> Result<(), GraphError> {
        let x = parent_value(&self.display_node(), parents[0])?;
        self.value = Some(Self::log_softmax(x));
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn clear_value(&mut self) {
        self.value = None;
    }

    fn calc_grad_to_parent(
        &self,
        _target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        // dx = g - softmax(x) * Σg
        let value = self.value.as_ref().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "{}没有值，无法计算梯度。请先执行 forward",
                self.display_node()
            ))
        })?;
        let softmax = value.exp();
        Ok(upstream_grad - softmax * upstream_grad.sum_axis_keepdims(1))
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
