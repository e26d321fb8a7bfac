use super::super::{broadcast_shape, check_parents_count, parent_value, NodeHandle, TraitNode};
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;

/// 逐元素相加，两个父节点按 NumPy 规则广播（如 [batch,out] + [out] 的偏置相加）
pub(in crate::nn) struct Add {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
}

impl Add {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 必要的验证
        check_parents_count("Add", parents, 2)?;
        let (a, b) = (parents[0].value_expected_shape(), parents[1].value_expected_shape());
        let shape = broadcast_shape(a, b).ok_or_else(|| GraphError::ShapeMismatch {
            expected: a.to_vec(),
            got: b.to_vec(),
            message: "Add节点的两个父节点形状无法广播".to_string(),
        })?;

        // 2. 返回
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape,
        })
    }
}

impl TraitNode for Add {
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
        let owner = self.display_node();
        let a = parent_value(&owner, parents[0])?;
        let b = parent_value(&owner, parents[1])?;
        self.value = Some(a + b);
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
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        // 被广播的维度上梯度要求和
        Ok(upstream_grad.sum_to_shape(target_parent.value_expected_shape()))
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
