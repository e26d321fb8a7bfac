use super::super::{check_parents_count, parent_value, NodeHandle, TraitNode};
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;

/// 矩阵乘法 C = A·B，A 形状[m,k]，B 形状[k,n]
pub(in crate::nn) struct MatMul {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
    left_id: NodeId,
}

impl MatMul {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 必要的验证
        check_parents_count("MatMul", parents, 2)?;
        let (a, b) = (parents[0].value_expected_shape(), parents[1].value_expected_shape());
        if a.len() != 2 || b.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: a.len().max(b.len()),
                message: format!("MatMul节点只接受2阶父节点，但得到了{a:?}和{b:?}"),
            });
        }
        if a[1] != b[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![a[1], b[1]],
                got: b.to_vec(),
                message: format!(
                    "MatMul节点的第1个父节点列数{}与第2个父节点行数{}不相等",
                    a[1], b[0]
                ),
            });
        }

        // 2. 返回
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape: vec![a[0], b[1]],
            left_id: parents[0].id(),
        })
    }
}

impl TraitNode for MatMul {
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
        self.value = Some(a.mat_mul(b));
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
        assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        let owner = self.display_node();
        let target = parent_value(&owner, target_parent)?;
        // A·A 这种两个父节点相同的情况下没有 assistant
        let other = match assistant_parent {
            Some(parent) => parent_value(&owner, parent)?,
            None => target,
        };

        if target_parent.id() == self.left_id {
            // dL/dA = G·Bᵀ
            Ok(upstream_grad.mat_mul(&other.transpose()))
        } else {
            // dL/dB = Aᵀ·G
            Ok(other.transpose().mat_mul(upstream_grad))
        }
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
