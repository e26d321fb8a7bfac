use super::{NodeHandle, TraitNode};
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;

/// 接收外部数据的节点（特征批次、标签批次等），其值只能通过`set_value`设置，没有梯度
pub(in crate::nn) struct Input {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    shape: Vec<usize>,
}

impl Input {
    pub(in crate::nn) fn new(shape: &[usize]) -> Result<Self, GraphError> {
        if shape.is_empty() || shape.len() > 4 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: shape.len(),
                message: format!(
                    "输入张量必须是 1-4 维，但收到的维度是 {} 维。",
                    shape.len()
                ),
            });
        }
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            shape: shape.to_vec(),
        })
    }
}

impl TraitNode for Input {
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
        _parents: &[&NodeHandle],
        _is_train: bool,
    ) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}被执行了前向传播。不该触及本错误，否则说明crate代码有问题",
            self.display_node()
        )))
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        self.value = value.cloned();
        Ok(())
    }

    fn clear_value(&mut self) {
        self.value = None;
    }

    fn calc_grad_to_parent(
        &self,
        _target_parent: &NodeHandle,
        _upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}没有父节点。不该触及本错误，否则说明crate代码有问题",
            self.display_node()
        )))
    }

    fn grad(&self) -> Option<&Tensor> {
        None
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        match grad {
            None => Ok(()),
            Some(_) => Err(GraphError::InvalidOperation(format!(
                "输入{}不应该有梯度",
                self.display_node()
            ))),
        }
    }
}
