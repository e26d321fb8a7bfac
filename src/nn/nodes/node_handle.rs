use std::fmt;

use super::raw_node::{
    Add, Dropout, Input, LogSoftmax, MatMul, NllLoss, NodeType, Parameter, ReLU, TraitNode,
    Transpose,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 图中节点的唯一标识（第一个节点的 ID 为 1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 图持有的节点：具体节点类型 + 前向/反向传播的 pass id 记账
pub(in crate::nn) struct NodeHandle {
    raw_node: NodeType,
    last_forward_pass_id: u64,
    last_backward_pass_id: u64,
}

impl NodeHandle {
    fn from_raw<T: Into<NodeType>>(raw_node: T) -> Self {
        Self {
            raw_node: raw_node.into(),
            last_forward_pass_id: 0,
            last_backward_pass_id: 0,
        }
    }

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓构造↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    pub(in crate::nn) fn new_input(shape: &[usize]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Input::new(shape)?))
    }

    pub(in crate::nn) fn new_parameter(shape: &[usize]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Parameter::new(shape)?))
    }

    pub(in crate::nn) fn new_mat_mul(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(MatMul::new(parents)?))
    }

    pub(in crate::nn) fn new_transpose(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Transpose::new(parents)?))
    }

    pub(in crate::nn) fn new_add(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Add::new(parents)?))
    }

    pub(in crate::nn) fn new_relu(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(ReLU::new(parents)?))
    }

    pub(in crate::nn) fn new_dropout(
        parents: &[&Self],
        p: f32,
        seed: Option<u64>,
    ) -> Result<Self, GraphError> {
        Ok(Self::from_raw(Dropout::new(parents, p, seed)?))
    }

    pub(in crate::nn) fn new_log_softmax(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(LogSoftmax::new(parents)?))
    }

    pub(in crate::nn) fn new_nll_loss(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::from_raw(NllLoss::new(parents)?))
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑构造↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

    pub(in crate::nn) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.raw_node.set_id(id);
        self.raw_node.set_name(name);
    }

    pub(in crate::nn) const fn node_type(&self) -> &NodeType {
        &self.raw_node
    }

    pub(in crate::nn) fn id(&self) -> NodeId {
        self.raw_node.id()
    }

    pub(in crate::nn) fn name(&self) -> &str {
        self.raw_node.name()
    }

    pub(in crate::nn) fn value_expected_shape(&self) -> &[usize] {
        self.raw_node.value_expected_shape()
    }

    pub(in crate::nn) fn value(&self) -> Option<&Tensor> {
        self.raw_node.value()
    }

    pub(in crate::nn) fn has_value(&self) -> bool {
        self.raw_node.value().is_some()
    }

    pub(in crate::nn) fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        if let Some(value) = value {
            if value.shape() != self.value_expected_shape() {
                return Err(GraphError::ShapeMismatch {
                    expected: self.value_expected_shape().to_vec(),
                    got: value.shape().to_vec(),
                    message: format!("{self}被设置的值形状与节点形状不符"),
                });
            }
        }
        self.raw_node.set_value(value)
    }

    pub(in crate::nn) fn clear_value(&mut self) {
        self.raw_node.clear_value();
    }

    pub(in crate::nn) fn grad(&self) -> Option<&Tensor> {
        self.raw_node.grad()
    }

    pub(in crate::nn) fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.raw_node.set_grad(grad)
    }

    pub(in crate::nn) fn clear_grad(&mut self) -> Result<(), GraphError> {
        self.raw_node.set_grad(None)
    }

    pub(in crate::nn) fn calc_value_by_parents(
        &mut self,
        parents: &[&Self],
        is_train: bool,
    ) -> Result<(), GraphError> {
        self.raw_node.calc_value_by_parents(parents, is_train)
    }

    pub(in crate::nn) fn calc_grad_to_parent(
        &self,
        target_parent: &Self,
        upstream_grad: &Tensor,
        assistant_parent: Option<&Self>,
    ) -> Result<Tensor, GraphError> {
        self.raw_node
            .calc_grad_to_parent(target_parent, upstream_grad, assistant_parent)
    }

    pub(in crate::nn) const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub(in crate::nn) const fn set_last_forward_pass_id(&mut self, id: u64) {
        self.last_forward_pass_id = id;
    }

    pub(in crate::nn) const fn last_backward_pass_id(&self) -> u64 {
        self.last_backward_pass_id
    }

    pub(in crate::nn) const fn set_last_backward_pass_id(&mut self, id: u64) {
        self.last_backward_pass_id = id;
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_node.display_node())
    }
}
