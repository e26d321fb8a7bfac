mod input;
mod loss;
mod ops;
mod parameter;

pub(in crate::nn) use input::Input;
pub(in crate::nn) use loss::NllLoss;
pub(in crate::nn) use ops::{Add, Dropout, LogSoftmax, MatMul, ReLU, Transpose};
pub(in crate::nn) use parameter::Parameter;

use enum_dispatch::enum_dispatch;

use super::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

#[enum_dispatch]
pub(in crate::nn) enum NodeType {
    Input(Input),
    Parameter(Parameter),
    MatMul(MatMul),
    Transpose(Transpose),
    Add(Add),
    ReLU(ReLU),
    Dropout(Dropout),
    LogSoftmax(LogSoftmax),
    NllLoss(NllLoss),
}

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    fn id(&self) -> NodeId;

    fn set_id(&mut self, id: NodeId);

    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    fn display_node(&self) -> String {
        let type_name = std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Node");
        format!("节点[id={}, name={}, type={}]", self.id(), self.name(), type_name)
    }

    /// 节点值的形状，创建节点时即已确定
    fn value_expected_shape(&self) -> &[usize];

    /// 根据父节点的值计算本节点的值。
    /// 由于该接口只在图中调用，实现时可假定所有父节点的值都已预先算好；
    /// `is_train`为图当前是否处于训练模式（只有 Dropout 会关心）
    fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        is_train: bool,
    ) -> Result<(), GraphError>;

    fn value(&self) -> Option<&Tensor>;

    fn set_value(&mut self, _value: Option<&Tensor>) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}的值只能通过前向传播计算，不应被手动设置",
            self.display_node()
        )))
    }

    fn clear_value(&mut self);

    /// 向量-雅可比积（VJP）：给定本节点的上游梯度，求对`target_parent`的梯度。
    /// `assistant_parent`为另一个父节点（双目运算才有）
    fn calc_grad_to_parent(
        &self,
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError>;

    fn grad(&self) -> Option<&Tensor>;

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError>;
}

/// 取父节点的值，没有值时返回错误
fn parent_value<'a>(owner: &str, parent: &'a NodeHandle) -> Result<&'a Tensor, GraphError> {
    parent.value().ok_or_else(|| {
        GraphError::ComputationError(format!(
            "{owner}的父{parent}没有值。不该触及本错误，否则说明crate代码有问题"
        ))
    })
}

/// 检查父节点个数
fn check_parents_count(
    node_type: &str,
    parents: &[&NodeHandle],
    expected: usize,
) -> Result<(), GraphError> {
    if parents.len() != expected {
        return Err(GraphError::InvalidOperation(format!(
            "{node_type}节点需要{expected}个父节点，但得到了{}个",
            parents.len()
        )));
    }
    Ok(())
}

/// 两个形状按 NumPy 规则广播后的形状；不可广播时返回None
fn broadcast_shape(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let len = a.len().max(b.len());
    let mut shape = vec![0; len];
    for i in 0..len {
        let da = if i < len - a.len() { 1 } else { a[i - (len - a.len())] };
        let db = if i < len - b.len() { 1 } else { b[i - (len - b.len())] };
        shape[i] = match (da, db) {
            _ if da == db => da,
            (1, _) => db,
            (_, 1) => da,
            _ => return None,
        };
    }
    Some(shape)
}
