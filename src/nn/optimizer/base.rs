/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-14
 * @Description  : 优化器 trait 与参数读写的公共函数
 */

use std::cell::RefCell;
use std::rc::Rc;

use crate::nn::graph::GraphInner;
use crate::nn::{GraphError, NodeId, Var};
use crate::tensor::Tensor;

/// 优化器 trait
///
/// 优化器持有图引用并绑定特定参数：`backward()` 计算所有参数的梯度，
/// `step()` 只更新绑定的参数。
///
/// ```ignore
/// let mut optimizer = SGD::new(&graph, &model.parameters(), 0.01);
/// optimizer.zero_grad()?;
/// loss.backward()?;
/// optimizer.step()?;
///
/// // 或者一步完成
/// let loss_val = optimizer.minimize(&loss)?;
/// ```
pub trait Optimizer {
    /// 清零所有绑定参数的梯度
    fn zero_grad(&mut self) -> Result<(), GraphError>;

    /// 更新参数（只更新绑定的、且本轮有梯度的参数）
    fn step(&mut self) -> Result<(), GraphError>;

    /// 一步完成：zero_grad + forward + backward + step，返回 loss 的标量值
    fn minimize(&mut self, loss: &Var) -> Result<f32, GraphError> {
        self.zero_grad()?;
        let loss_val = loss.backward()?;
        self.step()?;
        Ok(loss_val)
    }

    fn learning_rate(&self) -> f32;

    fn set_learning_rate(&mut self, lr: f32);

    /// 重置累积状态（如 Adam 的动量）
    fn reset(&mut self);
}

/// 清零一组参数节点的梯度
pub(super) fn clear_grads(
    graph: &Rc<RefCell<GraphInner>>,
    params: &[NodeId],
) -> Result<(), GraphError> {
    let mut g = graph.borrow_mut();
    for &node_id in params {
        g.clear_node_grad(node_id)?;
    }
    Ok(())
}

/// 取参数的当前值与梯度；没有梯度（本轮未参与计算）时返回None
pub(super) fn value_and_grad(
    g: &GraphInner,
    node_id: NodeId,
) -> Result<Option<(Tensor, Tensor)>, GraphError> {
    let Some(grad) = g.get_node_grad(node_id)?.cloned() else {
        return Ok(None);
    };
    let current = g.get_node_value(node_id)?.cloned().ok_or_else(|| {
        GraphError::ComputationError(format!("参数节点{node_id}没有值"))
    })?;
    Ok(Some((current, grad)))
}
