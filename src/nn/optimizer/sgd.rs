/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-07
 * @Description  : 随机梯度下降优化器
 */

use std::cell::RefCell;
use std::rc::Rc;

use super::base::{clear_grads, value_and_grad};
use super::Optimizer;
use crate::nn::graph::GraphInner;
use crate::nn::{Graph, GraphError, NodeId, Var};

/// 随机梯度下降：θ = θ - α * ∇θ
pub struct SGD {
    graph: Rc<RefCell<GraphInner>>,
    params: Vec<NodeId>,
    lr: f32,
}

impl SGD {
    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Self {
        Self {
            graph: graph.inner_rc(),
            params: params.iter().map(Var::node_id).collect(),
            lr,
        }
    }
}

impl Optimizer for SGD {
    fn zero_grad(&mut self) -> Result<(), GraphError> {
        clear_grads(&self.graph, &self.params)
    }

    fn step(&mut self) -> Result<(), GraphError> {
        let mut g = self.graph.borrow_mut();
        for &node_id in &self.params {
            if let Some((current, grad)) = value_and_grad(&g, node_id)? {
                let new_value = current - self.lr * &grad;
                g.set_node_value(node_id, Some(&new_value))?;
            }
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn reset(&mut self) {}
}
