/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:30:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-09
 * @Description  : Adam 优化器
 */

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::base::{clear_grads, value_and_grad};
use super::Optimizer;
use crate::nn::graph::GraphInner;
use crate::nn::{Graph, GraphError, NodeId, Var};
use crate::tensor::Tensor;

/// Adam: Adaptive Moment Estimation
/// - m = β1 * m + (1 - β1) * g
/// - v = β2 * v + (1 - β2) * g²
/// - θ = θ - α * m_hat / (√v_hat + ε)
pub struct Adam {
    graph: Rc<RefCell<GraphInner>>,
    params: Vec<NodeId>,
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    /// 一阶矩估计
    m: HashMap<NodeId, Tensor>,
    /// 二阶矩估计
    v: HashMap<NodeId, Tensor>,
    /// 时间步
    t: i32,
}

impl Adam {
    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Self {
        Self::with_config(graph, params, lr, 0.9, 0.999, 1e-8)
    }

    pub fn with_config(
        graph: &Graph,
        params: &[Var],
        lr: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    ) -> Self {
        Self {
            graph: graph.inner_rc(),
            params: params.iter().map(Var::node_id).collect(),
            lr,
            beta1,
            beta2,
            epsilon,
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        }
    }
}

impl Optimizer for Adam {
    fn zero_grad(&mut self) -> Result<(), GraphError> {
        clear_grads(&self.graph, &self.params)
    }

    fn step(&mut self) -> Result<(), GraphError> {
        self.t += 1;
        let bias_correction1 = 1.0 - self.beta1.powi(self.t);
        let bias_correction2 = 1.0 - self.beta2.powi(self.t);
        let mut g = self.graph.borrow_mut();

        for &node_id in &self.params {
            let Some((current, grad)) = value_and_grad(&g, node_id)? else {
                continue;
            };

            let m = self
                .m
                .entry(node_id)
                .or_insert_with(|| Tensor::zeros(grad.shape()));
            *m *= self.beta1;
            *m += &(&grad * (1.0 - self.beta1));

            let v = self
                .v
                .entry(node_id)
                .or_insert_with(|| Tensor::zeros(grad.shape()));
            *v *= self.beta2;
            *v += &(&grad * &grad * (1.0 - self.beta2));

            let m_hat = &*m / bias_correction1;
            let v_hat = &*v / bias_correction2;
            let new_value = current - self.lr * &m_hat / (v_hat.sqrt() + self.epsilon);
            g.set_node_value(node_id, Some(&new_value))?;
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.t = 0;
    }
}
