/*
 * @Author       : 老董
 * @Date         : 2025-01-21
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-25
 * @Description  : 损失函数封装（PyTorch 风格 API）
 *
 * 自动为不同的 output 节点创建独立的 loss 子图并缓存，
 * 同一 output 节点的后续调用只更新标签节点的值。
 *
 * ```ignore
 * let criterion = NllLoss::new();
 * for (x_batch, y_batch) in train_loader.iter() {
 *     let log_probs = classifier.forward_var(&x_batch)?;
 *     let loss = criterion.forward(&log_probs, &y_batch)?;
 *     loss.backward()?;
 * }
 * ```
 */

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{GraphError, NodeId, Var, VarLossOps};
use crate::tensor::Tensor;

/// 单个 output 节点对应的损失状态
struct LossState {
    labels_node: Var,
    loss_node: Var,
}

/// 负对数似然损失函数：输入为 log 概率[batch, classes]，标签为[batch]的类别下标
pub struct NllLoss {
    /// 按（图地址, output 节点 ID）缓存的 loss 状态
    cache: RefCell<HashMap<(usize, NodeId), LossState>>,
}

impl NllLoss {
    pub fn new() -> Self {
        Self {
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// 计算损失，返回的 loss 节点可直接调用 `.backward()` 或 `.forward()`
    pub fn forward(&self, log_probs: &Var, labels: &Tensor) -> Result<Var, GraphError> {
        let key = (Rc::as_ptr(log_probs.graph()) as usize, log_probs.node_id());
        let mut cache = self.cache.borrow_mut();

        if let Some(state) = cache.get(&key) {
            state.labels_node.set_value(labels)?;
            return Ok(state.loss_node.clone());
        }

        let graph = log_probs.get_graph();
        let labels_node = graph.input_shape(labels.shape(), None)?;
        labels_node.set_value(labels)?;
        let loss_node = log_probs.nll_loss(&labels_node)?;

        cache.insert(
            key,
            LossState {
                labels_node,
                loss_node: loss_node.clone(),
            },
        );
        Ok(loss_node)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl Default for NllLoss {
    fn default() -> Self {
        Self::new()
    }
}
