/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-15
 * @Description  : GraphInner VJP 反向传播
 */

use std::collections::HashSet;

use log::warn;

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::NodeType;
use crate::nn::NodeId;
use crate::tensor::Tensor;

impl GraphInner {
    /// 反向传播：从标量损失出发，按逆拓扑序把梯度传到所有上游节点，
    /// 参数节点的梯度在多次调用间累加。结束后释放中间结果。
    /// 返回损失的标量值
    pub fn backward(&mut self, loss_id: NodeId) -> Result<f32, GraphError> {
        if !self.is_train_mode() {
            warn!("在 eval 模式下调用 backward，这通常是误用");
        }

        let loss_node = self.get_node(loss_id)?;
        let loss_value = loss_node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("损失{loss_node}没有值，请先执行 forward"))
        })?;
        let loss_scalar = loss_value.get_data_number().ok_or_else(|| {
            GraphError::InvalidOperation(format!(
                "反向传播要求损失为标量，但得到 {:?}",
                loss_value.shape()
            ))
        })?;
        let loss_grad = Tensor::ones(loss_value.shape());

        self.reset_intermediate_grad();
        self.get_node_mut(loss_id)?.set_grad(Some(&loss_grad))?;

        let topo_order = self.topological_sort_backward(loss_id)?;
        for node_id in &topo_order {
            self.propagate_grad_to_parents(*node_id)?;
        }

        self.last_backward_pass_id += 1;
        let new_pass_id = self.last_backward_pass_id;
        for node_id in topo_order {
            let node = self.get_node_mut(node_id)?;
            if node.grad().is_some() {
                node.set_last_backward_pass_id(new_pass_id);
            }
        }

        self.release_intermediate_results();
        Ok(loss_scalar)
    }

    /// 将梯度从当前节点传播到其（非输入）父节点
    fn propagate_grad_to_parents(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let parent_ids = self.get_node_parents(node_id)?;
        if parent_ids.is_empty() {
            return Ok(());
        }

        let parent_grads: Vec<(NodeId, Tensor)> = {
            let node = self.get_node(node_id)?;
            let Some(upstream_grad) = node.grad() else {
                return Ok(());
            };

            let mut grads = Vec::with_capacity(parent_ids.len());
            for parent_id in &parent_ids {
                let parent = self.get_node(*parent_id)?;
                if let NodeType::Input(_) = parent.node_type() {
                    continue;
                }

                let assistant = parent_ids
                    .iter()
                    .find(|&&id| id != *parent_id)
                    .map(|&id| self.get_node(id))
                    .transpose()?;
                let parent_grad = node.calc_grad_to_parent(parent, upstream_grad, assistant)?;
                grads.push((*parent_id, parent_grad));
            }
            grads
        };

        for (parent_id, parent_grad) in parent_grads {
            let parent_node = self.get_node_mut(parent_id)?;
            let new_grad = match parent_node.grad() {
                Some(existing_grad) => existing_grad + &parent_grad,
                None => parent_grad,
            };
            parent_node.set_grad(Some(&new_grad))?;
        }
        Ok(())
    }

    /// 逆拓扑序：子节点总排在其所有父节点之前（后序 DFS 再反转）
    fn topological_sort_backward(&self, loss_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        fn dfs(
            graph: &GraphInner,
            node_id: NodeId,
            visited: &mut HashSet<NodeId>,
            result: &mut Vec<NodeId>,
        ) -> Result<(), GraphError> {
            if !visited.insert(node_id) {
                return Ok(());
            }
            for parent_id in graph.get_node_parents(node_id)? {
                dfs(graph, parent_id, visited, result)?;
            }
            result.push(node_id);
            Ok(())
        }

        let mut result = Vec::new();
        dfs(self, loss_id, &mut HashSet::new(), &mut result)?;
        result.reverse();
        Ok(result)
    }

    /// 清除所有节点的梯度
    pub fn clear_grad(&mut self) -> Result<(), GraphError> {
        for node in self.nodes.values_mut() {
            node.clear_grad()?;
        }
        Ok(())
    }

    /// 清除单个节点的梯度
    pub fn clear_node_grad(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        self.get_node_mut(node_id)?.clear_grad()
    }
}
