/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-26
 * @Description  : GraphInner 节点构建方法（new_*_node）
 */

use rand::Rng;

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::NodeHandle;
use crate::nn::NodeId;

impl GraphInner {
    /// 添加节点到列表，并登记正/反向边
    pub(in crate::nn::graph) fn add_node_to_list(
        &mut self,
        mut node_handle: NodeHandle,
        name: Option<&str>,
        node_type: &str,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_name = self.generate_valid_new_node_name(name.unwrap_or(""), node_type)?;
        let node_id = self.generate_valid_node_id();

        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        node_handle.bind_id_and_name(node_id, &node_name);
        self.nodes.insert(node_id, node_handle);
        Ok(node_id)
    }

    pub fn new_input_node(&mut self, shape: &[usize], name: Option<&str>) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_input(shape)?;
        self.add_node_to_list(node, name, "input", &[])
    }

    pub fn new_parameter_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_parameter(shape)?;
        self.add_node_to_list(node, name, "parameter", &[])
    }

    pub fn new_mat_mul_node(
        &mut self,
        left_node_id: NodeId,
        right_node_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let parents = [left_node_id, right_node_id];
        let node = NodeHandle::new_mat_mul(&self.get_nodes(&parents)?)?;
        self.add_node_to_list(node, name, "mat_mul", &parents)
    }

    pub fn new_transpose_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_transpose(&self.get_nodes(&[parent_id])?)?;
        self.add_node_to_list(node, name, "transpose", &[parent_id])
    }

    pub fn new_add_node(
        &mut self,
        a_id: NodeId,
        b_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let parents = [a_id, b_id];
        let node = NodeHandle::new_add(&self.get_nodes(&parents)?)?;
        self.add_node_to_list(node, name, "add", &parents)
    }

    pub fn new_relu_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_relu(&self.get_nodes(&[parent_id])?)?;
        self.add_node_to_list(node, name, "relu", &[parent_id])
    }

    /// 创建 Dropout 节点；若图带种子，则掩码的随机序列也由图的 RNG 派生
    pub fn new_dropout_node(
        &mut self,
        parent_id: NodeId,
        p: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let seed = self.rng.as_mut().map(|rng| rng.r#gen::<u64>());
        let node = NodeHandle::new_dropout(&self.get_nodes(&[parent_id])?, p, seed)?;
        self.add_node_to_list(node, name, "dropout", &[parent_id])
    }

    pub fn new_log_softmax_node(
        &mut self,
        parent_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::new_log_softmax(&self.get_nodes(&[parent_id])?)?;
        self.add_node_to_list(node, name, "log_softmax", &[parent_id])
    }

    pub fn new_nll_loss_node(
        &mut self,
        log_probs_id: NodeId,
        labels_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let parents = [log_probs_id, labels_id];
        let node = NodeHandle::new_nll_loss(&self.get_nodes(&parents)?)?;
        self.add_node_to_list(node, name, "nll_loss", &parents)
    }
}
