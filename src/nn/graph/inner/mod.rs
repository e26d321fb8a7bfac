/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-12
 * @Description  : GraphInner 计算图的底层实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 基础操作 + forward
 * - backward.rs: VJP 反向传播
 * - mode.rs: train/eval
 * - node_builders.rs: new_*_node
 */

mod backward;
mod core;
mod mode;
mod node_builders;

use std::collections::HashMap;

use rand::rngs::StdRng;

use crate::nn::nodes::NodeHandle;
use crate::nn::NodeId;

/// 图的完整定义（核心实现），用户通常通过 `Graph` 句柄使用
pub struct GraphInner {
    pub(in crate::nn::graph) name: String,
    pub(in crate::nn::graph) nodes: HashMap<NodeId, NodeHandle>,
    /// 反向边：child_id -> parent_ids（顺序即父节点顺序）
    pub(in crate::nn::graph) backward_edges: HashMap<NodeId, Vec<NodeId>>,
    pub(in crate::nn::graph) last_forward_pass_id: u64,
    pub(in crate::nn::graph) last_backward_pass_id: u64,
    pub(in crate::nn::graph) next_id: u64,
    pub(in crate::nn::graph) is_eval_mode: bool,
    /// 图级别的随机数生成器（参数初始化、Dropout 种子）；
    /// None 表示使用 thread_rng（非确定性）
    pub(in crate::nn::graph) rng: Option<StdRng>,
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}
