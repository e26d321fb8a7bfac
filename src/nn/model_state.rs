/*
 * @Author       : 老董
 * @Date         : 2025-01-21
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-02
 * @Description  : ModelState - 按输入形状缓存模型子图
 *
 * 节点形状在创建时即已固定，所以每种批形状对应一份子图：
 * - 首次遇到某形状：创建输入节点，调用`compute`搭建子图并缓存
 * - 再次遇到相同形状：只更新输入节点的值，复用已有子图
 * - 不同形状（如最后一个不完整批次）：另建一份子图并缓存
 *
 * 无论训练多少批次，图中节点数只随不同形状的个数增长
 */

use std::cell::RefCell;
use std::collections::HashMap;

use super::{Graph, GraphError, Var};
use crate::tensor::Tensor;

/// 单个形状对应的子图：入口输入节点 + 输出节点
struct StateCache {
    input: Var,
    output: Var,
}

/// 模型状态管理器
///
/// ```ignore
/// let state = ModelState::new(&graph);
/// let out = state.forward(&batch_x, |x| fc.forward(x))?;
/// out.forward()?;
/// ```
pub struct ModelState {
    graph: Graph,
    /// 按输入形状缓存的子图：shape -> (input, output)
    cache: RefCell<HashMap<Vec<usize>, StateCache>>,
}

impl ModelState {
    /// `graph`须与模型各层共享同一个图
    pub fn new(graph: &Graph) -> Self {
        Self {
            graph: graph.clone(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// 写入输入数据并返回输出节点（此时尚未前向计算）。
    /// `compute`只在该形状首次出现时调用一次
    pub fn forward<F>(&self, x: &Tensor, compute: F) -> Result<Var, GraphError>
    where
        F: FnOnce(&Var) -> Result<Var, GraphError>,
    {
        let shape = x.shape().to_vec();
        let mut cache = self.cache.borrow_mut();

        if let Some(c) = cache.get(&shape) {
            c.input.set_value(x)?;
            return Ok(c.output.clone());
        }

        let input = self.graph.input_shape(&shape, None)?;
        input.set_value(x)?;
        let output = compute(&input)?;
        cache.insert(
            shape,
            StateCache {
                input,
                output: output.clone(),
            },
        );
        Ok(output)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }
}
