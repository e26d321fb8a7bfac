/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-17
 * @Description  : Var 损失函数扩展
 */

use crate::nn::{GraphError, Var};

/// 损失函数扩展 trait
pub trait VarLossOps {
    /// 负对数似然损失（批内均值）。`self`为 log 概率[batch, classes]，
    /// `labels`为[batch]的类别下标（以 f32 存储）
    fn nll_loss(&self, labels: &Var) -> Result<Var, GraphError>;
}

impl VarLossOps for Var {
    fn nll_loss(&self, labels: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(labels, "NLL 损失计算")?;
        let id = self
            .graph()
            .borrow_mut()
            .new_nll_loss_node(self.node_id(), labels.node_id(), None)?;
        Ok(self.wrap(id))
    }
}
