/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-12
 * @Description  : Var 激活函数扩展：relu / dropout / log_softmax
 */

use crate::nn::{GraphError, Var};

/// 激活函数扩展 trait
pub trait VarActivationOps {
    /// `ReLU` 激活：max(0, x)
    fn relu(&self) -> Result<Var, GraphError>;

    /// Dropout：训练模式下以概率`p`置零并把其余元素放大`1/(1-p)`，评估模式下为恒等映射。
    /// `p`须在 [0, 1) 内
    fn dropout(&self, p: f32) -> Result<Var, GraphError>;

    /// 沿类别维的 log-softmax，输入形如[batch, classes]
    fn log_softmax(&self) -> Result<Var, GraphError>;
}

impl VarActivationOps for Var {
    fn relu(&self) -> Result<Var, GraphError> {
        let id = self.graph().borrow_mut().new_relu_node(self.node_id(), None)?;
        Ok(self.wrap(id))
    }

    fn dropout(&self, p: f32) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_dropout_node(self.node_id(), p, None)?;
        Ok(self.wrap(id))
    }

    fn log_softmax(&self) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_log_softmax_node(self.node_id(), None)?;
        Ok(self.wrap(id))
    }
}
