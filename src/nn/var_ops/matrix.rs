/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-17
 * @Description  : Var 矩阵运算扩展
 */

use crate::nn::{GraphError, Var};

/// 矩阵运算扩展 trait
pub trait VarMatrixOps {
    /// 矩阵乘法：[m,k] · [k,n] -> [m,n]
    fn matmul(&self, other: &Var) -> Result<Var, GraphError>;

    /// 转置：[m,n] -> [n,m]
    fn transpose(&self) -> Result<Var, GraphError>;
}

impl VarMatrixOps for Var {
    fn matmul(&self, other: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(other, "矩阵乘法")?;
        let id = self
            .graph()
            .borrow_mut()
            .new_mat_mul_node(self.node_id(), other.node_id(), None)?;
        Ok(self.wrap(id))
    }

    fn transpose(&self) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_transpose_node(self.node_id(), None)?;
        Ok(self.wrap(id))
    }
}
