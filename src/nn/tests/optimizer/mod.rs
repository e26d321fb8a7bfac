/*
 * @Author       : 老董
 * @Date         : 2025-12-20
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-26
 * @Description  : 优化器模块单元测试
 *
 * 测试按功能分组：
 * - sgd: SGD 优化器测试
 * - adam: Adam 优化器测试
 * - trait_tests: Optimizer trait 通用行为测试
 */

mod adam;
mod sgd;
mod trait_tests;

use crate::nn::{Graph, GraphError, Init, Var, VarMatrixOps};
use crate::tensor::Tensor;

/// 计算图：loss = x · wᵀ，x = [1, 2]，w 初值全一，故 dL/dw = x = [1, 2]
pub(super) fn dot_graph() -> Result<(Graph, Var, Var), GraphError> {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1.0, 2.0], &[1, 2]))?;
    let w = graph.parameter(&[1, 2], Init::Ones, "w")?;
    let loss = x.matmul(&w.transpose()?)?;
    Ok((graph, w, loss))
}
