/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-25
 * @Description  : Var 扩展 trait 模块，按功能领域组织，用户按需 import
 *
 * - `activation`: 激活与正则（relu, dropout, log_softmax）
 * - `loss`: 损失函数（nll_loss）
 * - `matrix`: 矩阵运算（matmul, transpose）
 */

mod activation;
mod loss;
mod matrix;

pub use activation::VarActivationOps;
pub use loss::VarLossOps;
pub use matrix::VarMatrixOps;
