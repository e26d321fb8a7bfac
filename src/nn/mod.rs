/*
 * @Author       : 老董
 * @Date         : 2024-01-31 20:23:53
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-09
 * @Description  : 负责神经网络（neural network）的构建：计算图、节点、层、损失与优化器
 */

pub mod criterion;
mod graph;
pub mod layer;
mod model_state;
mod module;
mod nodes;
pub mod optimizer;
mod var;
mod var_ops;

pub use criterion::NllLoss;
pub use graph::{Graph, GraphError, GraphInner};
pub use layer::Linear;
pub use model_state::ModelState;
pub use module::Module;
pub use nodes::NodeId;
pub use optimizer::{Adam, Optimizer, SGD};
pub use var::{Init, Var};
pub use var_ops::{VarActivationOps, VarLossOps, VarMatrixOps};

#[cfg(test)]
mod tests;
