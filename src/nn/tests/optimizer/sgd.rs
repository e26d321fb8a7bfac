/*
 * @Author       : 老董
 * @Date         : 2025-12-20
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-04
 * @Description  : SGD (随机梯度下降) 优化器测试
 */

use super::dot_graph;
use crate::nn::optimizer::{Optimizer, SGD};
use crate::nn::{Graph, GraphError, Init};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_sgd_learning_rate_modification() -> Result<(), GraphError> {
    let graph = Graph::new();
    let w = graph.parameter(&[2, 2], Init::Zeros, "w")?;
    let mut sgd = SGD::new(&graph, &[w], 0.01);
    assert_eq!(sgd.learning_rate(), 0.01);

    sgd.set_learning_rate(0.001);
    assert_eq!(sgd.learning_rate(), 0.001);
    Ok(())
}

/// θ_new = θ_old - α * ∇θ
#[test]
fn test_sgd_update_formula() -> Result<(), GraphError> {
    let (graph, w, loss) = dot_graph()?;
    let mut sgd = SGD::new(&graph, &[w.clone()], 0.1);

    sgd.zero_grad()?;
    let loss_value = loss.backward()?;
    assert_abs_diff_eq!(loss_value, 3.0);
    sgd.step()?;

    let expected = Tensor::new(&[0.9, 0.8], &[1, 2]);
    assert_abs_diff_eq!(w.value()?.unwrap(), expected, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_sgd_minimize() -> Result<(), GraphError> {
    let (graph, w, loss) = dot_graph()?;
    let mut sgd = SGD::new(&graph, &[w.clone()], 0.5);

    assert_abs_diff_eq!(sgd.minimize(&loss)?, 3.0);
    // w = [1 - 0.5, 1 - 1.0]
    assert_abs_diff_eq!(sgd.minimize(&loss)?, 0.5);
    assert_abs_diff_eq!(
        w.value()?.unwrap(),
        Tensor::new(&[0.0, -1.0], &[1, 2]),
        epsilon = 1e-6
    );
    Ok(())
}

/// 只更新绑定的参数
#[test]
fn test_sgd_only_updates_bound_params() -> Result<(), GraphError> {
    let (graph, w, loss) = dot_graph()?;
    let other = graph.parameter(&[2], Init::Ones, "other")?;
    let mut sgd = SGD::new(&graph, &[other.clone()], 0.1);

    sgd.minimize(&loss)?;
    assert_eq!(w.value()?.unwrap(), Tensor::ones(&[1, 2]));
    // 未参与计算的参数没有梯度，也不会被更新
    assert_eq!(other.value()?.unwrap(), Tensor::ones(&[2]));
    Ok(())
}
