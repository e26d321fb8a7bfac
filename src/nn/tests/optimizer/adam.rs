/*
 * @Author       : 老董
 * @Date         : 2025-12-20
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-16
 * @Description  : Adam 优化器测试
 */

use super::dot_graph;
use crate::nn::optimizer::{Adam, Optimizer};
use crate::nn::{Graph, GraphError, Init, Linear, Module, VarActivationOps, VarLossOps};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

/// 第一步经偏差修正后 m̂ = g，v̂ = g²，更新量约为 lr·sign(g)
#[test]
fn test_adam_first_step() -> Result<(), GraphError> {
    let (graph, w, loss) = dot_graph()?;
    let mut adam = Adam::new(&graph, &[w.clone()], 0.1);
    assert_eq!(adam.learning_rate(), 0.1);

    adam.minimize(&loss)?;
    let expected = Tensor::new(&[0.9, 0.9], &[1, 2]);
    assert_abs_diff_eq!(w.value()?.unwrap(), expected, epsilon = 1e-5);
    Ok(())
}

#[test]
fn test_adam_reset_restarts_bias_correction() -> Result<(), GraphError> {
    let (graph, w, loss) = dot_graph()?;
    let mut adam = Adam::with_config(&graph, &[w.clone()], 0.1, 0.9, 0.999, 1e-8);

    adam.minimize(&loss)?;
    adam.reset();
    adam.minimize(&loss)?;
    // 重置后第二步仍是“第一步”，每个分量再减去 lr
    let expected = Tensor::new(&[0.8, 0.8], &[1, 2]);
    assert_abs_diff_eq!(w.value()?.unwrap(), expected, epsilon = 1e-5);
    Ok(())
}

#[test]
fn test_adam_reduces_classification_loss() -> Result<(), GraphError> {
    let graph = Graph::new_with_seed(42);
    let fc = Linear::new(&graph, 2, 2, "fc")?;
    let x = graph.input(&Tensor::new(&[1.0, 0.0, 0.0, 1.0, -1.0, 0.5, 0.5, -1.0], &[4, 2]))?;
    let labels = graph.input(&Tensor::new(&[0.0, 1.0, 1.0, 0.0], &[4]))?;
    let loss = fc.forward(&x)?.log_softmax()?.nll_loss(&labels)?;

    let mut adam = Adam::new(&graph, &fc.parameters(), 0.05);
    let first = adam.minimize(&loss)?;
    let mut last = first;
    for _ in 0..50 {
        last = adam.minimize(&loss)?;
    }
    assert!(last < first, "loss 未下降：{first} -> {last}");
    Ok(())
}
