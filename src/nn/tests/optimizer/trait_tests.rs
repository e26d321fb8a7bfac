/*
 * @Author       : 老董
 * @Date         : 2025-12-20
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-02
 * @Description  : Optimizer trait 通用行为测试（以 trait object 使用）
 */

use super::dot_graph;
use crate::nn::optimizer::{Adam, Optimizer, SGD};
use crate::nn::GraphError;

#[test]
fn test_zero_grad_clears_bound_params() -> Result<(), GraphError> {
    let (graph, w, loss) = dot_graph()?;
    let optimizers: Vec<Box<dyn Optimizer>> = vec![
        Box::new(SGD::new(&graph, &[w.clone()], 0.1)),
        Box::new(Adam::new(&graph, &[w.clone()], 0.1)),
    ];

    for mut optimizer in optimizers {
        loss.backward()?;
        assert!(w.grad()?.is_some());
        optimizer.zero_grad()?;
        assert!(w.grad()?.is_none());
    }
    Ok(())
}

#[test]
fn test_step_without_grad_is_noop() -> Result<(), GraphError> {
    let (graph, w, _loss) = dot_graph()?;
    let before = w.value()?.unwrap();
    let mut optimizer: Box<dyn Optimizer> = Box::new(Adam::new(&graph, &[w.clone()], 0.1));
    optimizer.step()?;
    assert_eq!(w.value()?.unwrap(), before);
    Ok(())
}
