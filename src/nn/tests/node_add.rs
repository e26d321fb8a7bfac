/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : Add 节点单元测试（含广播）
 */

use crate::assert_err;
use crate::nn::{GraphError, GraphInner};
use crate::tensor::Tensor;

#[test]
fn test_add_creation_with_broadcast() -> Result<(), GraphError> {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[4, 3], Some("x"))?;
    let b = graph.new_parameter_node(&[3], Some("b"))?;
    let y = graph.new_add_node(x, b, Some("y"))?;
    assert_eq!(graph.get_node_value_expected_shape(y)?, &[4, 3]);
    Ok(())
}

#[test]
fn test_add_creation_invalid_shape() -> Result<(), GraphError> {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[4, 3], Some("x"))?;
    let b = graph.new_parameter_node(&[5], Some("b"))?;
    assert_err!(graph.new_add_node(x, b, None), GraphError::ShapeMismatch([4, 3], [5]));
    Ok(())
}

#[test]
fn test_add_forward() -> Result<(), GraphError> {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[2, 3], Some("x"))?;
    let b = graph.new_parameter_node(&[3], Some("b"))?;
    let y = graph.new_add_node(x, b, Some("y"))?;

    graph.set_node_value(x, Some(&Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3])))?;
    graph.set_node_value(b, Some(&Tensor::new(&[10., 20., 30.], &[3])))?;
    graph.forward(y)?;
    assert_eq!(
        graph.get_node_value(y)?.unwrap(),
        &Tensor::new(&[11., 22., 33., 14., 25., 36.], &[2, 3])
    );
    Ok(())
}

/// 被广播的父节点得到的梯度是上游梯度沿广播维的和
#[test]
fn test_add_vjp_sums_over_broadcast_axis() -> Result<(), GraphError> {
    let mut graph = GraphInner::new();
    let w = graph.new_parameter_node(&[2, 3], Some("w"))?;
    let b = graph.new_parameter_node(&[3], Some("b"))?;
    let y = graph.new_add_node(w, b, Some("y"))?;
    graph.forward(y)?;

    let upstream = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let node = graph.get_node(y)?;
    let grad_w = node.calc_grad_to_parent(graph.get_node(w)?, &upstream, Some(graph.get_node(b)?))?;
    let grad_b = node.calc_grad_to_parent(graph.get_node(b)?, &upstream, Some(graph.get_node(w)?))?;
    assert_eq!(grad_w, upstream);
    assert_eq!(grad_b, Tensor::new(&[5., 7., 9.], &[3]));
    Ok(())
}
