/*
 * @Author       : 老董
 * @Date         : 2025-12-22
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-13
 * @Description  : Linear layer 单元测试（Batch-First，权重布局 [out, in]）
 */

use crate::assert_err;
use crate::nn::{Graph, GraphError, Init, Linear, Module};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_linear_creation() -> Result<(), GraphError> {
    let graph = Graph::new_with_seed(42);
    let fc = Linear::new(&graph, 784, 128, "fc1")?;

    assert_eq!(fc.in_features(), 784);
    assert_eq!(fc.out_features(), 128);
    assert_eq!(fc.name(), "fc1");
    assert_eq!(fc.weight().value_expected_shape()?, vec![128, 784]);
    assert_eq!(fc.bias().value_expected_shape()?, vec![128]);

    let inner = graph.inner();
    assert_eq!(inner.get_node_name(fc.weight().node_id())?, "fc1_W");
    assert_eq!(inner.get_node_name(fc.bias().node_id())?, "fc1_b");
    Ok(())
}

#[test]
fn test_linear_rejects_zero_features() {
    let graph = Graph::new();
    let result = Linear::new(&graph, 0, 3, "fc");
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
    let result = Linear::new(&graph, 3, 0, "fc");
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
}

#[test]
fn test_linear_bias_starts_at_zero() -> Result<(), GraphError> {
    let graph = Graph::new_with_seed(1);
    let fc = Linear::new(&graph, 4, 3, "fc")?;
    let (weight, bias) = fc.weight_and_bias()?;
    assert_eq!(bias, Tensor::zeros(&[3]));
    assert_ne!(weight, Tensor::zeros(&[3, 4]));
    Ok(())
}

#[test]
fn test_linear_forward() -> Result<(), GraphError> {
    let graph = Graph::new();
    let fc = Linear::with_init(&graph, 2, 3, "fc", Init::Zeros)?;
    fc.set_weight_and_bias(
        &Tensor::new(&[1.0, 0.0, 0.0, 1.0, 1.0, 1.0], &[3, 2]),
        &Tensor::new(&[0.5, -0.5, 0.0], &[3]),
    )?;

    let x = graph.input(&Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2]))?;
    let y = fc.forward(&x)?;
    assert_eq!(y.value_expected_shape()?, vec![2, 3]);

    y.forward()?;
    let expected = Tensor::new(&[1.5, 1.5, 3.0, 3.5, 3.5, 7.0], &[2, 3]);
    assert_abs_diff_eq!(y.value()?.unwrap(), expected, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_linear_forward_rejects_wrong_input_width() -> Result<(), GraphError> {
    let graph = Graph::new();
    let fc = Linear::new(&graph, 4, 3, "fc")?;
    let x = graph.input(&Tensor::zeros(&[2, 5]))?;
    assert_err!(fc.forward(&x), GraphError::ShapeMismatch { .. });
    Ok(())
}

#[test]
fn test_linear_set_weight_and_bias_shape_mismatch() -> Result<(), GraphError> {
    let graph = Graph::new();
    let fc = Linear::new(&graph, 4, 3, "fc")?;
    assert_err!(
        fc.set_weight_and_bias(&Tensor::zeros(&[4, 3]), &Tensor::zeros(&[3])),
        GraphError::ShapeMismatch([3, 4], [4, 3])
    );
    Ok(())
}

#[test]
fn test_linear_parameters_and_count() -> Result<(), GraphError> {
    let graph = Graph::new();
    let fc = Linear::new(&graph, 784, 128, "fc")?;
    let params = fc.parameters();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].node_id(), fc.weight().node_id());
    assert_eq!(params[1].node_id(), fc.bias().node_id());
    assert_eq!(fc.num_params(), 784 * 128 + 128);
    Ok(())
}
