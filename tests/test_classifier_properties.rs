/*
 * @Author       : 老董
 * @Date         : 2026-02-02
 * @Description  : 分类器的外部可观察性质：拓扑、形状、归一化、模式相关的确定性
 */

use approx::assert_abs_diff_eq;
use mlp_classifier::classifier::{Classifier, ClassifierConfig, ConfigurationError, Mode};
use mlp_classifier::nn::{GraphError, Module};
use mlp_classifier::tensor::Tensor;

#[test]
fn test_mnist_sized_architecture() -> Result<(), ConfigurationError> {
    let classifier = Classifier::new(784, 10, &[512, 256, 128])?;

    let shapes = classifier.layer_shapes();
    assert_eq!(shapes.len(), 4);
    let weights: Vec<_> = shapes.iter().map(|(w, _)| w.clone()).collect();
    let biases: Vec<_> = shapes.iter().map(|(_, b)| b.clone()).collect();
    assert_eq!(
        weights,
        vec![vec![512, 784], vec![256, 512], vec![128, 256], vec![10, 128]]
    );
    assert_eq!(biases, vec![vec![512], vec![256], vec![128], vec![10]]);
    assert_eq!(classifier.parameters().len(), 8);
    assert_eq!(classifier.mode(), Mode::Training);
    Ok(())
}

#[test]
fn test_output_shape_for_any_batch() -> Result<(), GraphError> {
    let config = ClassifierConfig::new(6, 4, &[10, 8]).with_seed(1);
    let mut classifier = Classifier::from_config(config).unwrap();

    for mode in [Mode::Training, Mode::Evaluation] {
        classifier.set_mode(mode);
        for batch in [1, 2, 7, 32] {
            let x = Tensor::normal(0.0, 1.0, &[batch, 6]);
            assert_eq!(classifier.forward(&x)?.shape(), &[batch, 4]);
        }
    }
    Ok(())
}

#[test]
fn test_log_probabilities_are_normalised() -> Result<(), GraphError> {
    let config = ClassifierConfig::new(5, 7, &[16]).with_seed(2);
    let mut classifier = Classifier::from_config(config).unwrap();
    classifier.eval();

    let x = Tensor::normal(0.0, 3.0, &[9, 5]);
    let probs = classifier.forward(&x)?.exp();
    let row_sums = probs.sum_axis_keepdims(1);
    assert_abs_diff_eq!(row_sums, Tensor::ones(&[9, 1]), epsilon = 1e-5);
    assert!(probs.to_vec().iter().all(|&p| p > 0.0 && p <= 1.0));
    Ok(())
}

#[test]
fn test_evaluation_is_deterministic_training_is_not() -> Result<(), GraphError> {
    let config = ClassifierConfig::new(8, 3, &[64, 64]).with_seed(3);
    let mut classifier = Classifier::from_config(config).unwrap();
    let x = Tensor::normal(0.0, 1.0, &[16, 8]);

    classifier.eval();
    let a = classifier.forward(&x)?;
    let b = classifier.forward(&x)?;
    assert_eq!(a, b);

    classifier.train();
    let outputs: Vec<_> = (0..5)
        .map(|_| classifier.forward(&x))
        .collect::<Result<_, _>>()?;
    assert!(outputs.windows(2).any(|pair| pair[0] != pair[1]));
    Ok(())
}

#[test]
fn test_modes_are_independent_between_classifiers() -> Result<(), GraphError> {
    let mut first = Classifier::new(3, 2, &[32]).unwrap();
    let second = Classifier::new(3, 2, &[32]).unwrap();
    first.eval();
    assert_eq!(first.mode(), Mode::Evaluation);
    assert_eq!(second.mode(), Mode::Training);

    // first 的评估模式不影响 second 的 dropout
    let x = Tensor::ones(&[4, 3]);
    assert_eq!(first.forward(&x)?, first.forward(&x)?);
    let outputs: Vec<_> = (0..5)
        .map(|_| second.forward(&x))
        .collect::<Result<_, _>>()?;
    assert!(outputs.windows(2).any(|pair| pair[0] != pair[1]));
    Ok(())
}
