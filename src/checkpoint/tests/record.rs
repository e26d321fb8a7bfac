use super::seeded_classifier;
use crate::assert_err;
use crate::checkpoint::{
    Checkpoint, CheckpointError, LayerParams, ParamKind, ParamMismatch, ParamRecord,
    ShapeMismatchError,
};
use crate::classifier::{ConfigurationError, DEFAULT_DROP_P};
use crate::tensor::Tensor;

#[test]
fn test_from_classifier_records_architecture() {
    let classifier = seeded_classifier(&[6, 5]);
    let checkpoint = Checkpoint::from_classifier(&classifier).unwrap();

    assert_eq!(checkpoint.input_size, 4);
    assert_eq!(checkpoint.output_size, 3);
    assert_eq!(checkpoint.hidden_sizes, vec![6, 5]);
    assert_eq!(checkpoint.parameters.len(), 3);
    assert_eq!(checkpoint.parameters[0].weight.shape, vec![6, 4]);
    assert_eq!(checkpoint.parameters[1].weight.shape, vec![5, 6]);
    assert_eq!(checkpoint.parameters[2].weight.shape, vec![3, 5]);
    assert_eq!(checkpoint.parameters[2].bias.shape, vec![3]);

    let (w0, b0) = &classifier.layer_params().unwrap()[0];
    assert_eq!(checkpoint.parameters[0].weight, ParamRecord::from_tensor(w0));
    assert_eq!(checkpoint.parameters[0].bias.data, b0.to_vec());
}

#[test]
fn test_into_classifier_restores_parameters() {
    let mut original = seeded_classifier(&[6]);
    original.eval();
    let checkpoint = Checkpoint::from_classifier(&original).unwrap();

    let mut restored = checkpoint.to_classifier().unwrap();
    assert_eq!(restored.hidden_sizes(), vec![6]);
    assert_eq!(restored.drop_p(), DEFAULT_DROP_P);
    assert!(restored.is_training());
    assert_eq!(restored.layer_params().unwrap(), original.layer_params().unwrap());

    restored.eval();
    let x = Tensor::new(&[0.1, -0.4, 2.0, 0.7, 1.5, 0.0, -1.0, 0.3], &[2, 4]);
    assert_eq!(restored.forward(&x).unwrap(), original.forward(&x).unwrap());
}

#[test]
fn test_shape_mismatch_names_the_layer() {
    let classifier = seeded_classifier(&[6, 5]);
    let mut checkpoint = Checkpoint::from_classifier(&classifier).unwrap();
    // 记录说第 1 个隐藏层宽度为 5，但权重被换成了[7, 6]
    checkpoint.parameters[1].weight = ParamRecord {
        shape: vec![7, 6],
        data: vec![0.0; 42],
    };

    let Err(CheckpointError::ShapeMismatch(err)) = checkpoint.to_classifier() else {
        panic!("预期 ShapeMismatch");
    };
    assert_eq!(
        err,
        ShapeMismatchError {
            mismatches: vec![ParamMismatch {
                layer: 1,
                is_output: false,
                kind: ParamKind::Weight,
                recorded: vec![7, 6],
                expected: vec![5, 6],
            }]
        }
    );
    let message = err.to_string();
    assert!(message.contains("hidden_layers.1.weight"), "{message}");
}

#[test]
fn test_shape_mismatch_lists_every_parameter() {
    let classifier = seeded_classifier(&[6]);
    let mut checkpoint = Checkpoint::from_classifier(&classifier).unwrap();
    checkpoint.parameters[0].bias = ParamRecord {
        shape: vec![2],
        data: vec![0.0; 2],
    };
    checkpoint.parameters[1].bias = ParamRecord {
        shape: vec![4],
        data: vec![0.0; 4],
    };

    let Err(CheckpointError::ShapeMismatch(err)) = checkpoint.to_classifier() else {
        panic!("预期 ShapeMismatch");
    };
    assert_eq!(err.layers(), vec![0, 1]);
    assert_eq!(err.mismatches.len(), 2);
    assert_eq!(err.mismatches[0].parameter_name(), "hidden_layers.0.bias");
    assert_eq!(err.mismatches[1].parameter_name(), "output.bias");

    let message = err.to_string();
    assert!(message.contains("hidden_layers.0.bias"), "{message}");
    assert!(message.contains("output.bias"), "{message}");
    assert!(message.contains("[4]") && message.contains("[3]"), "{message}");
}

#[test]
fn test_hidden_sizes_disagree_with_parameters() {
    let classifier = seeded_classifier(&[6]);
    let mut checkpoint = Checkpoint::from_classifier(&classifier).unwrap();
    // 参数本身是一致的，但记录的隐藏层宽度被改成了 8
    checkpoint.hidden_sizes = vec![8];

    let Err(CheckpointError::ShapeMismatch(err)) = checkpoint.to_classifier() else {
        panic!("预期 ShapeMismatch");
    };
    assert_eq!(err.layers(), vec![0, 1]);
    assert_eq!(err.mismatches[0].expected, vec![8, 4]);
    assert_eq!(err.mismatches[0].recorded, vec![6, 4]);
}

#[test]
fn test_layer_count_mismatch() {
    let classifier = seeded_classifier(&[6]);
    let mut checkpoint = Checkpoint::from_classifier(&classifier).unwrap();
    checkpoint.parameters.pop();

    assert_err!(
        checkpoint.to_classifier(),
        CheckpointError::LayerCountMismatch { recorded: 1, expected: 2 }
    );
}

#[test]
fn test_corrupted_parameter() {
    let classifier = seeded_classifier(&[6]);
    let mut checkpoint = Checkpoint::from_classifier(&classifier).unwrap();
    checkpoint.parameters[1].weight.data.pop();

    assert_err!(
        checkpoint.to_classifier(),
        CheckpointError::CorruptedParameter { layer: 1, kind: ParamKind::Weight, got: 17, .. }
    );
}

#[test]
fn test_parameter_element_count_overflow() {
    // 形状与架构一致，但 2^40 * 2^40 个元素超出 usize
    let width = 1usize << 40;
    let record = |shape: Vec<usize>, data: Vec<f32>| ParamRecord { shape, data };
    let checkpoint = Checkpoint {
        input_size: width,
        output_size: 2,
        hidden_sizes: vec![width],
        parameters: vec![
            LayerParams {
                weight: record(vec![width, width], vec![]),
                bias: record(vec![width], vec![]),
            },
            LayerParams {
                weight: record(vec![2, width], vec![]),
                bias: record(vec![2], vec![0.0; 2]),
            },
        ],
    };

    assert_err!(
        checkpoint.to_classifier(),
        CheckpointError::CorruptedParameter { layer: 0, kind: ParamKind::Weight, got: 0, .. }
    );
}

#[test]
fn test_invalid_recorded_architecture() {
    let classifier = seeded_classifier(&[6]);
    let mut checkpoint = Checkpoint::from_classifier(&classifier).unwrap();
    checkpoint.input_size = 0;

    assert_err!(
        checkpoint.into_classifier(),
        CheckpointError::Configuration(ConfigurationError::ZeroInputSize)
    );
}
