/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-03
 * @Description  : 检查点的保存/加载往返，以及形状不符时的报错
 */

use std::fs;
use std::path::PathBuf;

use mlp_classifier::checkpoint::{load_checkpoint, save_checkpoint, Checkpoint, CheckpointError};
use mlp_classifier::classifier::{Classifier, ClassifierConfig};
use mlp_classifier::data::synthetic::gaussian_blobs;
use mlp_classifier::data::DataLoader;
use mlp_classifier::tensor::Tensor;
use mlp_classifier::training::{fit, TrainConfig};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mlp_it_{}_{name}", std::process::id()))
}

#[test]
fn test_round_trip_after_training() {
    let dataset = gaussian_blobs(20, 4, 3, 0.4, 5).unwrap();
    let (train_set, valid_set) = dataset.split_at(45).unwrap();
    let train_loader = DataLoader::new(train_set, 9).unwrap();
    let valid_loader = DataLoader::new(valid_set, 5).unwrap();

    let config = ClassifierConfig::new(4, 3, &[12, 6]).with_seed(8);
    let mut classifier = Classifier::from_config(config).unwrap();
    fit(
        &mut classifier,
        &train_loader,
        &valid_loader,
        &TrainConfig::new(2, 0.01),
    )
    .unwrap();

    for name in ["trained.ckpt", "trained.json"] {
        let path = temp_path(name);
        save_checkpoint(&classifier, &path).unwrap();
        let loaded = load_checkpoint(&path);
        fs::remove_file(&path).unwrap();
        let mut loaded = loaded.unwrap();

        assert_eq!(loaded.input_size(), classifier.input_size());
        assert_eq!(loaded.output_size(), classifier.output_size());
        assert_eq!(loaded.hidden_sizes(), classifier.hidden_sizes());

        classifier.eval();
        loaded.eval();
        let x = valid_loader.dataset().features().clone();
        let expected = classifier.forward(&x).unwrap();
        let actual = loaded.forward(&x).unwrap();
        approx::assert_abs_diff_eq!(actual, expected, epsilon = 1e-5);
        classifier.train();
    }
}

#[test]
fn test_mismatched_record_names_layer() {
    let classifier = Classifier::new(5, 2, &[4, 3]).unwrap();
    let mut checkpoint = Checkpoint::from_classifier(&classifier).unwrap();
    // 第 1 层偏置与记录的 hidden_sizes[1] = 3 不符
    checkpoint.parameters[1].bias.shape = vec![6];
    checkpoint.parameters[1].bias.data = vec![0.0; 6];

    let path = temp_path("mismatch.ckpt");
    let mut bytes = Vec::new();
    checkpoint
        .write_to(&mut bytes, mlp_classifier::checkpoint::Format::Binary)
        .unwrap();
    fs::write(&path, bytes).unwrap();

    let result = load_checkpoint(&path);
    fs::remove_file(&path).unwrap();
    match result {
        Err(CheckpointError::ShapeMismatch(err)) => {
            assert_eq!(err.layers(), vec![1]);
            assert!(err.to_string().contains("hidden_layers.1.bias"));
        }
        other => panic!("预期 ShapeMismatch，实际得到 {other:?}"),
    }
}

#[test]
fn test_loaded_classifier_uses_default_dropout() {
    let config = ClassifierConfig::new(3, 2, &[4]).with_drop_p(0.1);
    let classifier = Classifier::from_config(config).unwrap();
    let path = temp_path("dropout.ckpt");
    save_checkpoint(&classifier, &path).unwrap();
    let loaded = load_checkpoint(&path);
    fs::remove_file(&path).unwrap();

    let mut loaded = loaded.unwrap();
    assert_eq!(loaded.drop_p(), 0.5);
    assert!(loaded.is_training());

    let proba = loaded.predict_proba(&Tensor::ones(&[2, 3])).unwrap();
    assert_eq!(proba.shape(), &[2, 2]);
    assert!(loaded.is_training());
}
