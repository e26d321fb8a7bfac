use std::fs;
use std::path::PathBuf;

use super::seeded_classifier;
use crate::assert_err;
use crate::checkpoint::{load_checkpoint, save_checkpoint, CheckpointError, Format};
use crate::classifier::{Classifier, ClassifierConfig};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mlp_ckpt_{}_{name}", std::process::id()))
}

#[test]
fn test_format_from_path() {
    assert_eq!(Format::from_path(&PathBuf::from("a/model.json")), Format::Json);
    assert_eq!(Format::from_path(&PathBuf::from("model.JSON")), Format::Json);
    assert_eq!(Format::from_path(&PathBuf::from("model.bin")), Format::Binary);
    assert_eq!(Format::from_path(&PathBuf::from("model")), Format::Binary);
}

#[test]
fn test_save_and_load_binary() {
    let path = temp_path("binary.ckpt");
    let config = ClassifierConfig::new(4, 3, &[6, 5]).with_drop_p(0.2).with_seed(9);
    let mut original = Classifier::from_config(config).unwrap();
    save_checkpoint(&original, &path).unwrap();

    let loaded = load_checkpoint(&path);
    fs::remove_file(&path).unwrap();
    let mut loaded = loaded.unwrap();

    assert_eq!(loaded.input_size(), 4);
    assert_eq!(loaded.output_size(), 3);
    assert_eq!(loaded.hidden_sizes(), vec![6, 5]);
    // dropout 概率不随检查点保存
    assert_eq!(loaded.drop_p(), 0.5);

    original.eval();
    loaded.eval();
    let x = Tensor::new(&[1.0, 0.5, -0.5, 2.0, 0.0, 0.0, 3.0, -1.0, 0.2, 0.2, 0.2, 0.2], &[3, 4]);
    assert_eq!(loaded.forward(&x).unwrap(), original.forward(&x).unwrap());
}

#[test]
fn test_save_and_load_json() {
    let path = temp_path("model.json");
    let mut original = seeded_classifier(&[5]);
    save_checkpoint(&original, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let loaded = load_checkpoint(&path);
    fs::remove_file(&path).unwrap();
    assert!(text.trim_start().starts_with('{'));
    let mut loaded = loaded.unwrap();

    original.eval();
    loaded.eval();
    let x = Tensor::new(&[0.3, -0.2, 1.1, 0.0], &[1, 4]);
    assert_abs_diff_eq!(
        loaded.forward(&x).unwrap(),
        original.forward(&x).unwrap(),
        epsilon = 1e-5
    );
}

#[test]
fn test_save_overwrites_and_leaves_no_temp_file() {
    let path = temp_path("overwrite.ckpt");
    save_checkpoint(&seeded_classifier(&[2]), &path).unwrap();
    save_checkpoint(&seeded_classifier(&[7]), &path).unwrap();

    let temp = path.with_file_name(format!(
        ".{}.tmp",
        path.file_name().unwrap().to_string_lossy()
    ));
    assert!(!temp.exists());

    let loaded = load_checkpoint(&path);
    fs::remove_file(&path).unwrap();
    assert_eq!(loaded.unwrap().hidden_sizes(), vec![7]);
}

#[test]
fn test_save_into_missing_directory() {
    let path = temp_path("no_such_dir").join("model.ckpt");
    assert_err!(save_checkpoint(&seeded_classifier(&[2]), &path), CheckpointError::Io(_));
    assert!(!path.exists());
}

#[test]
fn test_load_missing_file() {
    assert_err!(load_checkpoint(temp_path("missing.ckpt")), CheckpointError::Io(_));
}

#[test]
fn test_load_wrong_format() {
    // JSON 内容但扩展名为二进制
    let json_path = temp_path("wrong.json");
    let bin_path = temp_path("wrong.ckpt");
    save_checkpoint(&seeded_classifier(&[2]), &json_path).unwrap();
    fs::rename(&json_path, &bin_path).unwrap();

    let result = load_checkpoint(&bin_path);
    fs::remove_file(&bin_path).unwrap();
    assert_err!(result, CheckpointError::BadMagic { .. });
}
