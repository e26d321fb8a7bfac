use std::fs;

use crate::assert_err;
use crate::training::{ConfigError, OptimizerKind, TrainConfig};

#[test]
fn test_default_config() {
    let config = TrainConfig::default();
    assert_eq!(config.epochs, 5);
    assert_eq!(config.learning_rate, 1e-3);
    assert_eq!(config.optimizer, OptimizerKind::Adam);
    assert_eq!(config.log_every, 40);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = TrainConfig::new(3, 0.1)
        .with_optimizer(OptimizerKind::Sgd)
        .with_log_every(0);
    assert_eq!(config.epochs, 3);
    assert_eq!(config.learning_rate, 0.1);
    assert_eq!(config.optimizer, OptimizerKind::Sgd);
    assert_eq!(config.log_every, 0);
}

#[test]
fn test_from_json_str_fills_defaults() {
    let config = TrainConfig::from_json_str(r#"{ "epochs": 12, "optimizer": "sgd" }"#).unwrap();
    assert_eq!(config.epochs, 12);
    assert_eq!(config.optimizer, OptimizerKind::Sgd);
    assert_eq!(config.learning_rate, 1e-3);
    assert_eq!(config.log_every, 40);
}

#[test]
fn test_from_json_str_errors() {
    assert_err!(
        TrainConfig::from_json_str(r#"{ "optimizer": "rmsprop" }"#),
        ConfigError::Parse(_)
    );
    assert_err!(TrainConfig::from_json_str("not json"), ConfigError::Parse(_));
    assert_err!(
        TrainConfig::from_json_str(r#"{ "learning_rate": -0.5 }"#),
        ConfigError::Invalid { field: "learning_rate", .. }
    );
    assert_err!(
        TrainConfig::from_json_str(r#"{ "learning_rate": 0.0 }"#),
        ConfigError::Invalid { field: "learning_rate", .. }
    );
}

#[test]
fn test_json_file_round_trip() {
    let path = std::env::temp_dir().join(format!("mlp_train_config_{}.json", std::process::id()));
    let config = TrainConfig::new(7, 0.05).with_optimizer(OptimizerKind::Sgd);
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = TrainConfig::from_json_file(&path);
    fs::remove_file(&path).unwrap();
    assert_eq!(loaded.unwrap(), config);
}

#[test]
fn test_from_missing_file() {
    let path = std::env::temp_dir().join("mlp_train_config_does_not_exist.json");
    assert_err!(TrainConfig::from_json_file(&path), ConfigError::Io { .. });
}
