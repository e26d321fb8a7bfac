//! # MLP Classifier
//!
//! `mlp_classifier`是一个用纯rust实现的全连接（前馈）分类网络：
//! 隐藏层宽度可配置，每个隐藏层为 全连接 -> ReLU -> Dropout，输出层给出各类别的 log 概率。
//! 提供训练/验证循环（NLL 损失 + SGD/Adam）以及检查点的保存与加载。
//!
//! ```ignore
//! use mlp_classifier::{fit, load_checkpoint, save_checkpoint, Classifier, TrainConfig};
//!
//! let mut classifier = Classifier::new(784, 10, &[512, 256, 128])?;
//! let reports = fit(&mut classifier, &train_loader, &valid_loader, &TrainConfig::default())?;
//! save_checkpoint(&classifier, "model.ckpt")?;
//! let restored = load_checkpoint("model.ckpt")?;
//! ```

pub mod checkpoint;
pub mod classifier;
pub mod data;
pub mod errors;
pub mod nn;
pub mod tensor;
pub mod training;
pub mod utils;

pub use checkpoint::{load_checkpoint, save_checkpoint, CheckpointError, ShapeMismatchError};
pub use classifier::{Classifier, ClassifierConfig, ConfigurationError, Mode};
pub use tensor::Tensor;
pub use training::{fit, train, validation_step, EpochReport, TrainConfig, ValidationReport};
