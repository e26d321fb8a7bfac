/*
 * @Author       : 老董
 * @Date         : 2026-02-09
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-11
 * @Description  : 训练配置：轮数、学习率、优化器种类、日志间隔，可从 JSON 加载
 */

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 读取或校验训练配置时的错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("无效的配置项 `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

/// 优化器种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    Sgd,
    #[default]
    Adam,
}

/// 训练配置
///
/// JSON 中缺省的字段取默认值：
/// ```json
/// { "epochs": 5, "learning_rate": 0.001, "optimizer": "adam", "log_every": 40 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f32,
    pub optimizer: OptimizerKind,
    /// 每隔多少个训练步输出一次滑动损失（debug 级别）；0 表示关闭
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 5,
            learning_rate: 1e-3,
            optimizer: OptimizerKind::Adam,
            log_every: 40,
        }
    }
}

impl TrainConfig {
    pub fn new(epochs: usize, learning_rate: f32) -> Self {
        Self {
            epochs,
            learning_rate,
            ..Self::default()
        }
    }

    pub const fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub const fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "learning_rate",
                message: format!("必须是正的有限值，得到 {}", self.learning_rate),
            });
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
