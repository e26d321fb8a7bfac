/*
 * @Author       : 老董
 * @Date         : 2026-02-08
 * @Description  : 分类器配置：网络拓扑 + dropout 概率 + 可选随机种子
 */

use serde::{Deserialize, Serialize};

use super::ConfigurationError;

/// 未指定时的 dropout 概率
pub const DEFAULT_DROP_P: f32 = 0.5;

const fn default_drop_p() -> f32 {
    DEFAULT_DROP_P
}

/// 分类器配置
///
/// 层宽依次为`[input_size] + hidden_sizes + [output_size]`，相邻两个宽度之间是一个全连接层。
///
/// ```ignore
/// let config = ClassifierConfig::new(784, 10, &[512, 256, 128])
///     .with_drop_p(0.2)
///     .with_seed(42);
/// let classifier = Classifier::from_config(config)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub input_size: usize,
    pub output_size: usize,
    #[serde(default)]
    pub hidden_sizes: Vec<usize>,
    #[serde(default = "default_drop_p")]
    pub drop_p: f32,
    /// 参数初始化与 dropout 掩码的种子；None 表示每次运行都不同
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ClassifierConfig {
    pub fn new(input_size: usize, output_size: usize, hidden_sizes: &[usize]) -> Self {
        Self {
            input_size,
            output_size,
            hidden_sizes: hidden_sizes.to_vec(),
            drop_p: DEFAULT_DROP_P,
            seed: None,
        }
    }

    pub fn with_drop_p(mut self, drop_p: f32) -> Self {
        self.drop_p = drop_p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.input_size == 0 {
            return Err(ConfigurationError::ZeroInputSize);
        }
        if self.output_size == 0 {
            return Err(ConfigurationError::ZeroOutputSize);
        }
        if let Some(index) = self.hidden_sizes.iter().position(|&width| width == 0) {
            return Err(ConfigurationError::ZeroHiddenWidth { index });
        }
        if !self.drop_p.is_finite() || !(0.0..1.0).contains(&self.drop_p) {
            return Err(ConfigurationError::InvalidDropProbability(self.drop_p));
        }
        Ok(())
    }

    /// 所有层宽：`[input_size] + hidden_sizes + [output_size]`
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_sizes.len() + 2);
        sizes.push(self.input_size);
        sizes.extend_from_slice(&self.hidden_sizes);
        sizes.push(self.output_size);
        sizes
    }
}
