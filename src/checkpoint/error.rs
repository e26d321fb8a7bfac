/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 检查点相关错误
 */

use std::fmt;

use thiserror::Error;

use crate::classifier::ConfigurationError;
use crate::nn::GraphError;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("检查点读写失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("检查点编码失败: {0}")]
    Encode(String),
    #[error("检查点解码失败: {0}")]
    Decode(String),
    #[error("不是检查点文件：文件头为 {found:?}")]
    BadMagic { found: [u8; 4] },
    #[error("不支持的检查点版本: {0}")]
    UnsupportedVersion(u32),
    #[error("检查点记录的架构无效: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("检查点有{recorded}层参数，而记录的架构有{expected}层")]
    LayerCountMismatch { recorded: usize, expected: usize },
    #[error("第{layer}层{kind}的数据长度为{got}，与形状{shape:?}不符")]
    CorruptedParameter {
        layer: usize,
        kind: ParamKind,
        shape: Vec<usize>,
        got: usize,
    },
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// 层内参数的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Weight,
    Bias,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weight => write!(f, "weight"),
            Self::Bias => write!(f, "bias"),
        }
    }
}

/// 一个形状不符的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMismatch {
    /// 层序号（从 0 开始，最后一层为输出层）
    pub layer: usize,
    pub is_output: bool,
    pub kind: ParamKind,
    /// 检查点里记录的形状
    pub recorded: Vec<usize>,
    /// 按记录的架构应有的形状
    pub expected: Vec<usize>,
}

impl ParamMismatch {
    /// 如`hidden_layers.1.weight`、`output.bias`
    pub fn parameter_name(&self) -> String {
        if self.is_output {
            format!("output.{}", self.kind)
        } else {
            format!("hidden_layers.{}.{}", self.layer, self.kind)
        }
    }
}

impl fmt::Display for ParamMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: 记录的形状 {:?}，应为 {:?}",
            self.parameter_name(),
            self.recorded,
            self.expected
        )
    }
}

/// 检查点中的参数形状与其记录的架构不一致；列出所有不一致的参数
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ShapeMismatchError {
    pub mismatches: Vec<ParamMismatch>,
}

impl ShapeMismatchError {
    /// 出现不一致的层序号（去重、升序）
    pub fn layers(&self) -> Vec<usize> {
        let mut layers: Vec<usize> = self.mismatches.iter().map(|m| m.layer).collect();
        layers.dedup();
        layers
    }
}

impl fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "检查点参数形状与架构不符（共{}处）", self.mismatches.len())?;
        for (i, mismatch) in self.mismatches.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{mismatch}")?;
        }
        Ok(())
    }
}
