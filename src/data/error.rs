//! 数据加载错误类型定义

use thiserror::Error;

/// 数据集与批量加载相关错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    /// 特征与标签的样本数不一致
    #[error("样本数不一致: features 有 {features} 个样本, labels 有 {labels} 个")]
    LengthMismatch { features: usize, labels: usize },

    /// 形状不合要求
    #[error("形状不匹配: 期望 {expected}, 实际 {got:?}")]
    ShapeMismatch { expected: String, got: Vec<usize> },

    /// 参数不合法（如 batch_size 为 0）
    #[error("参数不合法: {0}")]
    InvalidArgument(String),
}
