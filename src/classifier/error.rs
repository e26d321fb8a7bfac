/*
 * @Author       : 老董
 * @Date         : 2026-02-17
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-04
 * @Description  : 分类器配置与运行错误
 */

use thiserror::Error;

use crate::nn::GraphError;

/// 分类器结构不合法
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("输入维度必须为正")]
    ZeroInputSize,
    #[error("输出类别数必须为正")]
    ZeroOutputSize,
    #[error("第{index}个隐藏层的宽度必须为正")]
    ZeroHiddenWidth { index: usize },
    #[error("dropout 概率必须是 [0, 1) 内的有限值，但得到了{0}")]
    InvalidDropProbability(f32),
    #[error("构建网络失败：{0}")]
    Graph(#[from] GraphError),
}
