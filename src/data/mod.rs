//! 数据加载模块
//!
//! 提供数据集、批量加载与合成数据。
//!
//! # 主要组件
//!
//! - [`DataLoader`]: `PyTorch` 风格的数据批量加载器
//! - [`TensorDataset`]: 持有特征和标签的数据集
//! - [`synthetic`]: 线性可分的高斯团合成数据（测试与演示用）
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use mlp_classifier::data::{DataLoader, TensorDataset};
//!
//! let dataset = TensorDataset::new(train_x, train_y)?;
//! let loader = DataLoader::new(dataset, 64)?.shuffle(true).seed(42);
//!
//! for (x_batch, y_batch) in loader.iter() {
//!     let log_probs = classifier.forward_var(&x_batch)?;
//!     // ...
//! }
//! ```

mod dataloader;
pub mod error;
pub mod synthetic;

#[cfg(test)]
mod tests;

pub use dataloader::{DataLoader, DataLoaderIterator, TensorDataset};
pub use error::DataError;
