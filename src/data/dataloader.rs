/*
 * @Author       : 老董
 * @Date         : 2025-01-21
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : DataLoader - PyTorch 风格的数据批量加载器
 *
 * 提供统一的数据迭代 API，支持：
 * - 自动分批 (batch_size)
 * - 随机打乱 (shuffle)
 * - 丢弃不完整批次 (drop_last)
 */

use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::DataError;
use crate::tensor::Tensor;

/// TensorDataset - 持有特征和标签的数据集
///
/// 特征形如[N, D]，标签形如[N]（以 f32 存储的类别下标）
///
/// ```ignore
/// let dataset = TensorDataset::new(features, labels)?;
/// println!("样本数: {}", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct TensorDataset {
    features: Tensor,
    labels: Tensor,
    len: usize,
}

impl TensorDataset {
    pub fn new(features: Tensor, labels: Tensor) -> Result<Self, DataError> {
        if features.dimension() != 2 {
            return Err(DataError::ShapeMismatch {
                expected: "features 为 [N, D]".to_string(),
                got: features.shape().to_vec(),
            });
        }
        if labels.dimension() != 1 {
            return Err(DataError::ShapeMismatch {
                expected: "labels 为 [N]".to_string(),
                got: labels.shape().to_vec(),
            });
        }
        let len = features.shape()[0];
        if len != labels.shape()[0] {
            return Err(DataError::LengthMismatch {
                features: len,
                labels: labels.shape()[0],
            });
        }
        Ok(Self {
            features,
            labels,
            len,
        })
    }

    /// 样本数量
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 每个样本的特征维数
    pub fn feature_dim(&self) -> usize {
        self.features.shape()[1]
    }

    pub const fn features(&self) -> &Tensor {
        &self.features
    }

    pub const fn labels(&self) -> &Tensor {
        &self.labels
    }

    /// 在第`index`个样本处一分为二：`[0, index)`与`[index, N)`
    pub fn split_at(&self, index: usize) -> Result<(Self, Self), DataError> {
        if index > self.len {
            return Err(DataError::InvalidArgument(format!(
                "切分位置 {index} 超出样本数 {}",
                self.len
            )));
        }
        let head = Self {
            features: self.features.slice_rows(0, index),
            labels: self.labels.slice_rows(0, index),
            len: index,
        };
        let tail = Self {
            features: self.features.slice_rows(index, self.len),
            labels: self.labels.slice_rows(index, self.len),
            len: self.len - index,
        };
        Ok((head, tail))
    }
}

/// DataLoader - PyTorch 风格的数据批量加载器
///
/// ```ignore
/// let loader = DataLoader::new(dataset, 32)?
///     .shuffle(true)
///     .drop_last(true);
///
/// for (x_batch, y_batch) in loader.iter() {
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DataLoader {
    dataset: TensorDataset,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
}

impl DataLoader {
    pub fn new(dataset: TensorDataset, batch_size: usize) -> Result<Self, DataError> {
        if batch_size == 0 {
            return Err(DataError::InvalidArgument(
                "DataLoader: batch_size 必须大于 0".to_string(),
            ));
        }
        Ok(Self {
            dataset,
            batch_size,
            shuffle: false,
            drop_last: false,
            seed: None,
        })
    }

    /// 设置是否打乱数据
    pub const fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// 设置是否丢弃最后一个不完整的批次
    pub const fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// 设置随机种子（用于 shuffle）。每次`iter()`都用同一种子，所以各轮顺序相同
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 批次数量
    pub const fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    /// 数据集大小
    pub const fn len(&self) -> usize {
        self.dataset.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub const fn dataset(&self) -> &TensorDataset {
        &self.dataset
    }

    /// 创建迭代器；每次调用都从头开始
    pub fn iter(&self) -> DataLoaderIterator<'_> {
        let n = self.dataset.len();
        let mut indices: Vec<usize> = (0..n).collect();

        if self.shuffle {
            if let Some(seed) = self.seed {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                indices.shuffle(&mut rng);
            } else {
                indices.shuffle(&mut rand::thread_rng());
            }
        }

        DataLoaderIterator {
            loader: self,
            indices,
            current_batch: 0,
        }
    }
}

/// DataLoader 迭代器
pub struct DataLoaderIterator<'a> {
    loader: &'a DataLoader,
    indices: Vec<usize>,
    current_batch: usize,
}

impl Iterator for DataLoaderIterator<'_> {
    type Item = (Tensor, Tensor);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.indices.len();
        let batch_size = self.loader.batch_size;
        let start = self.current_batch * batch_size;
        if start >= n {
            return None;
        }

        let end = (start + batch_size).min(n);
        // drop_last 时跳过不完整的批次
        if self.loader.drop_last && end - start < batch_size {
            return None;
        }
        self.current_batch += 1;

        let batch_indices = &self.indices[start..end];
        let dataset = &self.loader.dataset;
        Some((
            dataset.features.select_rows(batch_indices),
            dataset.labels.select_rows(batch_indices),
        ))
    }
}
