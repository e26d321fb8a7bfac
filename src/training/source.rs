/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 批次来源：可重复遍历的有限 (特征, 标签) 批次序列
 */

use crate::data::DataLoader;
use crate::tensor::Tensor;

/// 可重启的批次来源。每次调用`batches()`都从第一个批次重新开始；
/// 特征形如[batch, input_size]，标签形如[batch]
pub trait BatchSource {
    fn batches(&self) -> Box<dyn Iterator<Item = (Tensor, Tensor)> + '_>;
}

impl BatchSource for DataLoader {
    fn batches(&self) -> Box<dyn Iterator<Item = (Tensor, Tensor)> + '_> {
        Box::new(self.iter())
    }
}

impl BatchSource for [(Tensor, Tensor)] {
    fn batches(&self) -> Box<dyn Iterator<Item = (Tensor, Tensor)> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl BatchSource for Vec<(Tensor, Tensor)> {
    fn batches(&self) -> Box<dyn Iterator<Item = (Tensor, Tensor)> + '_> {
        self.as_slice().batches()
    }
}
