//! DataLoader / TensorDataset 单元测试

use crate::assert_err;
use crate::data::{DataError, DataLoader, TensorDataset};
use crate::tensor::Tensor;

fn range_dataset(n: usize) -> TensorDataset {
    let features = Tensor::new(&(0..2 * n).map(|x| x as f32).collect::<Vec<_>>(), &[n, 2]);
    let labels = Tensor::new(&(0..n).map(|x| x as f32).collect::<Vec<_>>(), &[n]);
    TensorDataset::new(features, labels).unwrap()
}

#[test]
fn test_tensor_dataset() {
    let features = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2]);
    let labels = Tensor::new(&[0.0, 1.0, 0.0], &[3]);
    let dataset = TensorDataset::new(features, labels).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.feature_dim(), 2);
    assert!(!dataset.is_empty());
}

#[test]
fn test_tensor_dataset_rejects_bad_shapes() {
    // 特征不是二维
    let result = TensorDataset::new(Tensor::zeros(&[3, 2, 2]), Tensor::zeros(&[3]));
    assert_err!(result, DataError::ShapeMismatch { got, .. } if got == &[3, 2, 2]);

    // 标签不是一维
    let result = TensorDataset::new(Tensor::zeros(&[3, 2]), Tensor::zeros(&[3, 1]));
    assert_err!(result, DataError::ShapeMismatch { got, .. } if got == &[3, 1]);

    // 样本数不一致
    let result = TensorDataset::new(Tensor::zeros(&[3, 2]), Tensor::zeros(&[2]));
    assert_err!(result, DataError::LengthMismatch { features: 3, labels: 2 });
}

#[test]
fn test_tensor_dataset_split_at() {
    let dataset = range_dataset(5);
    let (head, tail) = dataset.split_at(3).unwrap();

    assert_eq!(head.len(), 3);
    assert_eq!(tail.len(), 2);
    assert_eq!(head.labels(), &Tensor::new(&[0.0, 1.0, 2.0], &[3]));
    assert_eq!(tail.features(), &Tensor::new(&[6.0, 7.0, 8.0, 9.0], &[2, 2]));

    assert_err!(dataset.split_at(6), DataError::InvalidArgument(_));
}

#[test]
fn test_dataloader_basic() {
    let loader = DataLoader::new(range_dataset(10), 3).unwrap();
    assert_eq!(loader.num_batches(), 4); // 10 / 3 = 3.33, 向上取整 = 4
    assert_eq!(loader.len(), 10);

    let batches: Vec<_> = loader.iter().collect();
    assert_eq!(batches.len(), 4);

    // 前 3 个批次大小为 3
    assert_eq!(batches[0].0.shape(), &[3, 2]);
    assert_eq!(batches[1].0.shape(), &[3, 2]);
    assert_eq!(batches[2].0.shape(), &[3, 2]);
    // 最后一个批次大小为 1
    assert_eq!(batches[3].0.shape(), &[1, 2]);
    assert_eq!(batches[3].1, Tensor::new(&[9.0], &[1]));

    // 不打乱时保持原顺序
    assert_eq!(batches[0].1, Tensor::new(&[0.0, 1.0, 2.0], &[3]));
    assert_eq!(
        batches[0].0,
        Tensor::new(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &[3, 2])
    );
}

#[test]
fn test_dataloader_zero_batch_size() {
    assert_err!(
        DataLoader::new(range_dataset(4), 0),
        DataError::InvalidArgument(msg) if msg.contains("batch_size")
    );
}

#[test]
fn test_dataloader_drop_last() {
    let loader = DataLoader::new(range_dataset(10), 3)
        .unwrap()
        .drop_last(true);
    assert_eq!(loader.num_batches(), 3); // 10 / 3 = 3

    let batches: Vec<_> = loader.iter().collect();
    assert_eq!(batches.len(), 3);
    assert!(batches.iter().all(|(x, _)| x.shape()[0] == 3));
}

#[test]
fn test_dataloader_iter_restarts() {
    let loader = DataLoader::new(range_dataset(7), 4).unwrap();
    let first: Vec<_> = loader.iter().collect();
    let second: Vec<_> = loader.iter().collect();
    assert_eq!(first, second);
}

#[test]
fn test_dataloader_shuffle_with_seed() {
    let dataset = range_dataset(10);

    // 使用相同种子，两次迭代应该产生相同的结果
    let loader1 = DataLoader::new(dataset.clone(), 3)
        .unwrap()
        .shuffle(true)
        .seed(42);
    let loader2 = DataLoader::new(dataset, 3).unwrap().shuffle(true).seed(42);

    let batches1: Vec<_> = loader1.iter().collect();
    let batches2: Vec<_> = loader2.iter().collect();
    assert_eq!(batches1, batches2);
}

#[test]
fn test_dataloader_shuffle_keeps_pairs() {
    let loader = DataLoader::new(range_dataset(12), 5)
        .unwrap()
        .shuffle(true)
        .seed(7);

    let mut seen = Vec::new();
    for (x, y) in loader.iter() {
        let features = x.to_vec();
        for (row, &label) in y.to_vec().iter().enumerate() {
            // 第 i 个样本的特征为 [2i, 2i+1]
            assert_eq!(features[2 * row], 2.0 * label);
            assert_eq!(features[2 * row + 1], 2.0 * label + 1.0);
            seen.push(label as usize);
        }
    }
    seen.sort_unstable();
    assert_eq!(seen, (0..12).collect::<Vec<_>>());
}
