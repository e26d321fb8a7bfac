mod config;

use crate::classifier::{Classifier, ClassifierConfig};
use crate::data::synthetic::gaussian_blobs;
use crate::data::DataLoader;

/// 2 维特征、3 类的小分类器（无 dropout，固定种子）
fn small_classifier(drop_p: f32) -> Classifier {
    let config = ClassifierConfig::new(2, 3, &[8])
        .with_drop_p(drop_p)
        .with_seed(3);
    Classifier::from_config(config).unwrap()
}

/// 3 个分得很开的高斯簇，按 8 个一批
fn blob_loaders(seed: u64) -> (DataLoader, DataLoader) {
    let dataset = gaussian_blobs(30, 2, 3, 0.3, seed).unwrap();
    let (train, valid) = dataset.split_at(60).unwrap();
    (
        DataLoader::new(train, 8).unwrap().shuffle(true).seed(seed),
        DataLoader::new(valid, 10).unwrap(),
    )
}
