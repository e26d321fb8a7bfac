/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : 合成数据集：各类别样本围绕各自中心呈高斯分布，便于测试与演示
 */

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{DataError, TensorDataset};
use crate::tensor::Tensor;

/// 类别中心每一维的取值范围
const CENTER_RANGE: f32 = 4.0;

/// 生成`num_classes`个高斯簇，每簇`samples_per_class`个样本，特征维数`num_features`。
///
/// 类别中心在`[-4, 4)`内均匀采样，样本 = 中心 + N(0, spread²) 噪声；
/// 返回前整体打乱。`spread`较小时各簇近似线性可分。
/// 同一`seed`产生完全相同的数据集。
pub fn gaussian_blobs(
    samples_per_class: usize,
    num_features: usize,
    num_classes: usize,
    spread: f32,
    seed: u64,
) -> Result<TensorDataset, DataError> {
    if samples_per_class == 0 || num_features == 0 || num_classes == 0 {
        return Err(DataError::InvalidArgument(format!(
            "gaussian_blobs: 样本数({samples_per_class})、特征维数({num_features})、类别数({num_classes})都必须大于 0"
        )));
    }
    if !spread.is_finite() || spread < 0.0 {
        return Err(DataError::InvalidArgument(format!(
            "gaussian_blobs: spread 必须是非负有限值，得到 {spread}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let center_dist = Uniform::from(-CENTER_RANGE..CENTER_RANGE);
    let centers: Vec<Vec<f32>> = (0..num_classes)
        .map(|_| (0..num_features).map(|_| center_dist.sample(&mut rng)).collect())
        .collect();

    let total = samples_per_class * num_classes;
    let noise = Tensor::normal_with_rng(0.0, spread, &[total, num_features], &mut rng).to_vec();

    let mut order: Vec<usize> = (0..total).collect();
    order.shuffle(&mut rng);

    let mut features = Vec::with_capacity(total * num_features);
    let mut labels = Vec::with_capacity(total);
    for &sample in &order {
        let class = sample / samples_per_class;
        let offset = sample * num_features;
        features.extend(
            centers[class]
                .iter()
                .zip(&noise[offset..offset + num_features])
                .map(|(c, n)| c + n),
        );
        labels.push(class as f32);
    }

    TensorDataset::new(
        Tensor::new(&features, &[total, num_features]),
        Tensor::new(&labels, &[total]),
    )
}
