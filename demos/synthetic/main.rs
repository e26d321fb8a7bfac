//! # 合成高斯簇分类示例
//!
//! 展示完整流程：
//! - 用`gaussian_blobs`生成 10 类线性可分数据并划分训练/验证集
//! - 构建 [20] -> [128, 64] -> [10] 的分类器
//! - Adam 训练若干轮（每轮输出训练损失、验证损失与准确率）
//! - 保存检查点、重新加载并核对评估模式下的预测
//!
//! ## 运行
//! ```bash
//! RUST_LOG=info cargo run --example synthetic
//! ```

use std::error::Error;

use log::info;
use mlp_classifier::checkpoint::{load_checkpoint, save_checkpoint};
use mlp_classifier::classifier::{Classifier, ClassifierConfig};
use mlp_classifier::data::synthetic::gaussian_blobs;
use mlp_classifier::data::DataLoader;
use mlp_classifier::training::{fit, OptimizerKind, TrainConfig};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // ========== 1. 数据 ==========
    let num_features = 20;
    let num_classes = 10;
    let dataset = gaussian_blobs(100, num_features, num_classes, 0.8, 42)?;
    let (train_set, valid_set) = dataset.split_at(800)?;
    info!("训练集: {} 样本, 验证集: {} 样本", train_set.len(), valid_set.len());

    let train_loader = DataLoader::new(train_set, 64)?.shuffle(true).seed(7);
    let valid_loader = DataLoader::new(valid_set, 100)?;

    // ========== 2. 模型 ==========
    let config = ClassifierConfig::new(num_features, num_classes, &[128, 64]).with_seed(42);
    let mut classifier = Classifier::from_config(config)?;
    info!("分类器各层形状: {:?}", classifier.layer_shapes());

    // ========== 3. 训练 ==========
    let train_config = TrainConfig::new(5, 1e-3)
        .with_optimizer(OptimizerKind::Adam)
        .with_log_every(4);
    let reports = fit(&mut classifier, &train_loader, &valid_loader, &train_config)?;
    if let (Some(first), Some(last)) = (reports.first(), reports.last()) {
        info!(
            "训练损失 {:.3} -> {:.3}，验证准确率 {:.1}%",
            first.train_loss,
            last.train_loss,
            last.valid_accuracy * 100.0
        );
    }

    // ========== 4. 检查点 ==========
    let path = std::env::temp_dir().join("mlp_classifier_synthetic.ckpt");
    save_checkpoint(&classifier, &path)?;
    let mut restored = load_checkpoint(&path)?;
    std::fs::remove_file(&path)?;

    let (sample, _) = valid_loader.iter().next().ok_or("验证集为空")?;
    let expected = classifier.predict(&sample)?;
    let actual = restored.predict(&sample)?;
    info!(
        "重新加载后的预测与原模型{}",
        if expected == actual { "一致" } else { "不一致" }
    );
    Ok(())
}
