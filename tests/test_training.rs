/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @Description  : 在合成的 10 类线性可分数据上训练，损失应下降
 */

use mlp_classifier::classifier::{Classifier, ClassifierConfig};
use mlp_classifier::data::synthetic::gaussian_blobs;
use mlp_classifier::data::DataLoader;
use mlp_classifier::nn::{Adam, GraphError, Module, NllLoss};
use mlp_classifier::training::{train, validation_step};

#[test]
fn test_training_loss_decreases() -> Result<(), GraphError> {
    let dataset = gaussian_blobs(60, 20, 10, 0.5, 2024).unwrap();
    let (train_set, valid_set) = dataset.split_at(480).unwrap();
    let train_loader = DataLoader::new(train_set, 32).unwrap().shuffle(true).seed(1);
    let valid_loader = DataLoader::new(valid_set, 40).unwrap();

    let config = ClassifierConfig::new(20, 10, &[128, 64]).with_seed(7);
    let mut classifier = Classifier::from_config(config).unwrap();
    let loss_fn = NllLoss::new();
    let mut optimizer = Adam::new(classifier.graph(), &classifier.parameters(), 1e-3);

    let reports = train(
        &mut classifier,
        &train_loader,
        &valid_loader,
        &loss_fn,
        &mut optimizer,
        5,
    )?;

    assert_eq!(reports.len(), 5);
    let first = reports[0].train_loss;
    let last = reports[4].train_loss;
    assert!(last < first, "训练损失没有下降: {first} -> {last}");
    assert!(classifier.is_training());

    let validation = validation_step(&mut classifier, &valid_loader, &loss_fn)?;
    // 训练结束后参数不再变化，评估模式下结果与最后一轮的验证一致
    assert_eq!(validation.loss, reports[4].valid_loss);
    assert_eq!(validation.accuracy, reports[4].valid_accuracy);
    Ok(())
}
