/*
 * @Author       : 老董
 * @Date         : 2026-02-12
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-12
 * @Description  : 训练/验证循环
 *
 * 每轮：训练模式下遍历训练批次（清零梯度 -> 前向 -> NLL 损失 -> 反向 -> 更新），
 * 随后切到评估模式跑一遍验证集，再切回训练模式。
 * 任何计算错误都原样向上传播并终止循环。
 */

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{BatchSource, OptimizerKind, TrainConfig};
use crate::classifier::Classifier;
use crate::nn::{Adam, GraphError, Module, NllLoss, Optimizer, SGD};
use crate::tensor::Tensor;

/// 单轮训练的汇总
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// 从 1 开始计数
    pub epoch: usize,
    /// 本轮各训练批次损失的平均值
    pub train_loss: f32,
    pub valid_loss: f32,
    pub valid_accuracy: f32,
}

/// 一次验证的结果（均为按批次平均）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub loss: f32,
    pub accuracy: f32,
}

/// 训练`epochs`轮，返回每轮的汇总。结束时分类器处于训练模式
pub fn train<T, V>(
    classifier: &mut Classifier,
    train_batches: &T,
    validation_batches: &V,
    loss_fn: &NllLoss,
    optimizer: &mut dyn Optimizer,
    epochs: usize,
) -> Result<Vec<EpochReport>, GraphError>
where
    T: BatchSource + ?Sized,
    V: BatchSource + ?Sized,
{
    run_epochs(
        classifier,
        train_batches,
        validation_batches,
        loss_fn,
        optimizer,
        epochs,
        0,
    )
}

/// 按`TrainConfig`构建优化器与损失函数并训练
pub fn fit<T, V>(
    classifier: &mut Classifier,
    train_batches: &T,
    validation_batches: &V,
    config: &TrainConfig,
) -> Result<Vec<EpochReport>, GraphError>
where
    T: BatchSource + ?Sized,
    V: BatchSource + ?Sized,
{
    config
        .validate()
        .map_err(|e| GraphError::InvalidOperation(e.to_string()))?;
    let loss_fn = NllLoss::new();
    let mut optimizer = build_optimizer(config, classifier);
    run_epochs(
        classifier,
        train_batches,
        validation_batches,
        &loss_fn,
        optimizer.as_mut(),
        config.epochs,
        config.log_every,
    )
}

/// 为分类器的全部参数创建配置指定的优化器
pub fn build_optimizer(config: &TrainConfig, classifier: &Classifier) -> Box<dyn Optimizer> {
    let params = classifier.parameters();
    let graph = classifier.graph();
    match config.optimizer {
        OptimizerKind::Sgd => Box::new(SGD::new(graph, &params, config.learning_rate)),
        OptimizerKind::Adam => Box::new(Adam::new(graph, &params, config.learning_rate)),
    }
}

/// 在评估模式下计算验证集的平均损失与 top-1 准确率，不计算梯度、不改动参数。
/// 结束后恢复分类器原来的模式
pub fn validation_step<V: BatchSource + ?Sized>(
    classifier: &mut Classifier,
    validation_batches: &V,
    loss_fn: &NllLoss,
) -> Result<ValidationReport, GraphError> {
    let previous = classifier.mode();
    classifier.eval();
    let result = evaluate(classifier, validation_batches, loss_fn);
    classifier.set_mode(previous);
    result
}

/// 一个批次的 top-1 准确率：log 概率[batch, classes]逐行取 argmax 与标签[batch]比较。
/// exp 单调，故直接在 log 概率上取 argmax
pub fn accuracy(log_probs: &Tensor, labels: &Tensor) -> f32 {
    let predicted = log_probs.argmax(1).to_vec();
    let labels = labels.to_vec();
    if labels.is_empty() {
        return 0.0;
    }
    let correct = predicted
        .iter()
        .zip(&labels)
        .filter(|(p, l)| p == l)
        .count();
    correct as f32 / labels.len() as f32
}

fn run_epochs<T, V>(
    classifier: &mut Classifier,
    train_batches: &T,
    validation_batches: &V,
    loss_fn: &NllLoss,
    optimizer: &mut dyn Optimizer,
    epochs: usize,
    log_every: usize,
) -> Result<Vec<EpochReport>, GraphError>
where
    T: BatchSource + ?Sized,
    V: BatchSource + ?Sized,
{
    let mut reports = Vec::with_capacity(epochs);
    for epoch in 1..=epochs {
        classifier.train();
        let train_loss = train_epoch(
            classifier,
            train_batches,
            loss_fn,
            optimizer,
            (epoch, epochs),
            log_every,
        )?;

        let validation = validation_step(classifier, validation_batches, loss_fn);
        classifier.train();
        let validation = validation?;

        info!(
            "Epoch: {epoch}/{epochs}.. Training Loss: {train_loss:.3}.. Validation Loss: {:.3}.. Accuracy: {:.3}",
            validation.loss, validation.accuracy
        );
        reports.push(EpochReport {
            epoch,
            train_loss,
            valid_loss: validation.loss,
            valid_accuracy: validation.accuracy,
        });
    }
    Ok(reports)
}

/// 跑一轮训练，返回各批次损失的平均值
fn train_epoch<T: BatchSource + ?Sized>(
    classifier: &Classifier,
    train_batches: &T,
    loss_fn: &NllLoss,
    optimizer: &mut dyn Optimizer,
    (epoch, epochs): (usize, usize),
    log_every: usize,
) -> Result<f32, GraphError> {
    let mut loss_sum = 0.0;
    let mut running_loss = 0.0;
    let mut steps = 0usize;

    for (features, labels) in train_batches.batches() {
        optimizer.zero_grad()?;
        let log_probs = classifier.forward_var(&features)?;
        let loss = loss_fn.forward(&log_probs, &labels)?;
        let loss_value = loss.backward()?;
        optimizer.step()?;

        if !loss_value.is_finite() {
            warn!("Epoch {epoch} 第 {} 步的损失不是有限值: {loss_value}", steps + 1);
        }
        loss_sum += loss_value;
        running_loss += loss_value;
        steps += 1;

        if log_every > 0 && steps % log_every == 0 {
            debug!(
                "Epoch: {epoch}/{epochs}.. Step: {steps}.. Running Loss: {:.4}",
                running_loss / log_every as f32
            );
            running_loss = 0.0;
        }
    }

    if steps == 0 {
        return Err(GraphError::InvalidOperation(
            "训练集没有任何批次，无法计算平均损失".to_string(),
        ));
    }
    Ok(loss_sum / steps as f32)
}

fn evaluate<V: BatchSource + ?Sized>(
    classifier: &Classifier,
    validation_batches: &V,
    loss_fn: &NllLoss,
) -> Result<ValidationReport, GraphError> {
    let mut loss_sum = 0.0;
    let mut accuracy_sum = 0.0;
    let mut num_batches = 0usize;

    for (features, labels) in validation_batches.batches() {
        let log_probs = classifier.forward_var(&features)?;
        let loss = loss_fn.forward(&log_probs, &labels)?;
        // 只做前向，不触碰梯度
        loss.forward()?;
        loss_sum += loss.item()?;

        let log_probs = log_probs.value()?.ok_or_else(|| {
            GraphError::ComputationError("验证时输出节点没有值".to_string())
        })?;
        accuracy_sum += accuracy(&log_probs, &labels);
        num_batches += 1;
    }

    if num_batches == 0 {
        return Err(GraphError::InvalidOperation(
            "验证集没有任何批次，无法计算平均损失".to_string(),
        ));
    }
    let n = num_batches as f32;
    Ok(ValidationReport {
        loss: loss_sum / n,
        accuracy: accuracy_sum / n,
    })
}
