/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 检查点记录：架构（各层宽度）+ 按层序排列的权重/偏置
 */

use serde::{Deserialize, Serialize};

use super::{CheckpointError, ParamKind, ParamMismatch, ShapeMismatchError};
use crate::classifier::{Classifier, ClassifierConfig};
use crate::tensor::Tensor;

/// 单个参数张量：形状 + 行优先展开的数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl ParamRecord {
    pub fn from_tensor(tensor: &Tensor) -> Self {
        Self {
            shape: tensor.shape().to_vec(),
            data: tensor.to_vec(),
        }
    }

    fn to_tensor(&self, layer: usize, kind: ParamKind) -> Result<Tensor, CheckpointError> {
        // 形状来自外部文件，元素个数可能溢出
        let expected_len = self
            .shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d));
        if expected_len != Some(self.data.len()) {
            return Err(CheckpointError::CorruptedParameter {
                layer,
                kind,
                shape: self.shape.clone(),
                got: self.data.len(),
            });
        }
        Ok(Tensor::new(&self.data, &self.shape))
    }
}

/// 一层的参数：权重[out, in]与偏置[out]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    pub weight: ParamRecord,
    pub bias: ParamRecord,
}

/// 分类器检查点。dropout 概率不在其中，加载时取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub input_size: usize,
    pub output_size: usize,
    pub hidden_sizes: Vec<usize>,
    /// 按层序：各隐藏层，最后为输出层
    pub parameters: Vec<LayerParams>,
}

impl Checkpoint {
    /// 记录分类器的架构与当前参数；`hidden_sizes`取自除输出层外各层的输出宽度
    pub fn from_classifier(classifier: &Classifier) -> Result<Self, CheckpointError> {
        let parameters = classifier
            .layer_params()?
            .iter()
            .map(|(weight, bias)| LayerParams {
                weight: ParamRecord::from_tensor(weight),
                bias: ParamRecord::from_tensor(bias),
            })
            .collect();
        Ok(Self {
            input_size: classifier.input_size(),
            output_size: classifier.output_size(),
            hidden_sizes: classifier.hidden_sizes(),
            parameters,
        })
    }

    /// 按记录的架构新建分类器（默认 dropout 概率）并载入全部参数。
    /// 任何一步失败都不会返回分类器
    pub fn into_classifier(self) -> Result<Classifier, CheckpointError> {
        self.to_classifier()
    }

    /// 同`into_classifier`，但不消耗记录
    pub fn to_classifier(&self) -> Result<Classifier, CheckpointError> {
        let config = ClassifierConfig::new(self.input_size, self.output_size, &self.hidden_sizes);
        config.validate()?;
        self.check_shapes(&config.layer_sizes())?;

        let params = self
            .parameters
            .iter()
            .enumerate()
            .map(|(layer, p)| {
                Ok((
                    p.weight.to_tensor(layer, ParamKind::Weight)?,
                    p.bias.to_tensor(layer, ParamKind::Bias)?,
                ))
            })
            .collect::<Result<Vec<_>, CheckpointError>>()?;

        let classifier = Classifier::from_config(config)?;
        classifier.load_layer_params(&params)?;
        Ok(classifier)
    }

    /// 核对每层参数形状与`sizes`（[input] + hidden + [output]）推出的形状，收集全部不符
    fn check_shapes(&self, sizes: &[usize]) -> Result<(), CheckpointError> {
        let expected_layers = sizes.len() - 1;
        if self.parameters.len() != expected_layers {
            return Err(CheckpointError::LayerCountMismatch {
                recorded: self.parameters.len(),
                expected: expected_layers,
            });
        }

        let mut mismatches = Vec::new();
        for (layer, (params, pair)) in self.parameters.iter().zip(sizes.windows(2)).enumerate() {
            let is_output = layer + 1 == expected_layers;
            let (fan_in, fan_out) = (pair[0], pair[1]);
            let checks = [
                (ParamKind::Weight, &params.weight.shape, vec![fan_out, fan_in]),
                (ParamKind::Bias, &params.bias.shape, vec![fan_out]),
            ];
            for (kind, recorded, expected) in checks {
                if *recorded != expected {
                    mismatches.push(ParamMismatch {
                        layer,
                        is_output,
                        kind,
                        recorded: recorded.clone(),
                        expected,
                    });
                }
            }
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(ShapeMismatchError { mismatches }.into())
        }
    }
}
