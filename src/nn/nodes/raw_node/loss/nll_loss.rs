/*
 * @Author       : 老董
 * @Date         : 2026-02-08
 * @Description  : 负对数似然损失（NLL Loss），与 LogSoftmax 搭配即为交叉熵。
 *                 父节点：[log_probs: [batch, classes], labels: [batch]]，
 *                 labels 为以 f32 存储的类别下标；损失取批内均值，形状为[1, 1]。
 */

use super::super::{check_parents_count, parent_value, NodeHandle, TraitNode};
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;

pub(in crate::nn) struct NllLoss {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
    log_probs_id: NodeId,
}

impl NllLoss {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 必要的验证
        check_parents_count("NllLoss", parents, 2)?;
        let log_probs_shape = parents[0].value_expected_shape();
        let labels_shape = parents[1].value_expected_shape();
        if log_probs_shape.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: log_probs_shape.len(),
                message: format!(
                    "NllLoss的预测输入必须形如[batch, classes]，但得到了{log_probs_shape:?}"
                ),
            });
        }
        if labels_shape != [log_probs_shape[0]] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![log_probs_shape[0]],
                got: labels_shape.to_vec(),
                message: "NllLoss的标签必须是与批大小等长的一维类别下标".to_string(),
            });
        }

        // 2. 返回
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape: vec![1, 1],
            log_probs_id: parents[0].id(),
        })
    }

    /// 把以 f32 存储的标签转成类别下标，并校验其落在 [0, classes) 内
    fn label_indices(labels: &Tensor, classes: usize) -> Result<Vec<usize>, GraphError> {
        labels
            .to_vec()
            .into_iter()
            .map(|label| {
                if label.fract() != 0.0 || label < 0.0 || label as usize >= classes {
                    Err(GraphError::ComputationError(format!(
                        "标签{label}不是[0, {classes})内的类别下标"
                    )))
                } else {
                    Ok(label as usize)
                }
            })
            .collect()
    }
}

impl TraitNode for NllLoss {
    fn id(&self) -> NodeId {
        self.id
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        _is_train: bool,
    ) -> Result<(), GraphError> {
        let owner = self.display_node();
        let log_probs = parent_value(&owner, parents[0])?;
        let labels = parent_value(&owner, parents[1])?;
        let (batch, classes) = (log_probs.shape()[0], log_probs.shape()[1]);

        let indices = Self::label_indices(labels, classes)?;
        let picked: f32 = indices
            .iter()
            .enumerate()
            .map(|(row, &class)| log_probs[[row, class]])
            .sum();
        self.value = Some(Tensor::new(&[-picked / batch as f32], &[1, 1]));
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn clear_value(&mut self) {
        self.value = None;
    }

    fn calc_grad_to_parent(
        &self,
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        if target_parent.id() != self.log_probs_id {
            return Err(GraphError::InvalidOperation(format!(
                "{}的标签输入不可求导",
                self.display_node()
            )));
        }
        let owner = self.display_node();
        let labels = assistant_parent
            .map(|parent| parent_value(&owner, parent))
            .transpose()?
            .ok_or_else(|| {
                GraphError::ComputationError(format!("{owner}缺少标签父节点"))
            })?;

        let shape = target_parent.value_expected_shape();
        let (batch, classes) = (shape[0], shape[1]);
        let scale = upstream_grad.get_data_number().unwrap_or(1.0) / batch as f32;

        let mut grad = Tensor::zeros(shape);
        for (row, class) in Self::label_indices(labels, classes)?.into_iter().enumerate() {
            grad[[row, class]] = -scale;
        }
        Ok(grad)
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
