/*
 * @Author       : 老董
 * @Date         : 2026-02-02
 * @Description  : Dropout 节点（inverted dropout），掩码取自图的随机数生成器
 */

use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::super::{check_parents_count, parent_value, NodeHandle, TraitNode};
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;

/// Dropout（inverted dropout）：训练模式下每个元素以概率`p`置零，
/// 保留下来的元素乘以`1/(1-p)`，使期望不变；评估模式下为恒等映射
pub(in crate::nn) struct Dropout {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
    p: f32,
    rng: StdRng,
    /// 最近一次训练模式前向传播所用的（已缩放的）掩码；评估模式下为None
    mask: Option<Tensor>,
}

impl Dropout {
    pub(in crate::nn) fn new(
        parents: &[&NodeHandle],
        p: f32,
        seed: Option<u64>,
    ) -> Result<Self, GraphError> {
        // 1. 必要的验证
        check_parents_count("Dropout", parents, 1)?;
        if !(0.0..1.0).contains(&p) {
            return Err(GraphError::InvalidOperation(format!(
                "Dropout 概率必须在 [0, 1) 区间内，但得到了{p}"
            )));
        }

        // 2. 返回
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape: parents[0].value_expected_shape().to_vec(),
            p,
            rng,
            mask: None,
        })
    }

    fn sample_mask(&mut self, shape: &[usize]) -> Result<Tensor, GraphError> {
        let keep = Bernoulli::new(f64::from(1.0 - self.p))
            .map_err(|e| GraphError::ComputationError(format!("Dropout 掩码采样失败：{e}")))?;
        let scale = 1.0 / (1.0 - self.p);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| if keep.sample(&mut self.rng) { scale } else { 0.0 })
            .collect::<Vec<_>>();
        Ok(Tensor::new(&data, shape))
    }
}

impl TraitNode for Dropout {
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
        is_train: bool,
    ) -> Result<(), GraphError> {
        let x = parent_value(&self.display_node(), parents[0])?;
        if is_train && self.p > 0.0 {
            let mask = self.sample_mask(x.shape())?;
            self.value = Some(x * &mask);
            self.mask = Some(mask);
        } else {
            self.value = Some(x.clone());
            self.mask = None;
        }
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
        _target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        Ok(match &self.mask {
            Some(mask) => upstream_grad * mask,
            None => upstream_grad.clone(),
        })
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
