/*
 * @Author       : 老董
 * @Date         : 2026-01-17
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-09
 * @Description  : Linear (全连接) 层：`output = x @ Wᵀ + b`
 *
 * 权重布局与 PyTorch `nn.Linear` 一致：W 为[out_features, in_features]，b 为[out_features]
 */

use crate::nn::{Graph, GraphError, Init, Module, Var, VarMatrixOps};
use crate::tensor::Tensor;

/// Linear (全连接) 层
///
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
///
/// ```ignore
/// let fc = Linear::new(&graph, 784, 128, "fc1")?;
/// let h = fc.forward(&x)?.relu()?;
/// ```
pub struct Linear {
    /// 权重参数 [out_features, in_features]
    weight: Var,
    /// 偏置参数 [out_features]
    bias: Var,
    in_features: usize,
    out_features: usize,
    name: String,
}

impl Linear {
    /// 创建新的 Linear 层：权重 Kaiming 初始化（适合 ReLU），偏置零初始化。
    /// 参数节点命名为`{name}_W`与`{name}_b`
    pub fn new(
        graph: &Graph,
        in_features: usize,
        out_features: usize,
        name: &str,
    ) -> Result<Self, GraphError> {
        Self::with_init(graph, in_features, out_features, name, Init::Kaiming)
    }

    /// 以指定的权重初始化策略创建 Linear 层
    pub fn with_init(
        graph: &Graph,
        in_features: usize,
        out_features: usize,
        name: &str,
        weight_init: Init,
    ) -> Result<Self, GraphError> {
        if in_features == 0 || out_features == 0 {
            return Err(GraphError::InvalidOperation(format!(
                "Linear 层{name}的输入/输出维度必须为正，但得到了{in_features}→{out_features}"
            )));
        }
        let weight = graph.parameter(
            &[out_features, in_features],
            weight_init,
            &format!("{name}_W"),
        )?;
        let bias = graph.parameter(&[out_features], Init::Zeros, &format!("{name}_b"))?;

        Ok(Self {
            weight,
            bias,
            in_features,
            out_features,
            name: name.to_string(),
        })
    }

    /// 前向传播：`x @ Wᵀ + b`，x 形状[batch_size, in_features]
    pub fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let weight_t = self.weight.transpose()?;
        let xw = x.matmul(&weight_t)?;
        xw.try_add(&self.bias)
    }

    pub const fn in_features(&self) -> usize {
        self.in_features
    }

    pub const fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn weight(&self) -> &Var {
        &self.weight
    }

    pub const fn bias(&self) -> &Var {
        &self.bias
    }

    /// 当前权重与偏置的快照
    pub fn weight_and_bias(&self) -> Result<(Tensor, Tensor), GraphError> {
        let missing = |what: &str| {
            GraphError::ComputationError(format!("Linear 层{}的{what}没有值", self.name))
        };
        let weight = self.weight.value()?.ok_or_else(|| missing("权重"))?;
        let bias = self.bias.value()?.ok_or_else(|| missing("偏置"))?;
        Ok((weight, bias))
    }

    /// 覆盖权重与偏置；形状必须与本层一致
    pub fn set_weight_and_bias(&self, weight: &Tensor, bias: &Tensor) -> Result<(), GraphError> {
        self.weight.set_value(weight)?;
        self.bias.set_value(bias)
    }
}

impl Module for Linear {
    fn parameters(&self) -> Vec<Var> {
        vec![self.weight.clone(), self.bias.clone()]
    }
}
