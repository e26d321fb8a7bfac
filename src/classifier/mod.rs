/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 前馈分类器（多层感知机）
 *
 * 每个隐藏层：全连接 -> ReLU -> Dropout（仅训练模式生效）；
 * 输出层：全连接 -> 沿类别维的 log-softmax。
 * 每个分类器独占一张计算图，因此训练/评估模式互不影响。
 */

mod config;
mod error;


pub use config::{ClassifierConfig, DEFAULT_DROP_P};
pub use error::ConfigurationError;

use std::fmt;

use log::debug;

use crate::nn::{
    Graph, GraphError, Init, Linear, ModelState, Module, Var, VarActivationOps,
};
use crate::tensor::Tensor;

/// 分类器当前所处的模式，只影响 dropout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Training,
    Evaluation,
}

/// 前馈分类器
///
/// ```ignore
/// let mut classifier = Classifier::new(784, 10, &[512, 256, 128])?;
/// classifier.eval();
/// let log_probs = classifier.forward(&images)?; // [batch, 10]
/// let classes = classifier.predict(&images)?;
/// ```
pub struct Classifier {
    config: ClassifierConfig,
    graph: Graph,
    /// 依次为各隐藏层，最后一个为输出层
    layers: Vec<Linear>,
    state: ModelState,
    mode: Mode,
}

impl Classifier {
    /// 以默认 dropout 概率（0.5）创建分类器
    pub fn new(
        input_size: usize,
        output_size: usize,
        hidden_sizes: &[usize],
    ) -> Result<Self, ConfigurationError> {
        Self::from_config(ClassifierConfig::new(input_size, output_size, hidden_sizes))
    }

    pub fn from_config(config: ClassifierConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let graph = match config.seed {
            Some(seed) => Graph::new_with_seed(seed),
            None => Graph::new(),
        };
        let sizes = config.layer_sizes();
        let output_index = sizes.len() - 2;
        let layers = sizes
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let name = if i == output_index {
                    "output".to_string()
                } else {
                    format!("hidden{i}")
                };
                Linear::with_init(&graph, pair[0], pair[1], &name, Init::KaimingUniform)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let classifier = Self {
            state: ModelState::new(&graph),
            config,
            graph,
            layers,
            mode: Mode::Training,
        };
        debug!(
            "创建分类器：层宽 {:?}，dropout={}，共 {} 个参数",
            sizes,
            classifier.drop_p(),
            classifier.num_params()
        );
        Ok(classifier)
    }

    // ==================== 拓扑信息 ====================

    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub const fn input_size(&self) -> usize {
        self.config.input_size
    }

    pub const fn output_size(&self) -> usize {
        self.config.output_size
    }

    /// 隐藏层宽度，取自除输出层外各层的`out_features`
    pub fn hidden_sizes(&self) -> Vec<usize> {
        let hidden = &self.layers[..self.layers.len().saturating_sub(1)];
        hidden.iter().map(Linear::out_features).collect()
    }

    pub const fn drop_p(&self) -> f32 {
        self.config.drop_p
    }

    pub fn layers(&self) -> &[Linear] {
        &self.layers
    }

    /// 每层的（权重形状, 偏置形状），权重为[out, in]
    pub fn layer_shapes(&self) -> Vec<(Vec<usize>, Vec<usize>)> {
        self.layers
            .iter()
            .map(|layer| {
                (
                    vec![layer.out_features(), layer.in_features()],
                    vec![layer.out_features()],
                )
            })
            .collect()
    }

    /// 分类器所在的计算图（构建优化器时需要）
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    // ==================== 模式 ====================

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_training(&self) -> bool {
        self.mode == Mode::Training
    }

    pub fn train(&mut self) {
        self.set_mode(Mode::Training);
    }

    pub fn eval(&mut self) {
        self.set_mode(Mode::Evaluation);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Training => self.graph.train(),
            Mode::Evaluation => self.graph.eval(),
        }
    }

    // ==================== 前向传播 ====================

    /// 前向传播：[batch, input_size] -> [batch, output_size] 的 log 概率
    pub fn forward(&self, x: &Tensor) -> Result<Tensor, GraphError> {
        let output = self.forward_var(x)?;
        output.forward()?;
        output.value()?.ok_or_else(|| {
            GraphError::ComputationError("分类器前向传播后输出节点没有值".to_string())
        })
    }

    /// 写入输入并返回输出节点（尚未计算），供训练时接上损失再反向传播。
    /// 同一批形状复用同一份子图
    pub fn forward_var(&self, x: &Tensor) -> Result<Var, GraphError> {
        self.check_input(x)?;
        self.state.forward(x, |input| self.build(input))
    }

    /// 各类别的概率（log 概率取 exp），在评估模式下计算，结束后恢复原模式
    pub fn predict_proba(&mut self, x: &Tensor) -> Result<Tensor, GraphError> {
        let previous = self.mode;
        self.eval();
        let result = self.forward(x).map(|log_probs| log_probs.exp());
        self.set_mode(previous);
        result
    }

    /// 每个样本概率最大的类别下标
    pub fn predict(&mut self, x: &Tensor) -> Result<Vec<usize>, GraphError> {
        let proba = self.predict_proba(x)?;
        Ok(proba
            .argmax(1)
            .to_vec()
            .into_iter()
            .map(|class| class as usize)
            .collect())
    }

    fn build(&self, input: &Var) -> Result<Var, GraphError> {
        let (output_layer, hidden_layers) = self
            .layers
            .split_last()
            .ok_or_else(|| GraphError::InvalidOperation("分类器没有任何层".to_string()))?;

        let mut h = input.clone();
        for layer in hidden_layers {
            h = layer.forward(&h)?.relu()?.dropout(self.config.drop_p)?;
        }
        output_layer.forward(&h)?.log_softmax()
    }

    fn check_input(&self, x: &Tensor) -> Result<(), GraphError> {
        let shape = x.shape();
        if shape.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: shape.len(),
                message: format!("分类器的输入必须形如[batch, {}]", self.input_size()),
            });
        }
        if shape[1] != self.input_size() {
            return Err(GraphError::ShapeMismatch {
                expected: vec![shape[0], self.input_size()],
                got: shape.to_vec(),
                message: "分类器输入的特征维数与 input_size 不符".to_string(),
            });
        }
        Ok(())
    }

    // ==================== 参数快照 ====================

    /// 各层（权重, 偏置）的快照，按层序排列
    pub fn layer_params(&self) -> Result<Vec<(Tensor, Tensor)>, GraphError> {
        self.layers.iter().map(Linear::weight_and_bias).collect()
    }

    /// 按层序覆盖全部参数；形状必须与各层一致
    pub(crate) fn load_layer_params(&self, params: &[(Tensor, Tensor)]) -> Result<(), GraphError> {
        if params.len() != self.layers.len() {
            return Err(GraphError::InvalidOperation(format!(
                "分类器有{}层，但提供了{}层参数",
                self.layers.len(),
                params.len()
            )));
        }
        for (layer, (weight, bias)) in self.layers.iter().zip(params) {
            layer.set_weight_and_bias(weight, bias)?;
        }
        Ok(())
    }
}

impl Module for Classifier {
    fn parameters(&self) -> Vec<Var> {
        self.layers.iter().flat_map(Module::parameters).collect()
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .finish()
    }
}
