/*
 * @Author       : 老董
 * @Date         : 2026-01-08
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-13
 * @Description  : Var - 变量句柄（节点 ID + 图引用），支持算子重载和链式调用
 */

use std::cell::RefCell;
use std::ops::Add;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::graph::{Graph, GraphInner};
use super::{GraphError, NodeId};
use crate::tensor::Tensor;

// ==================== Init 枚举 ====================

/// 参数初始化策略
///
/// 权重采用`[out_features, in_features]`布局，因此扇入（fan_in）取第1维；
/// 一维张量（偏置）的扇入取其长度
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零
    Zeros,
    /// 全一
    Ones,
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// Kaiming/He 正态初始化（适用于 `ReLU`）：N(0, 2/fan_in)
    Kaiming,
    /// Kaiming 均匀初始化：U(-1/√fan_in, 1/√fan_in)，即 PyTorch `nn.Linear` 的默认做法
    KaimingUniform,
    /// Xavier/Glorot 初始化（适用于 Sigmoid/Tanh）
    Xavier,
}

impl Init {
    /// 生成初始化后的 Tensor（使用全局 RNG）
    pub fn generate(&self, shape: &[usize]) -> Tensor {
        self.generate_with_rng(shape, &mut StdRng::from_entropy())
    }

    /// 生成初始化后的 Tensor（使用指定的 RNG）
    pub fn generate_with_rng(&self, shape: &[usize], rng: &mut StdRng) -> Tensor {
        match self {
            Self::Constant(v) => Tensor::full(*v, shape),
            Self::Zeros => Tensor::zeros(shape),
            Self::Ones => Tensor::ones(shape),
            Self::Normal { mean, std } => Tensor::normal_with_rng(*mean, *std, shape, rng),
            Self::Kaiming => {
                let std = (2.0 / fan_in(shape) as f32).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
            Self::KaimingUniform => {
                let bound = 1.0 / (fan_in(shape) as f32).sqrt();
                Tensor::uniform_with_rng(-bound, bound, shape, rng)
            }
            Self::Xavier => {
                let fan_out = shape.first().copied().unwrap_or(1);
                let std = (2.0 / (fan_in(shape) + fan_out) as f32).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
        }
    }
}

fn fan_in(shape: &[usize]) -> usize {
    match shape {
        [] => 1,
        [n] => *n,
        [_, rest @ ..] => rest.iter().product(),
    }
    .max(1)
}

// ==================== Var 结构 ====================

/// 变量句柄：携带图引用，Clone 开销极低（Rc clone）
///
/// ```ignore
/// let graph = Graph::new();
/// let x = graph.input(&features)?;
/// let h = x.matmul(&w.transpose()?)?.relu()?;
/// let loss = h.log_softmax()?.nll_loss(&labels)?;
/// loss.backward()?;
/// ```
#[derive(Clone)]
pub struct Var {
    id: NodeId,
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    pub(crate) const fn graph(&self) -> &Rc<RefCell<GraphInner>> {
        &self.graph
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph 句柄
    pub fn get_graph(&self) -> Graph {
        Graph::from_rc(Rc::clone(&self.graph))
    }

    /// 节点值的形状（创建节点时即已确定）
    pub fn value_expected_shape(&self) -> Result<Vec<usize>, GraphError> {
        Ok(self
            .graph
            .borrow()
            .get_node_value_expected_shape(self.id)?
            .to_vec())
    }

    pub(crate) fn check_same_graph(&self, other: &Self, op: &str) -> Result<(), GraphError> {
        if self.same_graph(other) {
            Ok(())
        } else {
            Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Var 进行{op}"
            )))
        }
    }

    /// 在同一张图上包装一个新节点
    pub(crate) fn wrap(&self, id: NodeId) -> Self {
        Self::new(id, Rc::clone(&self.graph))
    }

    // ==================== 执行 ====================

    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 反向传播（ensure-forward 语义：先前向再反向），返回 loss 的标量值
    pub fn backward(&self) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        g.forward(self.id)?;
        g.backward(self.id)
    }

    // ==================== 值访问和设置 ====================

    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.cloned())
    }

    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, Some(value))
    }

    /// 标量值
    pub fn item(&self) -> Result<f32, GraphError> {
        let val = self.value()?.ok_or_else(|| {
            GraphError::ComputationError(format!("节点{}没有值，请先执行 forward", self.id))
        })?;
        val.get_data_number()
            .ok_or_else(|| GraphError::InvalidOperation("Tensor 不是标量".to_string()))
    }

    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_grad(self.id)?.cloned())
    }

    /// 安全的（广播）加法
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "加法")?;
        let id = self.graph.borrow_mut().new_add_node(self.id, other.id, None)?;
        Ok(self.wrap(id))
    }
}

// ==================== 算子重载 ====================
// 形状不兼容或来自不同图时 panic；需要错误处理时请用`try_add`

impl Add for &Var {
    type Output = Var;

    fn add(self, other: &Var) -> Var {
        self.try_add(other).unwrap_or_else(|e| panic!("Var 加法失败：{e}"))
    }
}

impl Add for Var {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Add<&Self> for Var {
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        &self + other
    }
}

impl Add<Var> for &Var {
    type Output = Var;

    fn add(self, other: Var) -> Var {
        self + &other
    }
}
