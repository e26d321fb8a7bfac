/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-21
 * @Description  : Graph 句柄（用户级 API）
 */

use std::cell::RefCell;
use std::rc::Rc;

use super::error::GraphError;
use super::inner::GraphInner;
use crate::nn::var::{Init, Var};
use crate::nn::NodeId;
use crate::tensor::Tensor;

/// Graph - 计算图句柄
///
/// `Rc<RefCell<GraphInner>>` 的薄封装：Clone 后多个句柄引用同一个图，
/// 创建出来的 `Var` 也各自持有图引用
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    // ==================== 创建 ====================

    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    /// 创建带种子的图（参数初始化与 Dropout 掩码均可复现）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_inner(GraphInner::new_with_seed(seed))
    }

    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub(crate) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    pub(crate) fn inner_rc(&self) -> Rc<RefCell<GraphInner>> {
        Rc::clone(&self.inner)
    }

    /// 将 NodeId 包装成 Var
    pub fn wrap_node_id(&self, node_id: NodeId) -> Var {
        Var::new(node_id, self.inner_rc())
    }

    // ==================== 创建变量 ====================

    /// 创建输入节点并设置数据
    pub fn input(&self, data: &Tensor) -> Result<Var, GraphError> {
        let var = self.input_shape(data.shape(), None)?;
        var.set_value(data)?;
        Ok(var)
    }

    /// 创建命名输入节点并设置数据
    pub fn input_named(&self, data: &Tensor, name: &str) -> Result<Var, GraphError> {
        let var = self.input_shape(data.shape(), Some(name))?;
        var.set_value(data)?;
        Ok(var)
    }

    /// 创建只有形状、尚未赋值的输入节点（供按批重复`set_value`）
    pub fn input_shape(&self, shape: &[usize], name: Option<&str>) -> Result<Var, GraphError> {
        let node_id = self.inner.borrow_mut().new_input_node(shape, name)?;
        Ok(self.wrap_node_id(node_id))
    }

    /// 创建参数节点，按`init`生成初值（图带种子时使用图的 RNG）
    pub fn parameter(&self, shape: &[usize], init: Init, name: &str) -> Result<Var, GraphError> {
        let mut g = self.inner.borrow_mut();
        let node_id = g.new_parameter_node(shape, Some(name))?;
        let init_data = match g.rng.as_mut() {
            Some(rng) => init.generate_with_rng(shape, rng),
            None => init.generate(shape),
        };
        g.set_node_value(node_id, Some(&init_data))?;
        drop(g);
        Ok(self.wrap_node_id(node_id))
    }

    // ==================== 执行 ====================

    pub fn forward(&self, output: &Var) -> Result<(), GraphError> {
        self.inner.borrow_mut().forward(output.node_id())
    }

    pub fn backward(&self, loss: &Var) -> Result<f32, GraphError> {
        loss.backward()
    }

    // ==================== 训练控制 ====================

    /// 清零所有节点的梯度
    pub fn zero_grad(&self) -> Result<(), GraphError> {
        self.inner.borrow_mut().clear_grad()
    }

    pub fn train(&self) {
        self.inner.borrow_mut().set_train_mode();
    }

    pub fn eval(&self) {
        self.inner.borrow_mut().set_eval_mode();
    }

    pub fn is_eval(&self) -> bool {
        !self.inner.borrow().is_train_mode()
    }

    pub fn nodes_count(&self) -> usize {
        self.inner.borrow().nodes_count()
    }

    pub fn parameter_ids(&self) -> Vec<NodeId> {
        self.inner.borrow().get_trainable_nodes()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
