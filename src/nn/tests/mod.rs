mod layer_linear;
mod node_add;
mod optimizer; // 优化器测试模块（包含 sgd, adam 子模块）

use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 中心差分估计标量损失对某个参数的梯度，用来核对 VJP 的解析梯度。
/// 结束后参数恢复原值
pub(super) fn numerical_grad(loss: &Var, param: &Var, eps: f32) -> Result<Tensor, GraphError> {
    let base = param.value()?.expect("参数应当有值");
    let shape = base.shape().to_vec();
    let data = base.to_vec();

    let mut grads = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let mut shifted = data.clone();
        shifted[i] = data[i] + eps;
        param.set_value(&Tensor::new(&shifted, &shape))?;
        loss.forward()?;
        let plus = loss.item()?;

        shifted[i] = data[i] - eps;
        param.set_value(&Tensor::new(&shifted, &shape))?;
        loss.forward()?;
        let minus = loss.item()?;

        grads.push((plus - minus) / (2.0 * eps));
    }
    param.set_value(&base)?;
    Ok(Tensor::new(&grads, &shape))
}
