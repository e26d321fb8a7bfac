/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-26
 * @Description  : Module trait 定义
 */

use super::Var;

/// 模块 trait
///
/// - `forward()` 与 `new()` 不是 trait 方法（签名各异）
/// - `parameters()` 返回 `Vec<Var>`（签名一致，放入 trait）
/// - 由于 Var 携带图引用，`forward()` 不需要 `&Graph` 参数
pub trait Module {
    /// 所有可训练参数，供优化器更新、检查点保存使用
    fn parameters(&self) -> Vec<Var>;

    /// 参数的标量总个数
    fn num_params(&self) -> usize {
        self.parameters()
            .iter()
            .map(|p| {
                p.value_expected_shape()
                    .map(|shape| shape.iter().product::<usize>())
                    .unwrap_or(0)
            })
            .sum()
    }
}
