/*
 * @Author       : 老董
 * @Date         : 2026-02-04
 * @Description  : 训练：配置、批次来源、训练/验证循环
 */

mod config;
mod source;
mod trainer;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, OptimizerKind, TrainConfig};
pub use source::BatchSource;
pub use trainer::{
    accuracy, build_optimizer, fit, train, validation_step, EpochReport, ValidationReport,
};
