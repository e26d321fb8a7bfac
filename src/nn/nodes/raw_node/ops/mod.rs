mod add;
mod dropout;
mod log_softmax;
mod mat_mul;
mod relu;
mod transpose;

pub(in crate::nn) use add::Add;
pub(in crate::nn) use dropout::Dropout;
pub(in crate::nn) use log_softmax::LogSoftmax;
pub(in crate::nn) use mat_mul::MatMul;
pub(in crate::nn) use relu::ReLU;
pub(in crate::nn) use transpose::Transpose;
