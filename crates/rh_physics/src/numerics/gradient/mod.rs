// crates/rh_physics/src/numerics/gradient/mod.rs

//! 梯度计算模块
//!
//! 提供多边形单元上的原始（未限制）梯度估计：
//! - 质心修正的 Green-Gauss 梯度 ([`CmGaussGradient`])

mod cm_gauss;

pub use cm_gauss::*;
