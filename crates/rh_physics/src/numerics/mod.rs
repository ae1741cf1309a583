// crates/rh_physics/src/numerics/mod.rs

//! 数值方法模块
//!
//! 包含：
//! - stencil - 单元模板收集
//! - gradient/ - 梯度计算 (质心修正 Green-Gauss)
//! - shock - 激波判别
//! - limiter/ - 斜率限制器 (单调, 扩散型)
//! - reconstruction/ - 安全线性重构

pub mod gradient;
pub mod limiter;
pub mod reconstruction;
pub mod shock;
pub mod stencil;

pub use gradient::{CmGaussGradient, MAX_CELL_EDGES};
pub use limiter::{DiffusiveLimiter, MonotoneLimiter, NeighborBounds, StateLimiter};
pub use reconstruction::{
    eos_redress, interp, PassStage, SafeLinearConfig, SafeLinearReconstructor,
    SpatialReconstruction,
};
pub use shock::ShockDetector;
pub use stencil::{CellStencil, StencilFace};
