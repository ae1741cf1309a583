// crates/rh_physics/src/numerics/limiter/mod.rs

//! # 斜率限制器模块
//!
//! 提供两种逐字段作用于整个单元状态的斜率限制器：
//!
//! - `StateLimiter` - 限制器 trait 定义
//! - `MonotoneLimiter` - 单调限制器（非激波单元）
//! - `DiffusiveLimiter` - 扩散型限制器（激波单元）
//!
//! ## 限制器选择
//!
//! | 限制器 | 适用单元 | 限制依据 |
//! |--------|----------|----------|
//! | Monotone | 光滑区 | 邻居极值包络 |
//! | Diffusive | 激波区 | 各边邻居差 × θ |

mod diffusive;
mod monotone;
mod traits;

pub use diffusive::DiffusiveLimiter;
pub use monotone::MonotoneLimiter;
pub use traits::{
    deviation_tolerance, EdgeDeviation, NeighborBounds, StateLimiter, LIMIT_TRIGGER_RATIO,
    ZERO_DEVIATION_RATIO,
};
