// crates/rh_physics/src/numerics/limiter/diffusive.rs

//! 扩散型限制器（激波单元）
//!
//! 与单调限制器使用相同的触发条件，但每条边的限制因子直接由该边邻居与单元的差给出：
//!
//! ```text
//! α_f = max(0, θ · (q_j - q_i) / Δ_f)     如果 |Δ_f| > ε
//! ψ   = min(1, min_f α_f)
//! ```
//!
//! θ 为扩散系数。下限 0 保证重构方向不会与邻居差的方向相反。

use super::traits::{deviation_tolerance, limit_fieldwise, StateLimiter};
use crate::numerics::stencil::CellStencil;
use crate::state::{CellState, Slope};

/// 扩散型限制器
#[derive(Debug, Clone, Copy)]
pub struct DiffusiveLimiter {
    /// 扩散系数 θ
    pub diffusion_coefficient: f64,
}

impl Default for DiffusiveLimiter {
    fn default() -> Self {
        Self {
            diffusion_coefficient: 0.5,
        }
    }
}

impl DiffusiveLimiter {
    /// 创建扩散型限制器
    pub fn new(diffusion_coefficient: f64) -> Self {
        Self {
            diffusion_coefficient,
        }
    }
}

impl StateLimiter for DiffusiveLimiter {
    fn limit(&self, cell: &CellState, stencil: &CellStencil<'_>, slope: &Slope) -> Slope {
        let theta = self.diffusion_coefficient;
        limit_fieldwise(cell, stencil, slope, |dev, _| {
            if dev.delta.abs() > deviation_tolerance(dev.cell_value) {
                Some((theta * (dev.neighbor_value - dev.cell_value) / dev.delta).max(0.0))
            } else {
                None
            }
        })
    }

    fn name(&self) -> &'static str {
        "Diffusive"
    }
}
