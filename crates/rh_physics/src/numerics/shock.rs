// crates/rh_physics/src/numerics/shock.rs

//! 激波判别
//!
//! 单元满足下列任一条件即视为激波单元，改用扩散型限制器：
//!
//! ```text
//! 1. 压缩:   (∂vx/∂x + ∂vy/∂y) · w < -δv · c
//! 2. 压力跳跃: min_j min(p_i/p_j, p_j/p_i) < δP
//! ```
//!
//! 其中 w 为单元特征宽度，c 为当地声速。

use crate::numerics::stencil::CellStencil;
use crate::state::{CellState, Slope};

/// 激波判别器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShockDetector {
    /// 速度散度阈值比 δv
    pub velocity_ratio: f64,
    /// 压力比阈值 δP
    pub pressure_ratio: f64,
}

impl Default for ShockDetector {
    fn default() -> Self {
        Self {
            velocity_ratio: 0.2,
            pressure_ratio: 0.7,
        }
    }
}

impl ShockDetector {
    /// 创建判别器
    pub fn new(velocity_ratio: f64, pressure_ratio: f64) -> Self {
        Self {
            velocity_ratio,
            pressure_ratio,
        }
    }

    /// 压缩检验
    #[inline]
    pub fn is_compressive(&self, slope: &Slope, width: f64, sound_speed: f64) -> bool {
        slope.velocity_divergence() * width < -self.velocity_ratio * sound_speed
    }

    /// 单元与邻居之间的最小压力比，取值 (0, 1]
    pub fn pressure_ratio<'a>(
        cell: &CellState,
        neighbors: impl IntoIterator<Item = &'a CellState>,
    ) -> f64 {
        let p = cell.pressure;
        neighbors.into_iter().fold(1.0_f64, |ratio, n| {
            let r = if p > n.pressure {
                n.pressure / p
            } else {
                p / n.pressure
            };
            ratio.min(r)
        })
    }

    /// 判别单元是否为激波单元
    pub fn is_shock(
        &self,
        cell: &CellState,
        slope: &Slope,
        stencil: &CellStencil<'_>,
        sound_speed: f64,
    ) -> bool {
        self.is_compressive(slope, stencil.width, sound_speed)
            || Self::pressure_ratio(cell, stencil.neighbors()) < self.pressure_ratio
    }
}
