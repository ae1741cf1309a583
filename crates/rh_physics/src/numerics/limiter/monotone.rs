// crates/rh_physics/src/numerics/limiter/monotone.rs

//! 单调限制器（非激波单元）
//!
//! Barth-Jespersen 型限制器，推广到全部原始变量与示踪剂。
//!
//! ```text
//!       ⎧ Δ_max / Δ_f   如果 Δ_f >  ε
//! α_f = ⎨ Δ_min / Δ_f   如果 Δ_f < -ε
//!       ⎩ 不限制         其他
//!
//! ψ = min(1, min_f α_f)
//! ```
//!
//! 其中 ε = 1e-9 · |q_i|。限制后每条边中点的值位于单元与邻居的极值之间。
//!
//! # 参考文献
//!
//! Barth, T.J. and Jespersen, D.C. (1989). "The design and application
//! of upwind schemes on unstructured meshes". AIAA Paper 89-0366.

use super::traits::{deviation_tolerance, limit_fieldwise, StateLimiter};
use crate::numerics::stencil::CellStencil;
use crate::state::{CellState, Slope};

/// 单调限制器
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotoneLimiter;

impl MonotoneLimiter {
    /// 创建新的单调限制器
    pub fn new() -> Self {
        Self
    }
}

impl StateLimiter for MonotoneLimiter {
    fn limit(&self, cell: &CellState, stencil: &CellStencil<'_>, slope: &Slope) -> Slope {
        limit_fieldwise(cell, stencil, slope, |dev, bounds| {
            let eps = deviation_tolerance(dev.cell_value);
            if dev.delta > eps {
                Some(bounds.delta_max(dev.field) / dev.delta)
            } else if dev.delta < -eps {
                Some(bounds.delta_min(dev.field) / dev.delta)
            } else {
                None
            }
        })
    }

    fn name(&self) -> &'static str {
        "Monotone"
    }
}
