// crates/rh_physics/src/numerics/reconstruction/sampler.rs

//! 线性重构采样
//!
//! ```text
//! q(x) = q_i + (x - cm_i) · ∇q_i
//! ```

use glam::DVec2;

use crate::state::{CellState, Slope};

/// 在任意点计算单元的线性重构值
///
/// 标签沿用单元状态。`target == cm` 时返回的数值字段与单元完全相同。
#[inline]
pub fn interp(cell: &CellState, slope: &Slope, target: DVec2, cm: DVec2) -> CellState {
    let offset = target - cm;
    let mut value = cell.clone();
    value.axpy(offset.x, &slope.x);
    value.axpy(offset.y, &slope.y);
    value
}
