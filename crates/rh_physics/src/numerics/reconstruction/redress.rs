// crates/rh_physics/src/numerics/reconstruction/redress.rs

//! 面值的热力学一致性修正
//!
//! 线性外推可能在界面处给出过低甚至为负的压力。采样完成后，
//! 将非幽灵状态的压力抬升到状态方程在参考温度下给出的下限：
//!
//! ```text
//! p_f ← max(p_f, p_eos(ρ_f, T_ref, X_f))
//! ```

use crate::eos::EquationOfState;
use crate::state::CellState;

/// 压力下限修正，带 ghost 标签的状态保持不变
#[inline]
pub fn eos_redress(
    state: &mut CellState,
    eos: &dyn EquationOfState,
    reference_temperature: f64,
    ghost_sticker: Option<usize>,
) {
    if state.sticker(ghost_sticker) {
        return;
    }
    let floor = eos.pressure_floor(state.density, reference_temperature, &state.tracers);
    state.pressure = state.pressure.max(floor);
}
