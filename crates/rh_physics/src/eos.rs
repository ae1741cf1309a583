// crates/rh_physics/src/eos.rs

//! 状态方程接口
//!
//! 重构只需要状态方程的两个能力：
//! - 声速，用于激波判别中的压缩性检验
//! - 给定参考温度下的压力下限，用于面值的热力学一致性修正
//!
//! 具体的状态方程表（简并气体、辐射等）由外部提供，实现 [`EquationOfState`] 即可。

/// 状态方程接口
pub trait EquationOfState: Send + Sync {
    /// 由密度与压力计算声速
    fn sound_speed(&self, density: f64, pressure: f64, tracers: &[f64]) -> f64;

    /// 由密度与温度计算压力（用作压力下限）
    fn pressure_floor(&self, density: f64, temperature: f64, tracers: &[f64]) -> f64;

    /// 名称
    fn name(&self) -> &'static str {
        "EquationOfState"
    }
}

/// 理想气体状态方程
///
/// ```text
/// c = √(γ p / ρ)
/// p = ρ R T
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasEos {
    /// 绝热指数 γ
    pub gamma: f64,
    /// 比气体常数 R
    pub gas_constant: f64,
}

impl IdealGasEos {
    /// 创建理想气体状态方程
    pub fn new(gamma: f64, gas_constant: f64) -> Self {
        Self {
            gamma,
            gas_constant,
        }
    }

    /// 单原子理想气体 (γ = 5/3)，不施加压力下限
    pub fn monatomic() -> Self {
        Self::new(5.0 / 3.0, 0.0)
    }
}

impl Default for IdealGasEos {
    fn default() -> Self {
        Self::monatomic()
    }
}

impl EquationOfState for IdealGasEos {
    #[inline]
    fn sound_speed(&self, density: f64, pressure: f64, _tracers: &[f64]) -> f64 {
        (self.gamma * pressure / density).sqrt()
    }

    #[inline]
    fn pressure_floor(&self, density: f64, temperature: f64, _tracers: &[f64]) -> f64 {
        density * self.gas_constant * temperature
    }

    fn name(&self) -> &'static str {
        "IdealGas"
    }
}
