// crates/rh_physics/src/numerics/reconstruction/config.rs

//! 安全线性重构配置

use rh_foundation::{RhError, RhResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 安全线性重构配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeLinearConfig {
    /// 是否启用斜率限制
    pub slope_limiting: bool,

    /// 激波判别的速度散度阈值比 δv
    pub shock_velocity_ratio: f64,

    /// 扩散型限制器的扩散系数 θ
    pub diffusion_coefficient: f64,

    /// 激波判别的压力比阈值 δP
    pub shock_pressure_ratio: f64,

    /// 强制零梯度的示踪剂名称
    pub flat_tracers: Vec<String>,

    /// 压力下限修正使用的参考温度
    pub reference_temperature: f64,

    /// 是否启用并行
    pub parallel: bool,

    /// 并行阈值（单元数 / 边数）
    pub parallel_threshold: usize,
}

impl Default for SafeLinearConfig {
    fn default() -> Self {
        Self {
            slope_limiting: true,
            shock_velocity_ratio: 0.2,
            diffusion_coefficient: 0.5,
            shock_pressure_ratio: 0.7,
            flat_tracers: Vec::new(),
            reference_temperature: 1e5,
            parallel: true,
            parallel_threshold: 1000,
        }
    }
}

impl SafeLinearConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 无限制配置（直接使用原始梯度）
    pub fn unlimited() -> Self {
        Self {
            slope_limiting: false,
            ..Default::default()
        }
    }

    /// 设置斜率限制
    pub fn with_slope_limiting(mut self, enabled: bool) -> Self {
        self.slope_limiting = enabled;
        self
    }

    /// 设置速度散度阈值比
    pub fn with_shock_velocity_ratio(mut self, ratio: f64) -> Self {
        self.shock_velocity_ratio = ratio;
        self
    }

    /// 设置扩散系数
    pub fn with_diffusion_coefficient(mut self, theta: f64) -> Self {
        self.diffusion_coefficient = theta;
        self
    }

    /// 设置压力比阈值
    pub fn with_shock_pressure_ratio(mut self, ratio: f64) -> Self {
        self.shock_pressure_ratio = ratio;
        self
    }

    /// 设置零梯度示踪剂
    pub fn with_flat_tracers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flat_tracers = names.into_iter().map(Into::into).collect();
        self
    }

    /// 设置参考温度
    pub fn with_reference_temperature(mut self, temperature: f64) -> Self {
        self.reference_temperature = temperature;
        self
    }

    /// 设置并行
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// 设置并行阈值
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> RhResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: SafeLinearConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> RhResult<()> {
        if !(self.shock_velocity_ratio.is_finite() && self.shock_velocity_ratio >= 0.0) {
            return Err(RhError::invalid_config(
                "shock_velocity_ratio",
                self.shock_velocity_ratio.to_string(),
                "速度散度阈值比必须为有限非负数",
            ));
        }

        if !(self.diffusion_coefficient.is_finite() && self.diffusion_coefficient >= 0.0) {
            return Err(RhError::invalid_config(
                "diffusion_coefficient",
                self.diffusion_coefficient.to_string(),
                "扩散系数必须为有限非负数",
            ));
        }

        // δP = 0 关闭压力比判据
        if !(self.shock_pressure_ratio.is_finite() && self.shock_pressure_ratio >= 0.0) {
            return Err(RhError::invalid_config(
                "shock_pressure_ratio",
                self.shock_pressure_ratio.to_string(),
                "压力比阈值必须为有限非负数",
            ));
        }

        if !(self.reference_temperature.is_finite() && self.reference_temperature > 0.0) {
            return Err(RhError::invalid_config(
                "reference_temperature",
                self.reference_temperature.to_string(),
                "参考温度必须为正",
            ));
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> RhResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
