// crates/rh_physics/src/state.rs

//! 单元原始变量状态与斜率
//!
//! 本模块提供重构所需的状态类型：
//! - CellState: 单元原始变量 (ρ, p, v, 示踪剂, 标签)
//! - Slope: x / y 方向偏导数对，复用 CellState 的形状
//! - FaceStates: 面两侧的重构状态
//!
//! # 字段布局
//!
//! 所有数值字段可按统一下标访问，逐字段循环据此遍历：
//! ```text
//! 0: density   1: pressure   2: velocity.x   3: velocity.y   4..: tracers
//! ```
//!
//! 示踪剂以固定顺序数组存储，名称到下标的映射见
//! [`rh_foundation::FieldNames`]。标签不参与算术运算，结果保留左操作数的标签。

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 密度字段下标
pub const DENSITY: usize = 0;
/// 压力字段下标
pub const PRESSURE: usize = 1;
/// x 速度字段下标
pub const VELOCITY_X: usize = 2;
/// y 速度字段下标
pub const VELOCITY_Y: usize = 3;
/// 首个示踪剂的字段下标
pub const TRACER_OFFSET: usize = 4;

// ============================================================
// 单元状态
// ============================================================

/// 单个单元的原始变量状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    /// 密度
    pub density: f64,
    /// 压力
    pub pressure: f64,
    /// 速度
    pub velocity: DVec2,
    /// 示踪剂分数（顺序由名称注册表确定）
    #[serde(default)]
    pub tracers: Vec<f64>,
    /// 标签（顺序由名称注册表确定）
    #[serde(default)]
    pub stickers: Vec<bool>,
}

impl CellState {
    /// 创建新的单元状态
    pub fn new(
        density: f64,
        pressure: f64,
        velocity: DVec2,
        tracers: Vec<f64>,
        stickers: Vec<bool>,
    ) -> Self {
        Self {
            density,
            pressure,
            velocity,
            tracers,
            stickers,
        }
    }

    /// 创建无示踪剂、无标签的状态
    pub fn simple(density: f64, pressure: f64, velocity: DVec2) -> Self {
        Self::new(density, pressure, velocity, Vec::new(), Vec::new())
    }

    /// 与 `layout` 同形状的全零状态（标签全部清除）
    pub fn zeros_like(layout: &CellState) -> Self {
        Self {
            density: 0.0,
            pressure: 0.0,
            velocity: DVec2::ZERO,
            tracers: vec![0.0; layout.tracers.len()],
            stickers: vec![false; layout.stickers.len()],
        }
    }

    /// 数值字段总数
    #[inline]
    pub fn n_fields(&self) -> usize {
        TRACER_OFFSET + self.tracers.len()
    }

    /// 按下标读取数值字段
    #[inline]
    pub fn field(&self, i: usize) -> f64 {
        match i {
            DENSITY => self.density,
            PRESSURE => self.pressure,
            VELOCITY_X => self.velocity.x,
            VELOCITY_Y => self.velocity.y,
            _ => self.tracers[i - TRACER_OFFSET],
        }
    }

    /// 按下标获取数值字段的可变引用
    #[inline]
    pub fn field_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            DENSITY => &mut self.density,
            PRESSURE => &mut self.pressure,
            VELOCITY_X => &mut self.velocity.x,
            VELOCITY_Y => &mut self.velocity.y,
            _ => &mut self.tracers[i - TRACER_OFFSET],
        }
    }

    /// 读取标签，下标为 `None` 或越界时视为未设置
    #[inline]
    pub fn sticker(&self, index: Option<usize>) -> bool {
        index
            .and_then(|i| self.stickers.get(i).copied())
            .unwrap_or(false)
    }

    /// self += a * x（逐数值字段）
    #[inline]
    pub fn axpy(&mut self, a: f64, x: &CellState) {
        debug_assert_eq!(self.tracers.len(), x.tracers.len());
        self.density += a * x.density;
        self.pressure += a * x.pressure;
        self.velocity += a * x.velocity;
        for (t, &dt) in self.tracers.iter_mut().zip(&x.tracers) {
            *t += a * dt;
        }
    }

    /// 逐数值字段缩放
    #[inline]
    pub fn scale(&mut self, a: f64) {
        self.density *= a;
        self.pressure *= a;
        self.velocity *= a;
        for t in &mut self.tracers {
            *t *= a;
        }
    }
}

impl Add<&CellState> for CellState {
    type Output = CellState;
    #[inline]
    fn add(mut self, rhs: &CellState) -> CellState {
        self.axpy(1.0, rhs);
        self
    }
}

impl Add for CellState {
    type Output = CellState;
    #[inline]
    fn add(self, rhs: CellState) -> CellState {
        self + &rhs
    }
}

impl Sub<&CellState> for CellState {
    type Output = CellState;
    #[inline]
    fn sub(mut self, rhs: &CellState) -> CellState {
        self.axpy(-1.0, rhs);
        self
    }
}

impl Sub<&CellState> for &CellState {
    type Output = CellState;
    #[inline]
    fn sub(self, rhs: &CellState) -> CellState {
        self.clone() - rhs
    }
}

impl Mul<f64> for CellState {
    type Output = CellState;
    #[inline]
    fn mul(mut self, rhs: f64) -> CellState {
        self.scale(rhs);
        self
    }
}

impl Mul<f64> for &CellState {
    type Output = CellState;
    #[inline]
    fn mul(self, rhs: f64) -> CellState {
        self.clone() * rhs
    }
}

impl Mul<&CellState> for f64 {
    type Output = CellState;
    #[inline]
    fn mul(self, rhs: &CellState) -> CellState {
        rhs * self
    }
}

// ============================================================
// 斜率
// ============================================================

/// 单元斜率：各数值字段的 x / y 偏导数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slope {
    /// ∂/∂x
    pub x: CellState,
    /// ∂/∂y
    pub y: CellState,
}

impl Slope {
    /// 创建斜率
    pub fn new(x: CellState, y: CellState) -> Self {
        Self { x, y }
    }

    /// 与 `layout` 同形状的零斜率（平坦重构）
    pub fn zero_like(layout: &CellState) -> Self {
        let zero = CellState::zeros_like(layout);
        Self {
            x: zero.clone(),
            y: zero,
        }
    }

    /// 速度散度 ∂vx/∂x + ∂vy/∂y
    #[inline]
    pub fn velocity_divergence(&self) -> f64 {
        self.x.velocity.x + self.y.velocity.y
    }

    /// 按下标读取某字段的梯度
    #[inline]
    pub fn field(&self, i: usize) -> DVec2 {
        DVec2::new(self.x.field(i), self.y.field(i))
    }

    /// 以同一因子缩放某字段的两个分量（保持方向）
    #[inline]
    pub fn scale_field(&mut self, i: usize, factor: f64) {
        *self.x.field_mut(i) *= factor;
        *self.y.field_mut(i) *= factor;
    }

    /// 将某示踪剂的梯度置零
    #[inline]
    pub fn flatten_tracer(&mut self, tracer: usize) {
        self.x.tracers[tracer] = 0.0;
        self.y.tracers[tracer] = 0.0;
    }

    /// 是否所有分量为零
    pub fn is_zero(&self) -> bool {
        (0..self.x.n_fields()).all(|i| self.x.field(i) == 0.0 && self.y.field(i) == 0.0)
    }

    /// 所有分量的最大绝对值
    pub fn max_abs(&self) -> f64 {
        (0..self.x.n_fields())
            .map(|i| self.x.field(i).abs().max(self.y.field(i).abs()))
            .fold(0.0, f64::max)
    }
}

// ============================================================
// 面状态
// ============================================================

/// 面两侧的重构状态，顺序与边的 (neighbors.0, neighbors.1) 一致
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceStates {
    /// 第一邻居侧
    pub left: CellState,
    /// 第二邻居侧
    pub right: CellState,
}

impl FaceStates {
    /// 创建面状态
    pub fn new(left: CellState, right: CellState) -> Self {
        Self { left, right }
    }
}
