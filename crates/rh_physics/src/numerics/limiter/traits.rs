// crates/rh_physics/src/numerics/limiter/traits.rs

//! 限制器 trait 定义和邻居范围
//!
//! 两种限制器共用同一套逐边、逐字段的扫描流程：
//!
//! 1. 用原始斜率在每条边中点采样，得到偏差 Δ = q_f - q_i
//! 2. 当 `|Δ| > 0.1 · max(|Δ_max|, |Δ_min|)` 或采样值与单元值异号时触发限制
//! 3. 由具体限制器给出该边的限制因子，逐字段取所有边的最小值（初值 1）
//! 4. 该字段的 x / y 两个分量乘以同一因子
//!
//! 其中 Δ_max = max(q_i, q_j) - q_i，Δ_min = min(q_i, q_j) - q_i。

use std::fmt::Debug;

use crate::numerics::reconstruction::interp;
use crate::numerics::stencil::CellStencil;
use crate::state::{CellState, Slope};

/// 触发限制的相对偏差
pub const LIMIT_TRIGGER_RATIO: f64 = 0.1;

/// 视为零偏差的相对容差
pub const ZERO_DEVIATION_RATIO: f64 = 1e-9;

/// 斜率限制器 trait
pub trait StateLimiter: Debug + Send + Sync {
    /// 对单元的原始斜率进行限制，返回新斜率
    fn limit(&self, cell: &CellState, stencil: &CellStencil<'_>, slope: &Slope) -> Slope;

    /// 返回限制器名称
    fn name(&self) -> &'static str;
}

/// 单元与邻居的逐字段极值偏差
#[derive(Debug, Clone)]
pub struct NeighborBounds {
    /// Δ_max，逐字段 ≥ 0
    pub max_diff: CellState,
    /// Δ_min，逐字段 ≤ 0
    pub min_diff: CellState,
}

impl NeighborBounds {
    /// 扫描模板中的全部邻居
    pub fn from_stencil(cell: &CellState, stencil: &CellStencil<'_>) -> Self {
        Self::from_neighbors(cell, stencil.neighbors())
    }

    /// 由邻居集合计算
    pub fn from_neighbors<'a>(
        cell: &CellState,
        neighbors: impl IntoIterator<Item = &'a CellState>,
    ) -> Self {
        let mut cmax = cell.clone();
        let mut cmin = cell.clone();
        for n in neighbors {
            for i in 0..cell.n_fields() {
                let v = n.field(i);
                let hi = cmax.field_mut(i);
                *hi = hi.max(v);
                let lo = cmin.field_mut(i);
                *lo = lo.min(v);
            }
        }
        Self {
            max_diff: cmax - cell,
            min_diff: cmin - cell,
        }
    }

    /// 字段 i 的 Δ_max
    #[inline]
    pub fn delta_max(&self, i: usize) -> f64 {
        self.max_diff.field(i)
    }

    /// 字段 i 的 Δ_min
    #[inline]
    pub fn delta_min(&self, i: usize) -> f64 {
        self.min_diff.field(i)
    }

    /// 边采样值是否需要限制
    #[inline]
    pub fn needs_limiting(&self, i: usize, cell_value: f64, sample_value: f64) -> bool {
        let delta = sample_value - cell_value;
        let spread = self.delta_max(i).abs().max(self.delta_min(i).abs());
        delta.abs() > LIMIT_TRIGGER_RATIO * spread || sample_value * cell_value < 0.0
    }
}

/// 零偏差容差
#[inline]
pub fn deviation_tolerance(cell_value: f64) -> f64 {
    ZERO_DEVIATION_RATIO * cell_value.abs()
}

/// 单条边的偏差信息，传给具体限制器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDeviation {
    /// 字段下标
    pub field: usize,
    /// 单元值
    pub cell_value: f64,
    /// 该边另一侧邻居的值
    pub neighbor_value: f64,
    /// 边中点采样偏差 Δ
    pub delta: f64,
}

/// 通用扫描：`clamp` 返回该边的限制因子，`None` 表示跳过
pub(crate) fn limit_fieldwise<F>(
    cell: &CellState,
    stencil: &CellStencil<'_>,
    slope: &Slope,
    mut clamp: F,
) -> Slope
where
    F: FnMut(&EdgeDeviation, &NeighborBounds) -> Option<f64>,
{
    let bounds = NeighborBounds::from_stencil(cell, stencil);
    let n_fields = cell.n_fields();
    let mut psi = vec![1.0_f64; n_fields];

    for face in &stencil.faces {
        let sample = interp(cell, slope, face.centroid, stencil.cm);
        for (i, psi_i) in psi.iter_mut().enumerate() {
            let cell_value = cell.field(i);
            let sample_value = sample.field(i);
            if !bounds.needs_limiting(i, cell_value, sample_value) {
                continue;
            }
            let deviation = EdgeDeviation {
                field: i,
                cell_value,
                neighbor_value: face.neighbor.field(i),
                delta: sample_value - cell_value,
            };
            if let Some(factor) = clamp(&deviation, &bounds) {
                *psi_i = psi_i.min(factor);
            }
        }
    }

    let mut limited = slope.clone();
    for (i, &factor) in psi.iter().enumerate() {
        limited.scale_field(i, factor);
    }
    limited
}
