// crates/rh_physics/src/numerics/gradient/cm_gauss.rs

//! 质心修正的 Green-Gauss 梯度
//!
//! 对单元 i 的每条边 f（邻居 j）累加：
//!
//! ```text
//! c_f = e_f - ½(cm_j + cm_i)          边中点相对两质心中点的偏移
//! r_f = normalize(p_j - p_i) · L_f    生成点连线方向乘边长
//!
//! M  = V·I - Σ_f r_f ⊗ c_f
//! b  = Σ_f ½(q_i + q_j) · r_f
//! ∇q = M⁻¹ b
//! ```
//!
//! 当单元质心与生成点重合且边中点恰为两质心中点时 c_f = 0，
//! 退化为经典 Green-Gauss。所有字段共用同一个 2×2 逆矩阵。

use glam::DVec2;

use crate::error::{ReconstructionError, ReconstructionResult};
use crate::numerics::stencil::CellStencil;
use crate::state::{CellState, Slope};

/// 单元允许的最大边数
pub const MAX_CELL_EDGES: usize = 20;

/// 奇异判据：|det| < SINGULAR_TOLERANCE · V²
pub const SINGULAR_TOLERANCE: f64 = 1e-10;

/// 质心修正的 Green-Gauss 梯度计算器
#[derive(Debug, Clone, Copy, Default)]
pub struct CmGaussGradient;

impl CmGaussGradient {
    /// 创建新实例
    pub fn new() -> Self {
        Self
    }

    /// 计算单元的原始梯度
    ///
    /// # 错误
    ///
    /// - 边数超过 [`MAX_CELL_EDGES`] 时返回 `TooManyNeighbors`
    /// - 梯度矩阵接近奇异时返回 `SingularGradientMatrix`
    pub fn compute(
        &self,
        cell: &CellState,
        stencil: &CellStencil<'_>,
    ) -> ReconstructionResult<Slope> {
        let n_edges = stencil.n_faces();
        if n_edges > MAX_CELL_EDGES {
            return Err(ReconstructionError::TooManyNeighbors {
                x: stencil.point.x,
                y: stencil.point.y,
                n_edges,
            });
        }

        let mut m = [0.0_f64; 4];
        let mut bx = CellState::zeros_like(cell);
        let mut by = CellState::zeros_like(cell);
        for face in &stencil.faces {
            let c = face.centroid - 0.5 * (face.neighbor_cm + stencil.cm);
            let r: DVec2 = (face.neighbor_point - stencil.point).normalize_or_zero() * face.length;
            m[0] -= c.x * r.x;
            m[1] -= c.y * r.x;
            m[2] -= c.x * r.y;
            m[3] -= c.y * r.y;

            bx.axpy(0.5 * r.x, cell);
            bx.axpy(0.5 * r.x, face.neighbor);
            by.axpy(0.5 * r.y, cell);
            by.axpy(0.5 * r.y, face.neighbor);
        }
        m[0] += stencil.volume;
        m[3] += stencil.volume;

        let det = m[0] * m[3] - m[1] * m[2];
        if !(det.abs() >= SINGULAR_TOLERANCE * stencil.volume * stencil.volume) {
            return Err(ReconstructionError::SingularGradientMatrix {
                x: stencil.point.x,
                y: stencil.point.y,
                volume: stencil.volume,
                det,
            });
        }

        let inv_det = 1.0 / det;
        let mut dx = CellState::zeros_like(cell);
        dx.axpy(m[3] * inv_det, &bx);
        dx.axpy(-m[1] * inv_det, &by);
        let mut dy = CellState::zeros_like(cell);
        dy.axpy(-m[2] * inv_det, &bx);
        dy.axpy(m[0] * inv_det, &by);
        Ok(Slope::new(dx, dy))
    }
}
