// crates/rh_physics/src/numerics/stencil.rs

//! 单元模板收集
//!
//! 将一个单元的几何信息与其所有边两侧的邻居状态收集成 [`CellStencil`]，
//! 梯度估计、激波判别与限制器都只读取模板，不再直接访问网格。
//!
//! 邻居状态优先从幽灵状态表读取，表中没有时再读单元数组；
//! 两处都找不到时返回 [`ReconstructionError::MissingGhost`]。

use glam::DVec2;

use crate::boundary::GhostMap;
use crate::error::{ReconstructionError, ReconstructionResult};
use crate::mesh::ReconstructionMesh;
use crate::state::CellState;

/// 模板中的一个面（对应单元的一条边）
#[derive(Debug, Clone, Copy)]
pub struct StencilFace<'a> {
    /// 边下标
    pub edge: usize,
    /// 邻居标识
    pub neighbor_id: usize,
    /// 边中点
    pub centroid: DVec2,
    /// 边长
    pub length: f64,
    /// 邻居生成点
    pub neighbor_point: DVec2,
    /// 邻居质心
    pub neighbor_cm: DVec2,
    /// 邻居状态
    pub neighbor: &'a CellState,
}

/// 单元模板
#[derive(Debug, Clone)]
pub struct CellStencil<'a> {
    /// 生成点
    pub point: DVec2,
    /// 质心
    pub cm: DVec2,
    /// 体积
    pub volume: f64,
    /// 特征宽度
    pub width: f64,
    /// 按单元边顺序排列的面
    pub faces: Vec<StencilFace<'a>>,
}

impl<'a> CellStencil<'a> {
    /// 从网格收集单元模板
    pub fn gather(
        mesh: &dyn ReconstructionMesh,
        cell: usize,
        cells: &'a [CellState],
        ghosts: &'a GhostMap,
    ) -> ReconstructionResult<Self> {
        let edges = mesh.cell_edges(cell);
        let mut faces = Vec::with_capacity(edges.len());
        for &e in edges {
            let edge = mesh.edge(e);
            let other = edge.other(cell);
            let neighbor = match ghosts.get(other) {
                Some(state) => state,
                None => cells.get(other).ok_or(ReconstructionError::MissingGhost {
                    ghost_id: other,
                    edge: e,
                })?,
            };
            faces.push(StencilFace {
                edge: e,
                neighbor_id: other,
                centroid: edge.centroid,
                length: edge.length,
                neighbor_point: mesh.mesh_point(other),
                neighbor_cm: mesh.cell_cm(other),
                neighbor,
            });
        }
        Ok(Self {
            point: mesh.mesh_point(cell),
            cm: mesh.cell_cm(cell),
            volume: mesh.cell_volume(cell),
            width: mesh.cell_width(cell),
            faces,
        })
    }

    /// 面数
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// 邻居状态迭代器
    pub fn neighbors(&self) -> impl Iterator<Item = &'a CellState> + '_ {
        self.faces.iter().map(|f| f.neighbor)
    }
}
