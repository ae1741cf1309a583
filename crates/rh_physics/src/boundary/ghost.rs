// crates/rh_physics/src/boundary/ghost.rs

//! 幽灵状态提供者
//!
//! 本模块提供边界外虚拟单元（幽灵单元）的状态与梯度：
//! - GhostMap: 单次重构内的幽灵状态表
//! - GhostProvider: 幽灵状态提供者接口
//! - RigidWalls: 刚性固壁（法向速度反射）
//! - OutflowGhosts: 零梯度出流（直接复制）
//!
//! # 概念说明
//!
//! 1. 每次重构开始时调用一次 `build_ghosts`，得到幽灵状态表，之后只读
//! 2. 邻居查询优先使用幽灵状态表，因此内部标记为 ghost 的单元也可被镜像
//! 3. 边界边的幽灵侧使用 `ghost_gradient` 提供的梯度进行线性外推

use glam::DVec2;
use rh_foundation::FieldNames;
use std::collections::HashMap;

use crate::mesh::{Edge, ReconstructionMesh};
use crate::state::{CellState, Slope};

// ============================================================
// 幽灵状态表
// ============================================================

/// 幽灵单元标识到合成状态的映射
#[derive(Debug, Clone, Default)]
pub struct GhostMap {
    states: HashMap<usize, CellState>,
}

impl GhostMap {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入状态；标识已存在时保留先插入者，返回是否插入
    pub fn insert_first(&mut self, id: usize, state: CellState) -> bool {
        match self.states.entry(id) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(state);
                true
            }
        }
    }

    /// 查询状态
    #[inline]
    pub fn get(&self, id: usize) -> Option<&CellState> {
        self.states.get(&id)
    }

    /// 是否包含标识
    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.states.contains_key(&id)
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(usize, CellState)> for GhostMap {
    fn from_iter<I: IntoIterator<Item = (usize, CellState)>>(iter: I) -> Self {
        let mut map = GhostMap::new();
        for (id, state) in iter {
            map.insert_first(id, state);
        }
        map
    }
}

// ============================================================
// 提供者接口
// ============================================================

/// 幽灵状态提供者接口
pub trait GhostProvider: Send + Sync {
    /// 构建本次重构的幽灵状态表
    fn build_ghosts(
        &self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        time: f64,
    ) -> GhostMap;

    /// 幽灵单元在某条边界边上的梯度
    ///
    /// `slopes` 为本次重构中内部单元已限制的斜率。
    fn ghost_gradient(
        &self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        slopes: &[Slope],
        ghost_id: usize,
        time: f64,
        edge: &Edge,
    ) -> Slope;

    /// 名称
    fn name(&self) -> &'static str;
}

/// 边界边的幽灵侧：`Some((ghost_id, real_id))`
#[inline]
fn outer_ghost_side(edge: &Edge, n_cells: usize) -> Option<(usize, usize)> {
    let (a, b) = edge.neighbors;
    if a >= n_cells {
        Some((a, b))
    } else if b >= n_cells {
        Some((b, a))
    } else {
        None
    }
}

// ============================================================
// 刚性固壁
// ============================================================

/// 刚性固壁幽灵状态
///
/// 幽灵状态为内部单元的副本，速度关于边法向反射（无穿透）。
/// 法向取两侧生成点连线方向。幽灵梯度恒为零。
///
/// 除网格外边界外，一侧带 ghost 标签、另一侧不带的内部边也视为固壁，
/// 但仅当真实单元宽度的 0.2 倍小于边长时才镜像，以忽略退化的短边。
#[derive(Debug, Clone, Copy, Default)]
pub struct RigidWalls {
    ghost_sticker: Option<usize>,
}

impl RigidWalls {
    /// 内部幽灵边的最小相对边长
    pub const INNER_EDGE_RATIO: f64 = 0.2;

    /// 创建固壁提供者，ghost 标签下标从名称注册表解析
    pub fn new(names: &FieldNames) -> Self {
        Self {
            ghost_sticker: names.ghost_sticker(),
        }
    }

    /// 仅处理网格外边界（不识别内部幽灵单元）
    pub fn outer_only() -> Self {
        Self {
            ghost_sticker: None,
        }
    }

    /// 内部边的幽灵侧：`Some((ghost_id, real_id))`
    fn inner_ghost_side(
        &self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        edge: &Edge,
    ) -> Option<(usize, usize)> {
        self.ghost_sticker?;
        let (a, b) = edge.neighbors;
        let a_ghost = cells[a].sticker(self.ghost_sticker);
        let b_ghost = cells[b].sticker(self.ghost_sticker);
        if a_ghost && !b_ghost && mesh.cell_width(b) * Self::INNER_EDGE_RATIO < edge.length {
            return Some((a, b));
        }
        if !a_ghost && b_ghost && mesh.cell_width(a) * Self::INNER_EDGE_RATIO < edge.length {
            return Some((b, a));
        }
        None
    }
}

/// 将速度关于法向反射
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

impl GhostProvider for RigidWalls {
    fn build_ghosts(
        &self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        _time: f64,
    ) -> GhostMap {
        let n_cells = mesh.n_cells();
        let mut ghosts = GhostMap::new();
        for i in 0..mesh.n_edges() {
            let edge = mesh.edge(i);
            let side = outer_ghost_side(edge, n_cells)
                .or_else(|| self.inner_ghost_side(mesh, cells, edge));
            let Some((ghost_id, real_id)) = side else {
                continue;
            };
            let normal = (mesh.mesh_point(ghost_id) - mesh.mesh_point(real_id)).normalize_or_zero();
            if normal == DVec2::ZERO {
                log::warn!("边 {} 两侧生成点重合，跳过固壁镜像", i);
                continue;
            }
            let mut state = cells[real_id].clone();
            state.velocity = reflect_velocity(state.velocity, normal);
            ghosts.insert_first(ghost_id, state);
        }
        ghosts
    }

    fn ghost_gradient(
        &self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        _slopes: &[Slope],
        ghost_id: usize,
        _time: f64,
        _edge: &Edge,
    ) -> Slope {
        Slope::zero_like(&cells[mesh.original_index(ghost_id)])
    }

    fn name(&self) -> &'static str {
        "RigidWalls"
    }
}

// ============================================================
// 零梯度出流
// ============================================================

/// 零梯度出流幽灵状态
///
/// 幽灵状态直接复制边另一侧的内部单元，幽灵梯度为零，
/// 边界面幽灵侧的采样值即内部单元的平均状态。
#[derive(Debug, Clone, Copy, Default)]
pub struct OutflowGhosts;

impl GhostProvider for OutflowGhosts {
    fn build_ghosts(
        &self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        _time: f64,
    ) -> GhostMap {
        let n_cells = mesh.n_cells();
        (0..mesh.n_edges())
            .filter_map(|i| outer_ghost_side(mesh.edge(i), n_cells))
            .map(|(ghost_id, real_id)| (ghost_id, cells[real_id].clone()))
            .collect()
    }

    fn ghost_gradient(
        &self,
        _mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        _slopes: &[Slope],
        ghost_id: usize,
        _time: f64,
        edge: &Edge,
    ) -> Slope {
        Slope::zero_like(&cells[edge.other(ghost_id)])
    }

    fn name(&self) -> &'static str {
        "Outflow"
    }
}
