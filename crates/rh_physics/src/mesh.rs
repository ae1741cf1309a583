// crates/rh_physics/src/mesh.rs

//! 网格邻接访问接口
//!
//! 重构引擎只通过 [`ReconstructionMesh`] 读取网格，不关心网格如何生成或移动。
//! 所有实现必须保证线程安全（Send + Sync），以支持 Rayon 并行遍历单元与边。
//!
//! # 索引约定
//!
//! - 内部单元: `0..n_cells()`
//! - 幽灵单元（边界外虚拟单元）: `>= n_cells()`，仅出现在边的邻居中
//! - 边: `0..n_edges()`
//!
//! 对于幽灵单元，`mesh_point` 与 `cell_cm` 同样有效；`original_index`
//! 返回其镜像的内部单元。
//!
//! [`PolygonMesh`] 是基于显式数组的实现，用于测试以及由外部网格库导入数据。

use glam::DVec2;
use rh_foundation::{RhError, RhResult};

// ============================================================
// 边
// ============================================================

/// 网格边（两个单元之间的界面）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// 两侧单元标识；越界标识表示幽灵单元
    pub neighbors: (usize, usize),
    /// 边长
    pub length: f64,
    /// 边中点
    pub centroid: DVec2,
}

impl Edge {
    /// 由两个端点创建边
    pub fn from_vertices(neighbors: (usize, usize), a: DVec2, b: DVec2) -> Self {
        Self {
            neighbors,
            length: a.distance(b),
            centroid: 0.5 * (a + b),
        }
    }

    /// 给定一侧单元，返回另一侧标识
    #[inline]
    pub fn other(&self, cell: usize) -> usize {
        if self.neighbors.0 == cell {
            self.neighbors.1
        } else {
            self.neighbors.0
        }
    }
}

// ============================================================
// 网格访问 trait
// ============================================================

/// 重构所需的网格只读访问接口
pub trait ReconstructionMesh: Send + Sync {
    /// 内部单元数量
    fn n_cells(&self) -> usize;

    /// 边总数
    fn n_edges(&self) -> usize;

    /// 边
    fn edge(&self, edge: usize) -> &Edge;

    /// 单元的边界边下标
    fn cell_edges(&self, cell: usize) -> &[usize];

    /// 生成点（Voronoi 生成点，对幽灵单元同样有效）
    fn mesh_point(&self, id: usize) -> DVec2;

    /// 质心（对幽灵单元同样有效）
    fn cell_cm(&self, id: usize) -> DVec2;

    /// 单元体积（2D 为面积）
    fn cell_volume(&self, cell: usize) -> f64;

    /// 单元特征宽度
    fn cell_width(&self, cell: usize) -> f64;

    /// 幽灵单元对应的内部单元；内部单元返回自身
    fn original_index(&self, id: usize) -> usize;

    /// 标识是否为幽灵单元
    #[inline]
    fn is_ghost_id(&self, id: usize) -> bool {
        id >= self.n_cells()
    }
}

// ============================================================
// 多边形网格
// ============================================================

/// 基于显式数组的多边形网格
#[derive(Debug, Clone)]
pub struct PolygonMesh {
    n_cells: usize,
    /// 生成点（内部 + 幽灵）
    points: Vec<DVec2>,
    /// 质心（内部 + 幽灵）
    cms: Vec<DVec2>,
    volumes: Vec<f64>,
    widths: Vec<f64>,
    /// 幽灵单元的镜像源（下标为 id - n_cells）
    ghost_sources: Vec<usize>,
    edges: Vec<Edge>,
    cell_edges: Vec<Vec<usize>>,
}

impl PolygonMesh {
    /// 创建构建器
    pub fn builder() -> PolygonMeshBuilder {
        PolygonMeshBuilder::default()
    }

    /// 所有边
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl ReconstructionMesh for PolygonMesh {
    fn n_cells(&self) -> usize {
        self.n_cells
    }

    fn n_edges(&self) -> usize {
        self.edges.len()
    }

    fn edge(&self, edge: usize) -> &Edge {
        &self.edges[edge]
    }

    fn cell_edges(&self, cell: usize) -> &[usize] {
        &self.cell_edges[cell]
    }

    fn mesh_point(&self, id: usize) -> DVec2 {
        self.points[id]
    }

    fn cell_cm(&self, id: usize) -> DVec2 {
        self.cms[id]
    }

    fn cell_volume(&self, cell: usize) -> f64 {
        self.volumes[cell]
    }

    fn cell_width(&self, cell: usize) -> f64 {
        self.widths[cell]
    }

    fn original_index(&self, id: usize) -> usize {
        if id < self.n_cells {
            id
        } else {
            self.ghost_sources[id - self.n_cells]
        }
    }
}

/// 待构建的单元
#[derive(Debug, Clone, Copy)]
struct PendingCell {
    point: DVec2,
    cm: DVec2,
    volume: f64,
    width: Option<f64>,
}

/// [`PolygonMesh`] 构建器
///
/// 先添加全部内部单元，再添加幽灵单元，最后添加边。
/// 幽灵单元的标识按添加顺序从 `n_cells` 开始编号。
///
/// ```
/// use glam::DVec2;
/// use rh_physics::mesh::{PolygonMesh, ReconstructionMesh};
///
/// let mesh = PolygonMesh::builder()
///     .cell(DVec2::new(0.5, 0.5), DVec2::new(0.5, 0.5), 1.0)
///     .ghost(DVec2::new(1.5, 0.5), DVec2::new(1.5, 0.5), 0)
///     .edge(0, 1, DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0))
///     .build()
///     .unwrap();
/// assert_eq!(mesh.n_cells(), 1);
/// assert_eq!(mesh.cell_edges(0), &[0]);
/// assert!(mesh.is_ghost_id(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolygonMeshBuilder {
    cells: Vec<PendingCell>,
    ghosts: Vec<(DVec2, DVec2, usize)>,
    edges: Vec<Edge>,
}

impl PolygonMeshBuilder {
    /// 添加内部单元，宽度默认取 √(V/π)
    pub fn cell(mut self, point: DVec2, cm: DVec2, volume: f64) -> Self {
        self.cells.push(PendingCell {
            point,
            cm,
            volume,
            width: None,
        });
        self
    }

    /// 添加指定宽度的内部单元
    pub fn cell_with_width(mut self, point: DVec2, cm: DVec2, volume: f64, width: f64) -> Self {
        self.cells.push(PendingCell {
            point,
            cm,
            volume,
            width: Some(width),
        });
        self
    }

    /// 添加幽灵单元，`source` 为其镜像的内部单元
    pub fn ghost(mut self, point: DVec2, cm: DVec2, source: usize) -> Self {
        self.ghosts.push((point, cm, source));
        self
    }

    /// 添加以端点描述的边
    pub fn edge(mut self, first: usize, second: usize, a: DVec2, b: DVec2) -> Self {
        self.edges.push(Edge::from_vertices((first, second), a, b));
        self
    }

    /// 校验并构建网格
    pub fn build(self) -> RhResult<PolygonMesh> {
        let n_cells = self.cells.len();
        let n_total = n_cells + self.ghosts.len();

        for (g, &(_, _, source)) in self.ghosts.iter().enumerate() {
            if source >= n_cells {
                return Err(RhError::invalid_mesh(format!(
                    "幽灵单元 {} 的镜像源 {} 不是内部单元",
                    n_cells + g,
                    source
                )));
            }
        }

        let mut cell_edges = vec![Vec::new(); n_cells];
        for (i, edge) in self.edges.iter().enumerate() {
            let (a, b) = edge.neighbors;
            if a >= n_total || b >= n_total {
                return Err(RhError::invalid_mesh(format!(
                    "边 {} 的邻居 ({}, {}) 超出单元范围 0..{}",
                    i, a, b, n_total
                )));
            }
            if a == b {
                return Err(RhError::invalid_mesh(format!("边 {} 两侧为同一单元 {}", i, a)));
            }
            if a >= n_cells && b >= n_cells {
                return Err(RhError::invalid_mesh(format!("边 {} 两侧均为幽灵单元", i)));
            }
            if !(edge.length.is_finite() && edge.length > 0.0) {
                return Err(RhError::invalid_mesh(format!(
                    "边 {} 长度无效: {}",
                    i, edge.length
                )));
            }
            if a < n_cells {
                cell_edges[a].push(i);
            }
            if b < n_cells {
                cell_edges[b].push(i);
            }
        }

        let mut points = Vec::with_capacity(n_total);
        let mut cms = Vec::with_capacity(n_total);
        let mut volumes = Vec::with_capacity(n_cells);
        let mut widths = Vec::with_capacity(n_cells);
        for (i, c) in self.cells.iter().enumerate() {
            if !(c.volume.is_finite() && c.volume > 0.0) {
                return Err(RhError::invalid_mesh(format!(
                    "单元 {} 体积无效: {}",
                    i, c.volume
                )));
            }
            points.push(c.point);
            cms.push(c.cm);
            volumes.push(c.volume);
            widths.push(
                c.width
                    .unwrap_or_else(|| (c.volume / std::f64::consts::PI).sqrt()),
            );
        }
        let mut ghost_sources = Vec::with_capacity(self.ghosts.len());
        for &(point, cm, source) in &self.ghosts {
            points.push(point);
            cms.push(cm);
            ghost_sources.push(source);
        }

        Ok(PolygonMesh {
            n_cells,
            points,
            cms,
            volumes,
            widths,
            ghost_sources,
            edges: self.edges,
            cell_edges,
        })
    }
}
