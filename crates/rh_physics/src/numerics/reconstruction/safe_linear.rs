// crates/rh_physics/src/numerics/reconstruction/safe_linear.rs

//! 安全线性重构器
//!
//! 一次重构的流程：
//!
//! ```text
//! Idle ─► GhostsBuilt ─► SlopesComputed ─► EdgesSampled ─► Done
//!          构建幽灵表     逐单元梯度+限制      逐边采样          压力下限修正
//! ```
//!
//! 逐单元阶段与逐边阶段之间是一道屏障：边采样需要两侧单元的最终斜率。
//! 两个阶段在数量达到并行阈值时使用 Rayon 并行，否则串行。
//!
//! 每个单元：
//! 1. 带 ghost 标签的单元直接取零斜率
//! 2. 质心修正 Green-Gauss 原始梯度（记录为未限制斜率）
//! 3. 零梯度示踪剂置零
//! 4. 启用限制时判别激波，分别使用扩散型或单调限制器

use rayon::prelude::*;
use rh_foundation::{FieldNames, RhError};
use std::sync::Arc;

use super::config::SafeLinearConfig;
use super::redress::eos_redress;
use super::sampler::interp;
use super::traits::SpatialReconstruction;
use crate::boundary::{GhostMap, GhostProvider};
use crate::eos::EquationOfState;
use crate::error::{ReconstructionError, ReconstructionResult};
use crate::mesh::ReconstructionMesh;
use crate::numerics::gradient::CmGaussGradient;
use crate::numerics::limiter::{DiffusiveLimiter, MonotoneLimiter, StateLimiter};
use crate::numerics::shock::ShockDetector;
use crate::numerics::stencil::CellStencil;
use crate::state::{CellState, FaceStates, Slope};

use glam::DVec2;

// ============================================================
// 阶段
// ============================================================

/// 重构阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassStage {
    /// 未开始
    #[default]
    Idle,
    /// 幽灵状态已构建
    GhostsBuilt,
    /// 单元斜率已计算
    SlopesComputed,
    /// 边已采样
    EdgesSampled,
    /// 完成
    Done,
}

// ============================================================
// 单元斜率计算
// ============================================================

/// 逐单元输出槽位：(单元下标, ((限制后斜率, 原始斜率), 激波标记))
type CellSlot<'s> = (usize, ((&'s mut Slope, &'s mut Slope), &'s mut bool));

/// 逐单元计算所需的只读数据
struct CellKernel<'a> {
    gradient: &'a CmGaussGradient,
    shock: &'a ShockDetector,
    monotone: &'a MonotoneLimiter,
    diffusive: &'a DiffusiveLimiter,
    eos: &'a dyn EquationOfState,
    flat_tracers: &'a [usize],
    ghost_sticker: Option<usize>,
    slope_limiting: bool,
}

impl CellKernel<'_> {
    /// 计算单元的 (限制后斜率, 原始斜率, 是否激波)
    fn compute(
        &self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        ghosts: &GhostMap,
        cell_id: usize,
    ) -> ReconstructionResult<(Slope, Slope, bool)> {
        let cell = &cells[cell_id];
        if cell.sticker(self.ghost_sticker) {
            let flat = Slope::zero_like(cell);
            return Ok((flat.clone(), flat, false));
        }

        let stencil = CellStencil::gather(mesh, cell_id, cells, ghosts)?;
        let raw = self.gradient.compute(cell, &stencil).map_err(|e| {
            log::warn!("单元 {} 梯度计算失败: {}", cell_id, e);
            e
        })?;

        let mut slope = raw.clone();
        for &t in self.flat_tracers {
            slope.flatten_tracer(t);
        }

        if !self.slope_limiting {
            return Ok((slope, raw, false));
        }

        let sound_speed = self
            .eos
            .sound_speed(cell.density, cell.pressure, &cell.tracers);
        let shocked = self.shock.is_shock(cell, &slope, &stencil, sound_speed);
        let limited = if shocked {
            self.diffusive.limit(cell, &stencil, &slope)
        } else {
            self.monotone.limit(cell, &stencil, &slope)
        };
        Ok((limited, raw, shocked))
    }
}

// ============================================================
// 重构器
// ============================================================

/// 安全线性重构器
pub struct SafeLinearReconstructor {
    config: SafeLinearConfig,
    names: Arc<FieldNames>,
    eos: Arc<dyn EquationOfState>,
    ghost_provider: Arc<dyn GhostProvider>,

    gradient: CmGaussGradient,
    shock: ShockDetector,
    monotone: MonotoneLimiter,
    diffusive: DiffusiveLimiter,

    /// ghost 标签下标
    ghost_sticker: Option<usize>,
    /// 零梯度示踪剂下标
    flat_tracers: Vec<usize>,

    slopes: Vec<Slope>,
    unlimited_slopes: Vec<Slope>,
    shocked: Vec<bool>,
    stage: PassStage,
}

impl SafeLinearReconstructor {
    /// 创建重构器
    ///
    /// 配置在此校验，ghost 标签与零梯度示踪剂的下标在此一次性解析。
    pub fn new(
        config: SafeLinearConfig,
        names: Arc<FieldNames>,
        eos: Arc<dyn EquationOfState>,
        ghost_provider: Arc<dyn GhostProvider>,
    ) -> ReconstructionResult<Self> {
        config.validate()?;
        let flat_tracers = config
            .flat_tracers
            .iter()
            .map(|name| {
                names
                    .tracer_index(name)
                    .ok_or_else(|| ReconstructionError::UnknownTracer { name: name.clone() })
            })
            .collect::<ReconstructionResult<Vec<_>>>()?;

        Ok(Self {
            gradient: CmGaussGradient::new(),
            shock: ShockDetector::new(config.shock_velocity_ratio, config.shock_pressure_ratio),
            monotone: MonotoneLimiter::new(),
            diffusive: DiffusiveLimiter::new(config.diffusion_coefficient),
            ghost_sticker: names.ghost_sticker(),
            flat_tracers,
            config,
            names,
            eos,
            ghost_provider,
            slopes: Vec::new(),
            unlimited_slopes: Vec::new(),
            shocked: Vec::new(),
            stage: PassStage::Idle,
        })
    }

    /// 配置
    pub fn config(&self) -> &SafeLinearConfig {
        &self.config
    }

    /// 名称注册表
    pub fn names(&self) -> &FieldNames {
        &self.names
    }

    /// 上一次重构的限制后斜率
    pub fn slopes(&self) -> &[Slope] {
        &self.slopes
    }

    /// 上一次重构的原始斜率（零梯度示踪剂置零之前）
    pub fn unlimited_slopes(&self) -> &[Slope] {
        &self.unlimited_slopes
    }

    /// 上一次重构中被判为激波的单元
    pub fn shocked_cells(&self) -> &[bool] {
        &self.shocked
    }

    /// 当前阶段
    ///
    /// 重构失败时回到 [`PassStage::Idle`]。
    pub fn stage(&self) -> PassStage {
        self.stage
    }

    /// 在任意点计算单元的线性重构值
    pub fn interp(&self, cell: &CellState, slope: &Slope, target: DVec2, cm: DVec2) -> CellState {
        interp(cell, slope, target, cm)
    }

    fn enter(&mut self, stage: PassStage) {
        log::trace!("重构阶段: {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }

    #[inline]
    fn use_parallel(&self, n: usize) -> bool {
        self.config.parallel && n >= self.config.parallel_threshold
    }

    /// 检查单元字段布局与名称注册表一致
    fn check_layout(&self, cells: &[CellState]) -> ReconstructionResult<()> {
        let n_tracers = self.names.n_tracers();
        let n_stickers = self.names.n_stickers();
        for (i, cell) in cells.iter().enumerate() {
            if cell.tracers.len() != n_tracers {
                return Err(ReconstructionError::LayoutMismatch {
                    cell: i,
                    expected: n_tracers,
                    actual: cell.tracers.len(),
                });
            }
            if cell.stickers.len() != n_stickers {
                return Err(ReconstructionError::LayoutMismatch {
                    cell: i,
                    expected: n_stickers,
                    actual: cell.stickers.len(),
                });
            }
        }
        Ok(())
    }

    /// 逐单元计算斜率
    fn compute_slopes(
        &mut self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        ghosts: &GhostMap,
    ) -> ReconstructionResult<()> {
        let n_cells = mesh.n_cells();
        let parallel = self.use_parallel(n_cells);

        self.slopes.resize_with(n_cells, Slope::default);
        self.unlimited_slopes.resize_with(n_cells, Slope::default);
        self.shocked.resize(n_cells, false);

        let kernel = CellKernel {
            gradient: &self.gradient,
            shock: &self.shock,
            monotone: &self.monotone,
            diffusive: &self.diffusive,
            eos: self.eos.as_ref(),
            flat_tracers: &self.flat_tracers,
            ghost_sticker: self.ghost_sticker,
            slope_limiting: self.config.slope_limiting,
        };
        let store = |(i, ((slope, raw), shocked)): CellSlot<'_>| -> ReconstructionResult<()> {
            let (limited, unlimited, is_shock) = kernel.compute(mesh, cells, ghosts, i)?;
            *slope = limited;
            *raw = unlimited;
            *shocked = is_shock;
            Ok(())
        };

        if parallel {
            self.slopes
                .par_iter_mut()
                .zip(self.unlimited_slopes.par_iter_mut())
                .zip(self.shocked.par_iter_mut())
                .enumerate()
                .try_for_each(store)
        } else {
            self.slopes
                .iter_mut()
                .zip(self.unlimited_slopes.iter_mut())
                .zip(self.shocked.iter_mut())
                .enumerate()
                .try_for_each(store)
        }
    }

    /// 逐边采样两侧的线性重构
    fn sample_edges(
        &self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        ghosts: &GhostMap,
        time: f64,
        out: &mut Vec<FaceStates>,
    ) -> ReconstructionResult<()> {
        let n_cells = mesh.n_cells();
        let n_edges = mesh.n_edges();
        let slopes = &self.slopes;
        let provider = self.ghost_provider.as_ref();

        let sample_side = |edge_id: usize, id: usize| -> ReconstructionResult<CellState> {
            let edge = mesh.edge(edge_id);
            if id < n_cells {
                return Ok(interp(&cells[id], &slopes[id], edge.centroid, mesh.cell_cm(id)));
            }
            let state = ghosts.get(id).ok_or(ReconstructionError::MissingGhost {
                ghost_id: id,
                edge: edge_id,
            })?;
            let gradient = provider.ghost_gradient(mesh, cells, slopes, id, time, edge);
            Ok(interp(state, &gradient, edge.centroid, mesh.cell_cm(id)))
        };
        let sample = |(i, face): (usize, &mut FaceStates)| -> ReconstructionResult<()> {
            let (a, b) = mesh.edge(i).neighbors;
            face.left = sample_side(i, a)?;
            face.right = sample_side(i, b)?;
            Ok(())
        };

        out.clear();
        out.resize_with(n_edges, FaceStates::default);
        if self.use_parallel(n_edges) {
            out.par_iter_mut().enumerate().try_for_each(sample)
        } else {
            out.iter_mut().enumerate().try_for_each(sample)
        }
    }

    /// 对所有面状态施加压力下限
    fn redress_faces(&self, out: &mut [FaceStates]) {
        let eos = self.eos.as_ref();
        let t_ref = self.config.reference_temperature;
        let ghost = self.ghost_sticker;
        let redress = |face: &mut FaceStates| {
            eos_redress(&mut face.left, eos, t_ref, ghost);
            eos_redress(&mut face.right, eos, t_ref, ghost);
        };
        if self.use_parallel(out.len()) {
            out.par_iter_mut().for_each(redress);
        } else {
            out.iter_mut().for_each(redress);
        }
    }

    /// 依次推进各阶段，出错即返回
    fn run_pass(
        &mut self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        time: f64,
        out: &mut Vec<FaceStates>,
    ) -> ReconstructionResult<()> {
        self.enter(PassStage::Idle);
        if cells.len() < mesh.n_cells() {
            return Err(RhError::size_mismatch("cells", mesh.n_cells(), cells.len()).into());
        }
        let cells = &cells[..mesh.n_cells()];
        self.check_layout(cells)?;

        let ghosts = self.ghost_provider.build_ghosts(mesh, cells, time);
        self.enter(PassStage::GhostsBuilt);

        self.compute_slopes(mesh, cells, &ghosts)?;
        self.enter(PassStage::SlopesComputed);

        self.sample_edges(mesh, cells, &ghosts, time, out)?;
        self.enter(PassStage::EdgesSampled);

        self.redress_faces(out);
        self.enter(PassStage::Done);

        log::debug!(
            "{} 重构完成: {} 单元, {} 边, {} 幽灵, {} 激波单元",
            self.name(),
            mesh.n_cells(),
            mesh.n_edges(),
            ghosts.len(),
            self.shocked.iter().filter(|&&s| s).count()
        );
        Ok(())
    }
}

impl SpatialReconstruction for SafeLinearReconstructor {
    fn reconstruct(
        &mut self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        time: f64,
        out: &mut Vec<FaceStates>,
    ) -> ReconstructionResult<()> {
        let result = self.run_pass(mesh, cells, time, out);
        if result.is_err() {
            self.enter(PassStage::Idle);
        }
        result
    }

    fn name(&self) -> &'static str {
        "SafeLinear"
    }
}

impl std::fmt::Debug for SafeLinearReconstructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeLinearReconstructor")
            .field("config", &self.config)
            .field("eos", &self.eos.name())
            .field("ghost_provider", &self.ghost_provider.name())
            .field("stage", &self.stage)
            .finish()
    }
}
