// crates/rh_physics/src/lib.rs

//! 移动多边形网格上的二阶有限体积重构
//!
//! 给定单元状态（密度、压力、速度、示踪剂、标签）与网格邻接关系，
//! 计算受限的分片线性分布，并在每条边中点给出两侧的面状态，供黎曼求解器使用。
//!
//! # 模块概览
//!
//! - [`state`]: 单元状态、斜率与面状态
//! - [`mesh`]: 网格访问接口与多边形网格
//! - [`eos`]: 状态方程接口
//! - [`boundary`]: 幽灵状态提供者
//! - [`numerics`]: 梯度、激波判别、限制器与重构流程
//! - [`error`]: 重构错误
//!
//! # Trait 抽象
//!
//! - [`ReconstructionMesh`]: 网格只读访问
//! - [`GhostProvider`]: 边界外状态
//! - [`EquationOfState`]: 声速与压力下限
//! - [`SpatialReconstruction`]: 重构器

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod eos;
pub mod error;
pub mod mesh;
pub mod numerics;
pub mod state;

pub use boundary::{GhostMap, GhostProvider, OutflowGhosts, RigidWalls};
pub use eos::{EquationOfState, IdealGasEos};
pub use error::{ReconstructionError, ReconstructionResult};
pub use mesh::{Edge, PolygonMesh, PolygonMeshBuilder, ReconstructionMesh};
pub use numerics::{
    CmGaussGradient, DiffusiveLimiter, MonotoneLimiter, PassStage, SafeLinearConfig,
    SafeLinearReconstructor, ShockDetector, SpatialReconstruction, StateLimiter,
};
pub use state::{CellState, FaceStates, Slope};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::boundary::{GhostMap, GhostProvider, OutflowGhosts, RigidWalls};
    pub use crate::eos::{EquationOfState, IdealGasEos};
    pub use crate::error::{ReconstructionError, ReconstructionResult};
    pub use crate::mesh::{Edge, PolygonMesh, ReconstructionMesh};
    pub use crate::numerics::{SafeLinearConfig, SafeLinearReconstructor, SpatialReconstruction};
    pub use crate::state::{CellState, FaceStates, Slope};
}
