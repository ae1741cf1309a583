// crates/rh_physics/src/numerics/reconstruction/traits.rs

//! 重构 trait 定义

use crate::error::ReconstructionResult;
use crate::mesh::ReconstructionMesh;
use crate::state::{CellState, FaceStates};

/// 空间重构器 trait
///
/// 所有重构方案实现此 trait，为每条边给出两侧的面状态。
pub trait SpatialReconstruction: Send + Sync {
    /// 执行一次重构
    ///
    /// `out` 被清空后按边下标顺序写入，每条边一对 (neighbors.0 侧, neighbors.1 侧)。
    fn reconstruct(
        &mut self,
        mesh: &dyn ReconstructionMesh,
        cells: &[CellState],
        time: f64,
        out: &mut Vec<FaceStates>,
    ) -> ReconstructionResult<()>;

    /// 返回重构器名称
    fn name(&self) -> &'static str;
}
