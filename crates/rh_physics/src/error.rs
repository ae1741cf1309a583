// crates/rh_physics/src/error.rs

//! 重构错误类型
//!
//! 梯度估计的两类失败（邻居过多、矩阵奇异）由网格退化引起，属于数据相关错误，
//! 会中止当前重构并携带足够的诊断信息向上报告，由调用方决定终止模拟或缩小时间步。

use rh_foundation::RhError;
use thiserror::Error;

/// 重构结果类型
pub type ReconstructionResult<T> = Result<T, ReconstructionError>;

/// 重构错误
#[derive(Debug, Error)]
pub enum ReconstructionError {
    /// 单元边数超过上限
    #[error("单元边数过多: ({x}, {y}) 处单元有 {n_edges} 条边")]
    TooManyNeighbors {
        /// 单元 x 坐标
        x: f64,
        /// 单元 y 坐标
        y: f64,
        /// 边数
        n_edges: usize,
    },

    /// 梯度矩阵奇异
    #[error("梯度矩阵奇异: ({x}, {y}) 处单元体积 {volume:e}, 行列式 {det:e}")]
    SingularGradientMatrix {
        /// 单元 x 坐标
        x: f64,
        /// 单元 y 坐标
        y: f64,
        /// 单元体积
        volume: f64,
        /// 行列式
        det: f64,
    },

    /// 幽灵状态缺失
    #[error("边 {edge} 引用的幽灵单元 {ghost_id} 没有幽灵状态")]
    MissingGhost {
        /// 幽灵单元标识
        ghost_id: usize,
        /// 边下标
        edge: usize,
    },

    /// 单元字段布局与名称注册表不一致
    #[error("单元 {cell} 字段布局不匹配: 期望 {expected}, 实际 {actual}")]
    LayoutMismatch {
        /// 单元下标
        cell: usize,
        /// 期望长度
        expected: usize,
        /// 实际长度
        actual: usize,
    },

    /// 未注册的示踪剂
    #[error("未注册的示踪剂: {name}")]
    UnknownTracer {
        /// 示踪剂名称
        name: String,
    },

    /// 基础层错误（配置、网格）
    #[error(transparent)]
    Foundation(#[from] RhError),
}
