// crates/rh_physics/src/numerics/reconstruction/mod.rs

//! # 安全线性重构模块
//!
//! 将单元平均状态扩展为受限的分片线性分布，并在每条边中点采样两侧的面状态。
//!
//! ## 重构过程
//!
//! 1. 由幽灵状态提供者构建边界外状态
//! 2. 计算单元原始梯度 (质心修正 Green-Gauss)
//! 3. 激波判别后应用单调或扩散型限制器
//! 4. 在每条边中点线性外推两侧状态
//! 5. 按状态方程修正面压力下限
//!
//! ## 使用方式
//!
//! ```
//! use std::sync::Arc;
//! use glam::DVec2;
//! use rh_foundation::FieldNames;
//! use rh_physics::prelude::*;
//!
//! let mesh = PolygonMesh::builder()
//!     .cell(DVec2::new(0.5, 0.5), DVec2::new(0.5, 0.5), 1.0)
//!     .ghost(DVec2::new(1.5, 0.5), DVec2::new(1.5, 0.5), 0)
//!     .edge(0, 1, DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0))
//!     .build()
//!     .unwrap();
//! let names = Arc::new(FieldNames::new(Vec::<String>::new(), ["ghost"]).unwrap());
//! let mut reconstructor = SafeLinearReconstructor::new(
//!     SafeLinearConfig::default(),
//!     names.clone(),
//!     Arc::new(IdealGasEos::monatomic()),
//!     Arc::new(RigidWalls::new(&names)),
//! )
//! .unwrap();
//!
//! let cells = vec![CellState::new(1.0, 1.0, DVec2::ZERO, vec![], vec![false])];
//! let mut faces = Vec::new();
//! reconstructor.reconstruct(&mesh, &cells, 0.0, &mut faces).unwrap();
//! assert_eq!(faces.len(), 1);
//! ```

mod config;
mod redress;
mod safe_linear;
mod sampler;
mod traits;

pub use config::SafeLinearConfig;
pub use redress::eos_redress;
pub use safe_linear::{PassStage, SafeLinearReconstructor};
pub use sampler::interp;
pub use traits::SpatialReconstruction;
