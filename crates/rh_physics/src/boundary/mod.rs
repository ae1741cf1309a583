// crates/rh_physics/src/boundary/mod.rs

//! 边界处理模块
//!
//! 边界外的状态由幽灵单元提供，重构引擎通过 [`GhostProvider`] 获取：
//! - [`RigidWalls`]: 刚性固壁，法向速度反射
//! - [`OutflowGhosts`]: 零梯度出流

mod ghost;

pub use ghost::{reflect_velocity, GhostMap, GhostProvider, OutflowGhosts, RigidWalls};
