// crates/rh_foundation/src/lib.rs

//! Foundation Layer
//!
//! 基础层，提供与物理无关的公共抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`names`]: 示踪剂 / 标签名称注册表
//!
//! # 示例
//!
//! ```
//! use rh_foundation::{FieldNames, RhResult};
//!
//! fn build() -> RhResult<FieldNames> {
//!     FieldNames::new(["He4"], ["ghost"])
//! }
//!
//! let names = build().unwrap();
//! assert_eq!(names.ghost_sticker(), Some(0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod names;

pub use error::{RhError, RhResult};
pub use names::{FieldNames, FieldNamesSpec, GHOST_STICKER};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{RhError, RhResult};
    pub use crate::names::{FieldNames, GHOST_STICKER};
}
