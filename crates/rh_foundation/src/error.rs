// crates/rh_foundation/src/error.rs

//! 错误处理模块，定义基础层统一错误类型
//!
//! 提供 `RhError` 枚举和 `RhResult` 类型别名。
//!
//! # 层次
//!
//! 基础层只定义与物理无关的错误（IO、配置、网格拓扑、名称注册表）。
//! 重构计算相关的错误在 `rh_physics::error` 中定义，并可包装本类型。
//!
//! # 示例
//!
//! ```
//! use rh_foundation::error::{RhError, RhResult};
//!
//! fn check_ratio(value: f64) -> RhResult<()> {
//!     if value <= 0.0 {
//!         return Err(RhError::invalid_config("ratio", value.to_string(), "必须为正"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_ratio(-1.0).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type RhResult<T> = Result<T, RhError>;

/// 基础层错误类型
#[derive(Error, Debug)]
pub enum RhError {
    // ========================================================================
    // IO / 序列化
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    // ========================================================================
    // 配置
    // ========================================================================

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    // ========================================================================
    // 网格 / 数据布局
    // ========================================================================

    /// 无效网格拓扑
    #[error("无效的网格拓扑: {message}")]
    InvalidMesh {
        /// 具体错误信息
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 名称重复注册
    #[error("重复的{kind}名称: {name}")]
    DuplicateName {
        /// 名称类别（tracer / sticker）
        kind: &'static str,
        /// 重复的名称
        name: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl RhError {
    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 无效网格
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 名称重复
    pub fn duplicate_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }
}

impl From<std::io::Error> for RhError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for RhError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================
