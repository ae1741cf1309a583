// crates/rh_foundation/src/names.rs

//! 示踪剂 / 标签名称注册表
//!
//! 单元状态中的示踪剂（tracer，连续分数）与标签（sticker，布尔分类）
//! 以固定顺序的数组存储，本模块维护名称到数组下标的映射。
//!
//! 注册表在模拟开始时构建一次，之后通过 `Arc` 在整个进程内共享、只读。
//! 所有按名称查询的下标应在组件构建时解析完毕，热循环中只使用下标。
//!
//! ```
//! use rh_foundation::names::FieldNames;
//!
//! let names = FieldNames::new(["He4", "C12"], ["ghost"]).unwrap();
//! assert_eq!(names.tracer_index("C12"), Some(1));
//! assert_eq!(names.sticker_index("ghost"), Some(0));
//! assert_eq!(names.tracer_index("O16"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{RhError, RhResult};

/// 幽灵单元标签名
pub const GHOST_STICKER: &str = "ghost";

/// 名称注册表的可序列化形式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNamesSpec {
    /// 示踪剂名称（有序）
    #[serde(default)]
    pub tracers: Vec<String>,
    /// 标签名称（有序）
    #[serde(default)]
    pub stickers: Vec<String>,
}

/// 示踪剂 / 标签名称注册表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldNamesSpec", into = "FieldNamesSpec")]
pub struct FieldNames {
    tracers: Vec<String>,
    stickers: Vec<String>,
    tracer_lookup: HashMap<String, usize>,
    sticker_lookup: HashMap<String, usize>,
}

impl FieldNames {
    /// 创建注册表
    ///
    /// 名称重复时返回 [`RhError::DuplicateName`]。
    pub fn new<T, S>(
        tracers: impl IntoIterator<Item = T>,
        stickers: impl IntoIterator<Item = S>,
    ) -> RhResult<Self>
    where
        T: Into<String>,
        S: Into<String>,
    {
        let tracers: Vec<String> = tracers.into_iter().map(Into::into).collect();
        let stickers: Vec<String> = stickers.into_iter().map(Into::into).collect();
        let tracer_lookup = build_lookup("tracer", &tracers)?;
        let sticker_lookup = build_lookup("sticker", &stickers)?;
        Ok(Self {
            tracers,
            stickers,
            tracer_lookup,
            sticker_lookup,
        })
    }

    /// 示踪剂数量
    #[inline]
    pub fn n_tracers(&self) -> usize {
        self.tracers.len()
    }

    /// 标签数量
    #[inline]
    pub fn n_stickers(&self) -> usize {
        self.stickers.len()
    }

    /// 示踪剂名称（有序）
    pub fn tracers(&self) -> &[String] {
        &self.tracers
    }

    /// 标签名称（有序）
    pub fn stickers(&self) -> &[String] {
        &self.stickers
    }

    /// 示踪剂下标
    #[inline]
    pub fn tracer_index(&self, name: &str) -> Option<usize> {
        self.tracer_lookup.get(name).copied()
    }

    /// 标签下标
    #[inline]
    pub fn sticker_index(&self, name: &str) -> Option<usize> {
        self.sticker_lookup.get(name).copied()
    }

    /// 幽灵标签下标（未注册时为 `None`）
    #[inline]
    pub fn ghost_sticker(&self) -> Option<usize> {
        self.sticker_index(GHOST_STICKER)
    }
}

fn build_lookup(kind: &'static str, names: &[String]) -> RhResult<HashMap<String, usize>> {
    let mut lookup = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if lookup.insert(name.clone(), i).is_some() {
            return Err(RhError::duplicate_name(kind, name.clone()));
        }
    }
    Ok(lookup)
}

impl TryFrom<FieldNamesSpec> for FieldNames {
    type Error = RhError;

    fn try_from(spec: FieldNamesSpec) -> RhResult<Self> {
        Self::new(spec.tracers, spec.stickers)
    }
}

impl From<FieldNames> for FieldNamesSpec {
    fn from(names: FieldNames) -> Self {
        Self {
            tracers: names.tracers,
            stickers: names.stickers,
        }
    }
}
