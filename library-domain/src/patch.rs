//! 部分更新字段（Patch）
//!
//! 以三态显式区分"未提供"、"显式清空"与"设为新值"，避免把缺省与 null 混为一谈：
//!
//! | JSON          | `Patch<T>`  |
//! |---------------|-------------|
//! | 字段缺失       | `Keep`      |
//! | `null`        | `Clear`     |
//! | 具体值         | `Set(v)`    |
//!
//! 字段缺失依赖容器结构体上的 `#[serde(default)]`。
//!
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// 保持原值
    #[default]
    Keep,
    /// 清空（仅对可选字段合法）
    Clear,
    /// 设为新值
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Keep => Patch::Keep,
            Self::Clear => Patch::Clear,
            Self::Set(v) => Patch::Set(f(v)),
        }
    }

    /// 对 `Set` 中的值执行可能失败的转换（通常是值对象的校验构造）
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        Ok(match self {
            Self::Keep => Patch::Keep,
            Self::Clear => Patch::Clear,
            Self::Set(v) => Patch::Set(f(v)?),
        })
    }

    /// 必填字段：`Clear` 视为非法，返回 `Some(新值)` 或 `None`（保持）
    pub fn required(self, field: &'static str) -> DomainResult<Option<T>> {
        match self {
            Self::Keep => Ok(None),
            Self::Clear => Err(DomainError::invalid_argument(
                field,
                format!("{field} cannot be cleared"),
            )),
            Self::Set(v) => Ok(Some(v)),
        }
    }

    /// 写入可选字段
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(v) => *slot = Some(v),
        }
    }
}

impl<T> Patch<Option<T>> {
    /// 将"设为空值"归一为 `Clear`，例如空白描述视同清空
    pub fn flatten(self) -> Patch<T> {
        match self {
            Self::Keep => Patch::Keep,
            Self::Clear | Self::Set(None) => Patch::Clear,
            Self::Set(Some(v)) => Patch::Set(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Self::Set(v),
            None => Self::Clear,
        })
    }
}

/// `Keep` 需配合 `#[serde(skip_serializing_if = "Patch::is_keep")]` 才能省略字段
impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Set(v) => serializer.serialize_some(v),
            Self::Keep | Self::Clear => serializer.serialize_none(),
        }
    }
}
