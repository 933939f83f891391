//! 实体（Entity）基础抽象
//!
//! 实体具备不可变的标识与单调递增的版本号（乐观锁）。
//! 具体实体通过 `#[entity(id = ...)]` 宏实现 `Entity`，并在各自的变更方法中
//! 先调用 `guard_version` 校验期望版本、最后调用 `advance_version` 提升版本。
//!
use std::fmt::Display;

use crate::error::DomainResult;
use crate::shared::Photo;
use crate::value_object::Version;

/// 具备唯一标识与版本的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可显示与可克隆
    type Id: Clone + Display + Send + Sync;

    /// 实体类型名（用于日志与冲突报告）
    const TYPE: &'static str;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（用于乐观锁与并发控制）
    fn version(&self) -> Version;
}

/// 支持部分更新的实体
///
/// `apply_patch` 的约定：
/// 1. `expected` 与当前版本不一致时返回 `StaleState`，实体保持不变；
/// 2. 先校验补丁中所有出现的字段，任何一个失败则返回 `InvalidArgument`，实体保持不变；
/// 3. 全部通过后一次性写入并将版本加一。
pub trait Patchable: Entity {
    type Patch: Send + Sync;

    fn apply_patch(&mut self, expected: Version, patch: Self::Patch) -> DomainResult<()>;
}

/// 带可选照片的实体
pub trait EntityWithPhoto: Entity {
    fn photo(&self) -> Option<&Photo>;

    /// 按乐观锁约定清除照片；照片本就不存在时同样成功并提升版本
    fn remove_photo(&mut self, expected: Version) -> DomainResult<()>;
}
