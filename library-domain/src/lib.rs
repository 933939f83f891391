//! 图书馆领域层（library-domain）
//!
//! 图书、作者、读者与借阅的业务规则：
//! - 构造即校验的值对象（`book::Isbn`、`shared::Name`、`lending::LendingNumber` 等）
//! - 带版本号的实体（`Book`、`Author`、`Reader`、`Lending`），通过 `entity::Patchable`
//!   以"期望版本 + 部分更新"的方式变更
//! - 乐观并发控制（`concurrency`）：只比较版本、不加锁，冲突返回 `DomainError::StaleState`
//! - 三态部分更新字段（`patch::Patch`）：区分未提供、显式清空与设为新值
//!
//! 持久化、HTTP 与请求映射均不在本 crate 内；应用层见 `library-application`。
//!
//! 典型用法：
//! 1. 按自然键读取实体并记下其 `version()`；
//! 2. 构造补丁，调用 `apply_patch(version, patch)`；
//! 3. 由仓储以读取时的版本做比较交换提交。
//!
pub mod author;
pub mod book;
pub mod clock;
pub mod concurrency;
pub mod entity;
pub mod error;
pub mod lending;
pub mod patch;
pub mod reader;
pub mod shared;
pub mod value_object;

// 允许在本 crate 内部通过 ::library_domain 进行自引用，
// 以便过程宏生成的路径在本 crate 内同样可以解析。
extern crate self as library_domain;
