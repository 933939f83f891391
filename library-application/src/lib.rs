//! 图书馆应用层（library-application）
//!
//! 在领域层之上提供进程内的用例编排：
//! - 命令/查询及其处理器（`author`、`book`、`reader`、`lending`）
//! - 带比较交换提交的仓储端口与内存实现（`repository`）
//! - 按类型路由的内存命令/查询总线
//! - 业务参数（`config`）
//!
//! 处理器遵循"读取-变更-提交"流程，版本冲突以 `AppError::Domain(StaleState)` 原样返回，不自动重试。
//!
pub mod author;
pub mod book;
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod config;
pub mod context;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod lending;
mod mutation;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod reader;
pub mod registry;
pub mod repository;

pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
pub use registry::{Repositories, register_handlers};
