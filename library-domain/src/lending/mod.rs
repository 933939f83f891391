//! 借阅上下文：借阅编号、归还备注、借阅策略与借阅聚合
//!
mod commentary;
mod lending;
mod lending_number;

pub use commentary::Commentary;
pub use lending::{Lending, LendingPatch, LendingPolicy};
pub use lending_number::LendingNumber;
