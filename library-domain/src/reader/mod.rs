//! 读者上下文：读者编号、出生日期（含年龄策略）、电话与读者聚合
//!
mod birth_date;
mod phone_number;
mod reader;
mod reader_number;

pub use birth_date::{AgePolicy, BirthDate};
pub use phone_number::PhoneNumber;
pub use reader::{Reader, ReaderPatch};
pub use reader_number::ReaderNumber;
