//! 当前日期来源
//!
//! 依赖"今天"的规则（出生日期最低年龄、借阅编号年份）都提供一个显式传入参考日期的变体，
//! 默认变体经由此处取本地日期。
//!
use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
