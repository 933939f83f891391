//! 跨上下文共享的值对象：人名与照片
//!
mod name;
mod photo;

pub use name::Name;
pub use photo::Photo;

/// 解析形如 `{year}/{number}` 的编号，两段均须为纯 ASCII 数字且不溢出 `u32`
pub(crate) fn parse_year_number(raw: &str) -> Option<(u32, u32)> {
    let (year, number) = raw.split_once('/')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(year) || !digits(number) {
        return None;
    }
    Some((year.parse().ok()?, number.parse().ok()?))
}
