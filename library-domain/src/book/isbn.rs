use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 国际标准书号，图书的自然键
///
/// - ISBN-10：前 9 位为数字，末位为数字或 `X`（代表 10），按权重 10..1 求和后模 11 为 0
/// - ISBN-13：13 位数字，按 1/3 交替权重求和后模 10 为 0
///
/// 不接受连字符或空格；小写 `x` 归一为 `X`。
#[value_object]
#[derive(PartialOrd, Ord)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let mut raw = raw.into();
        if raw.len() == 10 && raw.ends_with('x') {
            raw.pop();
            raw.push('X');
        }
        let isbn = Self(raw);
        isbn.validate()?;
        Ok(isbn)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_isbn13(&self) -> bool {
        self.0.len() == 13
    }
}

impl ValueObject for Isbn {
    fn validate(&self) -> DomainResult<()> {
        match self.0.len() {
            10 if is_valid_isbn10(&self.0) => Ok(()),
            10 => Err(DomainError::invalid_argument(
                "isbn",
                "Invalid ISBN-10 format or check digit",
            )),
            13 if is_valid_isbn13(&self.0) => Ok(()),
            13 => Err(DomainError::invalid_argument(
                "isbn",
                "Invalid ISBN-13 format or check digit",
            )),
            _ => Err(DomainError::invalid_argument(
                "isbn",
                "ISBN must have 10 or 13 characters",
            )),
        }
    }
}

fn is_valid_isbn10(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut sum = 0u32;
    for (i, &b) in bytes.iter().enumerate() {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'X' if i == 9 => 10,
            _ => return false,
        };
        sum += digit * (10 - i as u32);
    }
    sum % 11 == 0
}

fn is_valid_isbn13(raw: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in raw.bytes().enumerate() {
        if !b.is_ascii_digit() {
            return false;
        }
        let weight = if i % 2 == 0 { 1 } else { 3 };
        sum += u32::from(b - b'0') * weight;
    }
    sum % 10 == 0
}
