use std::fmt;
use std::str::FromStr;

use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::shared::parse_year_number;

/// 读者编号，规范形式为 `{year}/{number}`
#[value_object(via = String, ctor = parse)]
#[derive(Copy, PartialOrd, Ord)]
pub struct ReaderNumber {
    year: u32,
    number: u32,
}

impl ReaderNumber {
    pub fn new(year: u32, number: u32) -> Self {
        Self { year, number }
    }

    pub fn parse(raw: impl AsRef<str>) -> DomainResult<Self> {
        let raw = raw.as_ref();
        parse_year_number(raw)
            .map(|(year, number)| Self { year, number })
            .ok_or_else(|| {
                DomainError::invalid_argument(
                    "reader_number",
                    "Reader number must have the format {year}/{number}",
                )
            })
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for ReaderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.year, self.number)
    }
}

impl FromStr for ReaderNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ReaderNumber> for String {
    fn from(value: ReaderNumber) -> Self {
        value.to_string()
    }
}
