use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use library_macros::value_object;

use crate::clock;
use crate::error::{DomainError, DomainResult};
use crate::shared::parse_year_number;

/// 借阅编号，借阅的自然键，规范形式为 `{year}/{sequential}`（如 `2024/23`）
///
/// 年份不得晚于当前年份。序号通常为当年已有借阅数加一。
#[value_object(via = String, ctor = parse)]
#[derive(Copy, PartialOrd, Ord)]
pub struct LendingNumber {
    year: u32,
    sequential: u32,
}

impl LendingNumber {
    pub fn new(year: u32, sequential: u32) -> DomainResult<Self> {
        Self::new_as_of(year, sequential, clock::today())
    }

    pub fn new_as_of(year: u32, sequential: u32, today: NaiveDate) -> DomainResult<Self> {
        if i64::from(year) > i64::from(today.year()) {
            return Err(DomainError::invalid_argument(
                "lending_number",
                "Lending number year cannot be in the future",
            ));
        }
        Ok(Self { year, sequential })
    }

    /// 以今天所在年份生成编号
    pub fn current(sequential: u32) -> DomainResult<Self> {
        Self::current_as_of(sequential, clock::today())
    }

    pub fn current_as_of(sequential: u32, today: NaiveDate) -> DomainResult<Self> {
        let year = u32::try_from(today.year()).map_err(|_| {
            DomainError::invalid_argument("lending_number", "Lending number year cannot be negative")
        })?;
        Self::new_as_of(year, sequential, today)
    }

    /// 解析 `{year}/{sequential}`，格式不符直接报错
    ///
    /// ```
    /// use library_domain::lending::LendingNumber;
    ///
    /// let n = LendingNumber::parse("2024/23").unwrap();
    /// assert_eq!((n.year(), n.sequential()), (2024, 23));
    /// assert!(LendingNumber::parse("2024-23").is_err());
    /// ```
    pub fn parse(raw: impl AsRef<str>) -> DomainResult<Self> {
        Self::parse_as_of(raw.as_ref(), clock::today())
    }

    pub fn parse_as_of(raw: &str, today: NaiveDate) -> DomainResult<Self> {
        let (year, sequential) = parse_year_number(raw).ok_or_else(|| {
            DomainError::invalid_argument(
                "lending_number",
                "Lending number must have the format {year}/{sequential}",
            )
        })?;
        Self::new_as_of(year, sequential, today)
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn sequential(&self) -> u32 {
        self.sequential
    }
}

impl fmt::Display for LendingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.year, self.sequential)
    }
}

impl FromStr for LendingNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<LendingNumber> for String {
    fn from(value: LendingNumber) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn formats_year_and_sequential() {
        let n = LendingNumber::new_as_of(2024, 23, today()).unwrap();
        assert_eq!(n.to_string(), "2024/23");
        assert_eq!(String::from(n), "2024/23");
    }

    #[test]
    fn rejects_future_year() {
        let err = LendingNumber::new_as_of(2025, 1, today()).unwrap_err();
        assert_eq!(err.reason(), "Lending number year cannot be in the future");
        assert!(LendingNumber::parse_as_of("2025/1", today()).is_err());
    }

    #[test]
    fn current_uses_reference_year() {
        let n = LendingNumber::current_as_of(5, today()).unwrap();
        assert_eq!(n.year(), 2024);
        assert_eq!(n.sequential(), 5);
    }

    #[test]
    fn rejects_malformed_strings() {
        for raw in ["", "2024", "2024/", "/1", "2024-1", "2024/1/1", "-2024/1", "2024/ 1", "ab/cd"] {
            let err = LendingNumber::parse_as_of(raw, today()).unwrap_err();
            assert_eq!(
                err.reason(),
                "Lending number must have the format {year}/{sequential}",
                "{raw:?}"
            );
        }
    }

    #[test]
    fn serde_uses_canonical_string() {
        let n = LendingNumber::new(2020, 3).unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"2020/3\"");
        assert_eq!(serde_json::from_str::<LendingNumber>("\"2020/3\"").unwrap(), n);
        assert!(serde_json::from_str::<LendingNumber>("\"2020\"").is_err());
    }

    proptest! {
        #[test]
        fn canonical_form_round_trips(year in 0u32..=2024, sequential in any::<u32>()) {
            let n = LendingNumber::new_as_of(year, sequential, today()).unwrap();
            let text = n.to_string();
            prop_assert_eq!(&text, &format!("{year}/{sequential}"));
            prop_assert_eq!(LendingNumber::parse_as_of(&text, today()).unwrap(), n);
        }

        #[test]
        fn non_matching_strings_are_rejected(raw in "\\PC*") {
            let well_formed = raw
                .split_once('/')
                .map(|(y, s)| {
                    !y.is_empty()
                        && !s.is_empty()
                        && y.bytes().all(|b| b.is_ascii_digit())
                        && s.bytes().all(|b| b.is_ascii_digit())
                })
                .unwrap_or(false);
            prop_assume!(!well_formed);
            let rejected = matches!(
                LendingNumber::parse_as_of(&raw, today()),
                Err(DomainError::InvalidArgument { field: "lending_number", .. })
            );
            prop_assert!(rejected);
        }
    }
}
