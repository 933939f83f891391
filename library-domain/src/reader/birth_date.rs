use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use library_macros::value_object;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::{DomainError, DomainResult};

/// 读者年龄策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgePolicy {
    pub minimum_age: u32,
}

impl AgePolicy {
    pub const DEFAULT_MINIMUM_AGE: u32 = 18;

    pub fn new(minimum_age: u32) -> Self {
        Self { minimum_age }
    }

    /// 以 `today` 为参考日期检查出生日期；未来日期同样视为不满足
    pub fn check(&self, date: NaiveDate, today: NaiveDate) -> DomainResult<()> {
        match today.years_since(date) {
            Some(age) if age >= self.minimum_age => Ok(()),
            _ => Err(DomainError::policy_violation(format!(
                "Reader must be at least {} years old",
                self.minimum_age
            ))),
        }
    }
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MINIMUM_AGE)
    }
}

/// 读者出生日期
///
/// 格式非法返回 `InvalidArgument`；年龄不足返回 `PolicyViolation`。
/// 反序列化按默认策略与当天日期校验。
#[value_object(ctor = from_date, display = false)]
#[derive(Copy, PartialOrd, Ord)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(year: i32, month: u32, day: u32) -> DomainResult<Self> {
        Self::from_date(Self::calendar_date(year, month, day)?)
    }

    pub fn from_date(date: NaiveDate) -> DomainResult<Self> {
        Self::with_policy(date, &AgePolicy::default(), clock::today())
    }

    pub fn with_policy(date: NaiveDate, policy: &AgePolicy, today: NaiveDate) -> DomainResult<Self> {
        policy.check(date, today)?;
        Ok(Self(date))
    }

    /// 解析 `YYYY-MM-DD`（月、日可不补零）
    pub fn parse(raw: &str, policy: &AgePolicy, today: NaiveDate) -> DomainResult<Self> {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| invalid_date())?;
        Self::with_policy(date, policy, today)
    }

    pub fn calendar_date(year: i32, month: u32, day: u32) -> DomainResult<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid_date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

fn invalid_date() -> DomainError {
    DomainError::invalid_argument("birth_date", "Birth date is not a valid date")
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl FromStr for BirthDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &AgePolicy::default(), clock::today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn renders_without_padding() {
        let date = BirthDate::new(2000, 1, 5).unwrap();
        assert_eq!(date.to_string(), "2000-1-5");
        assert_eq!(date.date(), day(2000, 1, 5));
    }

    #[test]
    fn invalid_calendar_date_is_an_argument_error() {
        let err = BirthDate::new(2001, 2, 29).unwrap_err();
        assert_eq!(err.reason(), "Birth date is not a valid date");
        assert!(matches!(err, DomainError::InvalidArgument { .. }));

        let today = day(2024, 6, 1);
        assert!(BirthDate::parse("2000/01/01", &AgePolicy::default(), today).is_err());
        assert!(BirthDate::parse("not a date", &AgePolicy::default(), today).is_err());
    }

    // 恰好满 18 岁当天即可
    #[test]
    fn minimum_age_is_inclusive() {
        let policy = AgePolicy::default();
        let today = day(2024, 6, 1);

        assert!(BirthDate::with_policy(day(2006, 6, 1), &policy, today).is_ok());

        let err = BirthDate::with_policy(day(2006, 6, 2), &policy, today).unwrap_err();
        assert_eq!(
            err,
            DomainError::policy_violation("Reader must be at least 18 years old")
        );
    }

    #[test]
    fn future_dates_violate_policy() {
        let today = day(2024, 6, 1);
        let err = BirthDate::with_policy(day(2030, 1, 1), &AgePolicy::new(0), today).unwrap_err();
        assert!(matches!(err, DomainError::PolicyViolation { .. }));
    }

    #[test]
    fn configurable_minimum_age() {
        let today = day(2024, 6, 1);
        let policy = AgePolicy::new(12);
        assert!(BirthDate::parse("2010-1-1", &policy, today).is_ok());
        assert!(BirthDate::parse("2010-01-01", &AgePolicy::default(), today).is_err());
    }

    #[test]
    fn serde_round_trip_uses_iso_dates() {
        let date = BirthDate::new(1990, 12, 31).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"1990-12-31\"");
        assert_eq!(serde_json::from_str::<BirthDate>(&json).unwrap(), date);
    }
}
