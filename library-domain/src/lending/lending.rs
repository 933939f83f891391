use chrono::{Days, NaiveDate};
use library_macros::entity;
use serde::{Deserialize, Serialize};

use super::{Commentary, LendingNumber};
use crate::book::Isbn;
use crate::clock;
use crate::entity::Patchable;
use crate::error::{DomainError, DomainResult};
use crate::patch::Patch;
use crate::reader::ReaderNumber;
use crate::value_object::Version;

/// 借阅策略：借期天数与逾期每日罚金（分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingPolicy {
    pub duration_days: u32,
    pub fine_per_day_cents: u32,
}

impl LendingPolicy {
    pub const DEFAULT_DURATION_DAYS: u32 = 14;
    pub const DEFAULT_FINE_PER_DAY_CENTS: u32 = 50;

    pub fn new(duration_days: u32, fine_per_day_cents: u32) -> Self {
        Self {
            duration_days,
            fine_per_day_cents,
        }
    }
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DURATION_DAYS,
            Self::DEFAULT_FINE_PER_DAY_CENTS,
        )
    }
}

/// 借阅：某位读者借出某本图书的一次记录
///
/// 罚金单价在创建时从策略中固定下来，之后调整策略不影响已有借阅。
#[entity(id = LendingNumber)]
pub struct Lending {
    book: Isbn,
    reader: ReaderNumber,
    start_date: NaiveDate,
    limit_date: NaiveDate,
    returned_date: Option<NaiveDate>,
    commentary: Option<Commentary>,
    fine_per_day_cents: u32,
}

/// 借阅部分更新请求
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub commentary: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub limit_date: Patch<NaiveDate>,
}

impl Lending {
    pub fn new(
        number: LendingNumber,
        book: Isbn,
        reader: ReaderNumber,
        policy: &LendingPolicy,
        start_date: NaiveDate,
    ) -> DomainResult<Self> {
        if policy.duration_days == 0 {
            return Err(DomainError::invalid_argument(
                "duration_days",
                "Lending duration must be at least one day",
            ));
        }
        let limit_date = start_date
            .checked_add_days(Days::new(u64::from(policy.duration_days)))
            .ok_or_else(|| {
                DomainError::invalid_argument("limit_date", "Limit date is out of range")
            })?;

        Ok(Self {
            id: number,
            version: Version::new(),
            book,
            reader,
            start_date,
            limit_date,
            returned_date: None,
            commentary: None,
            fine_per_day_cents: policy.fine_per_day_cents,
        })
    }

    pub fn number(&self) -> LendingNumber {
        self.id
    }

    pub fn book(&self) -> &Isbn {
        &self.book
    }

    pub fn reader(&self) -> ReaderNumber {
        self.reader
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn limit_date(&self) -> NaiveDate {
        self.limit_date
    }

    pub fn returned_date(&self) -> Option<NaiveDate> {
        self.returned_date
    }

    pub fn commentary(&self) -> Option<&Commentary> {
        self.commentary.as_ref()
    }

    pub fn is_returned(&self) -> bool {
        self.returned_date.is_some()
    }

    /// 以今天为归还日期登记归还
    pub fn set_returned(&mut self, expected: Version, commentary: Option<String>) -> DomainResult<()> {
        self.set_returned_on(expected, commentary, clock::today())
    }

    /// 登记归还；只能登记一次
    pub fn set_returned_on(
        &mut self,
        expected: Version,
        commentary: Option<String>,
        returned_on: NaiveDate,
    ) -> DomainResult<()> {
        self.guard_version(expected)?;

        if self.is_returned() {
            return Err(DomainError::invalid_argument(
                "returned_date",
                format!("Lending {} has already been returned", self.id),
            ));
        }
        if returned_on < self.start_date {
            return Err(DomainError::invalid_argument(
                "returned_date",
                "Returned date cannot be before the start date",
            ));
        }
        let commentary = commentary.map(Commentary::optional).transpose()?.flatten();

        self.returned_date = Some(returned_on);
        if commentary.is_some() {
            self.commentary = commentary;
        }
        self.advance_version();
        Ok(())
    }

    /// 距离应还日期的天数；已归还或已逾期时为 `None`
    pub fn days_until_return(&self, today: NaiveDate) -> Option<i64> {
        if self.is_returned() || today > self.limit_date {
            return None;
        }
        Some((self.limit_date - today).num_days())
    }

    /// 逾期天数（已归还则以归还日期计），不会为负
    pub fn days_delayed(&self, today: NaiveDate) -> i64 {
        let end = self.returned_date.unwrap_or(today);
        (end - self.limit_date).num_days().max(0)
    }

    pub fn fine_in_cents(&self, today: NaiveDate) -> Option<u64> {
        let delayed = u64::try_from(self.days_delayed(today)).ok()?;
        (delayed > 0).then(|| delayed * u64::from(self.fine_per_day_cents))
    }
}

impl Patchable for Lending {
    type Patch = LendingPatch;

    fn apply_patch(&mut self, expected: Version, patch: LendingPatch) -> DomainResult<()> {
        self.guard_version(expected)?;

        let commentary = patch.commentary.try_map(Commentary::optional)?.flatten();
        let limit_date = patch.limit_date.required("limit_date")?;
        if limit_date.is_some() && self.is_returned() {
            return Err(DomainError::invalid_argument(
                "limit_date",
                format!("Limit date of returned lending {} cannot be changed", self.id),
            ));
        }
        if limit_date.is_some_and(|d| d < self.start_date) {
            return Err(DomainError::invalid_argument(
                "limit_date",
                "Limit date cannot be before the start date",
            ));
        }

        commentary.apply_to(&mut self.commentary);
        if let Some(limit_date) = limit_date {
            self.limit_date = limit_date;
        }

        self.advance_version();
        Ok(())
    }
}
