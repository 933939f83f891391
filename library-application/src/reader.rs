//! 读者相关的命令与查询
//!
use crate::command::Command;
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::error::AppError;
use crate::mutation;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use crate::repository::Repository;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use library_domain::book::Genre;
use library_domain::clock;
use library_domain::error::DomainError;
use library_domain::reader::{AgePolicy, BirthDate, Reader, ReaderNumber, ReaderPatch};
use library_domain::value_object::Version;
use std::sync::Arc;
use tracing::info;

/// 注册读者；编号为 `{当前年份}/{当年已注册人数 + 1}`
#[derive(Debug, Clone)]
pub struct CreateReader {
    pub name: String,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub gdpr_consent: bool,
    pub marketing_consent: bool,
    pub third_party_sharing_consent: bool,
    pub photo: Option<String>,
    pub interests: Vec<String>,
}

impl Command for CreateReader {
    const NAME: &'static str = "CreateReader";
    type Output = ReaderNumber;
}

#[derive(Debug, Clone)]
pub struct PatchReader {
    pub number: ReaderNumber,
    pub expected: Version,
    pub patch: ReaderPatch,
}

impl Command for PatchReader {
    const NAME: &'static str = "PatchReader";
    type Output = Version;
}

#[derive(Debug, Clone)]
pub struct RemoveReaderPhoto {
    pub number: ReaderNumber,
    pub expected: Version,
}

impl Command for RemoveReaderPhoto {
    const NAME: &'static str = "RemoveReaderPhoto";
    type Output = Version;
}

#[derive(Debug, Clone)]
pub struct FindReader {
    pub number: ReaderNumber,
}

impl Query for FindReader {
    const NAME: &'static str = "FindReader";
    type Output = Reader;
}

pub struct ReaderHandler {
    readers: Arc<dyn Repository<Reader>>,
    age_policy: AgePolicy,
}

impl ReaderHandler {
    pub fn new(readers: Arc<dyn Repository<Reader>>, age_policy: AgePolicy) -> Self {
        Self {
            readers,
            age_policy,
        }
    }

    async fn next_number(&self, today: NaiveDate) -> Result<ReaderNumber, AppError> {
        let year = u32::try_from(today.year())
            .map_err(|_| DomainError::invalid_argument("year", "Current year is out of range"))?;
        let registered = self
            .readers
            .find_all()
            .await?
            .iter()
            .filter(|r| r.number().year() == year)
            .count();
        let number = u32::try_from(registered + 1)
            .map_err(|_| DomainError::invalid_argument("number", "Reader numbers exhausted for this year"))?;
        Ok(ReaderNumber::new(year, number))
    }
}

#[async_trait]
impl CommandHandler<CreateReader> for ReaderHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreateReader) -> Result<ReaderNumber, AppError> {
        let today = clock::today();
        let birth_date = BirthDate::with_policy(cmd.birth_date, &self.age_policy, today)?;
        let interests = cmd
            .interests
            .into_iter()
            .map(Genre::new)
            .collect::<Result<Vec<_>, _>>()?;
        let number = self.next_number(today).await?;

        let reader = Reader::builder()
            .number(number)
            .name(cmd.name)
            .birth_date(birth_date)
            .phone_number(cmd.phone_number)
            .gdpr_consent(cmd.gdpr_consent)
            .marketing_consent(cmd.marketing_consent)
            .third_party_sharing_consent(cmd.third_party_sharing_consent)
            .maybe_photo(cmd.photo)
            .interests(interests)
            .build()?;

        self.readers.insert(reader).await?;
        info!(
            reader = %number,
            correlation_id = ctx.correlation_id.as_deref(),
            "reader registered"
        );
        Ok(number)
    }
}

#[async_trait]
impl CommandHandler<PatchReader> for ReaderHandler {
    async fn handle(&self, ctx: &AppContext, cmd: PatchReader) -> Result<Version, AppError> {
        mutation::patch(ctx, &*self.readers, &cmd.number, cmd.expected, cmd.patch).await
    }
}

#[async_trait]
impl CommandHandler<RemoveReaderPhoto> for ReaderHandler {
    async fn handle(&self, ctx: &AppContext, cmd: RemoveReaderPhoto) -> Result<Version, AppError> {
        mutation::remove_photo(ctx, &*self.readers, &cmd.number, cmd.expected).await
    }
}

#[async_trait]
impl QueryHandler<FindReader> for ReaderHandler {
    async fn handle(&self, _ctx: &AppContext, q: FindReader) -> Result<Reader, AppError> {
        self.readers.load(&q.number).await
    }
}
