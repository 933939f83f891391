//! 借阅相关的命令与查询
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
use chrono::Datelike;
use library_domain::book::{Book, Isbn};
use library_domain::clock;
use library_domain::error::DomainError;
use library_domain::lending::{Lending, LendingNumber, LendingPatch, LendingPolicy};
use library_domain::reader::{Reader, ReaderNumber};
use library_domain::value_object::Version;
use std::sync::Arc;
use tracing::info;

/// 以今天为起始日期借出图书
///
/// 编号序号为当年已有借阅数加一；图书尚未归还时不能再次借出。
#[derive(Debug, Clone)]
pub struct CreateLending {
    pub isbn: Isbn,
    pub reader: ReaderNumber,
}

impl Command for CreateLending {
    const NAME: &'static str = "CreateLending";
    type Output = LendingNumber;
}

#[derive(Debug, Clone)]
pub struct PatchLending {
    pub number: LendingNumber,
    pub expected: Version,
    pub patch: LendingPatch,
}

impl Command for PatchLending {
    const NAME: &'static str = "PatchLending";
    type Output = Version;
}

/// 以今天为归还日期登记归还
#[derive(Debug, Clone)]
pub struct ReturnLending {
    pub number: LendingNumber,
    pub expected: Version,
    pub commentary: Option<String>,
}

impl Command for ReturnLending {
    const NAME: &'static str = "ReturnLending";
    type Output = Version;
}

#[derive(Debug, Clone)]
pub struct FindLending {
    pub number: LendingNumber,
}

impl Query for FindLending {
    const NAME: &'static str = "FindLending";
    type Output = Lending;
}

pub struct LendingHandler {
    lendings: Arc<dyn Repository<Lending>>,
    books: Arc<dyn Repository<Book>>,
    readers: Arc<dyn Repository<Reader>>,
    policy: LendingPolicy,
}

impl LendingHandler {
    pub fn new(
        lendings: Arc<dyn Repository<Lending>>,
        books: Arc<dyn Repository<Book>>,
        readers: Arc<dyn Repository<Reader>>,
        policy: LendingPolicy,
    ) -> Self {
        Self {
            lendings,
            books,
            readers,
            policy,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateLending> for LendingHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreateLending) -> Result<LendingNumber, AppError> {
        self.books.load(&cmd.isbn).await?;
        self.readers.load(&cmd.reader).await?;

        let today = clock::today();
        let existing = self.lendings.find_all().await?;
        if existing
            .iter()
            .any(|l| l.book() == &cmd.isbn && !l.is_returned())
        {
            return Err(DomainError::invalid_argument(
                "isbn",
                format!("Book {} is currently lent", cmd.isbn),
            )
            .into());
        }

        let this_year = existing
            .iter()
            .filter(|l| i64::from(l.number().year()) == i64::from(today.year()))
            .count();
        let sequential = u32::try_from(this_year + 1)
            .map_err(|_| DomainError::invalid_argument("number", "Lending numbers exhausted for this year"))?;
        let number = LendingNumber::current_as_of(sequential, today)?;

        let lending = Lending::new(number, cmd.isbn, cmd.reader, &self.policy, today)?;
        let limit_date = lending.limit_date();
        self.lendings.insert(lending).await?;
        info!(
            lending = %number,
            %limit_date,
            correlation_id = ctx.correlation_id.as_deref(),
            "book lent"
        );
        Ok(number)
    }
}

#[async_trait]
impl CommandHandler<PatchLending> for LendingHandler {
    async fn handle(&self, ctx: &AppContext, cmd: PatchLending) -> Result<Version, AppError> {
        mutation::patch(ctx, &*self.lendings, &cmd.number, cmd.expected, cmd.patch).await
    }
}

#[async_trait]
impl CommandHandler<ReturnLending> for LendingHandler {
    async fn handle(&self, ctx: &AppContext, cmd: ReturnLending) -> Result<Version, AppError> {
        let commentary = cmd.commentary;
        mutation::mutate(
            ctx,
            &*self.lendings,
            &cmd.number,
            cmd.expected,
            |lending: &mut Lending, v| lending.set_returned(v, commentary),
        )
        .await
    }
}

#[async_trait]
impl QueryHandler<FindLending> for LendingHandler {
    async fn handle(&self, _ctx: &AppContext, q: FindLending) -> Result<Lending, AppError> {
        self.lendings.load(&q.number).await
    }
}
