//! 作者相关的命令与查询
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
use library_domain::author::{Author, AuthorNumber, AuthorPatch};
use library_domain::book::Book;
use library_domain::value_object::Version;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// 新建作者，编号取现有最大编号加一
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
    pub bio: String,
    pub photo: Option<String>,
}

impl Command for CreateAuthor {
    const NAME: &'static str = "CreateAuthor";
    type Output = AuthorNumber;
}

#[derive(Debug, Clone)]
pub struct PatchAuthor {
    pub number: AuthorNumber,
    pub expected: Version,
    pub patch: AuthorPatch,
}

impl Command for PatchAuthor {
    const NAME: &'static str = "PatchAuthor";
    type Output = Version;
}

#[derive(Debug, Clone)]
pub struct RemoveAuthorPhoto {
    pub number: AuthorNumber,
    pub expected: Version,
}

impl Command for RemoveAuthorPhoto {
    const NAME: &'static str = "RemoveAuthorPhoto";
    type Output = Version;
}

#[derive(Debug, Clone)]
pub struct FindAuthor {
    pub number: AuthorNumber,
}

impl Query for FindAuthor {
    const NAME: &'static str = "FindAuthor";
    type Output = Author;
}

/// 按姓名前缀查找（不区分大小写），结果按编号排序
#[derive(Debug, Clone)]
pub struct FindAuthorsByName {
    pub prefix: String,
}

impl Query for FindAuthorsByName {
    const NAME: &'static str = "FindAuthorsByName";
    type Output = Vec<Author>;
}

/// 与指定作者合写过图书的其他作者
#[derive(Debug, Clone)]
pub struct FindCoAuthors {
    pub number: AuthorNumber,
}

impl Query for FindCoAuthors {
    const NAME: &'static str = "FindCoAuthors";
    type Output = Vec<Author>;
}

pub struct AuthorHandler {
    authors: Arc<dyn Repository<Author>>,
    books: Arc<dyn Repository<Book>>,
}

impl AuthorHandler {
    pub fn new(authors: Arc<dyn Repository<Author>>, books: Arc<dyn Repository<Book>>) -> Self {
        Self { authors, books }
    }
}

#[async_trait]
impl CommandHandler<CreateAuthor> for AuthorHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreateAuthor) -> Result<AuthorNumber, AppError> {
        let next = self
            .authors
            .find_all()
            .await?
            .iter()
            .map(|a| *a.number().value())
            .max()
            .unwrap_or(0)
            + 1;
        let number = AuthorNumber::new(next);

        let author = Author::new(number, cmd.name, cmd.bio, cmd.photo)?;
        self.authors.insert(author).await?;
        info!(
            author = %number,
            correlation_id = ctx.correlation_id.as_deref(),
            "author created"
        );
        Ok(number)
    }
}

#[async_trait]
impl CommandHandler<PatchAuthor> for AuthorHandler {
    async fn handle(&self, ctx: &AppContext, cmd: PatchAuthor) -> Result<Version, AppError> {
        mutation::patch(ctx, &*self.authors, &cmd.number, cmd.expected, cmd.patch).await
    }
}

#[async_trait]
impl CommandHandler<RemoveAuthorPhoto> for AuthorHandler {
    async fn handle(&self, ctx: &AppContext, cmd: RemoveAuthorPhoto) -> Result<Version, AppError> {
        mutation::remove_photo(ctx, &*self.authors, &cmd.number, cmd.expected).await
    }
}

#[async_trait]
impl QueryHandler<FindAuthor> for AuthorHandler {
    async fn handle(&self, _ctx: &AppContext, q: FindAuthor) -> Result<Author, AppError> {
        self.authors.load(&q.number).await
    }
}

#[async_trait]
impl QueryHandler<FindAuthorsByName> for AuthorHandler {
    async fn handle(&self, _ctx: &AppContext, q: FindAuthorsByName) -> Result<Vec<Author>, AppError> {
        let prefix = q.prefix.to_lowercase();
        let mut found: Vec<_> = self
            .authors
            .find_all()
            .await?
            .into_iter()
            .filter(|a| a.name().as_str().to_lowercase().starts_with(&prefix))
            .collect();
        found.sort_by_key(|a| a.number());
        Ok(found)
    }
}

#[async_trait]
impl QueryHandler<FindCoAuthors> for AuthorHandler {
    async fn handle(&self, _ctx: &AppContext, q: FindCoAuthors) -> Result<Vec<Author>, AppError> {
        // 作者本身必须存在
        self.authors.load(&q.number).await?;

        let co_authors: BTreeSet<AuthorNumber> = self
            .books
            .find_all()
            .await?
            .iter()
            .filter(|b| b.is_written_by(&q.number))
            .flat_map(|b| b.authors().iter().copied())
            .filter(|n| *n != q.number)
            .collect();

        let mut found = Vec::with_capacity(co_authors.len());
        for number in co_authors {
            if let Some(author) = self.authors.find(&number).await? {
                found.push(author);
            }
        }
        Ok(found)
    }
}
