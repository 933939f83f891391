//! 图书相关的命令与查询
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
use library_domain::author::{Author, AuthorNumber};
use library_domain::book::{Book, BookPatch, Genre, Isbn};
use library_domain::patch::Patch;
use library_domain::value_object::Version;
use std::sync::Arc;
use tracing::info;

/// 新建图书；所有作者必须已存在
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub isbn: String,
    pub title: String,
    pub description: Option<String>,
    pub genre: String,
    pub authors: Vec<AuthorNumber>,
    pub cover: Option<String>,
}

impl Command for CreateBook {
    const NAME: &'static str = "CreateBook";
    type Output = Isbn;
}

#[derive(Debug, Clone)]
pub struct PatchBook {
    pub isbn: Isbn,
    pub expected: Version,
    pub patch: BookPatch,
}

impl Command for PatchBook {
    const NAME: &'static str = "PatchBook";
    type Output = Version;
}

#[derive(Debug, Clone)]
pub struct FindBook {
    pub isbn: Isbn,
}

impl Query for FindBook {
    const NAME: &'static str = "FindBook";
    type Output = Book;
}

/// 按类别名称查找（不区分大小写）
#[derive(Debug, Clone)]
pub struct FindBooksByGenre {
    pub genre: String,
}

impl Query for FindBooksByGenre {
    const NAME: &'static str = "FindBooksByGenre";
    type Output = Vec<Book>;
}

#[derive(Debug, Clone)]
pub struct FindBooksByAuthor {
    pub author: AuthorNumber,
}

impl Query for FindBooksByAuthor {
    const NAME: &'static str = "FindBooksByAuthor";
    type Output = Vec<Book>;
}

pub struct BookHandler {
    books: Arc<dyn Repository<Book>>,
    authors: Arc<dyn Repository<Author>>,
}

impl BookHandler {
    pub fn new(books: Arc<dyn Repository<Book>>, authors: Arc<dyn Repository<Author>>) -> Self {
        Self { books, authors }
    }

    async fn ensure_authors_exist(&self, authors: &[AuthorNumber]) -> Result<(), AppError> {
        for number in authors {
            self.authors.load(number).await?;
        }
        Ok(())
    }

    async fn books_matching<F>(&self, keep: F) -> Result<Vec<Book>, AppError>
    where
        F: Fn(&Book) -> bool + Send,
    {
        let mut found: Vec<_> = self
            .books
            .find_all()
            .await?
            .into_iter()
            .filter(|b| keep(b))
            .collect();
        found.sort_by(|a, b| a.isbn().cmp(b.isbn()));
        Ok(found)
    }
}

#[async_trait]
impl CommandHandler<CreateBook> for BookHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreateBook) -> Result<Isbn, AppError> {
        self.ensure_authors_exist(&cmd.authors).await?;

        let book = Book::builder()
            .isbn(cmd.isbn)
            .title(cmd.title)
            .maybe_description(cmd.description)
            .genre(Genre::new(cmd.genre)?)
            .authors(cmd.authors)
            .maybe_cover(cmd.cover)
            .build()?;
        let isbn = book.isbn().clone();

        self.books.insert(book).await?;
        info!(
            %isbn,
            correlation_id = ctx.correlation_id.as_deref(),
            "book created"
        );
        Ok(isbn)
    }
}

#[async_trait]
impl CommandHandler<PatchBook> for BookHandler {
    async fn handle(&self, ctx: &AppContext, cmd: PatchBook) -> Result<Version, AppError> {
        if let Patch::Set(authors) = &cmd.patch.authors {
            self.ensure_authors_exist(authors).await?;
        }
        mutation::patch(ctx, &*self.books, &cmd.isbn, cmd.expected, cmd.patch).await
    }
}

#[async_trait]
impl QueryHandler<FindBook> for BookHandler {
    async fn handle(&self, _ctx: &AppContext, q: FindBook) -> Result<Book, AppError> {
        self.books.load(&q.isbn).await
    }
}

#[async_trait]
impl QueryHandler<FindBooksByGenre> for BookHandler {
    async fn handle(&self, _ctx: &AppContext, q: FindBooksByGenre) -> Result<Vec<Book>, AppError> {
        let genre = q.genre.trim().to_lowercase();
        self.books_matching(|b| b.genre().as_str().to_lowercase() == genre)
            .await
    }
}

#[async_trait]
impl QueryHandler<FindBooksByAuthor> for BookHandler {
    async fn handle(&self, _ctx: &AppContext, q: FindBooksByAuthor) -> Result<Vec<Book>, AppError> {
        self.authors.load(&q.author).await?;
        self.books_matching(|b| b.is_written_by(&q.author)).await
    }
}
