//! 处理器注册
//!
//! 把各上下文的处理器挂到进程内总线上。仓储以 trait 对象传入，
//! 测试与示例使用 `Repositories::in_memory()`。
//!
use crate::author::{
    AuthorHandler, CreateAuthor, FindAuthor, FindAuthorsByName, FindCoAuthors, PatchAuthor,
    RemoveAuthorPhoto,
};
use crate::book::{BookHandler, CreateBook, FindBook, FindBooksByAuthor, FindBooksByGenre, PatchBook};
use crate::config::LibraryConfig;
use crate::error::AppError;
use crate::inmemory_command_bus::InMemoryCommandBus;
use crate::inmemory_query_bus::InMemoryQueryBus;
use crate::lending::{CreateLending, FindLending, LendingHandler, PatchLending, ReturnLending};
use crate::reader::{CreateReader, FindReader, PatchReader, ReaderHandler, RemoveReaderPhoto};
use crate::repository::{InMemoryRepository, Repository};
use library_domain::author::Author;
use library_domain::book::Book;
use library_domain::lending::Lending;
use library_domain::reader::Reader;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Repositories {
    pub authors: Arc<dyn Repository<Author>>,
    pub books: Arc<dyn Repository<Book>>,
    pub readers: Arc<dyn Repository<Reader>>,
    pub lendings: Arc<dyn Repository<Lending>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            authors: Arc::new(InMemoryRepository::<Author>::new()),
            books: Arc::new(InMemoryRepository::<Book>::new()),
            readers: Arc::new(InMemoryRepository::<Reader>::new()),
            lendings: Arc::new(InMemoryRepository::<Lending>::new()),
        }
    }
}

/// 注册全部命令与查询处理器；任何重复注册都会返回错误
pub fn register_handlers(
    commands: &InMemoryCommandBus,
    queries: &InMemoryQueryBus,
    repos: &Repositories,
    config: &LibraryConfig,
) -> Result<(), AppError> {
    config.validate()?;

    let authors = Arc::new(AuthorHandler::new(repos.authors.clone(), repos.books.clone()));
    commands.register::<CreateAuthor, _>(authors.clone())?;
    commands.register::<PatchAuthor, _>(authors.clone())?;
    commands.register::<RemoveAuthorPhoto, _>(authors.clone())?;
    queries.register::<FindAuthor, _>(authors.clone())?;
    queries.register::<FindAuthorsByName, _>(authors.clone())?;
    queries.register::<FindCoAuthors, _>(authors)?;

    let books = Arc::new(BookHandler::new(repos.books.clone(), repos.authors.clone()));
    commands.register::<CreateBook, _>(books.clone())?;
    commands.register::<PatchBook, _>(books.clone())?;
    queries.register::<FindBook, _>(books.clone())?;
    queries.register::<FindBooksByGenre, _>(books.clone())?;
    queries.register::<FindBooksByAuthor, _>(books)?;

    let readers = Arc::new(ReaderHandler::new(repos.readers.clone(), config.age_policy()));
    commands.register::<CreateReader, _>(readers.clone())?;
    commands.register::<PatchReader, _>(readers.clone())?;
    commands.register::<RemoveReaderPhoto, _>(readers.clone())?;
    queries.register::<FindReader, _>(readers)?;

    let lendings = Arc::new(LendingHandler::new(
        repos.lendings.clone(),
        repos.books.clone(),
        repos.readers.clone(),
        config.lending_policy(),
    ));
    commands.register::<CreateLending, _>(lendings.clone())?;
    commands.register::<PatchLending, _>(lendings.clone())?;
    commands.register::<ReturnLending, _>(lendings.clone())?;
    queries.register::<FindLending, _>(lendings)?;

    debug!(
        commands = commands.registered_commands().len(),
        queries = queries.registered_queries().len(),
        "library handlers registered"
    );
    Ok(())
}
