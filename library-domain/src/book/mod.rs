//! 图书上下文：ISBN、书名、简介、类别与图书聚合
//!
mod book;
mod description;
mod genre;
mod isbn;
mod title;

pub use book::{Book, BookPatch};
pub use description::Description;
pub use genre::Genre;
pub use isbn::Isbn;
pub use title::Title;
