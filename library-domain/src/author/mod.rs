//! 作者上下文
//!
mod author;
mod bio;

pub use author::{Author, AuthorNumber, AuthorPatch};
pub use bio::Bio;
