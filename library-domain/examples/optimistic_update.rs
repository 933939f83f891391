//! 乐观并发更新示例
//!
//! 展示读取版本、按版本打补丁以及过期版本被拒绝的完整流程。
//!
//! 运行示例：
//! ```bash
//! cargo run -p library-domain --example optimistic_update
//! ```

use library_domain::author::AuthorNumber;
use library_domain::book::{Book, BookPatch, Genre};
use library_domain::entity::{Entity, Patchable};
use library_domain::error::DomainResult;
use library_domain::patch::Patch;

fn main() -> DomainResult<()> {
    println!("=== 乐观并发更新示例 ===\n");

    let mut book = Book::builder()
        .isbn("9782826012092")
        .title("Encantos de contar")
        .genre(Genre::new("Infantil")?)
        .authors(vec![AuthorNumber::new(1)])
        .build()?;
    println!("1. 创建图书: {} ({})", book.title(), book.version());

    let seen = book.version();
    let patch = BookPatch {
        title: Patch::Set("  Encantos de contar, 2.ª edição  ".into()),
        ..Default::default()
    };
    book.apply_patch(seen, patch.clone())?;
    println!("2. 更新书名: {:?} -> {}", book.title().as_str(), book.version());

    match book.apply_patch(seen, patch) {
        Ok(()) => println!("3. 意外成功"),
        Err(err) => println!("3. 使用过期版本重试被拒绝: {err}"),
    }

    let bad = BookPatch {
        title: Patch::Set("Valid".into()),
        authors: Patch::Set(vec![]),
        ..Default::default()
    };
    if let Err(err) = book.apply_patch(book.version(), bad) {
        println!("4. 校验失败，整体不生效: {err}");
    }
    println!("   书名仍为 {:?}，版本 {}", book.title().as_str(), book.version());

    Ok(())
}
