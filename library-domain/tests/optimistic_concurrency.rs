use anyhow::Result as AnyResult;
use library_domain::author::{Author, AuthorNumber, AuthorPatch};
use library_domain::book::{Book, BookPatch, Genre};
use library_domain::entity::{Entity, EntityWithPhoto, Patchable};
use library_domain::error::DomainError;
use library_domain::patch::Patch;
use library_domain::value_object::Version;

fn book() -> AnyResult<Book> {
    Ok(Book::builder()
        .isbn("9782826012092")
        .title("T")
        .genre(Genre::new("G")?)
        .authors(vec![AuthorNumber::new(1)])
        .build()?)
}

// 模拟两个调用方读取同一版本后先后提交
#[test]
fn second_writer_with_same_version_loses() -> AnyResult<()> {
    let mut book = book()?;
    let read_by_alice = book.version();
    let read_by_bob = book.version();

    book.apply_patch(
        read_by_alice,
        BookPatch {
            title: Patch::Set("Alice".into()),
            ..Default::default()
        },
    )?;

    let err = book
        .apply_patch(
            read_by_bob,
            BookPatch {
                title: Patch::Set("Bob".into()),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::StaleState {
            entity: "Book",
            expected: Version::new(),
            actual: Version::from_value(1),
        }
    );
    assert_eq!(book.title().as_str(), "Alice");

    // 重新读取版本后可以成功
    book.apply_patch(
        book.version(),
        BookPatch {
            title: Patch::Set("Bob".into()),
            ..Default::default()
        },
    )?;
    assert_eq!(book.title().as_str(), "Bob");
    assert_eq!(book.version(), Version::from_value(2));
    Ok(())
}

#[test]
fn version_advances_once_per_successful_mutation() -> AnyResult<()> {
    let mut author = Author::new(
        AuthorNumber::new(9),
        "Alexandre Pereira",
        "Some bio",
        Some("photos/ap.jpg".into()),
    )?;

    for step in 0..3u64 {
        assert_eq!(author.version().value(), step);
        author.apply_patch(
            author.version(),
            AuthorPatch {
                bio: Patch::Set(format!("Bio revision {step}")),
                ..Default::default()
            },
        )?;
    }

    // 失败的变更不推进版本
    assert!(
        author
            .apply_patch(
                author.version(),
                AuthorPatch {
                    name: Patch::Set("Bad!".into()),
                    ..Default::default()
                },
            )
            .is_err()
    );
    assert_eq!(author.version(), Version::from_value(3));

    author.remove_photo(Version::from_value(3))?;
    assert_eq!(author.version(), Version::from_value(4));
    assert!(author.photo().is_none());
    assert!(author.remove_photo(Version::from_value(3)).unwrap_err().is_stale());
    Ok(())
}

#[test]
fn patch_from_json_distinguishes_absent_and_null() -> AnyResult<()> {
    let mut author = Author::new(
        AuthorNumber::new(3),
        "Alex",
        "Bio",
        Some("photos/alex.jpg".into()),
    )?;

    let untouched: AuthorPatch = serde_json::from_str(r#"{"bio":"Updated bio"}"#)?;
    author.apply_patch(Version::new(), untouched)?;
    assert!(author.photo().is_some());

    let cleared: AuthorPatch = serde_json::from_str(r#"{"photo":null}"#)?;
    author.apply_patch(Version::from_value(1), cleared)?;
    assert!(author.photo().is_none());
    assert_eq!(author.bio().as_str(), "Updated bio");

    let invalid: AuthorPatch = serde_json::from_str(r#"{"name":null}"#)?;
    let err = author.apply_patch(Version::from_value(2), invalid).unwrap_err();
    assert_eq!(err.reason(), "name cannot be cleared");
    Ok(())
}
