use std::collections::HashSet;

use bon::bon;
use library_macros::entity;
use serde::{Deserialize, Serialize};

use super::{Description, Genre, Isbn, Title};
use crate::author::AuthorNumber;
use crate::entity::Patchable;
use crate::error::{DomainError, DomainResult};
use crate::patch::Patch;
use crate::shared::Photo;
use crate::value_object::Version;

/// 图书聚合，以 ISBN 为标识
///
/// 作者以编号弱引用，图书不负责作者的生命周期。
#[entity(id = Isbn)]
pub struct Book {
    title: Title,
    description: Option<Description>,
    genre: Genre,
    authors: Vec<AuthorNumber>,
    cover: Option<Photo>,
}

/// 图书部分更新请求
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub title: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub genre: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub authors: Patch<Vec<AuthorNumber>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub cover: Patch<String>,
}

#[bon]
impl Book {
    /// ```
    /// use library_domain::author::AuthorNumber;
    /// use library_domain::book::{Book, Genre};
    ///
    /// let book = Book::builder()
    ///     .isbn("9782826012092")
    ///     .title("Encantos de contar")
    ///     .genre(Genre::new("Fantasia").unwrap())
    ///     .authors(vec![AuthorNumber::new(1)])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(book.isbn().as_str(), "9782826012092");
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] isbn: String,
        #[builder(into)] title: String,
        #[builder(into)] description: Option<String>,
        genre: Genre,
        authors: Vec<AuthorNumber>,
        #[builder(into)] cover: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: Isbn::new(isbn)?,
            version: Version::new(),
            title: Title::new(title)?,
            description: description.map(Description::optional).transpose()?.flatten(),
            genre,
            authors: validate_authors(authors)?,
            cover: cover.map(Photo::new).transpose()?,
        })
    }
}

impl Book {
    pub fn isbn(&self) -> &Isbn {
        &self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub fn genre(&self) -> &Genre {
        &self.genre
    }

    pub fn authors(&self) -> &[AuthorNumber] {
        &self.authors
    }

    pub fn cover(&self) -> Option<&Photo> {
        self.cover.as_ref()
    }

    pub fn is_written_by(&self, author: &AuthorNumber) -> bool {
        self.authors.contains(author)
    }
}

impl Patchable for Book {
    type Patch = BookPatch;

    fn apply_patch(&mut self, expected: Version, patch: BookPatch) -> DomainResult<()> {
        self.guard_version(expected)?;

        let title = patch.title.required("title")?.map(Title::new).transpose()?;
        let description = patch.description.try_map(Description::optional)?.flatten();
        let genre = patch.genre.required("genre")?.map(Genre::new).transpose()?;
        let authors = patch
            .authors
            .required("authors")?
            .map(validate_authors)
            .transpose()?;
        let cover = patch.cover.try_map(Photo::new)?;

        if let Some(title) = title {
            self.title = title;
        }
        description.apply_to(&mut self.description);
        if let Some(genre) = genre {
            self.genre = genre;
        }
        if let Some(authors) = authors {
            self.authors = authors;
        }
        cover.apply_to(&mut self.cover);

        self.advance_version();
        Ok(())
    }
}

fn validate_authors(authors: Vec<AuthorNumber>) -> DomainResult<Vec<AuthorNumber>> {
    if authors.is_empty() {
        return Err(DomainError::invalid_argument(
            "authors",
            "Book must have at least one author",
        ));
    }
    let mut seen = HashSet::with_capacity(authors.len());
    if !authors.iter().all(|a| seen.insert(a)) {
        return Err(DomainError::invalid_argument(
            "authors",
            "Book authors must be unique",
        ));
    }
    Ok(authors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    const ISBN: &str = "9782826012092";

    fn fantasy() -> Genre {
        Genre::new("Fantasy").unwrap()
    }

    fn book() -> Book {
        Book::builder()
            .isbn(ISBN)
            .title("T")
            .description("A descriptive book description.")
            .genre(fantasy())
            .authors(vec![AuthorNumber::new(1)])
            .build()
            .unwrap()
    }

    #[test]
    fn new_book_starts_at_initial_version() {
        let book = book();
        assert_eq!(book.id().as_str(), ISBN);
        assert!(book.version().is_initial());
        assert_eq!(book.title().as_str(), "T");
        assert!(book.cover().is_none());
        assert!(book.is_written_by(&AuthorNumber::new(1)));
    }

    #[test]
    fn construction_validates_every_field() {
        let base = || {
            Book::builder()
                .isbn(ISBN)
                .title("Valid Title")
                .genre(fantasy())
        };

        assert!(base().authors(vec![]).build().is_err());
        assert!(
            base()
                .authors(vec![AuthorNumber::new(1), AuthorNumber::new(1)])
                .build()
                .is_err()
        );
        assert!(
            Book::builder()
                .isbn("9780306406156")
                .title("Valid Title")
                .genre(fantasy())
                .authors(vec![AuthorNumber::new(1)])
                .build()
                .is_err()
        );
        assert!(
            Book::builder()
                .isbn(ISBN)
                .title("  ")
                .genre(fantasy())
                .authors(vec![AuthorNumber::new(1)])
                .build()
                .is_err()
        );
        assert!(
            base()
                .authors(vec![AuthorNumber::new(1), AuthorNumber::new(2)])
                .build()
                .is_ok()
        );
    }

    #[test]
    fn blank_description_becomes_none() {
        let book = Book::builder()
            .isbn(ISBN)
            .title("T")
            .description("   ")
            .genre(fantasy())
            .authors(vec![AuthorNumber::new(1)])
            .build()
            .unwrap();
        assert!(book.description().is_none());
    }

    // 仅更新标题，其余字段保持不变
    #[test]
    fn title_only_patch_keeps_other_fields() {
        let mut book = book();
        let before = book.clone();

        book.apply_patch(
            Version::new(),
            BookPatch {
                title: Patch::Set("New Title".into()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(book.title().as_str(), "New Title");
        assert_eq!(book.version(), Version::from_value(1));
        assert_eq!(book.isbn(), before.isbn());
        assert_eq!(book.genre(), before.genre());
        assert_eq!(book.authors(), before.authors());
        assert_eq!(book.description(), before.description());
    }

    #[test]
    fn replaying_patch_with_same_version_is_stale() {
        let mut book = book();
        let patch = BookPatch {
            title: Patch::Set("New Title".into()),
            ..Default::default()
        };

        book.apply_patch(Version::new(), patch.clone()).unwrap();
        let err = book.apply_patch(Version::new(), patch).unwrap_err();

        assert!(err.is_stale());
        assert_eq!(book.version(), Version::from_value(1));
    }

    // 任一字段校验失败时不保留任何修改
    #[test]
    fn invalid_field_leaves_book_untouched() {
        let mut book = book();
        let before = book.clone();

        let err = book
            .apply_patch(
                Version::new(),
                BookPatch {
                    title: Patch::Set("Changed".into()),
                    genre: Patch::Set("G".repeat(101)),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument { field: "genre", .. }));
        assert_eq!(book.title(), before.title());
        assert_eq!(book.version(), before.version());
    }

    #[test]
    fn mandatory_fields_cannot_be_cleared() {
        let mut book = book();
        for patch in [
            BookPatch {
                title: Patch::Clear,
                ..Default::default()
            },
            BookPatch {
                genre: Patch::Clear,
                ..Default::default()
            },
            BookPatch {
                authors: Patch::Clear,
                ..Default::default()
            },
            BookPatch {
                authors: Patch::Set(vec![]),
                ..Default::default()
            },
        ] {
            let err = book.apply_patch(Version::new(), patch).unwrap_err();
            assert!(matches!(err, DomainError::InvalidArgument { .. }), "{err:?}");
        }
        assert!(book.version().is_initial());
    }

    #[test]
    fn optional_fields_can_be_cleared_or_set() {
        let mut book = book();
        book.apply_patch(
            Version::new(),
            BookPatch {
                description: Patch::Clear,
                cover: Patch::Set("covers/t.png".into()),
                authors: Patch::Set(vec![AuthorNumber::new(2), AuthorNumber::new(3)]),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(book.description().is_none());
        assert_eq!(book.cover().map(|p| p.path()), Some("covers/t.png"));
        assert_eq!(book.authors(), &[AuthorNumber::new(2), AuthorNumber::new(3)]);

        book.apply_patch(
            Version::from_value(1),
            BookPatch {
                description: Patch::Set(" ".into()),
                cover: Patch::Clear,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(book.description().is_none());
        assert!(book.cover().is_none());
        assert_eq!(book.version(), Version::from_value(2));
    }

    #[test]
    fn empty_patch_still_bumps_version() {
        let mut book = book();
        book.apply_patch(Version::new(), BookPatch::default()).unwrap();
        assert_eq!(book.version(), Version::from_value(1));
    }

    #[test]
    fn patch_deserializes_from_partial_json() {
        let patch: BookPatch =
            serde_json::from_str(r#"{"title":"New Title","description":null}"#).unwrap();
        assert_eq!(patch.title, Patch::Set("New Title".into()));
        assert_eq!(patch.description, Patch::Clear);
        assert_eq!(patch.genre, Patch::Keep);
        assert_eq!(patch.authors, Patch::Keep);
    }

    #[test]
    fn serializes_snapshot_with_version() {
        let json = serde_json::to_value(book()).unwrap();
        assert_eq!(json["id"], ISBN);
        assert_eq!(json["version"], 0);
        assert_eq!(json["title"], "T");
        assert_eq!(json["authors"], serde_json::json!([1]));
    }
}
