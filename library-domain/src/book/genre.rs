use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 图书类别（如 "Fantasy"），以名称区分
#[value_object]
#[derive(PartialOrd, Ord)]
pub struct Genre(String);

impl Genre {
    pub const MAX_LENGTH: usize = 100;

    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        let genre = Self(raw.trim().to_string());
        genre.validate()?;
        Ok(genre)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Genre {
    fn validate(&self) -> DomainResult<()> {
        if self.0.is_empty() {
            return Err(DomainError::invalid_argument("genre", "Genre cannot be blank"));
        }
        if self.0.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::invalid_argument(
                "genre",
                format!("Genre has a maximum of {} characters", Self::MAX_LENGTH),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_genres() {
        assert_eq!(Genre::new("Fantasy").unwrap().to_string(), "Fantasy");
        let max = "A".repeat(100);
        assert_eq!(Genre::new(max.clone()).unwrap().as_str(), max);
    }

    #[test]
    fn invalid_genres() {
        assert!(Genre::new(" ").is_err());
        assert!(Genre::new("A".repeat(101)).is_err());
    }
}
