use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 作者简介，不可为空白，最多 4096 个字符
#[value_object]
pub struct Bio(String);

impl Bio {
    pub const MAX_LENGTH: usize = 4096;

    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let bio = Self(raw.into());
        bio.validate()?;
        Ok(bio)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Bio {
    fn validate(&self) -> DomainResult<()> {
        if self.0.trim().is_empty() {
            return Err(DomainError::invalid_argument("bio", "Bio cannot be blank"));
        }
        if self.0.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::invalid_argument(
                "bio",
                format!("Bio has a maximum of {} characters", Self::MAX_LENGTH),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_text_up_to_limit() {
        assert_eq!(
            Bio::new("Some bio description").unwrap().as_str(),
            "Some bio description"
        );
        assert!(Bio::new("a".repeat(4096)).is_ok());
    }

    #[test]
    fn rejects_blank_and_too_long() {
        assert_eq!(Bio::new("   ").unwrap_err().reason(), "Bio cannot be blank");
        assert_eq!(
            Bio::new("a".repeat(4097)).unwrap_err().reason(),
            "Bio has a maximum of 4096 characters"
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(Bio::new("é".repeat(4096)).is_ok());
    }
}
