use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 书名：去除首尾空白后不可为空，最多 128 个字符
#[value_object]
pub struct Title(String);

impl Title {
    pub const MAX_LENGTH: usize = 128;

    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        let title = Self(raw.trim().to_string());
        title.validate()?;
        Ok(title)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Title {
    fn validate(&self) -> DomainResult<()> {
        if self.0.trim().is_empty() {
            return Err(DomainError::invalid_argument("title", "Title cannot be blank"));
        }
        if self.0.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::invalid_argument(
                "title",
                format!("Title has a maximum of {} characters", Self::MAX_LENGTH),
            ));
        }
        Ok(())
    }
}
