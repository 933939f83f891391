use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 图书简介，最多 4096 个字符
///
/// 简介是可选的：空白输入表示"没有简介"，见 [`Description::optional`]。
#[value_object]
pub struct Description(String);

impl Description {
    pub const MAX_LENGTH: usize = 4096;

    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let description = Self(raw.into());
        description.validate()?;
        Ok(description)
    }

    /// 空白输入返回 `Ok(None)`，其余按 `new` 校验
    pub fn optional(raw: impl Into<String>) -> DomainResult<Option<Self>> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Self::new(raw).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Description {
    fn validate(&self) -> DomainResult<()> {
        if self.0.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "description",
                "Description cannot be blank",
            ));
        }
        if self.0.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::invalid_argument(
                "description",
                format!("Description has a maximum of {} characters", Self::MAX_LENGTH),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_maps_blank_to_none() {
        assert_eq!(Description::optional("").unwrap(), None);
        assert_eq!(Description::optional("   ").unwrap(), None);
        let d = Description::optional("This is a valid description.").unwrap().unwrap();
        assert_eq!(d.as_str(), "This is a valid description.");
    }

    #[test]
    fn rejects_too_long() {
        let err = Description::optional("a".repeat(5000)).unwrap_err();
        assert!(err.reason().contains("maximum of 4096 characters"));
        assert!(Description::new("a".repeat(4096)).is_ok());
    }
}
