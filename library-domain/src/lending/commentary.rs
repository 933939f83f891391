use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 借阅归还时的备注，最多 1024 个字符
#[value_object]
pub struct Commentary(String);

impl Commentary {
    pub const MAX_LENGTH: usize = 1024;

    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let commentary = Self(raw.into());
        commentary.validate()?;
        Ok(commentary)
    }

    /// 空白输入视为没有备注
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

impl ValueObject for Commentary {
    fn validate(&self) -> DomainResult<()> {
        if self.0.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::invalid_argument(
                "commentary",
                format!("Commentary has a maximum of {} characters", Self::MAX_LENGTH),
            ));
        }
        Ok(())
    }
}
