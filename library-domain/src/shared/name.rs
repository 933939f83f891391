use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 人名（作者、读者）
///
/// 不可为空白；只允许字母、数字（含非 ASCII 字母），词与词之间用单个空格分隔。
#[value_object]
pub struct Name(String);

impl Name {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let name = Self(raw.into());
        name.validate()?;
        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Name {
    fn validate(&self) -> DomainResult<()> {
        if self.0.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "name",
                "Name cannot be blank, nor only white spaces",
            ));
        }
        if !self
            .0
            .split(' ')
            .all(|word| !word.is_empty() && word.chars().all(char::is_alphanumeric))
        {
            return Err(DomainError::invalid_argument(
                "name",
                "Name can only contain alphanumeric characters",
            ));
        }
        Ok(())
    }
}
