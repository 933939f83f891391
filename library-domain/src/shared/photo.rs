use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 照片文件引用（相对路径或 URI），文件内容由外部存储负责
#[value_object]
pub struct Photo(String);

impl Photo {
    pub fn new(path: impl Into<String>) -> DomainResult<Self> {
        let photo = Self(path.into());
        photo.validate()?;
        Ok(photo)
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Photo {
    fn validate(&self) -> DomainResult<()> {
        if self.0.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "photo",
                "Photo path cannot be blank",
            ));
        }
        Ok(())
    }
}
