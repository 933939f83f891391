use library_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 读者电话：9 位数字，以 9（移动）或 2（固话）开头
#[value_object]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let phone = Self(raw.into());
        phone.validate()?;
        Ok(phone)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PhoneNumber {
    fn validate(&self) -> DomainResult<()> {
        let bytes = self.0.as_bytes();
        let valid = bytes.len() == 9
            && matches!(bytes[0], b'9' | b'2')
            && bytes.iter().all(u8::is_ascii_digit);
        if !valid {
            return Err(DomainError::invalid_argument(
                "phone_number",
                format!("Phone number is not valid: {}", self.0),
            ));
        }
        Ok(())
    }
}
