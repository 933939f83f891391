//! 图书馆业务参数
//!
//! 默认值：读者最低 18 岁、借期 14 天、逾期每日罚金 50 分。
//!
use crate::error::AppError;
use library_domain::lending::LendingPolicy;
use library_domain::reader::AgePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
#[serde(default)]
pub struct LibraryConfig {
    #[builder(default = AgePolicy::DEFAULT_MINIMUM_AGE)]
    pub minimum_reader_age: u32,
    #[builder(default = LendingPolicy::DEFAULT_DURATION_DAYS)]
    pub lending_duration_days: u32,
    #[builder(default = LendingPolicy::DEFAULT_FINE_PER_DAY_CENTS)]
    pub fine_per_day_cents: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LibraryConfig {
    /// 从 JSON 读取；缺失字段取默认值
    ///
    /// ```
    /// use library_application::config::LibraryConfig;
    ///
    /// let config = LibraryConfig::from_json(r#"{"lending_duration_days": 21}"#).unwrap();
    /// assert_eq!(config.lending_duration_days, 21);
    /// assert_eq!(config.minimum_reader_age, 18);
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.lending_duration_days == 0 {
            return Err(AppError::Config(
                "lending_duration_days must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn age_policy(&self) -> AgePolicy {
        AgePolicy::new(self.minimum_reader_age)
    }

    pub fn lending_policy(&self) -> LendingPolicy {
        LendingPolicy::new(self.lending_duration_days, self.fine_per_day_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_policies() {
        let config = LibraryConfig::default();
        assert_eq!(config.age_policy(), AgePolicy::default());
        assert_eq!(config.lending_policy(), LendingPolicy::default());
        assert_eq!(LibraryConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn builder_overrides_single_fields() {
        let config = LibraryConfig::builder().fine_per_day_cents(75).build();
        assert_eq!(config.lending_policy(), LendingPolicy::new(14, 75));
        assert_eq!(config.minimum_reader_age, 18);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            LibraryConfig::from_json(r#"{"lending_duration_days": 0}"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            LibraryConfig::from_json(r#"{"minimum_reader_age": "eighteen"}"#),
            Err(AppError::Config(_))
        ));
    }
}
