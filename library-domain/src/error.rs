//! 领域层统一错误定义
//!
//! 值对象校验、业务策略与乐观锁冲突的最小必要集合。
//! 所有错误均在构造或变更时同步抛出，不延迟。
//!
use crate::value_object::Version;
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 字段值不满足格式/长度/范围规则
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// 值格式合法，但违反业务策略（如读者最低年龄）
    #[error("policy violation: {reason}")]
    PolicyViolation { reason: String },

    /// 调用方持有的版本已过期，需要重新读取后重试
    #[error("stale state: entity={entity}, expected={expected}, actual={actual}")]
    StaleState {
        entity: &'static str,
        expected: Version,
        actual: Version,
    },
}

impl DomainError {
    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub fn policy_violation(reason: impl Into<String>) -> Self {
        Self::PolicyViolation {
            reason: reason.into(),
        }
    }

    /// 人类可读的规则说明（不含字段前缀）
    pub fn reason(&self) -> String {
        match self {
            Self::InvalidArgument { reason, .. } | Self::PolicyViolation { reason } => reason.clone(),
            Self::StaleState { .. } => self.to_string(),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleState { .. })
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
