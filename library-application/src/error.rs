use library_domain::error::DomainError;

/// 应用层错误
///
/// 领域错误原样包装；`is_conflict` / `is_client_error` 供外层（如 HTTP）映射状态码。
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("already exists: {entity} {id}")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("handler already registered: query={query}")]
    AlreadyRegisteredQuery { query: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("config: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }

    /// 版本冲突或重复创建（对应 409）
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::StaleState { .. }) | Self::AlreadyExists { .. }
        )
    }

    /// 调用方输入不合法（对应 400）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::InvalidArgument { .. } | DomainError::PolicyViolation { .. })
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
