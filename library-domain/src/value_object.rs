//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象。本 crate 的值对象均为"构造即校验"：
//! 只能通过返回 `DomainResult` 的构造函数获得，一经创建便保证其不变量在整个生命周期成立。
//! 需要"修改"时，以同样的校验重新构造一个新值替换旧值。
//!

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// 值对象抽象
pub trait ValueObject {
    /// 校验当前值是否满足不变量
    fn validate(&self) -> DomainResult<()>;
}

/// 版本号（用于乐观锁和并发控制）
///
/// 实体创建时为 0，每次成功变更加一，永不回退。
///
/// # 示例
///
/// ```
/// use library_domain::value_object::Version;
///
/// let v1 = Version::new();
/// assert_eq!(v1.value(), 0);
/// assert!(v1.is_initial());
///
/// let v2 = v1.next();
/// assert_eq!(v2.value(), 1);
/// assert!(v2 > v1);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// 创建初始版本（版本号为 0）
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// 获取下一个版本号
    ///
    /// ```
    /// use library_domain::value_object::Version;
    ///
    /// assert_eq!(Version::from_value(10).next().value(), 11);
    /// ```
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// 检查是否为初始版本（从未被修改）
    pub const fn is_initial(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 从外部传入的版本标记解析，如 `3`、`"3"`、`W/"3"`（`If-Match` 头的常见形式）
///
/// ```
/// use library_domain::value_object::Version;
///
/// assert_eq!("\"7\"".parse::<Version>().unwrap(), Version::from_value(7));
/// assert!("seven".parse::<Version>().is_err());
/// ```
impl FromStr for Version {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let raw = s.trim();
        let raw = raw.strip_prefix("W/").unwrap_or(raw);
        let raw = raw
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .unwrap_or(raw);

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_argument(
                "version",
                format!("Version is not valid: {s}"),
            ));
        }

        raw.parse::<u64>().map(Self).map_err(|_| {
            DomainError::invalid_argument("version", format!("Version is out of range: {s}"))
        })
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self::from_value(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 测试初始版本
    #[test]
    fn test_version_new() {
        let v = Version::new();
        assert_eq!(v.value(), 0);
        assert!(v.is_initial());
        assert_eq!(v, Version::default());
    }

    // 测试版本递增与比较
    #[test]
    fn test_version_next_and_ordering() {
        let v = Version::new().next().next().next();
        assert_eq!(v.value(), 3);
        assert!(v > Version::from_value(2));
        assert!(!v.is_initial());
    }

    // 测试 Display 实现
    #[test]
    fn test_version_display() {
        assert_eq!(Version::new().to_string(), "v0");
        assert_eq!(Version::from_value(5).to_string(), "v5");
    }

    // 测试 If-Match 形式的解析
    #[test]
    fn test_version_parse_etag_forms() {
        assert_eq!("3".parse::<Version>().unwrap().value(), 3);
        assert_eq!("\"3\"".parse::<Version>().unwrap().value(), 3);
        assert_eq!("W/\"3\"".parse::<Version>().unwrap().value(), 3);
        assert_eq!(" 12 ".parse::<Version>().unwrap().value(), 12);
    }

    #[test]
    fn test_version_parse_rejects_garbage() {
        for raw in ["", "\"\"", "-1", "+1", "1.0", "\"3", "abc", "99999999999999999999999"] {
            let err = raw.parse::<Version>().unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidArgument { field: "version", .. }),
                "{raw:?} -> {err:?}"
            );
        }
    }

    // 测试序列化为裸数字
    #[test]
    fn test_version_serde() {
        let v = Version::from_value(42);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "42");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_version_u64_conversions() {
        let v: Version = 42u64.into();
        let n: u64 = v.into();
        assert_eq!(n, 42);
    }
}
