//! 乐观并发控制（OCC）
//!
//! 只做冲突检测：比较调用方读取到的版本与实体当前版本。
//! 不加锁、不重试；持久化时的原子比较交换由仓储负责。
//!
use crate::error::{DomainError, DomainResult};
use crate::value_object::Version;

/// 校验期望版本是否仍为当前版本
///
/// ```
/// use library_domain::concurrency::check_version;
/// use library_domain::value_object::Version;
///
/// assert!(check_version("Book", Version::from_value(3), Version::from_value(3)).is_ok());
/// assert!(check_version("Book", Version::from_value(4), Version::from_value(3)).is_err());
/// ```
pub fn check_version(entity: &'static str, current: Version, expected: Version) -> DomainResult<()> {
    if current == expected {
        return Ok(());
    }

    Err(DomainError::StaleState {
        entity,
        expected,
        actual: current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_version_is_accepted() {
        assert!(check_version("Author", Version::new(), Version::new()).is_ok());
    }

    #[test]
    fn older_and_newer_expectations_are_both_stale() {
        let current = Version::from_value(5);
        for expected in [Version::from_value(4), Version::from_value(6)] {
            match check_version("Author", current, expected) {
                Err(DomainError::StaleState {
                    entity,
                    expected: e,
                    actual,
                }) => {
                    assert_eq!(entity, "Author");
                    assert_eq!(e, expected);
                    assert_eq!(actual, current);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
